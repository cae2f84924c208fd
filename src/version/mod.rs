pub mod actions;
pub mod parser;
pub mod selector;

pub use actions::{VersionAction, build_actions};
pub use parser::{ParsedVersion, SUPPORTED_PREFIXES, parse};
pub use selector::{LockConstraint, LockMode, select_highest};
