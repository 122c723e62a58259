//! nonstop-core: Allowlist authorization for agent-proposed shell commands.

pub mod allowlist;
pub mod config;
pub mod decision;
mod error;
pub mod extract;
pub mod hook;
pub mod policy;
pub mod segment;
pub mod validate;

pub use allowlist::{Allowlist, DEFAULT_ALLOWED_COMMANDS};
pub use config::{Config, ConfigStore};
pub use decision::Decision;
pub use error::{CoreError, ParseError};
pub use extract::extract_commands;
pub use hook::{HookInput, HookOutput};
pub use policy::CommandPolicy;
pub use segment::split_segments;
pub use validate::{Rejection, RestrictedCommand};
