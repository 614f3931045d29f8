//! CLI command implementations.

mod check;
mod preview;
mod rename;

pub use check::cmd_check;
pub use preview::cmd_preview;
pub use rename::cmd_rename;
