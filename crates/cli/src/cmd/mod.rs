mod build;
mod clean;
mod configure;
mod status;

pub use build::{BuildKind, cmd_build};
pub use clean::cmd_clean;
pub use configure::cmd_configure;
pub use status::cmd_status;
