mod config;
mod constants;
mod protocol;
mod report;

pub use config::*;
pub use constants::*;
pub use protocol::*;
pub use report::*;
