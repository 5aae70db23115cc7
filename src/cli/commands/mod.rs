mod init;
mod search;
mod seed;

pub use init::cmd_init;
pub use search::cmd_search;
pub use seed::cmd_seed;
