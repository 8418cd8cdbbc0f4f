pub mod init;
pub mod stale;
