pub mod bank;
pub mod init;
pub mod play;
