pub mod extract;
pub mod init;
