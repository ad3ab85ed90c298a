pub mod init;
pub mod summarize;
pub mod upload;
