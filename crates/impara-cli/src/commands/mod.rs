pub mod init;
pub mod practice;
pub mod status;
pub mod tables;
pub mod validate;
