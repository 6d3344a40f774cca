pub mod init;
pub mod review;
pub mod show;
pub mod take;
pub mod validate;
