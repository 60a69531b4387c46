pub mod config;
pub mod emotions;
pub mod session;
