pub mod check;
pub mod config;
pub mod habit;
pub mod show;
