pub mod assignment;
pub mod details;
pub mod list;
