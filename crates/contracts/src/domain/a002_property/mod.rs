pub mod aggregate;

pub use aggregate::{Property, PropertySnapshot, PropertyStatus};
