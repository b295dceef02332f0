pub mod aggregate;

pub use aggregate::Broker;
