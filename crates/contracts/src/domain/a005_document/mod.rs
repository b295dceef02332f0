pub mod aggregate;

pub use aggregate::DocumentMeta;
