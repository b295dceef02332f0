pub mod a001_project;
pub mod a002_property;
pub mod a003_broker;
pub mod a004_buyer;
pub mod a005_document;
