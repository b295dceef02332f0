//! Types shared between the admin console and the REST service, plus the
//! pure rules the console enforces before anything is submitted.

pub mod domain;
pub mod shared;
pub mod system;
