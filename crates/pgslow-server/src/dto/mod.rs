//! Data Transfer Objects for API requests and responses.

mod response;

pub use response::*;
