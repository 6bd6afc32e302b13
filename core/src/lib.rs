//! Report Card Core Library
//!
//! Contains the report card record, the data access layer and the
//! optional backend-as-a-service client used by the API server.

pub mod adapter;
pub mod backend;
pub mod domain;
pub mod error;

pub use error::{CoreError, Result};
