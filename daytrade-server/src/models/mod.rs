//! Domain models with validation at construction
//!
//! User input that the API checks (credentials, path ids) is validated
//! when creating these types. Invalid input returns ValidationError, not panic.

pub mod credentials;
pub mod validation;

pub use credentials::{Password, Username};
pub use validation::ValidationError;
