pub mod error;
pub mod models;
pub mod validation;

pub use error::*;
pub use models::*;
