pub mod error;
pub mod sanitize;
pub mod traits;

pub use error::{
    AppError, EncodingError, InvalidLineItem, LineItemIssue, PersistenceError, Result,
    ValidationError,
};
