//! HTTP route handlers.

pub mod argument_links;
pub mod arguments;
pub mod health;
pub mod links;
pub mod macroarguments;
pub mod subjects;
pub mod views;

use crate::error::AppError;

/// Parse a numeric path id.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {raw}")))
}
