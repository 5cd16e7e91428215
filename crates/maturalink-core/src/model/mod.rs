//! Data model for MaturaLink entities.
//!
//! Records are serialized in camelCase so the JSON shape matches what the
//! web frontend expects (`subjectId`, `fromArgumentLinks`, ...).

mod argument;
mod argument_link;
mod link;
mod macroargument;
mod subject;

pub use argument::{ArgumentDetail, ArgumentElement, ArgumentPatch, NewArgument, SubjectRef};
pub use argument_link::{ArgumentLink, ArgumentLinkDetail, ArgumentLinkPatch, NewArgumentLink};
pub use link::{LinkDetail, LinkElement, LinkPatch, NewLink};
pub use macroargument::{Macroargument, NewMacroargument};
pub use subject::{NewSubject, Subject, SubjectPatch};

use crate::error::{Error, Result};

/// Treat blank strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn require_text(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_optional_text(value: Option<&String>, field: &str) -> Result<()> {
    match value {
        Some(v) => require_text(v, field),
        None => Ok(()),
    }
}
