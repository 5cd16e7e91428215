//! Links between an argument and a macroargument.

use serde::{Deserialize, Serialize};

use super::{require_optional_text, require_text, Macroargument};
use crate::error::{Error, Result};

/// Association of an argument with a macroargument.
///
/// `macroargument_id` becomes `None` when the macroargument is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkElement {
    pub id: i64,
    pub description: String,
    pub argument_id: i64,
    pub macroargument_id: Option<i64>,
}

/// A link with its macroargument resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetail {
    #[serde(flatten)]
    pub link: LinkElement,
    pub macroargument: Option<Macroargument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub description: String,
    pub argument_id: i64,
    pub macroargument_id: Option<i64>,
}

impl NewLink {
    pub fn new(description: impl Into<String>, argument_id: i64, macroargument_id: i64) -> Self {
        Self {
            description: description.into(),
            argument_id,
            macroargument_id: Some(macroargument_id),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text(&self.description, "description")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub description: Option<String>,
    pub argument_id: Option<i64>,
    pub macroargument_id: Option<i64>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.argument_id.is_none() && self.macroargument_id.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation("Missing required fields".to_string()));
        }
        require_optional_text(self.description.as_ref(), "description")
    }
}
