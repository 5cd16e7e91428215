//! Directed links between two arguments.

use serde::{Deserialize, Serialize};

use super::{require_optional_text, require_text, ArgumentElement};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentLink {
    pub id: i64,
    pub description: String,
    pub from_argument_id: i64,
    pub to_argument_id: i64,
}

/// An argument link with both endpoints resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentLinkDetail {
    #[serde(flatten)]
    pub link: ArgumentLink,
    pub from_argument: ArgumentElement,
    pub to_argument: ArgumentElement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArgumentLink {
    pub description: String,
    pub from_argument_id: i64,
    pub to_argument_id: i64,
}

impl NewArgumentLink {
    pub fn new(description: impl Into<String>, from_argument_id: i64, to_argument_id: i64) -> Self {
        Self {
            description: description.into(),
            from_argument_id,
            to_argument_id,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text(&self.description, "description")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentLinkPatch {
    pub description: Option<String>,
    pub from_argument_id: Option<i64>,
    pub to_argument_id: Option<i64>,
}

impl ArgumentLinkPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.from_argument_id.is_none()
            && self.to_argument_id.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation("Missing required fields".to_string()));
        }
        require_optional_text(self.description.as_ref(), "description")
    }
}
