//! Macroarguments: thematic grouping labels.

use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::Result;

/// A thematic label that arguments can be linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macroargument {
    pub id: i64,
    pub name: String,
}

/// Input for creating or renaming a macroargument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMacroargument {
    pub name: String,
}

impl NewMacroargument {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "name")
    }
}
