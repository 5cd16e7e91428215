//! Subjects: school-subject categories with a display color.

use serde::{Deserialize, Serialize};

use super::{require_optional_text, require_text};
use crate::error::{Error, Result};

/// A school subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

/// Input for creating a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub color: Option<String>,
}

impl NewSubject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "name")
    }
}

/// Partial update for a subject. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl SubjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation(
                "Must provide at least one of name or color".to_string(),
            ));
        }
        require_optional_text(self.name.as_ref(), "name")
    }
}
