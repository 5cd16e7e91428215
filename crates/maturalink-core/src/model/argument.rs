//! Arguments: the study topics themselves.

use serde::{Deserialize, Serialize};

use super::{require_optional_text, require_text, ArgumentLink, LinkDetail, Subject};
use crate::error::{Error, Result};

/// A study topic belonging to exactly one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentElement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub subject_id: i64,
}

/// An argument together with its subject and every link touching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDetail {
    #[serde(flatten)]
    pub argument: ArgumentElement,
    pub subject: Subject,
    pub links: Vec<LinkDetail>,
    pub from_argument_links: Vec<ArgumentLink>,
    pub to_argument_links: Vec<ArgumentLink>,
}

impl ArgumentDetail {
    pub fn id(&self) -> i64 {
        self.argument.id
    }

    pub fn title(&self) -> &str {
        &self.argument.title
    }
}

/// How a write refers to the owning subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRef {
    Id(i64),
    Name(String),
}

/// Input for creating an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArgument {
    pub title: String,
    pub description: String,
    pub subject: SubjectRef,
}

impl NewArgument {
    pub fn new(title: impl Into<String>, subject: SubjectRef) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            subject,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_text(&self.title, "title")?;
        if let SubjectRef::Name(name) = &self.subject {
            require_text(name, "subjectName")?;
        }
        Ok(())
    }
}

/// Partial update for an argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<SubjectRef>,
}

impl ArgumentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.subject.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::Validation(
                "Must provide at least one of title, description or subject".to_string(),
            ));
        }
        require_optional_text(self.title.as_ref(), "title")
    }
}
