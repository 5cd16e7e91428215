//! JSON request and response types for the HTTP gateway.

use maturalink_core::model::non_blank;
use maturalink_core::{
    ArgumentLinkPatch, ArgumentPatch, DatabaseStats, LinkPatch, NewArgument, NewArgumentLink,
    NewLink, NewMacroargument, NewSubject, SubjectPatch, SubjectRef,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An identifier given either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    /// Resolve to a numeric id, naming `field` on failure.
    pub fn resolve(&self, field: &str) -> Result<i64, AppError> {
        match self {
            IdInput::Number(id) => Ok(*id),
            IdInput::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid {field}: {text:?}"))),
        }
    }
}

fn resolve_opt(value: Option<&IdInput>, field: &str) -> Result<Option<i64>, AppError> {
    value.map(|id| id.resolve(field)).transpose()
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing required fields: {field}")))
}

/// Body for creating or patching a subject.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectBody {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl SubjectBody {
    pub fn into_new(self) -> Result<NewSubject, AppError> {
        Ok(NewSubject {
            name: required(non_blank(self.name), "name")?,
            color: non_blank(self.color),
        })
    }

    /// Blank fields count as absent, so `{"color": ""}` is an empty patch.
    pub fn into_patch(self) -> SubjectPatch {
        SubjectPatch {
            name: non_blank(self.name),
            color: non_blank(self.color),
        }
    }
}

/// Body for creating or updating an argument.
///
/// The subject may be referenced by `subjectId` or by `subjectName`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject_name: Option<String>,
    pub subject_id: Option<IdInput>,
}

impl ArgumentBody {
    fn subject(&self) -> Result<Option<SubjectRef>, AppError> {
        if let Some(id) = resolve_opt(self.subject_id.as_ref(), "subjectId")? {
            return Ok(Some(SubjectRef::Id(id)));
        }
        Ok(non_blank(self.subject_name.clone()).map(SubjectRef::Name))
    }

    pub fn into_new(self) -> Result<NewArgument, AppError> {
        let subject = required(self.subject()?, "subjectName")?;
        Ok(NewArgument {
            title: required(non_blank(self.title), "title")?,
            description: self.description.unwrap_or_default(),
            subject,
        })
    }

    pub fn into_patch(self) -> Result<ArgumentPatch, AppError> {
        let subject = self.subject()?;
        Ok(ArgumentPatch {
            title: self.title,
            description: self.description,
            subject,
        })
    }
}

/// Body for creating or renaming a macroargument.
#[derive(Debug, Default, Deserialize)]
pub struct MacroargumentBody {
    pub name: Option<String>,
}

impl MacroargumentBody {
    pub fn into_new(self) -> Result<NewMacroargument, AppError> {
        Ok(NewMacroargument {
            name: required(non_blank(self.name), "name")?,
        })
    }
}

/// Body for creating or updating a link.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkBody {
    pub description: Option<String>,
    pub argument_id: Option<IdInput>,
    pub macroargument_id: Option<IdInput>,
}

impl LinkBody {
    pub fn into_new(self) -> Result<NewLink, AppError> {
        Ok(NewLink {
            description: required(non_blank(self.description), "description")?,
            argument_id: required(
                resolve_opt(self.argument_id.as_ref(), "argumentId")?,
                "argumentId",
            )?,
            macroargument_id: resolve_opt(self.macroargument_id.as_ref(), "macroargumentId")?,
        })
    }

    pub fn into_patch(self) -> Result<LinkPatch, AppError> {
        Ok(LinkPatch {
            description: self.description,
            argument_id: resolve_opt(self.argument_id.as_ref(), "argumentId")?,
            macroargument_id: resolve_opt(self.macroargument_id.as_ref(), "macroargumentId")?,
        })
    }
}

/// Body for creating or updating an argument link.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentLinkBody {
    pub description: Option<String>,
    pub from_argument_id: Option<IdInput>,
    pub to_argument_id: Option<IdInput>,
}

impl ArgumentLinkBody {
    pub fn into_new(self) -> Result<NewArgumentLink, AppError> {
        Ok(NewArgumentLink {
            description: required(non_blank(self.description), "description")?,
            from_argument_id: required(
                resolve_opt(self.from_argument_id.as_ref(), "fromArgumentId")?,
                "fromArgumentId",
            )?,
            to_argument_id: required(
                resolve_opt(self.to_argument_id.as_ref(), "toArgumentId")?,
                "toArgumentId",
            )?,
        })
    }

    pub fn into_patch(self) -> Result<ArgumentLinkPatch, AppError> {
        Ok(ArgumentLinkPatch {
            description: self.description,
            from_argument_id: resolve_opt(self.from_argument_id.as_ref(), "fromArgumentId")?,
            to_argument_id: resolve_opt(self.to_argument_id.as_ref(), "toArgumentId")?,
        })
    }
}

/// Query string of the grouped view.
#[derive(Debug, Default, Deserialize)]
pub struct GroupedQuery {
    pub by: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Whether the database answered a ping.
    pub database: bool,
    /// Row counts, when the database is reachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DatabaseStats>,
}

/// Response carrying a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Bare success flag.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
