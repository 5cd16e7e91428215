//! Repositories: one per entity, each borrowing a connection.
//!
//! Repositories accept any `&Connection`, so a `&Transaction` works too;
//! multi-statement deletes are meant to run inside
//! [`Database::with_transaction`](crate::Database::with_transaction).

mod argument_links;
mod arguments;
mod links;
mod macroarguments;
mod subjects;

pub use argument_links::ArgumentLinkRepository;
pub use arguments::ArgumentRepository;
pub use links::LinkRepository;
pub use macroarguments::MacroargumentRepository;
pub use subjects::SubjectRepository;

use serde::Serialize;

/// Side effects of a delete on dependent rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Dependent rows removed along with the target.
    pub cascaded: usize,
    /// Dependent rows whose foreign key was set to null.
    pub detached: usize,
}

impl DeleteOutcome {
    pub fn affected_count(&self) -> usize {
        self.cascaded + self.detached
    }
}
