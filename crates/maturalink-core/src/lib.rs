//! MaturaLink Core - data model, storage, and views.
//!
//! This crate provides the persistence layer for MaturaLink: subjects,
//! arguments, macroarguments, and the two kinds of links between them,
//! stored in SQLite with referential integrity enforced by the schema.
//!
//! # Example
//!
//! ```rust,no_run
//! use maturalink_core::{Database, SubjectRepository};
//!
//! fn main() -> Result<(), maturalink_core::Error> {
//!     let db = Database::open("./data/maturalink.db")?;
//!     let subjects = db.with_conn(|conn| SubjectRepository::new(conn).list())?;
//!     println!("{} subjects", subjects.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod repo;
pub mod seed;
pub mod storage;
pub mod view;

pub use error::{Error, Result};
pub use model::{
    ArgumentDetail, ArgumentElement, ArgumentLink, ArgumentLinkDetail, ArgumentLinkPatch,
    ArgumentPatch, LinkDetail, LinkElement, LinkPatch, Macroargument, NewArgument,
    NewArgumentLink, NewLink, NewMacroargument, NewSubject, Subject, SubjectPatch, SubjectRef,
};
pub use repo::{
    ArgumentLinkRepository, ArgumentRepository, DeleteOutcome, LinkRepository,
    MacroargumentRepository, SubjectRepository,
};
pub use seed::{seed_subjects, DEFAULT_SUBJECTS};
pub use storage::{BoundedDatabase, Database, DatabaseStats};
pub use view::{build_graph, group_arguments, Graph, GroupMode, GroupedView, NO_MACROARGUMENT};
