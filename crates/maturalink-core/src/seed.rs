//! Default subject palette.

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;
use crate::repo::SubjectRepository;

/// Subjects created by [`seed_subjects`], with their display colors.
pub const DEFAULT_SUBJECTS: &[(&str, &str)] = &[
    ("Arte", "#FF5733"),
    ("Italiano", "#33C1FF"),
    ("Fisica", "#33FF57"),
    ("Inglese", "#FF33A6"),
    ("Storia", "#FFC300"),
    ("Filosofia", "#8E44AD"),
    ("Scienze", "#1ABC9C"),
    ("Informatica", "#34495E"),
    ("Matematica", "#E67E22"),
    ("EduCivica", "#2ECC71"),
];

/// Upsert the default subjects. Existing subjects keep their id and get
/// their color reset. Returns the number of subjects written.
pub fn seed_subjects(conn: &Connection) -> Result<usize> {
    let subjects = SubjectRepository::new(conn);
    for (name, color) in DEFAULT_SUBJECTS {
        subjects.upsert(name, color)?;
    }
    info!(count = DEFAULT_SUBJECTS.len(), "subjects seeded");
    Ok(DEFAULT_SUBJECTS.len())
}
