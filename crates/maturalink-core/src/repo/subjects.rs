//! Subject persistence.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{NewSubject, Subject, SubjectPatch};

const ENTITY: &str = "subject";

pub struct SubjectRepository<'c> {
    conn: &'c Connection,
}

impl<'c> SubjectRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<Subject>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM subjects ORDER BY id")?;
        let rows = stmt.query_map([], map_subject)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Subject>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, color FROM subjects WHERE id = ?1",
                [id],
                map_subject,
            )
            .optional()?)
    }

    /// Like [`get`](Self::get) but a missing row is an error.
    pub fn require(&self, id: i64) -> Result<Subject> {
        self.get(id)?.ok_or_else(|| Error::not_found(ENTITY, id))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Subject>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, color FROM subjects WHERE name = ?1",
                [name],
                map_subject,
            )
            .optional()?)
    }

    pub fn create(&self, input: &NewSubject) -> Result<Subject> {
        input.validate()?;
        self.conn
            .execute(
                "INSERT INTO subjects (name, color) VALUES (?1, ?2)",
                params![input.name, input.color],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %input.name, "subject created");
        self.require(id)
    }

    pub fn update(&self, id: i64, patch: &SubjectPatch) -> Result<Subject> {
        patch.validate()?;
        let current = self.require(id)?;
        let name = patch.name.as_ref().unwrap_or(&current.name);
        let color = patch.color.as_ref().or(current.color.as_ref());

        self.conn
            .execute(
                "UPDATE subjects SET name = ?1, color = ?2 WHERE id = ?3",
                params![name, color, id],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        debug!(id, "subject updated");
        self.require(id)
    }

    /// Insert a subject by name or refresh its color if it already exists.
    pub fn upsert(&self, name: &str, color: &str) -> Result<Subject> {
        NewSubject::new(name).validate()?;
        self.conn
            .execute(
                "INSERT INTO subjects (name, color) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET color = excluded.color",
                params![name, color],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        self.find_by_name(name)?
            .ok_or_else(|| Error::Validation(format!("subject vanished after upsert: {name}")))
    }

    /// Delete a subject. Refused while arguments still belong to it.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.require(id)?;
        let owned: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM arguments WHERE subject_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        if owned > 0 {
            return Err(Error::Constraint(format!(
                "subject {id} still has {owned} argument(s)"
            )));
        }
        self.conn.execute("DELETE FROM subjects WHERE id = ?1", [id])?;
        debug!(id, "subject deleted");
        Ok(())
    }
}

pub(crate) fn map_subject(row: &Row<'_>) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
    })
}
