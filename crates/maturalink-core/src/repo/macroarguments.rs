//! Macroargument persistence.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::DeleteOutcome;
use crate::error::{Error, Result};
use crate::model::{Macroargument, NewMacroargument};

const ENTITY: &str = "macroargument";

pub struct MacroargumentRepository<'c> {
    conn: &'c Connection,
}

impl<'c> MacroargumentRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<Macroargument>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM macroarguments ORDER BY id")?;
        let rows = stmt.query_map([], map_macroargument)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Macroargument>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name FROM macroarguments WHERE id = ?1",
                [id],
                map_macroargument,
            )
            .optional()?)
    }

    pub fn require(&self, id: i64) -> Result<Macroargument> {
        self.get(id)?.ok_or_else(|| Error::not_found(ENTITY, id))
    }

    pub fn create(&self, input: &NewMacroargument) -> Result<Macroargument> {
        input.validate()?;
        self.conn
            .execute("INSERT INTO macroarguments (name) VALUES (?1)", [&input.name])
            .map_err(|e| Error::from_write(e, ENTITY))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %input.name, "macroargument created");
        Ok(Macroargument {
            id,
            name: input.name.clone(),
        })
    }

    pub fn rename(&self, id: i64, input: &NewMacroargument) -> Result<Macroargument> {
        input.validate()?;
        let changed = self
            .conn
            .execute(
                "UPDATE macroarguments SET name = ?1 WHERE id = ?2",
                params![input.name, id],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        if changed == 0 {
            return Err(Error::not_found(ENTITY, id));
        }
        self.require(id)
    }

    /// Detach referencing links, then delete the macroargument.
    pub fn delete(&self, id: i64) -> Result<DeleteOutcome> {
        self.require(id)?;
        let detached = self.conn.execute(
            "UPDATE link_elements SET macroargument_id = NULL WHERE macroargument_id = ?1",
            [id],
        )?;
        self.conn
            .execute("DELETE FROM macroarguments WHERE id = ?1", [id])?;
        debug!(id, detached, "macroargument deleted");
        Ok(DeleteOutcome {
            cascaded: 0,
            detached,
        })
    }
}

pub(crate) fn map_macroargument(row: &Row<'_>) -> rusqlite::Result<Macroargument> {
    Ok(Macroargument {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
