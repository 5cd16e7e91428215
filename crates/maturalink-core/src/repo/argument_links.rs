//! Argument link persistence (argument → argument).

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::arguments::{ensure_argument, ArgumentRepository};
use crate::error::{Error, Result};
use crate::model::{ArgumentLink, ArgumentLinkDetail, ArgumentLinkPatch, NewArgumentLink};

const ENTITY: &str = "argument link";

const SELECT_SQL: &str =
    "SELECT id, description, from_argument_id, to_argument_id FROM argument_links";

pub struct ArgumentLinkRepository<'c> {
    conn: &'c Connection,
}

impl<'c> ArgumentLinkRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<ArgumentLink>> {
        self.query(&format!("{SELECT_SQL} ORDER BY id"), [])
    }

    /// Every link with both endpoint arguments resolved.
    pub fn list_details(&self) -> Result<Vec<ArgumentLinkDetail>> {
        let arguments = ArgumentRepository::new(self.conn);
        self.list()?
            .into_iter()
            .map(|link| {
                Ok(ArgumentLinkDetail {
                    from_argument: arguments.require(link.from_argument_id)?,
                    to_argument: arguments.require(link.to_argument_id)?,
                    link,
                })
            })
            .collect()
    }

    /// Links leaving `argument_id`.
    pub fn list_from(&self, argument_id: i64) -> Result<Vec<ArgumentLink>> {
        self.query(
            &format!("{SELECT_SQL} WHERE from_argument_id = ?1 ORDER BY id"),
            [argument_id],
        )
    }

    /// Links arriving at `argument_id`.
    pub fn list_to(&self, argument_id: i64) -> Result<Vec<ArgumentLink>> {
        self.query(
            &format!("{SELECT_SQL} WHERE to_argument_id = ?1 ORDER BY id"),
            [argument_id],
        )
    }

    pub fn get(&self, id: i64) -> Result<Option<ArgumentLink>> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_SQL} WHERE id = ?1"),
                [id],
                map_argument_link,
            )
            .optional()?)
    }

    pub fn require(&self, id: i64) -> Result<ArgumentLink> {
        self.get(id)?.ok_or_else(|| Error::not_found(ENTITY, id))
    }

    pub fn create(&self, input: &NewArgumentLink) -> Result<ArgumentLink> {
        input.validate()?;
        ensure_argument(self.conn, input.from_argument_id)?;
        ensure_argument(self.conn, input.to_argument_id)?;

        self.conn
            .execute(
                "INSERT INTO argument_links (description, from_argument_id, to_argument_id)
                 VALUES (?1, ?2, ?3)",
                params![
                    input.description,
                    input.from_argument_id,
                    input.to_argument_id
                ],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        let id = self.conn.last_insert_rowid();
        debug!(
            id,
            from = input.from_argument_id,
            to = input.to_argument_id,
            "argument link created"
        );
        Ok(ArgumentLink {
            id,
            description: input.description.clone(),
            from_argument_id: input.from_argument_id,
            to_argument_id: input.to_argument_id,
        })
    }

    pub fn update(&self, id: i64, patch: &ArgumentLinkPatch) -> Result<ArgumentLink> {
        patch.validate()?;
        let current = self.require(id)?;
        let from = patch.from_argument_id.unwrap_or(current.from_argument_id);
        let to = patch.to_argument_id.unwrap_or(current.to_argument_id);
        ensure_argument(self.conn, from)?;
        ensure_argument(self.conn, to)?;

        self.conn
            .execute(
                "UPDATE argument_links
                 SET description = ?1, from_argument_id = ?2, to_argument_id = ?3
                 WHERE id = ?4",
                params![
                    patch.description.as_ref().unwrap_or(&current.description),
                    from,
                    to,
                    id
                ],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        debug!(id, "argument link updated");
        self.require(id)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM argument_links WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(Error::not_found(ENTITY, id));
        }
        debug!(id, "argument link deleted");
        Ok(())
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<ArgumentLink>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_argument_link)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn map_argument_link(row: &Row<'_>) -> rusqlite::Result<ArgumentLink> {
    Ok(ArgumentLink {
        id: row.get(0)?,
        description: row.get(1)?,
        from_argument_id: row.get(2)?,
        to_argument_id: row.get(3)?,
    })
}
