//! Link persistence (argument → macroargument).

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::arguments::ensure_argument;
use crate::error::{Error, Result};
use crate::model::{LinkDetail, LinkElement, LinkPatch, Macroargument, NewLink};

const ENTITY: &str = "link";

const LINK_DETAIL_SQL: &str = "SELECT l.id, l.description, l.argument_id, l.macroargument_id,
       m.id, m.name
FROM link_elements l
LEFT JOIN macroarguments m ON m.id = l.macroargument_id";

pub struct LinkRepository<'c> {
    conn: &'c Connection,
}

impl<'c> LinkRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<LinkDetail>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LINK_DETAIL_SQL} ORDER BY l.id"))?;
        let rows = stmt.query_map([], map_link_detail)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_for_argument(&self, argument_id: i64) -> Result<Vec<LinkDetail>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LINK_DETAIL_SQL} WHERE l.argument_id = ?1 ORDER BY l.id"
        ))?;
        let rows = stmt.query_map([argument_id], map_link_detail)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<LinkDetail>> {
        Ok(self
            .conn
            .query_row(
                &format!("{LINK_DETAIL_SQL} WHERE l.id = ?1"),
                [id],
                map_link_detail,
            )
            .optional()?)
    }

    pub fn require(&self, id: i64) -> Result<LinkDetail> {
        self.get(id)?.ok_or_else(|| Error::not_found(ENTITY, id))
    }

    pub fn create(&self, input: &NewLink) -> Result<LinkElement> {
        input.validate()?;
        ensure_argument(self.conn, input.argument_id)?;
        if let Some(macro_id) = input.macroargument_id {
            ensure_macroargument(self.conn, macro_id)?;
        }

        self.conn
            .execute(
                "INSERT INTO link_elements (description, argument_id, macroargument_id)
                 VALUES (?1, ?2, ?3)",
                params![input.description, input.argument_id, input.macroargument_id],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, argument_id = input.argument_id, "link created");
        Ok(LinkElement {
            id,
            description: input.description.clone(),
            argument_id: input.argument_id,
            macroargument_id: input.macroargument_id,
        })
    }

    pub fn update(&self, id: i64, patch: &LinkPatch) -> Result<LinkDetail> {
        patch.validate()?;
        let current = self.require(id)?.link;
        if let Some(argument_id) = patch.argument_id {
            ensure_argument(self.conn, argument_id)?;
        }
        if let Some(macro_id) = patch.macroargument_id {
            ensure_macroargument(self.conn, macro_id)?;
        }

        self.conn
            .execute(
                "UPDATE link_elements SET description = ?1, argument_id = ?2, macroargument_id = ?3
                 WHERE id = ?4",
                params![
                    patch.description.as_ref().unwrap_or(&current.description),
                    patch.argument_id.unwrap_or(current.argument_id),
                    patch.macroargument_id.or(current.macroargument_id),
                    id
                ],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        debug!(id, "link updated");
        self.require(id)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM link_elements WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(Error::not_found(ENTITY, id));
        }
        debug!(id, "link deleted");
        Ok(())
    }
}

fn ensure_macroargument(conn: &Connection, id: i64) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM macroarguments WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(Error::Constraint(format!("macroargument {id} does not exist")));
    }
    Ok(())
}

fn map_link_detail(row: &Row<'_>) -> rusqlite::Result<LinkDetail> {
    let macro_id: Option<i64> = row.get(4)?;
    let macroargument = match macro_id {
        Some(id) => Some(Macroargument {
            id,
            name: row.get(5)?,
        }),
        None => None,
    };
    Ok(LinkDetail {
        link: LinkElement {
            id: row.get(0)?,
            description: row.get(1)?,
            argument_id: row.get(2)?,
            macroargument_id: row.get(3)?,
        },
        macroargument,
    })
}

