//! Argument persistence and detail assembly.

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::{ArgumentLinkRepository, DeleteOutcome, LinkRepository, SubjectRepository};
use crate::error::{Error, Result};
use crate::model::{
    ArgumentDetail, ArgumentElement, ArgumentLink, ArgumentPatch, LinkDetail, NewArgument,
    Subject, SubjectRef,
};

const ENTITY: &str = "argument";

const SELECT_SQL: &str = "SELECT id, title, description, subject_id FROM arguments";

pub struct ArgumentRepository<'c> {
    conn: &'c Connection,
}

impl<'c> ArgumentRepository<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<ArgumentElement>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_SQL} ORDER BY id"))?;
        let rows = stmt.query_map([], map_argument)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: i64) -> Result<Option<ArgumentElement>> {
        Ok(self
            .conn
            .query_row(&format!("{SELECT_SQL} WHERE id = ?1"), [id], map_argument)
            .optional()?)
    }

    pub fn require(&self, id: i64) -> Result<ArgumentElement> {
        self.get(id)?.ok_or_else(|| Error::not_found(ENTITY, id))
    }

    /// One argument with its subject, links, and argument links.
    pub fn detail(&self, id: i64) -> Result<Option<ArgumentDetail>> {
        let Some(argument) = self.get(id)? else {
            return Ok(None);
        };
        let subject = SubjectRepository::new(self.conn).require(argument.subject_id)?;
        let links = LinkRepository::new(self.conn).list_for_argument(id)?;
        let argument_links = ArgumentLinkRepository::new(self.conn);

        Ok(Some(ArgumentDetail {
            subject,
            links,
            from_argument_links: argument_links.list_from(id)?,
            to_argument_links: argument_links.list_to(id)?,
            argument,
        }))
    }

    pub fn require_detail(&self, id: i64) -> Result<ArgumentDetail> {
        self.detail(id)?.ok_or_else(|| Error::not_found(ENTITY, id))
    }

    /// Every argument in detail form, assembled from one pass per table.
    pub fn list_details(&self) -> Result<Vec<ArgumentDetail>> {
        let subjects: HashMap<i64, Subject> = SubjectRepository::new(self.conn)
            .list()?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut links: HashMap<i64, Vec<LinkDetail>> = HashMap::new();
        for link in LinkRepository::new(self.conn).list()? {
            links.entry(link.link.argument_id).or_default().push(link);
        }

        let mut outgoing: HashMap<i64, Vec<ArgumentLink>> = HashMap::new();
        let mut incoming: HashMap<i64, Vec<ArgumentLink>> = HashMap::new();
        for link in ArgumentLinkRepository::new(self.conn).list()? {
            outgoing
                .entry(link.from_argument_id)
                .or_default()
                .push(link.clone());
            incoming.entry(link.to_argument_id).or_default().push(link);
        }

        self.list()?
            .into_iter()
            .map(|argument| {
                let subject = subjects
                    .get(&argument.subject_id)
                    .cloned()
                    .ok_or_else(|| Error::not_found("subject", argument.subject_id))?;
                let id = argument.id;
                Ok(ArgumentDetail {
                    subject,
                    links: links.remove(&id).unwrap_or_default(),
                    from_argument_links: outgoing.remove(&id).unwrap_or_default(),
                    to_argument_links: incoming.remove(&id).unwrap_or_default(),
                    argument,
                })
            })
            .collect()
    }

    pub fn create(&self, input: &NewArgument) -> Result<ArgumentElement> {
        input.validate()?;
        let subject_id = self.resolve_subject(&input.subject)?;

        self.conn
            .execute(
                "INSERT INTO arguments (title, description, subject_id) VALUES (?1, ?2, ?3)",
                params![input.title, input.description, subject_id],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        let id = self.conn.last_insert_rowid();
        debug!(id, subject_id, "argument created");
        Ok(ArgumentElement {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            subject_id,
        })
    }

    pub fn update(&self, id: i64, patch: &ArgumentPatch) -> Result<ArgumentElement> {
        patch.validate()?;
        let current = self.require(id)?;
        let subject_id = match &patch.subject {
            Some(subject) => self.resolve_subject(subject)?,
            None => current.subject_id,
        };

        self.conn
            .execute(
                "UPDATE arguments SET title = ?1, description = ?2, subject_id = ?3 WHERE id = ?4",
                params![
                    patch.title.as_ref().unwrap_or(&current.title),
                    patch.description.as_ref().unwrap_or(&current.description),
                    subject_id,
                    id
                ],
            )
            .map_err(|e| Error::from_write(e, ENTITY))?;
        debug!(id, "argument updated");
        self.require(id)
    }

    /// Delete an argument together with its links and argument links.
    pub fn delete(&self, id: i64) -> Result<DeleteOutcome> {
        self.require(id)?;
        let links = self
            .conn
            .execute("DELETE FROM link_elements WHERE argument_id = ?1", [id])?;
        let argument_links = self.conn.execute(
            "DELETE FROM argument_links WHERE from_argument_id = ?1 OR to_argument_id = ?1",
            [id],
        )?;
        self.conn.execute("DELETE FROM arguments WHERE id = ?1", [id])?;
        debug!(id, links, argument_links, "argument deleted");
        Ok(DeleteOutcome {
            cascaded: links + argument_links,
            detached: 0,
        })
    }

    fn resolve_subject(&self, subject: &SubjectRef) -> Result<i64> {
        let subjects = SubjectRepository::new(self.conn);
        let found = match subject {
            SubjectRef::Id(id) => subjects.get(*id)?,
            SubjectRef::Name(name) => subjects.find_by_name(name)?,
        };
        found.map(|s| s.id).ok_or_else(|| match subject {
            SubjectRef::Id(id) => Error::Constraint(format!("subject {id} does not exist")),
            SubjectRef::Name(name) => Error::Constraint(format!("subject '{name}' does not exist")),
        })
    }
}

/// Fail with a constraint error unless the argument exists.
pub(crate) fn ensure_argument(conn: &Connection, id: i64) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM arguments WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(Error::Constraint(format!("argument {id} does not exist")));
    }
    Ok(())
}

fn map_argument(row: &Row<'_>) -> rusqlite::Result<ArgumentElement> {
    Ok(ArgumentElement {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        subject_id: row.get(3)?,
    })
}
