//! Command execution.

use std::path::Path;

use maturalink_core::{
    build_graph, group_arguments, seed_subjects, ArgumentLinkRepository, ArgumentRepository,
    Database, GroupMode, LinkRepository, MacroargumentRepository, SubjectRepository,
};
use thiserror::Error;
use tracing::info;

use crate::commands::Command;
use crate::formatter::{Formatter, Records};

/// Execution errors.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Storage or validation error.
    #[error(transparent)]
    Core(#[from] maturalink_core::Error),

    /// Failed to write an export file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode an export.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Execute a command and return formatted output.
pub fn execute(
    db: &Database,
    command: &Command,
    formatter: &dyn Formatter,
) -> Result<String, ExecuteError> {
    match command {
        Command::Seed => {
            let seeded = db.with_transaction(|tx| seed_subjects(tx))?;
            info!(subjects = seeded, "default subjects seeded");
            Ok(formatter.format_change(seeded, "default subjects seeded"))
        }
        Command::Subjects => Ok(formatter.format_records(&subjects(db)?)),
        Command::Arguments => Ok(formatter.format_records(&arguments(db)?)),
        Command::Macroarguments => Ok(formatter.format_records(&macroarguments(db)?)),
        Command::Links => Ok(formatter.format_records(&links(db)?)),
        Command::ArgumentLinks => Ok(formatter.format_records(&argument_links(db)?)),
        Command::Groups { by } => Ok(formatter.format_records(&groups(db, *by)?)),
        Command::Graph { output: Some(path) } => {
            let written = export_graph(db, path)?;
            Ok(formatter.format_change(written, &format!("graph written to {}", path.display())))
        }
        Command::Graph { output: None } => Ok(formatter.format_records(&graph(db)?)),
        Command::Stats => Ok(formatter.format_records(&stats(db)?)),
    }
}

fn subjects(db: &Database) -> Result<Records, ExecuteError> {
    let subjects = db.with_conn(|conn| SubjectRepository::new(conn).list())?;
    let mut records = Records::new(vec!["id", "name", "color"], &subjects)?;
    for s in &subjects {
        records.push(vec![
            s.id.to_string(),
            s.name.clone(),
            s.color.clone().unwrap_or_default(),
        ]);
    }
    Ok(records)
}

fn arguments(db: &Database) -> Result<Records, ExecuteError> {
    let details = db.with_conn(|conn| ArgumentRepository::new(conn).list_details())?;
    let mut records = Records::new(vec!["id", "title", "subject", "links", "summary"], &details)?;
    for d in &details {
        records.push(vec![
            d.id().to_string(),
            d.title().to_string(),
            d.subject.name.clone(),
            d.links.len().to_string(),
            first_line(&d.argument.description),
        ]);
    }
    Ok(records)
}

fn macroarguments(db: &Database) -> Result<Records, ExecuteError> {
    let macros = db.with_conn(|conn| MacroargumentRepository::new(conn).list())?;
    let mut records = Records::new(vec!["id", "name"], &macros)?;
    for m in &macros {
        records.push(vec![m.id.to_string(), m.name.clone()]);
    }
    Ok(records)
}

fn links(db: &Database) -> Result<Records, ExecuteError> {
    let links = db.with_conn(|conn| LinkRepository::new(conn).list())?;
    let mut records = Records::new(
        vec!["id", "argument", "macroargument", "description"],
        &links,
    )?;
    for l in &links {
        records.push(vec![
            l.link.id.to_string(),
            l.link.argument_id.to_string(),
            l.macroargument
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_default(),
            first_line(&l.link.description),
        ]);
    }
    Ok(records)
}

fn argument_links(db: &Database) -> Result<Records, ExecuteError> {
    let links = db.with_conn(|conn| ArgumentLinkRepository::new(conn).list_details())?;
    let mut records = Records::new(vec!["id", "from", "to", "description"], &links)?;
    for l in &links {
        records.push(vec![
            l.link.id.to_string(),
            l.from_argument.title.clone(),
            l.to_argument.title.clone(),
            first_line(&l.link.description),
        ]);
    }
    Ok(records)
}

fn groups(db: &Database, mode: GroupMode) -> Result<Records, ExecuteError> {
    let details = db.with_conn(|conn| ArgumentRepository::new(conn).list_details())?;
    let view = group_arguments(&details, mode);
    let (outer, inner) = match mode {
        GroupMode::SubjectMacro => ("subject", "macroargument"),
        GroupMode::MacroSubject => ("macroargument", "subject"),
    };

    let mut records = Records::new(vec![outer, inner, "id", "title", "links"], &view)?;
    for group in &view.groups {
        for sub in &group.groups {
            for arg in &sub.arguments {
                let links: Vec<String> = arg
                    .links
                    .iter()
                    .map(|l| first_line(&l.description))
                    .collect();
                records.push(vec![
                    group.key.clone(),
                    sub.key.clone(),
                    arg.id.to_string(),
                    arg.title.clone(),
                    links.join("; "),
                ]);
            }
        }
    }
    Ok(records)
}

fn graph(db: &Database) -> Result<Records, ExecuteError> {
    let graph = load_graph(db)?;
    let mut records = Records::new(vec!["id", "source", "target", "label"], &graph)?;
    for edge in &graph.edges {
        records.push(vec![
            edge.id.clone(),
            edge.source.clone(),
            edge.target.clone(),
            edge.label.clone(),
        ]);
    }
    Ok(records)
}

/// Write the graph as pretty JSON, returning the number of nodes and edges.
fn export_graph(db: &Database, path: &Path) -> Result<usize, ExecuteError> {
    let graph = load_graph(db)?;
    std::fs::write(path, serde_json::to_string_pretty(&graph)?)?;
    info!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "graph exported"
    );
    Ok(graph.nodes.len() + graph.edges.len())
}

fn load_graph(db: &Database) -> Result<maturalink_core::Graph, ExecuteError> {
    let graph = db.with_conn(|conn| {
        let subjects = SubjectRepository::new(conn).list()?;
        let details = ArgumentRepository::new(conn).list_details()?;
        Ok(build_graph(&subjects, &details))
    })?;
    Ok(graph)
}

fn stats(db: &Database) -> Result<Records, ExecuteError> {
    let stats = db.stats()?;
    let version = db.schema_version()?;
    let mut records = Records::new(vec!["table", "rows"], &stats)?;
    for (table, rows) in [
        ("subjects", stats.subjects),
        ("arguments", stats.arguments),
        ("macroarguments", stats.macroarguments),
        ("link_elements", stats.links),
        ("argument_links", stats.argument_links),
    ] {
        records.push(vec![table.to_string(), rows.to_string()]);
    }
    records.push(vec!["schema_version".to_string(), version.to_string()]);
    Ok(records)
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{create_formatter, OutputFormat};
    use maturalink_core::{NewArgument, NewLink, NewMacroargument, SubjectRef};
    use pretty_assertions::assert_eq;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_transaction(|tx| {
            seed_subjects(tx)?;
            let arg = ArgumentRepository::new(tx)
                .create(&NewArgument::new("Dante", SubjectRef::Name("Italiano".into())))?;
            let m = MacroargumentRepository::new(tx).create(&NewMacroargument::new("Viaggio"))?;
            LinkRepository::new(tx).create(&NewLink::new("inferno\npurgatorio", arg.id, m.id))?;
            Ok(())
        })
        .unwrap();
        db
    }

    #[test]
    fn test_seed_reports_count() {
        let db = Database::open_in_memory().unwrap();
        let formatter = create_formatter(OutputFormat::Json);
        let output = execute(&db, &Command::Seed, &*formatter).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["affected"], 10);
    }

    #[test]
    fn test_groups_rows() {
        let db = seeded();
        let records = groups(&db, GroupMode::MacroSubject).unwrap();
        assert_eq!(records.columns[0], "macroargument");
        assert_eq!(
            records.rows,
            vec![vec![
                "Viaggio".to_string(),
                "Italiano".to_string(),
                "1".to_string(),
                "Dante".to_string(),
                "inferno".to_string(),
            ]]
        );
    }

    #[test]
    fn test_graph_export_writes_json() {
        let db = seeded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let written = export_graph(&db, &path).unwrap();
        assert_eq!(written, 3);

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["edges"][0]["label"], "inferno");
        assert_eq!(exported["legend"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_stats_rows() {
        let db = seeded();
        let records = stats(&db).unwrap();
        assert_eq!(records.rows[0], vec!["subjects".to_string(), "10".to_string()]);
        assert_eq!(records.rows[5][0], "schema_version");
    }
}
