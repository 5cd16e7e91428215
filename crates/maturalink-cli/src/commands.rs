//! Subcommands of the `maturalink` tool.

use std::path::PathBuf;

use clap::Subcommand;
use maturalink_core::GroupMode;

/// A single action against the database.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upsert the default subject palette
    Seed,
    /// List subjects
    Subjects,
    /// List arguments with their subject and link count
    Arguments,
    /// List macroarguments
    Macroarguments,
    /// List links between arguments and macroarguments
    Links,
    /// List directed links between arguments
    ArgumentLinks,
    /// Show arguments grouped two levels deep
    Groups {
        /// Grouping order: subject-macro or macro-subject
        #[arg(long, default_value = "subject-macro")]
        by: GroupMode,
    },
    /// Export graph nodes, edges and legend
    Graph {
        /// Write the graph as JSON to this file instead of printing edges
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show row counts and schema version
    Stats,
}

impl Command {
    /// Whether the command writes to the database.
    pub fn is_write(&self) -> bool {
        matches!(self, Command::Seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_parse_groups_mode() {
        let parsed = Harness::parse_from(["maturalink", "groups", "--by", "macro-subject"]);
        assert!(matches!(
            parsed.command,
            Command::Groups {
                by: GroupMode::MacroSubject
            }
        ));

        let parsed = Harness::parse_from(["maturalink", "groups"]);
        assert!(matches!(
            parsed.command,
            Command::Groups {
                by: GroupMode::SubjectMacro
            }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Harness::try_parse_from(["maturalink", "groups", "--by", "sideways"]).is_err());
    }

    #[test]
    fn test_only_seed_writes() {
        assert!(Command::Seed.is_write());
        assert!(!Command::Stats.is_write());
        assert!(!Command::ArgumentLinks.is_write());
    }
}
