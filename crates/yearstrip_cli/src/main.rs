//! Command-line front end for `yearstrip_core`.
//!
//! # Responsibility
//! - Normalize archived calendar documents to the current schema.
//! - Save documents into, and read them back from, a local store file.
//! - Keep `ping`/`version` commands to verify core linkage.

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use yearstrip_core::db::open_db;
use yearstrip_core::{
    core_version, default_log_level, init_logging, load_config, ping, CalendarEditor,
    EditorConfig, SqliteDocumentStore,
};

const DEFAULT_WIDTH_PX: i64 = 1920;

#[derive(Debug, Parser)]
#[command(name = "yearstrip_cli", version, about = "Tools for YearStrip calendar documents")]
struct Cli {
    /// Directory for rotating log files; logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    /// Editor settings file in TOML.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Checks that the core library is linked.
    Ping,
    /// Prints the core library version.
    Version,
    /// Re-encodes a document file as the current schema.
    Normalize {
        file: PathBuf,
        #[arg(long, default_value_t = DEFAULT_WIDTH_PX)]
        width: i64,
    },
    /// Imports a document file and saves it into a store.
    Save {
        file: PathBuf,
        #[arg(long)]
        db: PathBuf,
        #[arg(long, default_value_t = DEFAULT_WIDTH_PX)]
        width: i64,
    },
    /// Prints one stored document.
    Show {
        calendar_id: String,
        #[arg(long)]
        db: PathBuf,
    },
    /// Lists stored documents.
    List {
        #[arg(long)]
        db: PathBuf,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }
    let config = match &cli.config {
        Some(path) => load_config(path).map_err(|err| err.to_string())?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::Ping => {
            println!("yearstrip_core ping={}", ping());
            Ok(())
        }
        Command::Version => {
            println!("yearstrip_core version={}", core_version());
            Ok(())
        }
        Command::Normalize { file, width } => {
            let editor = load_editor(config, &file, width)?;
            println!("{}", pretty(&editor)?);
            Ok(())
        }
        Command::Save { file, db, width } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let editor = load_editor(config, &file, width)?;
            let saved = editor
                .save(&SqliteDocumentStore::new(&conn))
                .map_err(|err| err.to_string())?;
            info!(
                "event=cli_save module=cli status=ok seasons={} texts={}",
                saved.season_entries.len(),
                saved.text_entries.len()
            );
            println!("saved {}", saved.id);
            Ok(())
        }
        Command::Show { calendar_id, db } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let document = SqliteDocumentStore::new(&conn)
                .get_document(&calendar_id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("calendar not found: {calendar_id}"))?;
            let json = yearstrip_core::codec::encode_document_pretty(&document)
                .map_err(|err| err.to_string())?;
            println!("{json}");
            Ok(())
        }
        Command::List { db } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let documents = SqliteDocumentStore::new(&conn)
                .list_documents()
                .map_err(|err| err.to_string())?;
            for document in documents {
                println!(
                    "{}\t{}\tsaves={}",
                    document.calendar_id, document.name, document.save_count
                );
            }
            Ok(())
        }
    }
}

fn load_editor(config: EditorConfig, file: &Path, width: i64) -> Result<CalendarEditor, String> {
    let json = std::fs::read_to_string(file)
        .map_err(|err| format!("failed to read `{}`: {err}", file.display()))?;
    let mut editor = CalendarEditor::new(config, width, None);
    editor.import_json(&json).map_err(|err| err.to_string())?;
    Ok(editor)
}

fn pretty(editor: &CalendarEditor) -> Result<String, String> {
    yearstrip_core::codec::encode_document_pretty(&editor.export()).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DEFAULT_WIDTH_PX};
    use clap::error::ErrorKind;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn save_takes_file_db_and_width() {
        let cli = Cli::try_parse_from([
            "yearstrip_cli", "save", "cal.json", "--db", "/tmp/x.db", "--width", "800",
        ])
        .unwrap();
        let Command::Save { file, db, width } = cli.command else {
            panic!("expected save");
        };
        assert_eq!(file, PathBuf::from("cal.json"));
        assert_eq!(db, PathBuf::from("/tmp/x.db"));
        assert_eq!(width, 800);
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "yearstrip_cli", "normalize", "a.json", "--log-dir", "logs", "--config", "y.toml",
        ])
        .unwrap();
        assert_eq!(cli.log_dir.as_deref(), Some("logs"));
        assert_eq!(cli.config, Some(PathBuf::from("y.toml")));
        assert!(matches!(
            cli.command,
            Command::Normalize { width: DEFAULT_WIDTH_PX, .. }
        ));
    }

    #[test]
    fn missing_db_is_reported() {
        let err = Cli::try_parse_from(["yearstrip_cli", "list"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn bad_width_is_reported() {
        let err = Cli::try_parse_from(["yearstrip_cli", "normalize", "a.json", "--width", "wide"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = Cli::try_parse_from(["yearstrip_cli", "export"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }
}
