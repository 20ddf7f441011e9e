//! # Tidy - Launcher and Notepad
//!
//! Command-line front end for the notepad engine and the launcher palette.
//!
//! ## Quick Start
//!
//! ```bash
//! # Which language would the notepad pick?
//! cargo run -- detect src/main.rs
//!
//! # Press Enter after the first line of a file and print the result
//! cargo run -- keys notes.md --at 7 enter
//!
//! # List a folder the way the sidebar shows it
//! cargo run -- ls . --expand crates
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tidy_buffer::{Key, KeyPress, Modifiers, Selection};
use tidy_core::{Config, KeyResponse, Launcher, LocalFileSystem, Notepad, Sidebar};

/// Tidy - a launcher palette with a small code notepad
#[derive(Parser, Debug)]
#[command(name = "tidy")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the language the notepad would pick for a file
    Detect {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Classify as if the file had this name
        #[arg(long)]
        name: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a directory the way the sidebar shows it
    Ls {
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Subdirectories to expand, relative to DIR
        #[arg(long, value_name = "SUBDIR")]
        expand: Vec<PathBuf>,
    },

    /// Apply key presses to a file's content and print the result
    Keys {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Selection start, in characters
        #[arg(long, value_name = "OFFSET")]
        at: usize,

        /// Selection end, in characters (defaults to --at)
        #[arg(long, value_name = "OFFSET")]
        to: Option<usize>,

        /// Keys such as "tab", "shift+tab", "enter" or "("
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_key)]
        keys: Vec<KeyPress>,
    },

    /// List the languages the notepad can highlight
    Languages,

    /// Search the launcher entries
    Search {
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
    },
}

fn parse_key(s: &str) -> Result<KeyPress, String> {
    KeyPress::parse(s).ok_or_else(|| format!("unrecognized key: {s}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::debug!("Starting Tidy v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    match args.command {
        Command::Detect { file, name, json } => detect(&file, name.as_deref(), json),
        Command::Ls { dir, expand } => list(&dir, &expand),
        Command::Keys { file, at, to, keys } => press_keys(&config, &file, at, to, &keys),
        Command::Languages => languages(),
        Command::Search { query } => search(config, &query),
    }
}

fn detect(file: &Path, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let language = tidy_syntax::classify(&name, &content);

    if json {
        let value = serde_json::json!({
            "id": language.id,
            "display_name": language.display_name,
            "highlighter": language.highlighter_name(),
            "highlight": tidy_syntax::should_highlight(language, &content),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}\t{}", language.id, language.display_name);
    }
    Ok(())
}

fn list(dir: &Path, expand: &[PathBuf]) -> anyhow::Result<()> {
    let mut sidebar = Sidebar::new();
    sidebar.load(&LocalFileSystem, dir)?;

    for sub in expand {
        let path = dir.join(sub);
        sidebar
            .toggle(&LocalFileSystem, &path)
            .with_context(|| format!("Cannot expand {}", path.display()))?;
    }

    if let Some(label) = sidebar.root_label() {
        println!("{label}");
    }
    for row in sidebar.visible_rows() {
        println!("{}{} {}", "  ".repeat(row.depth + 1), row.icon, row.entry.name);
    }
    Ok(())
}

fn press_keys(
    config: &Config,
    file: &Path,
    at: usize,
    to: Option<usize>,
    keys: &[KeyPress],
) -> anyhow::Result<()> {
    let mut notepad = Notepad::with_config(&config.notepad);
    notepad.open_path(&LocalFileSystem, file, || true)?;

    let selection = Selection::new(at, to.unwrap_or(at));
    notepad
        .set_selection(selection)
        .with_context(|| format!("Selection {selection} does not fit {}", file.display()))?;

    for key in keys {
        if notepad.handle_key(key)? == KeyResponse::Declined {
            insert_typed(&mut notepad, key)?;
        }
    }

    tracing::info!(selection = %notepad.selection(), "final selection");
    print!("{}", notepad.text());
    Ok(())
}

/// Falls back to typing the key's character, as the editor widget would.
fn insert_typed(notepad: &mut Notepad, key: &KeyPress) -> anyhow::Result<()> {
    match key.key {
        Key::Char(c) if key.modifiers.is_empty() || key.modifiers == Modifiers::SHIFT => {
            notepad.insert_text(c.encode_utf8(&mut [0; 4]))?;
        }
        Key::Enter => notepad.insert_text("\n")?,
        _ => tracing::warn!("Key {} has no effect here", key),
    }
    Ok(())
}

fn languages() -> anyhow::Result<()> {
    for language in tidy_syntax::supported_languages() {
        println!("{}\t{}\t{}", language.id, language.display_name, language.extensions.join(" "));
    }
    Ok(())
}

fn search(config: Config, query: &str) -> anyhow::Result<()> {
    let launcher = Launcher::new(config.launcher.entries);
    for entry in launcher.search(query) {
        println!("{}\t{}\t{}", entry.id, entry.title, entry.target);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_args() {
        let args = Args::parse_from(["tidy", "detect", "notes", "--name", "x.md", "--json"]);
        match args.command {
            Command::Detect { file, name, json } => {
                assert_eq!(file, PathBuf::from("notes"));
                assert_eq!(name.as_deref(), Some("x.md"));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_keys_args() {
        let args = Args::parse_from([
            "tidy", "-vv", "keys", "a.txt", "--at", "3", "--to", "9", "shift+tab", "(",
        ]);
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Keys { at, to, keys, .. } => {
                assert_eq!(at, 3);
                assert_eq!(to, Some(9));
                assert_eq!(
                    keys,
                    [KeyPress::shifted(Key::Tab), KeyPress::plain(Key::Char('('))]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_keys_rejects_unknown_key() {
        let result = Args::try_parse_from(["tidy", "keys", "a.txt", "--at", "0", "hyper"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["tidy", "ls", "--config", "/tmp/tidy.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/tidy.toml")));
        assert!(matches!(args.command, Command::Ls { ref dir, .. } if dir == Path::new(".")));

        let args = Args::parse_from(["tidy", "languages"]);
        assert!(matches!(args.command, Command::Languages));

        let args = Args::parse_from(["tidy", "search"]);
        assert!(matches!(args.command, Command::Search { ref query } if query.is_empty()));
    }
}
