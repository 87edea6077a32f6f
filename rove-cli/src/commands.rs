// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use chrono::{DateTime, Utc};
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use rove_core::{
    catalog, DirectoryEntry, DirectoryListing, DriveInfo, InvalidOperation, RoveError, RoveResult,
};
use rove_engine::Engine;
use rove_prefs::PinOutcome;
use serde_json::{json, Value};
use std::io;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

#[derive(Subcommand, Debug)]
pub enum Action {
    /// List drives with their usage
    #[command(alias = "df")]
    Drives,

    /// List a directory (defaults to the current one)
    #[command(alias = "dir")]
    Ls {
        path: Option<PathBuf>,
    },

    /// List entries of a directory whose names contain a query, ignoring case
    Search {
        dir: PathBuf,
        query: String,
    },

    /// Open a directory and record it in the history
    Cd {
        path: PathBuf,
    },

    /// Go back one directory
    Back,

    /// Go forward one directory
    Forward,

    /// Return to the drive list, forgetting history and clipboard
    Home,

    /// Show the current directory
    Pwd,

    /// Put a file or folder on the clipboard to be copied
    Copy {
        path: PathBuf,

        /// Paste straight into this directory
        #[arg(long)]
        into: Option<PathBuf>,
    },

    /// Put a file or folder on the clipboard to be moved
    Cut {
        path: PathBuf,

        /// Paste straight into this directory
        #[arg(long)]
        into: Option<PathBuf>,
    },

    /// Paste the clipboard item (defaults to the current directory)
    Paste {
        dir: Option<PathBuf>,
    },

    /// Delete a file or folder, including everything inside it
    Rm {
        path: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Rename a file or folder in place
    Rename {
        path: PathBuf,
        name: String,
    },

    /// Create "New Folder" (or the next free variant)
    Mkdir {
        parent: Option<PathBuf>,
    },

    /// Pin a folder (defaults to the current directory)
    Pin {
        path: Option<PathBuf>,
    },

    /// Unpin a folder (defaults to the current directory)
    Unpin {
        path: Option<PathBuf>,
    },

    /// List pinned folders
    Pins,

    /// Open a file or folder with its default application
    Open {
        path: PathBuf,
    },

    /// Start the interactive shell
    Shell,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct DriveRow {
    #[tabled(rename = "Drive")]
    name: String,
    #[tabled(rename = "Root")]
    root: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Space")]
    summary: String,
}

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn entry_row(entry: &DirectoryEntry) -> EntryRow {
    let is_dir = entry.is_dir();
    EntryRow {
        kind: if is_dir {
            style("d").cyan().to_string()
        } else {
            "-".to_string()
        },
        size: match entry.size() {
            Ok(size) if !is_dir => catalog::format_size(size),
            _ => String::new(),
        },
        modified: format_time(entry.modified()),
        name: if is_dir {
            style(entry.name()).cyan().bold().to_string()
        } else {
            entry.name()
        },
    }
}

fn entry_json(entry: &DirectoryEntry) -> Value {
    json!({
        "name": entry.name(),
        "path": entry.path().display().to_string(),
        "is_dir": entry.is_dir(),
        "size": entry.size().ok(),
        "extension": entry.extension(),
        "modified": entry.modified(),
    })
}

fn drive_json(drive: &DriveInfo) -> Value {
    json!({
        "name": drive.display_name,
        "root": drive.root.display().to_string(),
        "total_bytes": drive.total_bytes,
        "used_bytes": drive.used_bytes,
        "free_bytes": drive.free_bytes,
    })
}

fn confirm(prompt: &str) -> RoveResult<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| RoveError::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))
}

/// One engine plus the output mode of the front end driving it.
pub struct Session {
    engine: Engine,
    json: bool,
}

impl Session {
    pub fn new(engine: Engine, json: bool) -> Self {
        Self { engine, json }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Shell prompt naming the current location
    pub fn prompt(&self) -> String {
        match self.engine.current_dir() {
            Some(dir) => format!("rove {}", dir.display()),
            None => "rove [drives]".to_string(),
        }
    }

    pub fn run(&mut self, action: Action) -> RoveResult<()> {
        match action {
            Action::Drives => self.print_drives(),
            Action::Ls { path } => {
                let dir = self.or_current(path, InvalidOperation::NoDestination)?;
                let listing = self.engine.list(&dir)?;
                self.print_listing(&listing);
            }
            Action::Search { dir, query } => {
                let dir = self.resolve(&dir)?;
                let listing = self.engine.search(&dir, &query)?;
                self.print_listing(&listing);
            }
            Action::Cd { path } => {
                let dir = self.resolve(&path)?;
                let listing = self.engine.navigate_to(dir)?;
                self.print_listing(&listing);
            }
            Action::Back => match self.engine.back()? {
                Some(listing) => self.print_listing(&listing),
                None => self.print_drives(),
            },
            Action::Forward => match self.engine.forward()? {
                Some(listing) => self.print_listing(&listing),
                None => self.report(Value::Null, "Nothing ahead in the history".to_string()),
            },
            Action::Home => {
                self.engine.home();
                self.print_drives();
            }
            Action::Pwd => {
                let current = self.engine.current_dir().map(|d| d.display().to_string());
                let text = current.clone().unwrap_or_else(|| "(drives)".to_string());
                self.report(json!({ "current": current }), text);
            }
            Action::Copy { path, into } => {
                let source = self.resolve(&path)?;
                self.engine.copy(&source);
                self.after_clipboard(source, into, "Copied")?;
            }
            Action::Cut { path, into } => {
                let source = self.resolve(&path)?;
                self.engine.cut(&source);
                self.after_clipboard(source, into, "Cut")?;
            }
            Action::Paste { dir } => self.paste(dir)?,
            Action::Rm { path, force } => {
                let target = self.resolve(&path)?;
                if !force && !confirm(&format!("Delete {} and everything inside it?", target.display()))? {
                    self.report(json!({ "deleted": Value::Null }), "Cancelled".to_string());
                    return Ok(());
                }
                self.engine.delete(&target)?;
                let shown = target.display().to_string();
                self.report(json!({ "deleted": shown }), format!("Deleted {shown}"));
            }
            Action::Rename { path, name } => {
                let source = self.resolve(&path)?;
                let renamed = self.engine.rename(&source, &name)?;
                let shown = renamed.display().to_string();
                self.report(
                    json!({ "renamed": shown }),
                    format!("Renamed {} -> {}", source.display(), shown),
                );
            }
            Action::Mkdir { parent } => {
                let parent = self.or_current(parent, InvalidOperation::NoDestination)?;
                let created = self.engine.create_folder(&parent)?;
                let shown = created.display().to_string();
                self.report(json!({ "created": shown }), format!("Created {shown}"));
            }
            Action::Pin { path } => {
                let dir = self.or_current(path, InvalidOperation::NoSelection)?;
                let outcome = self.engine.pin(&dir)?;
                self.print_pin(&dir, outcome);
            }
            Action::Unpin { path } => {
                let dir = self.or_current(path, InvalidOperation::NoSelection)?;
                let removed = self.engine.unpin(&dir)?;
                let text = if removed {
                    format!("Unpinned {}", dir.display())
                } else {
                    format!("{} was not pinned", dir.display())
                };
                self.report(json!({ "unpinned": removed }), text);
            }
            Action::Pins => self.print_pins(),
            Action::Open { path } => {
                let target = self.resolve(&path)?;
                self.engine.open_with_default_application(&target)?;
                let shown = target.display().to_string();
                self.report(json!({ "opened": shown }), format!("Opened {shown}"));
            }
            Action::Shell => {
                self.report(Value::Null, "Already in the shell".to_string());
            }
        }
        Ok(())
    }

    fn after_clipboard(&mut self, source: PathBuf, into: Option<PathBuf>, verb: &str) -> RoveResult<()> {
        match into {
            Some(dir) => self.paste(Some(dir)),
            None => {
                let shown = source.display().to_string();
                self.report(
                    json!({ "clipboard": shown, "mode": verb.to_lowercase() }),
                    format!("{verb} {shown}"),
                );
                Ok(())
            }
        }
    }

    fn paste(&mut self, dir: Option<PathBuf>) -> RoveResult<()> {
        let pasted = match dir {
            Some(dir) => {
                let dir = self.resolve(&dir)?;
                self.engine.paste(Some(&dir))?
            }
            None => self.engine.paste_here()?,
        };
        let shown = pasted.display().to_string();
        self.report(json!({ "pasted": shown }), format!("Pasted {shown}"));
        Ok(())
    }

    /// Resolve `path` against the current directory, or the process working directory
    /// while the drive list is shown.
    fn resolve(&self, path: &Path) -> RoveResult<PathBuf> {
        match self.engine.current_dir() {
            Some(dir) => Ok(catalog::anchor(dir, path)),
            None => catalog::absolute(path),
        }
    }

    fn or_current(&self, path: Option<PathBuf>, missing: InvalidOperation) -> RoveResult<PathBuf> {
        match path {
            Some(path) => self.resolve(&path),
            None => self
                .engine
                .current_dir()
                .map(Path::to_path_buf)
                .ok_or_else(|| missing.into()),
        }
    }

    fn report(&self, value: Value, text: String) {
        if self.json {
            println!("{value:#}");
        } else {
            println!("{text}");
        }
    }

    fn print_listing(&self, listing: &DirectoryListing) {
        if self.json {
            let entries: Vec<Value> = listing.entries.iter().map(entry_json).collect();
            println!("{:#}", json!({ "path": listing.path.display().to_string(), "entries": entries }));
            return;
        }

        println!("{}", style(listing.path.display()).bold());
        if listing.is_empty() {
            println!("(empty directory)");
        } else {
            let rows: Vec<EntryRow> = listing.entries.iter().map(entry_row).collect();
            println!("{}", Table::new(rows));
        }
    }

    fn print_drives(&self) {
        let drives = self.engine.list_drives();
        if self.json {
            let drives: Vec<Value> = drives.iter().map(drive_json).collect();
            println!("{:#}", Value::Array(drives));
            return;
        }

        if drives.is_empty() {
            println!("(no drives)");
            return;
        }
        let rows: Vec<DriveRow> = drives
            .iter()
            .map(|d| DriveRow {
                name: d.display_name.clone(),
                root: d.root.display().to_string(),
                used: format!("{:.0}%", d.usage_fraction() * 100.0),
                summary: d.summary(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    fn print_pins(&self) {
        let pinned = self.engine.pinned();
        if self.json {
            let paths: Vec<String> = pinned.iter().map(|p| p.display().to_string()).collect();
            println!("{:#}", json!(paths));
        } else if pinned.is_empty() {
            println!("(no pinned folders)");
        } else {
            for path in pinned {
                println!("  {} {}", style("*").yellow(), path.display());
            }
        }
    }

    fn print_pin(&self, dir: &Path, outcome: PinOutcome) {
        let shown = dir.display().to_string();
        match outcome {
            PinOutcome::Pinned => {
                self.report(json!({ "pinned": shown }), format!("Pinned {shown}"));
            }
            PinOutcome::AlreadyPinned => {
                self.report(json!({ "pinned": shown }), format!("{shown} is already pinned"));
            }
            PinOutcome::Rejected(reason) => self.report(
                json!({ "pinned": Value::Null, "rejected": reason.to_string() }),
                format!("{} {reason}", style("Cannot pin:").yellow()),
            ),
        }
    }
}
