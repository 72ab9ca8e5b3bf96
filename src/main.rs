// SPDX-License-Identifier: PMPL-1.0-or-later

//! skin-localize: string id resolution and catalog reconciliation for
//! media-center skin development.
//!
//! The CLI is the thin integration shim around the engine: editor
//! plugins shell out with a selection and its line, and get back the
//! replacement text (plain or JSON) to apply to the buffer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use skin_localize::annotate;
use skin_localize::catalog::Catalog;
use skin_localize::fetch;
use skin_localize::refs;
use skin_localize::session::{Session, DEFAULT_COUNTRY_CODE};
use skin_localize::types::{OutputMode, ReservedRange};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skin-localize")]
#[command(version = "0.1.0")]
#[command(about = "String id resolution and catalog reconciliation for skin development")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that needs both catalogs.
#[derive(clap::Args)]
struct SessionArgs {
    /// Skin workspace root (the directory containing language/)
    #[arg(short, long)]
    root: PathBuf,

    /// Locale variant of the local strings file
    #[arg(long, default_value = DEFAULT_COUNTRY_CODE)]
    country_code: String,

    /// Load the shared catalog from a local file instead of fetching
    #[arg(long)]
    shared_po: Option<PathBuf>,

    /// URL of the shared catalog
    #[arg(long, default_value = fetch::SHARED_CATALOG_URL)]
    shared_url: String,

    /// Lower bound of the reserved local id range
    #[arg(long, default_value_t = 31000)]
    range_floor: u32,

    /// Upper bound of the reserved local id range
    #[arg(long, default_value_t = 31999)]
    range_ceiling: u32,
}

impl SessionArgs {
    fn open(&self) -> Result<Session> {
        let shared = match &self.shared_po {
            Some(path) => Catalog::load(path)?,
            None => fetch::fetch_shared_catalog(&self.shared_url)?,
        };
        let range = ReservedRange::new(self.range_floor, self.range_ceiling);
        Ok(Session::open(&self.root, &self.country_code, shared, range)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Replace selected text with its localization reference,
    /// creating a new local entry when no catalog knows the text
    Localize {
        #[command(flatten)]
        session: SessionArgs,

        /// The selected text
        #[arg(value_name = "SELECTION")]
        selection: String,

        /// The full line the selection sits on
        #[arg(short, long, default_value = "")]
        line: String,

        /// Emit the bare id instead of the $LOCALIZE[..] form
        #[arg(long)]
        id_only: bool,

        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wrap a bare id or unwrap a wrapped reference, without touching
    /// any catalog
    Swap {
        /// The selected text (must be numeric)
        #[arg(value_name = "SELECTION")]
        selection: String,

        /// The full line the selection sits on
        #[arg(short, long, default_value = "")]
        line: String,

        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print resolved annotation text for every line of a markup file
    Annotate {
        #[command(flatten)]
        session: SessionArgs,

        /// Markup file to annotate
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit annotations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single id to its source text
    Lookup {
        #[command(flatten)]
        session: SessionArgs,

        /// Numeric identifier
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Find occurrences of a word across the skin's .xml files
    Refs {
        /// Directory to search
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Word to find
        #[arg(value_name = "WORD")]
        word: String,

        /// Emit hits as JSON
        #[arg(long)]
        json: bool,
    },

    /// Jump to the definition site of an expression, variable,
    /// include, or font name
    Definition {
        /// Directory to search
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// The name to resolve
        #[arg(value_name = "WORD")]
        word: String,

        /// The usage line (decides which definition shape applies)
        #[arg(short, long)]
        line: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Localize {
            session,
            selection,
            line,
            id_only,
            json,
        } => {
            let mode = if id_only {
                OutputMode::IdOnly
            } else {
                OutputMode::Full
            };
            let mut session = session.open()?;
            let outcome = session.localize(&selection, &line, mode)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                match &outcome.replacement {
                    Some(replacement) => {
                        println!("{replacement}");
                        if let Some(id) = outcome.new_id {
                            eprintln!("{} allocated new id #{id}", "info:".green());
                        }
                    }
                    None => eprintln!("{} empty selection, nothing to do", "info:".yellow()),
                }
            }
        }

        Commands::Swap {
            selection,
            line,
            json,
        } => {
            use skin_localize::swap::{classify, unwrap_transform, wrap_transform};
            use skin_localize::types::{SwapAction, SwapOutcome};
            let outcome = match classify(&selection, &line) {
                SwapAction::Unwrap => unwrap_transform(&selection),
                SwapAction::Wrap => wrap_transform(&selection),
                SwapAction::NoOp => SwapOutcome::noop(),
                SwapAction::ResolveOrCreate => {
                    anyhow::bail!(
                        "selection is not a numeric id; use `localize` for free text"
                    );
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if let Some(replacement) = &outcome.replacement {
                println!("{replacement}");
            }
        }

        Commands::Annotate {
            session,
            file,
            json,
        } => {
            let session = session.open()?;
            let annotations = annotate::annotate_file(&file, &session)
                .with_context(|| format!("unable to annotate {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&annotations)?);
            } else {
                for a in &annotations {
                    println!("{:>5}:{}", a.line, a.text);
                }
            }
        }

        Commands::Lookup { session, id } => {
            let session = session.open()?;
            match session.resolve_id(&id) {
                Some(text) => println!("{text}"),
                None => {
                    eprintln!("{} no entry for #{id}", "miss:".yellow());
                    std::process::exit(1);
                }
            }
        }

        Commands::Refs { dir, word, json } => {
            let hits = refs::find_word_in_files(&dir, &word, None, false);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for hit in &hits {
                    println!("{}:{}:{}", hit.file.display(), hit.line, hit.column);
                }
            }
        }

        Commands::Definition { dir, word, line } => {
            match refs::find_definition(&dir, &word, &line) {
                Some(hit) => println!("{}:{}:{}", hit.file.display(), hit.line, hit.column),
                None => {
                    eprintln!("{} no definition found for {word}", "miss:".yellow());
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
