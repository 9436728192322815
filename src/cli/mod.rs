//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations. The CLI stands in for the browser
//! shell of the editor: the storage slots live in a data directory, the
//! share fragment is the `hash` slot, and downloads are files on disk.

mod edit;
mod export;
mod list;
mod random;
mod show;
mod transform;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::bitgrid::{Sprite, HEIGHT, WIDTH};
use crate::config::{data_dir, load_config, merge_cli_overrides, CliOverrides, Sprite5Config};
use crate::export::{ExportFormat, MAX_SCALE};
use crate::store::FileStorage;
use crate::transforms::MAX_RANDOM_COUNT;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// sprite5 - paint, share and export 5x5 monochrome sprites
#[derive(Parser)]
#[command(name = "sprite5")]
#[command(about = "sprite5 - paint, share and export 5x5 monochrome sprites")]
#[command(version)]
pub struct Cli {
    /// Config file (default: sprite5.toml found upwards, then XDG config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved collection and share fragment
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Render for a dark background (white pixels)
    #[arg(long, global = true)]
    pub dark: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview a sprite in the terminal with its token and share link
    Show {
        /// Sprite token (e.g. 0x112A2A1); defaults to the current share fragment
        token: Option<String>,
    },

    /// Paint strokes onto a sprite and save it to the collection
    Edit {
        /// Sprite to open; defaults to the current share fragment
        token: Option<String>,

        /// Start from a blank, unsaved sprite
        #[arg(long, conflicts_with = "token")]
        new: bool,

        /// One gesture as space-separated cells: "x,y x,y ..." (repeatable).
        /// The first cell decides between drawing and erasing.
        #[arg(long, value_name = "X,Y ...")]
        stroke: Vec<String>,

        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Mirror a sprite (horizontal by default)
    Flip {
        token: String,

        /// Mirror top-to-bottom instead of left-to-right
        #[arg(long)]
        vertical: bool,

        /// Save the result as an edit of TOKEN
        #[arg(long)]
        save: bool,
    },

    /// Invert every cell of a sprite
    Invert {
        token: String,

        /// Save the result as an edit of TOKEN
        #[arg(long)]
        save: bool,
    },

    /// Generate random sprites, each followed by its inverse
    Random {
        /// Number of sprites (rounded up to even, at most 10000; default from config)
        #[arg(short = 'n', long, value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_RANDOM_COUNT as u64))]
        count: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print a preview under every token
        #[arg(long)]
        preview: bool,
    },

    /// List the saved collection
    List {
        /// List the built-in seed gallery instead
        #[arg(long)]
        gallery: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a sprite from the saved collection
    Delete { token: String },

    /// Export a sprite as <Token>.png or <Token>.svg
    Export {
        token: String,

        #[arg(short, long, value_enum, default_value = "png")]
        format: ExportFormat,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale PNG output by integer factor (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
        scale: Option<u32>,
    },

    /// Print the SVG favicon data URL of a sprite
    Favicon { token: String },

    /// Print PNG data URLs, one per token
    #[command(name = "data-url")]
    DataUrl {
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

/// Resolved configuration and storage shared by all commands.
pub(crate) struct Context {
    pub config: Sprite5Config,
    pub storage: FileStorage,
}

impl Context {
    fn load(cli: &Cli, scale: Option<u32>) -> Result<Self, String> {
        let mut config = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
        let overrides = CliOverrides {
            data_dir: cli.data_dir.clone(),
            dark: Some(cli.dark),
            scale,
        };
        merge_cli_overrides(&mut config, &overrides);
        let storage = FileStorage::new(data_dir(&config));
        Ok(Self { config, storage })
    }
}

/// Parse a user-supplied token strictly, printing the reason on failure.
pub(crate) fn parse_token_arg(token: &str) -> Result<Sprite, ExitCode> {
    crate::codec::parse_token(token).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Parse one stroke: cells separated by whitespace or `;`, each `x,y`.
pub(crate) fn parse_stroke(stroke: &str) -> Result<Vec<(u32, u32)>, String> {
    let cell = Regex::new(r"^(\d+),(\d+)$").map_err(|e| e.to_string())?;
    let mut cells = Vec::new();

    for part in stroke.split(|c: char| c.is_whitespace() || c == ';').filter(|p| !p.is_empty()) {
        let caps = cell
            .captures(part)
            .ok_or_else(|| format!("invalid cell '{}', expected x,y", part))?;
        let x: u32 = caps[1].parse().map_err(|_| format!("invalid x in '{}'", part))?;
        let y: u32 = caps[2].parse().map_err(|_| format!("invalid y in '{}'", part))?;
        if x >= WIDTH || y >= HEIGHT {
            return Err(format!("cell ({}, {}) is outside the {}x{} grid", x, y, WIDTH, HEIGHT));
        }
        cells.push((x, y));
    }

    if cells.is_empty() {
        return Err("empty stroke".to_string());
    }
    Ok(cells)
}

/// Start stderr logging; `RUST_LOG` wins over `--verbose`.
///
/// The returned handle must stay alive for the duration of the command.
fn init_logging(verbose: bool) -> Option<flexi_logger::LoggerHandle> {
    let spec = if verbose { "debug" } else { "warn" };
    let logger = match flexi_logger::Logger::try_with_env_or_str(spec) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Invalid log specification: {}", e);
            return None;
        }
    };
    match logger.log_to_stderr().start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {}", e);
            None
        }
    }
}

/// Run the CLI and return the exit code
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose);

    let scale = match &cli.command {
        Commands::Export { scale, .. } => *scale,
        _ => None,
    };
    let ctx = match Context::load(&cli, scale) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match cli.command {
        Commands::Show { token } => show::run_show(&ctx, token.as_deref()),
        Commands::Edit { token, new, stroke, dry_run } => edit::run_edit(ctx, token.as_deref(), new, &stroke, dry_run),
        Commands::Flip { token, vertical, save } => transform::run_flip(ctx, &token, !vertical, save),
        Commands::Invert { token, save } => transform::run_invert(ctx, &token, save),
        Commands::Random { count, seed, preview } => random::run_random(&ctx, count, seed, preview),
        Commands::List { gallery, json } => list::run_list(&ctx, gallery, json),
        Commands::Delete { token } => edit::run_delete(ctx, &token),
        Commands::Export { token, format, output, .. } => export::run_export(&ctx, &token, format, output.as_deref()),
        Commands::Favicon { token } => export::run_favicon(&ctx, &token),
        Commands::DataUrl { tokens } => export::run_data_url(&ctx, &tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stroke() {
        assert_eq!(parse_stroke("0,0 1,0;2,1").unwrap(), vec![(0, 0), (1, 0), (2, 1)]);
        assert_eq!(parse_stroke("  4,4  ").unwrap(), vec![(4, 4)]);
    }

    #[test]
    fn test_parse_stroke_rejects_bad_cells() {
        assert!(parse_stroke("").is_err());
        assert!(parse_stroke("1;2").is_err());
        assert!(parse_stroke("5,0").unwrap_err().contains("outside"));
        assert!(parse_stroke("-1,0").is_err());
    }

    #[test]
    fn test_cli_parses_edit() {
        let cli = Cli::try_parse_from(["sprite5", "edit", "--new", "--stroke", "0,0 1,1", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Edit { token, new, stroke, dry_run } => {
                assert_eq!(token, None);
                assert!(new);
                assert_eq!(stroke, vec!["0,0 1,1".to_string()]);
                assert!(dry_run);
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_cli_rejects_scale_out_of_range() {
        assert!(Cli::try_parse_from(["sprite5", "export", "0x1", "--scale", "0"]).is_err());
        assert!(Cli::try_parse_from(["sprite5", "export", "0x1", "--scale", "65"]).is_err());
    }

    #[test]
    fn test_cli_rejects_random_count_out_of_range() {
        let max = MAX_RANDOM_COUNT.to_string();
        assert!(Cli::try_parse_from(["sprite5", "random", "-n", max.as_str()]).is_ok());
        let over = (MAX_RANDOM_COUNT + 1).to_string();
        assert!(Cli::try_parse_from(["sprite5", "random", "-n", over.as_str()]).is_err());
        assert!(Cli::try_parse_from(["sprite5", "random", "-n", "18446744073709551615"]).is_err());
    }
}
