//! Export commands: files on disk and data URLs

use std::path::Path;
use std::process::ExitCode;

use crate::export::{favicon_data_url, save, ExportFormat, ScratchSurface};

use super::{parse_token_arg, Context, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the export command - write `<Token>.<ext>` into the output dir.
pub fn run_export(ctx: &Context, token: &str, format: ExportFormat, output: Option<&Path>) -> ExitCode {
    let sprite = match parse_token_arg(token) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let dir = output.unwrap_or(Path::new("."));
    match save(sprite, format, ctx.config.render.theme, ctx.config.render.scale, dir) {
        Ok(path) => {
            eprintln!("Saved: {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the favicon command.
pub fn run_favicon(ctx: &Context, token: &str) -> ExitCode {
    match parse_token_arg(token) {
        Ok(sprite) => {
            println!("{}", favicon_data_url(sprite, ctx.config.render.theme));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(code) => code,
    }
}

/// Execute the data-url command, reusing one scratch surface for all tokens.
pub fn run_data_url(ctx: &Context, tokens: &[String]) -> ExitCode {
    let mut sprites = Vec::with_capacity(tokens.len());
    for token in tokens {
        match parse_token_arg(token) {
            Ok(s) => sprites.push(s),
            Err(code) => return code,
        }
    }

    let scratch = ScratchSurface::new();
    for sprite in sprites {
        match scratch.data_url(sprite, ctx.config.render.theme) {
            Ok(url) => println!("{}", url),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
