//! Random sprite generation command

use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::renderer::render_text;

use super::edit::init_workspace;
use super::{Context, EXIT_SUCCESS};

/// Execute the random command: print the workspace's random suggestions.
pub fn run_random(ctx: &Context, count: Option<usize>, seed: Option<u64>, preview: bool) -> ExitCode {
    let count = count.unwrap_or(ctx.config.random.count);
    let workspace = match seed {
        Some(seed) => init_workspace(ctx.storage.clone(), count, &mut StdRng::seed_from_u64(seed)),
        None => init_workspace(ctx.storage.clone(), count, &mut rand::rng()),
    };
    let workspace = match workspace {
        Ok(ws) => ws,
        Err(code) => return code,
    };

    for sprite in workspace.random_sprites() {
        println!("{}", sprite);
        if preview {
            println!("{}", render_text(*sprite));
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
