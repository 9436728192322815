//! Show command implementation (terminal display)

use std::process::ExitCode;

use crate::codec::decode_opt;
use crate::editor::share_url;
use crate::renderer::render_text;
use crate::store::{SpriteStore, Storage, FRAGMENT_SLOT};

use super::{parse_token_arg, Context, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the show command - print the sprite grid, token and share link
pub fn run_show(ctx: &Context, token: Option<&str>) -> ExitCode {
    let sprite = match token {
        Some(t) => match parse_token_arg(t) {
            Ok(s) => s,
            Err(code) => return code,
        },
        // No token: show whatever the share fragment points at
        None => match ctx.storage.read(FRAGMENT_SLOT) {
            Ok(fragment) => decode_opt(fragment.as_deref()),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };

    let saved = match SpriteStore::load(ctx.storage.clone()) {
        Ok(store) => store.collection().position(sprite),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    print!("{}", render_text(sprite));
    println!("token: {}", sprite);
    println!("cells: {}", sprite.count_on());
    println!("link:  {}", share_url(&ctx.config.share.base_url, sprite));
    match saved {
        Some(index) => println!("saved: #{}", index + 1),
        None => println!("saved: no"),
    }

    ExitCode::from(EXIT_SUCCESS)
}
