//! sprite5 - Command-line tool for 5x5 monochrome sprites

use std::process::ExitCode;

use sprite5::cli;

fn main() -> ExitCode {
    cli::run()
}
