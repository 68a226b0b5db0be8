// src/bin/cli.rs
use bc_liquor::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
