// src/cli.rs
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;

use crate::config::Options;
use crate::core::HttpClient;
use crate::progress::LogProgress;
use crate::runner::{self, RunSummary};

#[derive(Debug, Parser)]
#[command(name = "bc_liquor", version, about = "Scrape the BC Liquor Stores catalogue into CSV/JSON snapshots and history")]
pub struct Cli {
    /// Log level: error, warn, info, debug, trace, off
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full snapshot: bcliquordata.csv + bcliquordata.json (overwritten)
    Export {
        /// Directory for the snapshot files [default: .]
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Append this run to the yearly/monthly history and refresh the legends
    Periodic {
        /// Directory holding the archives [default: periodicdata]
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(&cli.log_level)?;
    execute(cli.command).inspect_err(|e| loge!("{e:#}"))
}

pub fn execute(command: Command) -> color_eyre::Result<()> {
    let mut progress = LogProgress::default();

    let summary: RunSummary = match command {
        Command::Export { out_dir } => {
            let options = Options::default().with_out_dir(out_dir);
            let client = HttpClient::new(&options.user_agent)?;
            runner::run_export(&client, &options, Some(&mut progress))
                .wrap_err("full export failed")?
        }
        Command::Periodic { data_dir } => {
            let options = Options::default().with_data_dir(data_dir);
            let client = HttpClient::new(&options.user_agent)?;
            let now = Local::now().naive_local();
            runner::run_periodic(&client, &options, now, Some(&mut progress))
                .wrap_err("periodic run failed")?
        }
    };

    for path in &summary.files_written {
        logf!("Wrote {}", path.display());
    }
    logf!("{} products", summary.rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands_and_overrides() {
        let cli = Cli::try_parse_from(["bc_liquor", "export", "--out-dir", "snap"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert!(matches!(cli.command, Command::Export { out_dir: Some(ref d) } if d == &PathBuf::from("snap")));

        let cli = Cli::try_parse_from(["bc_liquor", "periodic", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Command::Periodic { data_dir: None }));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["bc_liquor"]).is_err());
    }
}
