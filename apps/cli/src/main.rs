use std::path::PathBuf;

use clap::Parser;
use daybudget_cli::{build_state, config::Config, init_tracing, render_outcome};
use daybudget_core::budget::PendingSpend;

/// Show what is left of today's budget.
#[derive(Debug, Parser)]
#[command(name = "daybudget", version, about)]
struct Cli {
    /// Amount about to be spent, as typed on the keyboard
    #[arg(default_value = "0")]
    pending: String,

    /// Budget snapshot file (overrides DAYBUDGET_SNAPSHOT_PATH)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the pill state as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.snapshot {
        config.snapshot_path = path;
    }
    init_tracing(config.log_format);

    let state = build_state(&config)?;
    let pending: PendingSpend = cli.pending.parse()?;
    let outcome = state.evaluator.evaluate(pending).await?;
    let pill = state.evaluator.current();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&pill)?);
    } else {
        for line in render_outcome(&outcome, &pill) {
            println!("{}", line);
        }
    }
    Ok(())
}
