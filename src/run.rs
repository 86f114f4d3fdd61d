mod cli;

use anyhow::Result;

use crate::config::{Command, Config};
use crate::service::Ledger;

pub(crate) async fn dispatch(config: &Config, ledger: Ledger) -> Result<()> {
    match config.command.server() {
        Some(server) => crate::server::serve(ledger, &server).await,
        None => as_cli(&config.command, &ledger),
    }
}

fn as_cli(command: &Command, ledger: &Ledger) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let output = match command {
        Command::Summary { month } => cli::summary(ledger, month.as_deref(), today)?,
        Command::Insights { month } => cli::insights(ledger, month.as_deref(), today)?,
        Command::Categories => cli::categories(),
        Command::Serve { .. } => return Ok(()),
    };
    print!("{output}");
    Ok(())
}
