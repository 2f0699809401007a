use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, CommandReport};

#[derive(Debug, Parser)]
#[command(
    name = "stockchat",
    version,
    about = "Terminal chat client for the stock advisor backend"
)]
struct Cli {
    /// Emit the command report as JSON instead of plain lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one message and print the assistant reply.
    Ask {
        #[arg(long)]
        message: String,
    },
    /// Interactive chat over stdin, one exchange per line.
    Chat,
    /// Show build id, resolved configuration and transcript stats.
    Status,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Ask { message } => commands::ask::run(&message)?,
        Command::Chat => commands::chat::run()?,
        Command::Status => commands::status::run()?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!("{} finished with issues", report.command);
    }
    Ok(())
}

fn print_report(report: &CommandReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for detail in &report.details {
        println!("{detail}");
    }
    for issue in &report.issues {
        eprintln!("warning: {issue}");
    }
    Ok(())
}
