mod cmd;
mod core;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "grcalc")]
#[command(about = "Construction replacement-cost (GRC) estimates for property valuations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate typical and quality-adjusted replacement costs for a building
    Estimate(cmd::estimate::EstimateCommand),
    /// List the elements and options that apply to a calculator kind
    Elements(cmd::elements::ElementsCommand),
    /// Print a seeded building profile for a calculator kind
    Template(cmd::template::TemplateCommand),
    /// Check a building profile (and optionally a rate table) for issues
    Validate(cmd::validate::ValidateCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Estimate(command) => command.exec(),
        Command::Elements(command) => command.exec(),
        Command::Template(command) => command.exec(),
        Command::Validate(command) => command.exec(),
        Command::Schema(command) => command.exec(),
    }
}
