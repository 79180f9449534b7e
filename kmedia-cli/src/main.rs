mod browse;
mod schema;

use std::process::ExitCode;

use browse::{CatalogTree, ShowContainer, ShowLanguages};
use clap::{Parser, Subcommand};
use schema::{CheckSchema, GenerateSchema};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{
    filter::Targets,
    fmt::{format, layer},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Subcommand, Debug)]
enum Subcommands {
    GenerateSchema(GenerateSchema),
    CheckSchema(CheckSchema),
    Languages(ShowLanguages),
    CatalogTree(CatalogTree),
    Container(ShowContainer),
}

#[derive(Parser, Debug)]
#[command(name = "kmedia", version, about)]
struct Args {
    /// Log every executed SQL statement.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Subcommands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let sql_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };

    tracing_subscriber::registry()
        .with(
            Targets::new()
                .with_default(LevelFilter::INFO)
                .with_target("kmedia::sql", sql_level),
        )
        .with(layer().event_format(format().without_time().with_target(false).compact()))
        .init();

    let r = match args.command {
        Subcommands::GenerateSchema(cmd) => cmd.run().await,
        Subcommands::CheckSchema(cmd) => cmd.run().await,
        Subcommands::Languages(cmd) => cmd.run().await,
        Subcommands::CatalogTree(cmd) => cmd.run().await,
        Subcommands::Container(cmd) => cmd.run().await,
    };

    if let Err(e) = r {
        error!("Command execution failed: {e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
