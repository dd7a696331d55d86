//! CLI frontend for the Lebensweg character generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{SessionArgs, SetupArgs, SummaryFormat};

#[derive(Parser)]
#[command(
    name = "lw",
    about = "Lebensweg: card-draw character generation from roll tables",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new run (replaces any run in progress)
    Start {
        #[command(flatten)]
        session: SessionArgs,

        #[command(flatten)]
        setup: SetupArgs,

        /// Only remember the setup; don't draw any cards yet
        #[arg(long)]
        setup_only: bool,
    },

    /// Show the current offer, budget, and biography
    Show {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Pick a card by its number in the offer
    Choose {
        /// Card number as shown by `show` (starting at 1)
        number: usize,

        #[command(flatten)]
        session: SessionArgs,

        /// Summary format if the run ends
        #[arg(short, long, value_enum, default_value_t = SummaryFormat::Text)]
        format: SummaryFormat,
    },

    /// Draw a fresh offer from the same table without spending a roll
    Reroll {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// End the run now and print the summary
    Finish {
        #[command(flatten)]
        session: SessionArgs,

        /// Summary format
        #[arg(short, long, value_enum, default_value_t = SummaryFormat::Text)]
        format: SummaryFormat,
    },

    /// Throw the run away and start over with the remembered setup
    Reset {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// List the tables in a directory
    Tables {
        /// Directory of table JSON files
        #[arg(short, long, default_value = ".")]
        tables: PathBuf,
    },

    /// Decode a row payload file and print the resulting choice
    Decode {
        /// File holding the raw payload
        file: PathBuf,

        /// Table name used in error messages
        #[arg(short = 'n', long, default_value = "payload")]
        table_name: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start {
            session,
            setup,
            setup_only,
        } => commands::start::run(&session, &setup, setup_only),
        Commands::Show { session } => commands::show::run(&session),
        Commands::Choose {
            number,
            session,
            format,
        } => commands::choose::run(&session, number, format),
        Commands::Reroll { session } => commands::reroll::run(&session),
        Commands::Finish { session, format } => commands::finish::run(&session, format),
        Commands::Reset { session } => commands::reset::run(&session),
        Commands::Tables { tables } => commands::tables::run(&tables),
        Commands::Decode { file, table_name } => commands::decode::run(&file, &table_name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
