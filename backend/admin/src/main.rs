use std::process::ExitCode;

use admin::Admin;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the showroom server
    #[arg(long, env = "SHOWROOM_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Products of a category in display order
    List { category: String },

    /// Unordered and duplicate counts for a category
    Status { category: String },

    /// Give every unordered product an order, oldest first
    Organize {
        category: String,

        #[arg(short, long)]
        yes: bool,
    },

    /// Renumber products that share an order
    FixDuplicates {
        category: String,

        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let client = Admin::new(&args.url);

    let result = match args.command {
        Command::List { category } => admin::list(&client, &category).await,
        Command::Status { category } => admin::status(&client, &category).await,
        Command::Organize { category, yes } => admin::organize(&client, &category, yes).await,
        Command::FixDuplicates { category, yes } => {
            admin::fix_duplicates(&client, &category, yes).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
