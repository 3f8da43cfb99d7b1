//! CLI frontend for the Year Zero dice engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "yz",
    about = "Year Zero dice roller: build, push and modify dice pools",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions (pushes, modifiers) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported games, or the dice of one game
    Games {
        /// Game to describe (e.g. myz, t2k, alien)
        game: Option<String>,
    },

    /// Roll a dice pool
    Roll {
        /// Game the roll is made for
        #[arg(short, long, default_value = "myz")]
        game: String,

        /// Dice as KIND=N, by die type (base=3) or denomination (s=2)
        #[arg(required = true)]
        dice: Vec<String>,

        /// Difficulty modifier applied before rolling
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modify: i32,

        /// Push the roll up to this many times
        #[arg(short, long, default_value_t = 0)]
        push: u32,

        /// How many times the pool may be pushed (0 disables pushing)
        #[arg(long, default_value_t = 1)]
        max_push: u32,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Name shown above the roll
        #[arg(short, long)]
        name: Option<String>,

        /// Print the roll report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Games { game } => commands::games::run(game.as_deref()),
        Commands::Roll {
            game,
            dice,
            modify,
            push,
            max_push,
            seed,
            name,
            json,
        } => commands::roll::run(&commands::roll::RollArgs {
            game,
            dice,
            modify,
            push,
            max_push,
            seed,
            name,
            json,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
