mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sidedock",
    version,
    about = "A desktop side panel docked to a screen edge"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Show the panel and run until it is closed
    Run,
    /// Move the running panel by the given offsets; the last value is saved
    Offset {
        /// Horizontal offset in logical pixels
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Vertical offset in logical pixels
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// Print the effective settings and resolved hotkeys
    Config,
    /// List attached monitors as the panel sees them
    Monitors {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show where the panel would dock with the current settings
    Layout,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Run => commands::run::execute(),
        Commands::Offset { x, y } => commands::offset::execute(x, y),
        Commands::Debug { command } => match command {
            DebugCommands::Config => commands::debug::config::execute(),
            DebugCommands::Monitors { json } => commands::debug::monitors::execute(json),
            DebugCommands::Layout => commands::debug::layout::execute(),
        },
    }
}
