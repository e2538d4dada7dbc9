use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "wichtel-cli", version, about = "Wichtel CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group / event management
    Group {
        #[command(subcommand)]
        action: commands::group::GroupAction,
    },
    /// Participant management
    Participant {
        #[command(subcommand)]
        action: commands::participant::ParticipantAction,
    },
    /// Draw status, readiness, and reveal
    Draw {
        #[command(subcommand)]
        action: commands::draw::DrawAction,
    },
    /// Poll management and voting
    Poll {
        #[command(subcommand)]
        action: commands::poll::PollAction,
    },
    /// Share-link tokens
    Share {
        #[command(subcommand)]
        action: commands::share::ShareAction,
    },
    /// Administrative actions
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Group { action } => commands::group::run(action),
        Commands::Participant { action } => commands::participant::run(action),
        Commands::Draw { action } => commands::draw::run(action),
        Commands::Poll { action } => commands::poll::run(action),
        Commands::Share { action } => commands::share::run(action),
        Commands::Admin { action } => commands::admin::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
