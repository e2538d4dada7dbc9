use chrono::Utc;
use clap::Subcommand;
use wichtel_core::Command;

use crate::common::{open_store, print_events, CliResult};

#[derive(Subcommand)]
pub enum PollAction {
    /// Create a poll for a group
    Add {
        /// Group id
        group: String,
        /// Poll question
        question: String,
        /// Answer options
        #[arg(required = true, num_args = 1..)]
        options: Vec<String>,
    },
    /// List polls with tallies, optionally filtered by group
    List {
        #[arg(long)]
        group: Option<String>,
    },
    /// Cast (or change) a vote
    Vote {
        /// Poll id
        poll: String,
        /// Participant id
        participant: String,
        /// Option id
        option: String,
    },
    /// Remove a poll
    Remove {
        /// Poll id
        id: String,
    },
}

pub fn run(action: PollAction) -> CliResult {
    let (mut store, _config) = open_store()?;
    let now = Utc::now();

    match action {
        PollAction::Add {
            group,
            question,
            options,
        } => {
            let events = store.dispatch(
                Command::AddPoll {
                    group_id: group,
                    question,
                    options,
                },
                now,
            )?;
            print_events(&events)?;
        }
        PollAction::List { group } => {
            let state = store.state();
            let listed: Vec<_> = state
                .polls
                .iter()
                .filter(|p| group.as_deref().map_or(true, |g| p.group_id == g))
                .map(|p| {
                    let tally = p.tally();
                    serde_json::json!({
                        "id": p.id,
                        "group_id": p.group_id,
                        "question": p.question,
                        "options": p.options.iter().map(|o| serde_json::json!({
                            "id": o.id,
                            "text": o.text,
                            "votes": tally.get(&o.id).copied().unwrap_or(0),
                        })).collect::<Vec<_>>(),
                        "total_votes": p.selections.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        PollAction::Vote {
            poll,
            participant,
            option,
        } => {
            let events = store.dispatch(
                Command::VotePoll {
                    poll_id: poll,
                    participant_id: participant,
                    option_id: option,
                },
                now,
            )?;
            print_events(&events)?;
        }
        PollAction::Remove { id } => {
            let events = store.dispatch(Command::RemovePoll { poll_id: id }, now)?;
            print_events(&events)?;
        }
    }

    Ok(())
}
