use chrono::Utc;
use clap::Subcommand;
use wichtel_core::Command;

use crate::common::{open_store, print_events, CliResult};

#[derive(Subcommand)]
pub enum ParticipantAction {
    /// Register a new participant (joins the first group)
    Register {
        /// Display name, unique case-insensitively
        name: String,
        /// Login password
        #[arg(long)]
        password: String,
        /// Initial wishlist items (repeatable)
        #[arg(long = "wish")]
        wishlist: Vec<String>,
    },
    /// Verify a name/password pair and print the participant
    Login {
        name: String,
        #[arg(long)]
        password: String,
    },
    /// List participants, optionally filtered by group
    List {
        #[arg(long)]
        group: Option<String>,
    },
    /// Replace a participant's wishlist
    Wishlist {
        /// Participant id
        id: String,
        /// New wishlist items
        items: Vec<String>,
    },
    /// Add a participant to a group
    Join {
        /// Participant id
        id: String,
        /// Group id
        group: String,
    },
    /// Remove a participant from a group
    Leave {
        /// Participant id
        id: String,
        /// Group id
        group: String,
    },
    /// Remove a participant entirely
    Remove {
        /// Participant id
        id: String,
    },
}

pub fn run(action: ParticipantAction) -> CliResult {
    let (mut store, _config) = open_store()?;
    let now = Utc::now();

    match action {
        ParticipantAction::Register {
            name,
            password,
            wishlist,
        } => {
            let events = store.dispatch(
                Command::RegisterParticipant {
                    name,
                    password,
                    wishlist_items: wishlist,
                },
                now,
            )?;
            print_events(&events)?;
        }
        ParticipantAction::Login { name, password } => {
            match store.state().verify_login(&name, &password) {
                Some(participant) => {
                    println!("{}", serde_json::to_string_pretty(participant)?);
                }
                None => return Err("invalid name or password".into()),
            }
        }
        ParticipantAction::List { group } => {
            let state = store.state();
            let listed: Vec<_> = state
                .participants
                .iter()
                .filter(|p| group.as_deref().map_or(true, |g| p.is_member_of(g)))
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "name": p.name,
                        "wishlist_items": p.wishlist_items,
                        "group_ids": p.group_ids,
                        "ready_groups": p.ready_groups,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        ParticipantAction::Wishlist { id, items } => {
            let events = store.dispatch(
                Command::UpdateWishlist {
                    participant_id: id,
                    items,
                },
                now,
            )?;
            print_events(&events)?;
        }
        ParticipantAction::Join { id, group } => {
            let events = store.dispatch(
                Command::SetMembership {
                    participant_id: id,
                    group_id: group,
                    is_member: true,
                },
                now,
            )?;
            print_events(&events)?;
        }
        ParticipantAction::Leave { id, group } => {
            let events = store.dispatch(
                Command::SetMembership {
                    participant_id: id,
                    group_id: group,
                    is_member: false,
                },
                now,
            )?;
            print_events(&events)?;
        }
        ParticipantAction::Remove { id } => {
            let events = store.dispatch(Command::RemoveParticipant { participant_id: id }, now)?;
            print_events(&events)?;
        }
    }

    Ok(())
}
