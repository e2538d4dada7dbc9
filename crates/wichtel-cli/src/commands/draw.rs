use chrono::Utc;
use clap::Subcommand;
use wichtel_core::Command;

use crate::common::{open_store, print_events, CliResult};

#[derive(Subcommand)]
pub enum DrawAction {
    /// Mark a participant ready; fires the draw when the gate opens
    Ready {
        /// Participant id
        participant: String,
        /// Group id
        group: String,
    },
    /// Force the draw inside the administrative window
    Force {
        /// Group id
        group: String,
    },
    /// Show readiness, clock, and eligibility for a group
    Status {
        /// Group id
        group: String,
    },
    /// Reveal the drawn receiver for a participant
    Reveal {
        /// Participant id
        participant: String,
        /// Group id
        group: String,
    },
}

pub fn run(action: DrawAction) -> CliResult {
    let (mut store, _config) = open_store()?;
    let now = Utc::now();

    match action {
        DrawAction::Ready { participant, group } => {
            let events = store.dispatch(
                Command::MarkReady {
                    participant_id: participant,
                    group_id: group,
                },
                now,
            )?;
            print_events(&events)?;
        }
        DrawAction::Force { group } => {
            let events = store.dispatch(Command::ForceDraw { group_id: group }, now)?;
            print_events(&events)?;
        }
        DrawAction::Status { group } => {
            let state = store.state();
            let g = state
                .group(&group)
                .ok_or_else(|| format!("unknown group: {group}"))?;
            let readiness = state.readiness(&group);
            let clock = g.draw_clock(now);
            let status = serde_json::json!({
                "group_id": g.id,
                "name": g.name,
                "ready_members": readiness.ready_members,
                "total_members": readiness.total_members,
                "is_draw_complete": readiness.is_draw_complete,
                "days_until_event": clock.days_until_event,
                "can_auto_draw": store.engine().can_auto_draw(readiness, clock),
                "can_force_draw": store.engine().can_force_draw(readiness, clock),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        DrawAction::Reveal { participant, group } => {
            let events = store.dispatch(
                Command::Reveal {
                    participant_id: participant.clone(),
                    group_id: group.clone(),
                },
                now,
            )?;
            print_events(&events)?;

            let state = store.state();
            if let Some(receiver_id) = state
                .participant(&participant)
                .and_then(|p| p.assignments.get(&group))
            {
                if let Some(receiver) = state.participant(receiver_id) {
                    let reveal = serde_json::json!({
                        "recipient_id": receiver.id,
                        "recipient_name": receiver.name,
                        "recipient_wishlist": receiver.wishlist_items,
                    });
                    println!("{}", serde_json::to_string_pretty(&reveal)?);
                }
            }
        }
    }

    Ok(())
}
