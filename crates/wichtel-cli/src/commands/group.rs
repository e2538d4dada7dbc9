use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use wichtel_core::Command;

use crate::common::{open_store, print_events, CliResult};

#[derive(Subcommand)]
pub enum GroupAction {
    /// Create a new group/event
    Create {
        /// Event name
        name: String,
        /// Gift budget (config default when omitted)
        #[arg(long)]
        budget: Option<String>,
        /// Budget currency (config default when omitted)
        #[arg(long)]
        currency: Option<String>,
        /// Exchange date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List groups with readiness and draw status
    List,
    /// Update group fields
    Set {
        /// Group id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        /// Exchange date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Toggle a group active/inactive
    Toggle {
        /// Group id
        id: String,
    },
    /// Delete a group (members remain, memberships are dropped)
    Delete {
        /// Group id
        id: String,
    },
}

pub fn run(action: GroupAction) -> CliResult {
    let (mut store, config) = open_store()?;
    let now = Utc::now();

    match action {
        GroupAction::Create {
            name,
            budget,
            currency,
            date,
        } => {
            let events = store.dispatch(
                Command::CreateGroup {
                    name,
                    budget: budget.unwrap_or(config.group_defaults.budget),
                    currency: currency.unwrap_or(config.group_defaults.currency),
                    exchange_date: date,
                },
                now,
            )?;
            print_events(&events)?;
        }
        GroupAction::List => {
            let state = store.state();
            let summaries: Vec<_> = state
                .groups
                .iter()
                .map(|g| {
                    let readiness = state.readiness(&g.id);
                    serde_json::json!({
                        "id": g.id,
                        "name": g.name,
                        "budget": g.budget,
                        "currency": g.currency,
                        "exchange_date": g.exchange_date,
                        "days_until_event": g.days_until(now),
                        "is_active": g.is_active,
                        "is_draw_complete": g.is_draw_complete,
                        "ready_members": readiness.ready_members,
                        "total_members": readiness.total_members,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        GroupAction::Set {
            id,
            name,
            budget,
            currency,
            date,
        } => {
            let events = store.dispatch(
                Command::UpdateGroup {
                    group_id: id,
                    name,
                    budget,
                    currency,
                    exchange_date: date,
                },
                now,
            )?;
            print_events(&events)?;
        }
        GroupAction::Toggle { id } => {
            let events = store.dispatch(Command::ToggleGroupActive { group_id: id }, now)?;
            print_events(&events)?;
        }
        GroupAction::Delete { id } => {
            let events = store.dispatch(Command::DeleteGroup { group_id: id }, now)?;
            print_events(&events)?;
        }
    }

    Ok(())
}
