//! Reducer-style state store.
//!
//! All mutations go through [`apply`]: a pure function from the current
//! state and a [`Command`] to the next state plus the domain events the
//! transition produced. [`StateStore`] wraps the state with a persistence
//! adapter and saves after every successful transition, so "check
//! eligibility, then draw" always runs against one consistent snapshot.
//!
//! The auto-draw rule lives in the mark-ready transition: when the last
//! member signals readiness inside the auto window, the draw fires in the
//! same transition. A forced draw is validated against the wider force
//! window and rejected with a descriptive error otherwise.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::draw::DrawEngine;
use crate::error::CoreError;
use crate::events::{DrawTrigger, Event};
use crate::model::{AppState, Group, Participant, Poll};
use crate::storage::PersistenceAdapter;

/// Errors raised by store transitions.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("A participant named '{0}' already exists")]
    DuplicateName(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Unknown poll: {0}")]
    UnknownPoll(String),

    #[error("Poll {poll_id} has no option {option_id}")]
    UnknownPollOption { poll_id: String, option_id: String },

    #[error("Participant {participant_id} is not a member of group {group_id}")]
    NotAMember {
        participant_id: String,
        group_id: String,
    },

    #[error("The draw for group {0} has already completed")]
    AlreadyDrawn(String),

    #[error(
        "Group {group_id} is not eligible for a draw \
         (ready {ready_members}/{total_members}, days until event: {days_until_event:?})"
    )]
    DrawNotEligible {
        group_id: String,
        ready_members: usize,
        total_members: usize,
        days_until_event: Option<f64>,
    },

    #[error("The draw for group {0} has not run yet")]
    NotDrawn(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Every mutation the application performs.
#[derive(Debug, Clone)]
pub enum Command {
    RegisterParticipant {
        name: String,
        password: String,
        wishlist_items: Vec<String>,
    },
    RemoveParticipant {
        participant_id: String,
    },
    UpdateWishlist {
        participant_id: String,
        items: Vec<String>,
    },
    SetMembership {
        participant_id: String,
        group_id: String,
        is_member: bool,
    },
    MarkReady {
        participant_id: String,
        group_id: String,
    },
    ForceDraw {
        group_id: String,
    },
    Reveal {
        participant_id: String,
        group_id: String,
    },
    CreateGroup {
        name: String,
        budget: String,
        currency: String,
        exchange_date: Option<NaiveDate>,
    },
    UpdateGroup {
        group_id: String,
        name: Option<String>,
        budget: Option<String>,
        currency: Option<String>,
        exchange_date: Option<NaiveDate>,
    },
    ToggleGroupActive {
        group_id: String,
    },
    DeleteGroup {
        group_id: String,
    },
    AddPoll {
        group_id: String,
        question: String,
        options: Vec<String>,
    },
    RemovePoll {
        poll_id: String,
    },
    VotePoll {
        poll_id: String,
        participant_id: String,
        option_id: String,
    },
    SetAdminPassword {
        password: String,
    },
    Reset,
}

/// Result of a successful transition: the next state and its events.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: AppState,
    pub events: Vec<Event>,
}

fn require_participant(state: &AppState, id: &str) -> Result<usize, StoreError> {
    state
        .participants
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| StoreError::UnknownParticipant(id.to_string()))
}

fn require_group(state: &AppState, id: &str) -> Result<usize, StoreError> {
    state
        .groups
        .iter()
        .position(|g| g.id == id)
        .ok_or_else(|| StoreError::UnknownGroup(id.to_string()))
}

fn require_poll(state: &AppState, id: &str) -> Result<usize, StoreError> {
    state
        .polls
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| StoreError::UnknownPoll(id.to_string()))
}

fn non_empty(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidValue {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Run the draw for a group and write the results into the state.
/// Callers have already validated eligibility.
fn run_draw(state: &mut AppState, group_id: &str, engine: &DrawEngine) -> usize {
    let member_ids: Vec<String> = state
        .members_of(group_id)
        .iter()
        .map(|p| p.id.clone())
        .collect();
    let assignment = engine.draw(&member_ids);
    for participant in &mut state.participants {
        if let Some(receiver) = assignment.get(&participant.id) {
            participant
                .assignments
                .insert(group_id.to_string(), receiver.clone());
        }
    }
    if let Some(group) = state.groups.iter_mut().find(|g| g.id == group_id) {
        group.is_draw_complete = true;
    }
    member_ids.len()
}

/// Pure reducer: apply one command to a state snapshot.
pub fn apply(
    state: &AppState,
    command: Command,
    engine: &DrawEngine,
    now: DateTime<Utc>,
) -> Result<Transition, StoreError> {
    let mut next = state.clone();
    let mut events = Vec::new();

    match command {
        Command::RegisterParticipant {
            name,
            password,
            wishlist_items,
        } => {
            non_empty("name", &name)?;
            non_empty("password", &password)?;
            if next.participant_by_name(&name).is_some() {
                return Err(StoreError::DuplicateName(name));
            }
            let mut participant = Participant::new(name.clone(), password);
            participant.wishlist_items = wishlist_items;
            // New arrivals join the first group when one exists.
            let group_id = next.groups.first().map(|g| g.id.clone());
            if let Some(gid) = &group_id {
                participant.group_ids.push(gid.clone());
            }
            events.push(Event::ParticipantRegistered {
                participant_id: participant.id.clone(),
                name,
                group_id,
                at: now,
            });
            next.participants.push(participant);
        }

        Command::RemoveParticipant { participant_id } => {
            let idx = require_participant(&next, &participant_id)?;
            next.participants.remove(idx);
            events.push(Event::ParticipantRemoved {
                participant_id,
                at: now,
            });
        }

        Command::UpdateWishlist {
            participant_id,
            items,
        } => {
            let idx = require_participant(&next, &participant_id)?;
            let item_count = items.len();
            next.participants[idx].wishlist_items = items;
            events.push(Event::WishlistUpdated {
                participant_id,
                item_count,
                at: now,
            });
        }

        Command::SetMembership {
            participant_id,
            group_id,
            is_member,
        } => {
            let idx = require_participant(&next, &participant_id)?;
            require_group(&next, &group_id)?;
            let participant = &mut next.participants[idx];
            if is_member {
                if !participant.is_member_of(&group_id) {
                    participant.group_ids.push(group_id.clone());
                }
            } else {
                participant.group_ids.retain(|g| g != &group_id);
            }
            events.push(Event::MembershipChanged {
                participant_id,
                group_id,
                is_member,
                at: now,
            });
        }

        Command::MarkReady {
            participant_id,
            group_id,
        } => {
            let idx = require_participant(&next, &participant_id)?;
            require_group(&next, &group_id)?;
            if !next.participants[idx].is_member_of(&group_id) {
                return Err(StoreError::NotAMember {
                    participant_id,
                    group_id,
                });
            }
            if !next.participants[idx].is_ready_in(&group_id) {
                next.participants[idx].ready_groups.push(group_id.clone());
            }
            let readiness = next.readiness(&group_id);
            events.push(Event::ReadyMarked {
                participant_id,
                group_id: group_id.clone(),
                ready_members: readiness.ready_members,
                total_members: readiness.total_members,
                at: now,
            });

            // Auto-draw gate, checked against the post-update snapshot.
            let clock = next
                .group(&group_id)
                .map(|g| g.draw_clock(now))
                .unwrap_or(crate::draw::DrawClock {
                    days_until_event: None,
                });
            if engine.can_auto_draw(readiness, clock) {
                let participants = run_draw(&mut next, &group_id, engine);
                events.push(Event::DrawCompleted {
                    group_id,
                    trigger: DrawTrigger::Auto,
                    participants,
                    at: now,
                });
            }
        }

        Command::ForceDraw { group_id } => {
            let idx = require_group(&next, &group_id)?;
            if next.groups[idx].is_draw_complete {
                return Err(StoreError::AlreadyDrawn(group_id));
            }
            let readiness = next.readiness(&group_id);
            let clock = next.groups[idx].draw_clock(now);
            if !engine.can_force_draw(readiness, clock) {
                return Err(StoreError::DrawNotEligible {
                    group_id,
                    ready_members: readiness.ready_members,
                    total_members: readiness.total_members,
                    days_until_event: clock.days_until_event,
                });
            }
            let participants = run_draw(&mut next, &group_id, engine);
            events.push(Event::DrawCompleted {
                group_id,
                trigger: DrawTrigger::Forced,
                participants,
                at: now,
            });
        }

        Command::Reveal {
            participant_id,
            group_id,
        } => {
            let pidx = require_participant(&next, &participant_id)?;
            let gidx = require_group(&next, &group_id)?;
            if !next.groups[gidx].is_draw_complete {
                return Err(StoreError::NotDrawn(group_id));
            }
            if !next.participants[pidx].is_member_of(&group_id) {
                return Err(StoreError::NotAMember {
                    participant_id,
                    group_id,
                });
            }
            if !next.participants[pidx].has_revealed_in(&group_id) {
                next.participants[pidx]
                    .revealed_groups
                    .push(group_id.clone());
            }
            events.push(Event::AssignmentRevealed {
                participant_id,
                group_id,
                at: now,
            });
        }

        Command::CreateGroup {
            name,
            budget,
            currency,
            exchange_date,
        } => {
            non_empty("name", &name)?;
            let mut group = Group::new(name.clone(), budget, currency);
            group.exchange_date = exchange_date;
            events.push(Event::GroupCreated {
                group_id: group.id.clone(),
                name,
                at: now,
            });
            next.groups.push(group);
        }

        Command::UpdateGroup {
            group_id,
            name,
            budget,
            currency,
            exchange_date,
        } => {
            let idx = require_group(&next, &group_id)?;
            let group = &mut next.groups[idx];
            if let Some(name) = name {
                non_empty("name", &name)?;
                group.name = name;
            }
            if let Some(budget) = budget {
                group.budget = budget;
            }
            if let Some(currency) = currency {
                group.currency = currency;
            }
            if let Some(date) = exchange_date {
                group.exchange_date = Some(date);
            }
            events.push(Event::GroupUpdated { group_id, at: now });
        }

        Command::ToggleGroupActive { group_id } => {
            let idx = require_group(&next, &group_id)?;
            next.groups[idx].is_active = !next.groups[idx].is_active;
            events.push(Event::GroupActiveToggled {
                group_id,
                is_active: next.groups[idx].is_active,
                at: now,
            });
        }

        Command::DeleteGroup { group_id } => {
            let idx = require_group(&next, &group_id)?;
            next.groups.remove(idx);
            next.polls.retain(|p| p.group_id != group_id);
            for participant in &mut next.participants {
                participant.group_ids.retain(|g| g != &group_id);
            }
            events.push(Event::GroupDeleted { group_id, at: now });
        }

        Command::AddPoll {
            group_id,
            question,
            options,
        } => {
            require_group(&next, &group_id)?;
            non_empty("question", &question)?;
            let options: Vec<String> = options
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if options.is_empty() {
                return Err(StoreError::InvalidValue {
                    field: "options".to_string(),
                    message: "a poll needs at least one option".to_string(),
                });
            }
            let poll = Poll::new(group_id.clone(), question, options);
            events.push(Event::PollAdded {
                poll_id: poll.id.clone(),
                group_id,
                at: now,
            });
            next.polls.push(poll);
        }

        Command::RemovePoll { poll_id } => {
            let idx = require_poll(&next, &poll_id)?;
            next.polls.remove(idx);
            events.push(Event::PollRemoved { poll_id, at: now });
        }

        Command::VotePoll {
            poll_id,
            participant_id,
            option_id,
        } => {
            let pidx = require_poll(&next, &poll_id)?;
            require_participant(&next, &participant_id)?;
            if !next.polls[pidx].has_option(&option_id) {
                return Err(StoreError::UnknownPollOption { poll_id, option_id });
            }
            // Keyed by participant id, so a re-vote replaces the old one.
            next.polls[pidx]
                .selections
                .insert(participant_id.clone(), option_id.clone());
            events.push(Event::PollVoteCast {
                poll_id,
                participant_id,
                option_id,
                at: now,
            });
        }

        Command::SetAdminPassword { password } => {
            non_empty("password", &password)?;
            next.admin_password = Some(password);
            events.push(Event::AdminPasswordSet { at: now });
        }

        Command::Reset => {
            next = AppState::default();
            events.push(Event::StateReset { at: now });
        }
    }

    Ok(Transition {
        state: next,
        events,
    })
}

/// State plus its persistence adapter. Saves on every transition.
pub struct StateStore<A: PersistenceAdapter> {
    state: AppState,
    adapter: A,
    engine: DrawEngine,
}

impl<A: PersistenceAdapter> StateStore<A> {
    /// Load the persisted state (or start empty) behind the adapter.
    pub fn open(adapter: A, engine: DrawEngine) -> Result<Self, CoreError> {
        let state = adapter.load()?.unwrap_or_default();
        Ok(Self {
            state,
            adapter,
            engine,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    /// Apply a command and persist the next state before adopting it.
    pub fn dispatch(&mut self, command: Command, now: DateTime<Utc>) -> Result<Vec<Event>, CoreError> {
        let transition = apply(&self.state, command, &self.engine, now)?;
        self.adapter.save(&transition.state)?;
        self.state = transition.state;
        Ok(transition.events)
    }
}
