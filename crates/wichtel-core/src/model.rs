//! Application data model: participants, groups, and polls.
//!
//! Mirrors the persisted state document one-to-one; every type serializes
//! into the single JSON state file.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draw::{DrawClock, GroupReadiness};

/// A registered participant. May belong to several groups; readiness,
/// reveal status, and the drawn receiver are tracked per group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Stored in plaintext. Hardening is explicitly out of scope.
    pub password: String,
    #[serde(default)]
    pub wishlist_items: Vec<String>,
    #[serde(default)]
    pub group_ids: Vec<String>,
    /// group id -> receiver id, written when the group's draw completes.
    #[serde(default)]
    pub assignments: HashMap<String, String>,
    /// Groups this participant has marked themselves ready in.
    #[serde(default)]
    pub ready_groups: Vec<String>,
    /// Groups where the participant has revealed their receiver.
    #[serde(default)]
    pub revealed_groups: Vec<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            password: password.into(),
            wishlist_items: Vec::new(),
            group_ids: Vec::new(),
            assignments: HashMap::new(),
            ready_groups: Vec::new(),
            revealed_groups: Vec::new(),
        }
    }

    pub fn is_member_of(&self, group_id: &str) -> bool {
        self.group_ids.iter().any(|g| g == group_id)
    }

    pub fn is_ready_in(&self, group_id: &str) -> bool {
        self.ready_groups.iter().any(|g| g == group_id)
    }

    pub fn has_revealed_in(&self, group_id: &str) -> bool {
        self.revealed_groups.iter().any(|g| g == group_id)
    }
}

/// A gift-exchange group/event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub budget: String,
    pub currency: String,
    /// Date of the exchange; `None` until the organizer sets it.
    #[serde(default)]
    pub exchange_date: Option<NaiveDate>,
    pub is_active: bool,
    pub is_draw_complete: bool,
}

impl Group {
    pub fn new(name: impl Into<String>, budget: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            budget: budget.into(),
            currency: currency.into(),
            exchange_date: None,
            is_active: true,
            is_draw_complete: false,
        }
    }

    /// Fractional days from `now` until the exchange date (taken as midnight
    /// UTC), negative once the date has passed. `None` without a date.
    pub fn days_until(&self, now: DateTime<Utc>) -> Option<f64> {
        let date = self.exchange_date?;
        let target = date.and_hms_opt(0, 0, 0)?.and_utc();
        Some((target - now).num_milliseconds() as f64 / 86_400_000.0)
    }

    /// Clock snapshot for the draw-eligibility predicates.
    pub fn draw_clock(&self, now: DateTime<Utc>) -> DrawClock {
        DrawClock {
            days_until_event: self.days_until(now),
        }
    }
}

/// One answer option of a poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

/// A per-group poll. Votes are keyed by participant id, so every
/// participant holds at most one vote and re-voting replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub group_id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    /// participant id -> option id.
    #[serde(default)]
    pub selections: HashMap<String, String>,
}

impl Poll {
    pub fn new(group_id: impl Into<String>, question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.into(),
            question: question.into(),
            options: options
                .into_iter()
                .map(|text| PollOption {
                    id: Uuid::new_v4().to_string(),
                    text,
                })
                .collect(),
            selections: HashMap::new(),
        }
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Vote counts per option id, derived from the selections.
    pub fn tally(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> =
            self.options.iter().map(|o| (o.id.clone(), 0)).collect();
        for option_id in self.selections.values() {
            if let Some(count) = counts.get_mut(option_id) {
                *count += 1;
            }
        }
        counts
    }
}

/// The whole application state, persisted as one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub polls: Vec<Poll>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl AppState {
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    /// Case-insensitive lookup by display name (names are unique).
    pub fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn members_of(&self, group_id: &str) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.is_member_of(group_id))
            .collect()
    }

    /// Readiness snapshot for a group, fed to the draw-eligibility gates.
    pub fn readiness(&self, group_id: &str) -> GroupReadiness {
        let members = self.members_of(group_id);
        let ready = members.iter().filter(|p| p.is_ready_in(group_id)).count();
        GroupReadiness {
            total_members: members.len(),
            ready_members: ready,
            is_draw_complete: self
                .group(group_id)
                .map(|g| g.is_draw_complete)
                .unwrap_or(false),
        }
    }

    /// Check a login attempt. Plaintext comparison; hardening is out of scope.
    pub fn verify_login(&self, name: &str, password: &str) -> Option<&Participant> {
        self.participant_by_name(name)
            .filter(|p| p.password == password)
    }
}
