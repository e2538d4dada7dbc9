use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What caused a draw to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawTrigger {
    /// Fired by the readiness/date gate during a mark-ready transition.
    Auto,
    /// Explicit administrative action inside the force window.
    Forced,
}

/// Every successful store transition produces one or more Events.
/// The CLI prints them; a GUI front-end would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ParticipantRegistered {
        participant_id: String,
        name: String,
        /// Group the participant was auto-joined to, if one existed.
        group_id: Option<String>,
        at: DateTime<Utc>,
    },
    ParticipantRemoved {
        participant_id: String,
        at: DateTime<Utc>,
    },
    WishlistUpdated {
        participant_id: String,
        item_count: usize,
        at: DateTime<Utc>,
    },
    MembershipChanged {
        participant_id: String,
        group_id: String,
        is_member: bool,
        at: DateTime<Utc>,
    },
    ReadyMarked {
        participant_id: String,
        group_id: String,
        ready_members: usize,
        total_members: usize,
        at: DateTime<Utc>,
    },
    DrawCompleted {
        group_id: String,
        trigger: DrawTrigger,
        participants: usize,
        at: DateTime<Utc>,
    },
    AssignmentRevealed {
        participant_id: String,
        group_id: String,
        at: DateTime<Utc>,
    },
    GroupCreated {
        group_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    GroupUpdated {
        group_id: String,
        at: DateTime<Utc>,
    },
    GroupActiveToggled {
        group_id: String,
        is_active: bool,
        at: DateTime<Utc>,
    },
    GroupDeleted {
        group_id: String,
        at: DateTime<Utc>,
    },
    PollAdded {
        poll_id: String,
        group_id: String,
        at: DateTime<Utc>,
    },
    PollRemoved {
        poll_id: String,
        at: DateTime<Utc>,
    },
    PollVoteCast {
        poll_id: String,
        participant_id: String,
        option_id: String,
        at: DateTime<Utc>,
    },
    AdminPasswordSet {
        at: DateTime<Utc>,
    },
    StateReset {
        at: DateTime<Utc>,
    },
}
