//! # Wichtel Core Library
//!
//! Core business logic for Wichtel, a Secret Santa / gift-exchange
//! organizer. All operations are available through the standalone CLI
//! binary; a GUI front-end would be a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Draw engine**: pure giver/receiver assignment (shuffle + rotation)
//!   and the readiness/date gates deciding when a draw may run
//! - **State store**: a reducer over the whole application state; every
//!   transition produces domain events and is persisted through an adapter
//! - **Storage**: JSON state document plus TOML configuration
//! - **Share links**: base64 tokens carrying a giver's reveal payload
//!
//! ## Key Components
//!
//! - [`DrawEngine`]: assignment drawing with an injectable, seedable RNG
//! - [`StateStore`]: command dispatch with save-on-transition persistence
//! - [`AppState`]: participants, groups, and polls
//! - [`Config`]: application configuration management

pub mod draw;
pub mod error;
pub mod events;
pub mod model;
pub mod share;
pub mod storage;
pub mod store;

pub use draw::{Assignment, DrawClock, DrawEngine, DrawPolicy, GroupReadiness};
pub use error::CoreError;
pub use events::{DrawTrigger, Event};
pub use model::{AppState, Group, Participant, Poll, PollOption};
pub use share::{decode_share_data, encode_share_data, ShareData};
pub use storage::{data_dir, Config, JsonStateFile, PersistenceAdapter};
pub use store::{apply, Command, StateStore, StoreError, Transition};
