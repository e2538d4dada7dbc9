pub mod admin;
pub mod draw;
pub mod group;
pub mod participant;
pub mod poll;
pub mod share;
