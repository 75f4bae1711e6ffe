//! TUI module for the interactive password session.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Session, Msg, Command)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `input`, `theme`: widget and style collaborators
//! - `timer`, `run`: effects

pub mod input;
pub mod run;
pub mod state;
pub mod theme;
pub mod timer;
pub mod update;
pub mod view;
