//! Tracks the published text of rule documents, archives every change and
//! compares archived versions with the `rule_redline` diff engine.

pub mod app_state;
pub mod change_detection;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod consts;
pub mod errors;
pub mod fetcher;
pub mod registry;
pub mod server;
pub mod terminal;
