//! Tierboard Application
//!
//! Terminal shell for the tier board: parses prompt commands, renders the
//! board as text and wires the core to native storage and clipboard.

mod action;
mod app;
mod cli;
mod help;
pub mod view;

pub use action::{ActionError, DropRef, PlayerRef, TierRef, UiAction};
pub use app::{App, AppConfig, SystemClipboard};
pub use cli::Cli;
pub use help::{CommandHelp, HelpRegistry};
