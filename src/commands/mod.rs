// ABOUTME: Command implementations for the CLI
// ABOUTME: Exports the diff and inspect commands

pub mod diff;
pub mod inspect;

pub use diff::{diff, DiffOptions};
pub use inspect::{inspect, InspectOptions};
