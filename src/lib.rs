// ABOUTME: Library module for sqlite-schema-diff
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod commands;
pub mod config;
pub mod export;
pub mod filter;
pub mod schema;
pub mod sqlite;
pub mod utils;
