//! Command-line front end: argument parsing, menu handlers and rendering

pub mod args;
pub mod menu;
pub mod plot;
pub mod report;
pub mod table;
