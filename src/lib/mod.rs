//! Domain types shared by the store and the command line
//!
//! Dates and months, records and categories, monthly aggregation

pub mod category;
pub mod date;
pub mod entry;
pub mod error;
pub mod summary;
