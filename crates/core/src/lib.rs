//! Domain logic for the time-tracking service.
//!
//! Pure, I/O-free building blocks shared by the database and API crates:
//! error taxonomy, category hierarchy validation, date/calendar helpers,
//! threshold evaluation, and stats grouping modes.

pub mod category;
pub mod error;
pub mod stats;
pub mod timelog;
pub mod types;
