pub mod category;
pub mod stats;
pub mod time_log;
