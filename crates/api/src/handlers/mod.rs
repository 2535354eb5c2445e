pub mod categories;
pub mod logs;
pub mod stats;
