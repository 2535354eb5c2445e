pub mod category_repo;
pub mod stats_repo;
pub mod time_log_repo;

pub use category_repo::CategoryRepo;
pub use stats_repo::StatsRepo;
pub use time_log_repo::TimeLogRepo;
