/// Database row identifier (SQLite `INTEGER PRIMARY KEY`).
pub type DbId = i64;
