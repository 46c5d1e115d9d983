//! CSV-backed leaderboard.

mod csv_store;

pub use csv_store::CsvLeaderboard;
