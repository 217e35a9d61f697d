mod check_in_streak_queries;
mod export_queries;
mod stats_queries;

#[cfg(test)]
pub(crate) mod test_mocks;

pub use check_in_streak_queries::CheckInStreakQueries;
pub use export_queries::{CsvKind, ExportFile, ExportQueries};
pub use stats_queries::StatsQueries;
