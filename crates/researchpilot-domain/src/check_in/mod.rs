mod aggregate;
mod calendar;
mod heatmap;
mod repository;
mod streak;
mod summary;
mod value_objects;


pub use aggregate::{CheckIn, NewCheckIn};
pub use calendar::{CalendarDay, MonthCalendar, YearMonth};
pub use heatmap::{ActivityHeatmap, HeatmapCell};
pub use repository::CheckInRepository;
pub use streak::{compute_streaks, StreakResult};
pub use summary::CheckInSummary;
pub use value_objects::Mood;
