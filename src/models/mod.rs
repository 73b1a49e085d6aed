//! Data models for the seminar schedule.

mod entry;
mod schedule;

pub use entry::{BadgeColor, Category, EntryError, EntryKind, ScheduleEntry, TimeRange};
pub use schedule::{DaySchedule, ScheduleDocument};
