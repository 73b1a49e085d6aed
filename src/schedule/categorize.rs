//! Pure categorization of a day's entries for sectioned rendering.

use std::collections::HashSet;

use crate::models::{DaySchedule, EntryKind, ScheduleEntry};

/// A day's entries grouped by kind, in source order.
///
/// `events` collects the logistical kinds (break, meal, generic event,
/// closing). The partition is stable: relative order within each group
/// matches the source sequence.
#[derive(Debug, Default)]
pub struct Grouping<'a> {
    pub talks: Vec<&'a ScheduleEntry>,
    pub workshops: Vec<&'a ScheduleEntry>,
    pub posters: Vec<&'a ScheduleEntry>,
    pub events: Vec<&'a ScheduleEntry>,
}

impl Grouping<'_> {
    /// Total number of grouped entries.
    pub fn len(&self) -> usize {
        self.talks.len() + self.workshops.len() + self.posters.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition a day's entries by kind.
///
/// Total over any well-formed day: an empty entry list produces empty
/// groups. No reordering, no temporal validation.
pub fn categorize(day: &DaySchedule) -> Grouping<'_> {
    let mut grouping = Grouping::default();
    for entry in &day.entries {
        match entry.kind {
            EntryKind::Talk => grouping.talks.push(entry),
            EntryKind::Workshop => grouping.workshops.push(entry),
            EntryKind::Poster => grouping.posters.push(entry),
            EntryKind::Break | EntryKind::Meal | EntryKind::Event | EntryKind::Closing => {
                grouping.events.push(entry)
            }
        }
    }
    grouping
}

/// A labelled block of workshops within a day.
#[derive(Debug)]
pub struct SessionGroup<'a> {
    /// Sub-heading for the block; absent when the day has no configured split.
    pub label: Option<String>,
    pub entries: Vec<&'a ScheduleEntry>,
}

/// Data-driven assignment of workshop ids to labelled sessions.
///
/// Replaces the hard-coded id allow-lists of the original site: the rule
/// arrives with the configuration, so it is visible and testable.
#[derive(Debug, Clone, Default)]
pub struct SessionAssignment {
    sessions: Vec<SessionRule>,
}

#[derive(Debug, Clone)]
struct SessionRule {
    label: String,
    ids: HashSet<String>,
}

impl SessionAssignment {
    pub fn new(sessions: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            sessions: sessions
                .into_iter()
                .map(|(label, ids)| SessionRule {
                    label,
                    ids: ids.into_iter().collect(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Session index for a workshop id, if any rule names it.
    pub fn session_of(&self, id: &str) -> Option<usize> {
        self.sessions.iter().position(|rule| rule.ids.contains(id))
    }

    /// Split workshops into configured sessions, preserving source order.
    ///
    /// A workshop whose id no rule names is not dropped: it is logged and
    /// appended to the first session. With no configured rules the result is
    /// a single unlabelled group holding everything.
    pub fn split<'a>(&self, workshops: &[&'a ScheduleEntry]) -> Vec<SessionGroup<'a>> {
        if self.sessions.is_empty() {
            return vec![SessionGroup {
                label: None,
                entries: workshops.to_vec(),
            }];
        }

        let mut groups: Vec<SessionGroup<'a>> = self
            .sessions
            .iter()
            .map(|rule| SessionGroup {
                label: Some(rule.label.clone()),
                entries: Vec::new(),
            })
            .collect();

        for entry in workshops {
            let index = match self.session_of(&entry.id) {
                Some(index) => index,
                None => {
                    tracing::warn!(
                        entry_id = %entry.id,
                        "workshop not named by any session rule, placing in first session"
                    );
                    0
                }
            };
            groups[index].entries.push(entry);
        }

        groups
    }
}
