//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! The structs carry display-ready strings; all derivation (presenter names,
//! badges, avatars, time labels) happens here, keeping the templates dumb.

use askama::Template;

use crate::models::{DaySchedule, ScheduleDocument, ScheduleEntry};
use crate::schedule::{categorize, SessionAssignment};

/// Shown when a day has no configured venue.
const VENUE_PLACEHOLDER: &str = "Salón por confirmar";

/// Card-ready view of one talk, workshop, or poster.
pub struct EntryCard {
    pub id: String,
    pub kind: &'static str,
    pub title: String,
    pub presenter_title: &'static str,
    pub presenter: String,
    pub badge: &'static str,
    pub badge_class: String,
    pub avatar: String,
    pub start: String,
    pub end: String,
    pub has_end: bool,
    pub description: String,
    pub has_description: bool,
}

impl EntryCard {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        let badge_class = entry
            .badge_color
            .map(|c| format!("badge-{}", c.as_str()))
            .unwrap_or_else(|| "badge-default".to_string());

        Self {
            id: entry.id.clone(),
            kind: entry.kind.as_str(),
            title: entry.title.clone(),
            presenter_title: entry.presenter_title(),
            presenter: entry.presenter_name().to_string(),
            badge: entry.badge_label(),
            badge_class,
            avatar: entry.avatar_url().to_string(),
            start: entry.time.start_label(),
            end: entry.time.end_label(),
            has_end: entry.time.end.is_some(),
            description: entry.description.clone().unwrap_or_default(),
            has_description: entry.description.is_some(),
        }
    }
}

/// One row of the logistical programme (breaks, meals, closing).
pub struct EventRow {
    pub title: String,
    pub time_label: String,
    pub closing: bool,
}

/// A labelled workshop block on the day page.
pub struct WorkshopSession {
    pub label: String,
    pub has_label: bool,
    pub cards: Vec<EntryCard>,
}

/// Link card for one day on the home page.
pub struct DayLink {
    pub key: String,
    pub label: String,
    pub date: String,
    pub venue: String,
    pub entry_count: usize,
}

/// Home page with links to each day.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub days: Vec<DayLink>,
}

impl HomeTemplate {
    pub fn from_document(doc: &ScheduleDocument) -> Self {
        let days = doc
            .days()
            .map(|(key, day)| DayLink {
                key: key.to_string(),
                label: ScheduleDocument::day_label(key),
                date: day.date.clone(),
                venue: day
                    .venue
                    .clone()
                    .unwrap_or_else(|| VENUE_PLACEHOLDER.to_string()),
                entry_count: day.entries.len(),
            })
            .collect();

        Self {
            title: "Programa".to_string(),
            days,
        }
    }
}

/// One day's schedule, sectioned by kind.
#[derive(Template)]
#[template(path = "day.html")]
pub struct DayTemplate {
    pub title: String,
    pub label: String,
    pub date: String,
    pub venue: String,
    pub talks: Vec<EntryCard>,
    pub has_talks: bool,
    pub sessions: Vec<WorkshopSession>,
    pub has_workshops: bool,
    pub posters: Vec<EntryCard>,
    pub has_posters: bool,
    pub events: Vec<EventRow>,
    pub has_events: bool,
}

impl DayTemplate {
    pub fn from_day(key: &str, day: &DaySchedule, assignment: Option<&SessionAssignment>) -> Self {
        let grouping = categorize(day);

        let default_assignment = SessionAssignment::default();
        let assignment = assignment.unwrap_or(&default_assignment);

        let sessions: Vec<WorkshopSession> = assignment
            .split(&grouping.workshops)
            .into_iter()
            .map(|session| WorkshopSession {
                has_label: session.label.is_some(),
                label: session.label.unwrap_or_default(),
                cards: session.entries.iter().map(|e| EntryCard::from_entry(e)).collect(),
            })
            .collect();

        let events = grouping
            .events
            .iter()
            .map(|e| EventRow {
                title: e.title.clone(),
                time_label: e.time.to_string(),
                closing: e.kind == crate::models::EntryKind::Closing,
            })
            .collect();

        let label = ScheduleDocument::day_label(key);
        Self {
            title: label.clone(),
            label,
            date: day.date.clone(),
            venue: day
                .venue
                .clone()
                .unwrap_or_else(|| VENUE_PLACEHOLDER.to_string()),
            talks: grouping.talks.iter().map(|e| EntryCard::from_entry(e)).collect(),
            has_talks: !grouping.talks.is_empty(),
            has_workshops: !grouping.workshops.is_empty(),
            sessions,
            posters: grouping.posters.iter().map(|e| EntryCard::from_entry(e)).collect(),
            has_posters: !grouping.posters.is_empty(),
            events,
            has_events: !grouping.events.is_empty(),
        }
    }
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
}
