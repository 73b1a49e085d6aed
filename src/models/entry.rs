//! Schedule entry model.
//!
//! Entries arrive as loosely-typed JSON rows dispatched on a `tipo` string;
//! here they become a closed sum over [`EntryKind`] with the time range
//! parsed once at load time instead of being re-split on every render.

use std::fmt;

use chrono::NaiveTime;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Shown when an entry has no presenter-like field.
pub const PRESENTER_PLACEHOLDER: &str = "Por confirmar";

/// Default avatar for talks (and any kind without its own default).
const TALK_AVATAR: &str = "https://placehold.co/112x112/EBF4FF/3B82F6?text=👨‍🎓";
/// Default avatar for workshops.
const WORKSHOP_AVATAR: &str = "src/talleres/taller.jpg";
/// Default avatar for posters.
const POSTER_AVATAR: &str = "src/talleres/cartel.jpg";

/// Why an entry row was rejected at the load boundary.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unrecognized entry kind `{0}`")]
    UnknownKind(String),
    #[error("malformed time range `{0}`")]
    BadTimeRange(String),
}

/// Kind of a schedule entry.
///
/// Break, meal, generic event, and closing entries are logistical; they have
/// no presenter and render differently from the card kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    #[serde(rename = "ponencia")]
    Talk,
    #[serde(rename = "taller")]
    Workshop,
    #[serde(rename = "cartel")]
    Poster,
    #[serde(rename = "receso")]
    Break,
    #[serde(rename = "comida")]
    Meal,
    #[serde(rename = "evento")]
    Event,
    #[serde(rename = "clausura")]
    Closing,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Talk => "ponencia",
            Self::Workshop => "taller",
            Self::Poster => "cartel",
            Self::Break => "receso",
            Self::Meal => "comida",
            Self::Event => "evento",
            Self::Closing => "clausura",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ponencia" => Some(Self::Talk),
            "taller" => Some(Self::Workshop),
            "cartel" => Some(Self::Poster),
            "receso" => Some(Self::Break),
            "comida" => Some(Self::Meal),
            "evento" => Some(Self::Event),
            "clausura" => Some(Self::Closing),
            _ => None,
        }
    }

    /// True for the logistical kinds grouped under "events".
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Break | Self::Meal | Self::Event | Self::Closing)
    }
}

/// Academic category of a talk or poster presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "maestria")]
    Masters,
    #[serde(rename = "doctorado")]
    Doctoral,
    #[serde(rename = "academico")]
    Academic,
}

impl Category {
    /// Accepts both plain and accented spellings from the data file.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "maestria" | "maestría" => Some(Self::Masters),
            "doctorado" => Some(Self::Doctoral),
            "academico" | "académico" => Some(Self::Academic),
            _ => None,
        }
    }
}

/// Presentational accent color for talk cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Blue,
    Red,
    Green,
    Purple,
}

impl BadgeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "blue" => Some(Self::Blue),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "purple" => Some(Self::Purple),
            _ => None,
        }
    }
}

/// A parsed `"HH:MM - HH:MM"` time range.
///
/// The end time is optional: closing entries carry only a start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl TimeRange {
    /// Parse a raw `horario` string into a structured range.
    ///
    /// Accepts exactly one or two `HH:MM` components split on `" - "`.
    pub fn parse(raw: &str) -> Result<Self, EntryError> {
        let bad = || EntryError::BadTimeRange(raw.to_string());

        let mut parts = raw.split(" - ");
        let start = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(bad)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| bad())?;

        let end = match parts.next() {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(NaiveTime::parse_from_str(p.trim(), "%H:%M").map_err(|_| bad())?),
            None => None,
        };

        if parts.next().is_some() {
            return Err(bad());
        }

        Ok(Self { start, end })
    }

    pub fn start_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_label(&self) -> String {
        self.end
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} - {}", self.start.format("%H:%M"), end.format("%H:%M")),
            None => write!(f, "{}", self.start.format("%H:%M")),
        }
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the schedule: a talk, workshop, poster, or logistical event.
///
/// Immutable after load; the optional fields that are meaningful depend on
/// the kind (presenters for card kinds, none for logistical kinds).
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    /// Unique within the owning day (not globally).
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub time: TimeRange,
    /// Single presenter (`ponente` or `tallerista` on the wire).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenter: Option<String>,
    /// Joint presenters (`talleristas` on the wire).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presenters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_color: Option<BadgeColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ScheduleEntry {
    /// Display name of the presenter(s), falling back to a placeholder.
    ///
    /// Never returns an empty string.
    pub fn presenter_name(&self) -> &str {
        self.presenter
            .as_deref()
            .or(self.presenters.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(PRESENTER_PLACEHOLDER)
    }

    /// Label for the presenter line, singular or plural for workshops.
    pub fn presenter_title(&self) -> &'static str {
        match self.kind {
            EntryKind::Workshop => {
                if self.presenters.is_some() {
                    "Talleristas"
                } else {
                    "Tallerista"
                }
            }
            _ => "Ponente",
        }
    }

    /// Badge text for the card.
    ///
    /// Only talks vary by category; an unset category reads as masters.
    pub fn badge_label(&self) -> &'static str {
        match self.kind {
            EntryKind::Workshop => "Taller",
            EntryKind::Poster => "Cartel",
            EntryKind::Break => "Receso",
            EntryKind::Meal => "Comida",
            EntryKind::Event => "Evento",
            EntryKind::Closing => "Clausura",
            EntryKind::Talk => match self.category {
                Some(Category::Academic) => "Académico",
                Some(Category::Doctoral) => "Doctorado",
                Some(Category::Masters) | None => "Maestría",
            },
        }
    }

    /// Avatar URL, falling back to a kind-specific placeholder.
    pub fn avatar_url(&self) -> &str {
        if let Some(avatar) = self.avatar.as_deref() {
            return avatar;
        }
        match self.kind {
            EntryKind::Workshop => WORKSHOP_AVATAR,
            EntryKind::Poster => POSTER_AVATAR,
            _ => TALK_AVATAR,
        }
    }
}
