//! Schedule document model and the JSON wire format.
//!
//! The data file is keyed by day id (`dia1`, `dia2`), each day carrying
//! `fecha`, `lugar`, and a `ponencias` array. External data cannot be fully
//! trusted: rows that fail validation are logged and skipped rather than
//! aborting the whole document, so a single bad record never blanks a page.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::entry::{BadgeColor, Category, EntryError, EntryKind, ScheduleEntry, TimeRange};

/// One entry row as it appears in the data file.
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: Option<String>,
    tipo: Option<String>,
    titulo: Option<String>,
    horario: Option<String>,
    ponente: Option<String>,
    tallerista: Option<String>,
    talleristas: Option<String>,
    categoria: Option<String>,
    #[serde(rename = "badgeColor")]
    badge_color: Option<String>,
    avatar: Option<String>,
    descripcion: Option<String>,
}

impl RawEntry {
    /// Validate and convert a raw row into a typed entry.
    fn into_entry(self) -> Result<ScheduleEntry, EntryError> {
        let id = self.id.ok_or(EntryError::MissingField("id"))?;
        let title = self.titulo.ok_or(EntryError::MissingField("titulo"))?;
        let horario = self.horario.ok_or(EntryError::MissingField("horario"))?;
        let time = TimeRange::parse(&horario)?;

        // A row without `tipo` has always meant a talk in this data set.
        let kind = match self.tipo {
            Some(tipo) => EntryKind::from_str(&tipo).ok_or(EntryError::UnknownKind(tipo))?,
            None => EntryKind::Talk,
        };

        let category = self.categoria.as_deref().and_then(|c| {
            let parsed = Category::from_str(c);
            if parsed.is_none() {
                tracing::warn!(entry_id = %id, categoria = %c, "unrecognized category, ignoring");
            }
            parsed
        });

        let badge_color = self.badge_color.as_deref().and_then(BadgeColor::from_str);

        Ok(ScheduleEntry {
            id,
            kind,
            title,
            time,
            presenter: self.tallerista.or(self.ponente),
            presenters: self.talleristas,
            category,
            badge_color,
            avatar: self.avatar,
            description: self.descripcion,
        })
    }
}

/// One day as it appears in the data file.
#[derive(Debug, Deserialize)]
struct RawDay {
    fecha: String,
    lugar: Option<String>,
    #[serde(default)]
    ponencias: Vec<RawEntry>,
}

/// One conference day: date, venue, and entries in presentation order.
///
/// The source order is the presentation order; no temporal validation or
/// reordering happens here (the data owner pre-sorts).
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub entries: Vec<ScheduleEntry>,
}

impl DaySchedule {
    fn from_raw(key: &str, raw: RawDay) -> Self {
        let mut entries = Vec::with_capacity(raw.ponencias.len());
        let mut seen: HashSet<String> = HashSet::new();

        for (index, row) in raw.ponencias.into_iter().enumerate() {
            match row.into_entry() {
                Ok(entry) => {
                    if !seen.insert(entry.id.clone()) {
                        tracing::warn!(
                            day = %key,
                            entry_id = %entry.id,
                            "duplicate entry id within day, skipping"
                        );
                        continue;
                    }
                    entries.push(entry);
                }
                Err(err) => {
                    tracing::warn!(day = %key, index, error = %err, "skipping malformed entry");
                }
            }
        }

        Self {
            date: raw.fecha,
            venue: raw.lugar,
            entries,
        }
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// The whole schedule: day-key to day, in key order.
///
/// Loaded once and treated as immutable afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ScheduleDocument {
    days: BTreeMap<String, DaySchedule>,
}

impl ScheduleDocument {
    /// Parse the JSON data file, isolating malformed rows per day.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, RawDay> = serde_json::from_slice(bytes)?;
        let days = raw
            .into_iter()
            .map(|(key, day)| {
                let day = DaySchedule::from_raw(&key, day);
                (key, day)
            })
            .collect();
        Ok(Self { days })
    }

    pub fn day(&self, key: &str) -> Option<&DaySchedule> {
        self.days.get(key)
    }

    pub fn entry(&self, day: &str, id: &str) -> Option<&ScheduleEntry> {
        self.day(day).and_then(|d| d.entry(id))
    }

    /// Days in key order (`dia1` before `dia2`).
    pub fn days(&self) -> impl Iterator<Item = (&str, &DaySchedule)> {
        self.days.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Human label for a day key: `dia2` becomes `Día 2`.
    pub fn day_label(key: &str) -> String {
        match key.strip_prefix("dia") {
            Some(n) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) => {
                format!("Día {}", n)
            }
            _ => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "dia1": {
            "fecha": "12 May",
            "lugar": "Aula A",
            "ponencias": [
                {"id": "p1", "tipo": "ponencia", "titulo": "Talk A",
                 "horario": "09:00 - 09:30", "ponente": "Ana"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let doc = ScheduleDocument::from_json(SAMPLE.as_bytes()).unwrap();
        let day = doc.day("dia1").unwrap();
        assert_eq!(day.date, "12 May");
        assert_eq!(day.venue.as_deref(), Some("Aula A"));
        assert_eq!(day.entries.len(), 1);

        let entry = doc.entry("dia1", "p1").unwrap();
        assert_eq!(entry.kind, EntryKind::Talk);
        assert_eq!(entry.presenter_name(), "Ana");
        assert_eq!(entry.badge_label(), "Maestría");
        assert_eq!(entry.time.to_string(), "09:00 - 09:30");
    }

    #[test]
    fn test_missing_day_and_entry_are_none() {
        let doc = ScheduleDocument::from_json(SAMPLE.as_bytes()).unwrap();
        assert!(doc.day("dia3").is_none());
        assert!(doc.entry("dia1", "nonexistent").is_none());
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let json = r#"{
            "dia1": {
                "fecha": "12 May",
                "ponencias": [
                    {"id": "ok", "titulo": "Fine", "horario": "09:00 - 09:30"},
                    {"id": "no-time", "titulo": "Missing horario"},
                    {"id": "bad-time", "titulo": "Bad", "horario": "pronto"},
                    {"titulo": "No id", "horario": "10:00 - 10:30"},
                    {"id": "odd", "tipo": "keynote", "titulo": "Unknown kind",
                     "horario": "11:00 - 11:30"}
                ]
            }
        }"#;
        let doc = ScheduleDocument::from_json(json.as_bytes()).unwrap();
        let day = doc.day("dia1").unwrap();
        assert_eq!(day.entries.len(), 1);
        assert_eq!(day.entries[0].id, "ok");
    }

    #[test]
    fn test_missing_tipo_defaults_to_talk() {
        let json = r#"{"dia1": {"fecha": "x", "ponencias": [
            {"id": "p1", "titulo": "Untyped", "horario": "09:00 - 09:30"}
        ]}}"#;
        let doc = ScheduleDocument::from_json(json.as_bytes()).unwrap();
        assert_eq!(doc.entry("dia1", "p1").unwrap().kind, EntryKind::Talk);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let json = r#"{"dia1": {"fecha": "x", "ponencias": [
            {"id": "p1", "titulo": "First", "horario": "09:00 - 09:30"},
            {"id": "p1", "titulo": "Second", "horario": "10:00 - 10:30"}
        ]}}"#;
        let doc = ScheduleDocument::from_json(json.as_bytes()).unwrap();
        let day = doc.day("dia1").unwrap();
        assert_eq!(day.entries.len(), 1);
        assert_eq!(day.entries[0].title, "First");
    }

    #[test]
    fn test_tallerista_maps_to_presenter() {
        let json = r#"{"dia2": {"fecha": "x", "ponencias": [
            {"id": "t1", "tipo": "taller", "titulo": "W",
             "horario": "10:20 - 12:05", "tallerista": "Luis"}
        ]}}"#;
        let doc = ScheduleDocument::from_json(json.as_bytes()).unwrap();
        let entry = doc.entry("dia2", "t1").unwrap();
        assert_eq!(entry.presenter.as_deref(), Some("Luis"));
        assert_eq!(entry.presenter_title(), "Tallerista");
    }

    #[test]
    fn test_empty_days_and_missing_ponencias() {
        let json = r#"{"dia1": {"fecha": "x"}}"#;
        let doc = ScheduleDocument::from_json(json.as_bytes()).unwrap();
        assert!(doc.day("dia1").unwrap().entries.is_empty());

        let doc = ScheduleDocument::from_json(b"{}").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_day_label() {
        assert_eq!(ScheduleDocument::day_label("dia1"), "Día 1");
        assert_eq!(ScheduleDocument::day_label("dia2"), "Día 2");
        assert_eq!(ScheduleDocument::day_label("taller-day"), "taller-day");
    }

    #[test]
    fn test_not_json_is_an_error() {
        assert!(ScheduleDocument::from_json(b"not json").is_err());
    }
}
