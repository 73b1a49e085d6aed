//! Text search over the schedule.
//!
//! Case-insensitive substring match against titles and presenter fields.
//! Common Spanish diacritics are folded on both sides, so "maria" finds
//! "María López". Results come back in day order then entry order, with
//! no ranking.

use serde::Serialize;

use crate::models::{ScheduleDocument, ScheduleEntry};

/// One search result with its day of origin.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub day: String,
    pub entry: ScheduleEntry,
}

/// Search a document, optionally restricted to one day.
///
/// A term that is empty after trimming matches nothing; debouncing and
/// minimum-length gating belong to the caller.
pub fn search_document(doc: &ScheduleDocument, term: &str, day: Option<&str>) -> Vec<SearchHit> {
    let needle = normalize(term.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for (key, schedule) in doc.days() {
        if day.is_some_and(|d| d != key) {
            continue;
        }
        for entry in &schedule.entries {
            if matches(entry, &needle) {
                hits.push(SearchHit {
                    day: key.to_string(),
                    entry: entry.clone(),
                });
            }
        }
    }
    hits
}

fn matches(entry: &ScheduleEntry, needle: &str) -> bool {
    let fields = [
        Some(entry.title.as_str()),
        entry.presenter.as_deref(),
        entry.presenters.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| normalize(field).contains(needle))
}

/// Lowercase and fold the diacritics that actually occur in this data set.
fn normalize(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ScheduleDocument {
        let json = r#"{
            "dia1": {"fecha": "12 May", "ponencias": [
                {"id": "p1", "tipo": "ponencia", "titulo": "Redes neuronales",
                 "horario": "09:00 - 09:30", "ponente": "María López"},
                {"id": "r1", "tipo": "receso", "titulo": "Receso", "horario": "09:30 - 09:50"}
            ]},
            "dia2": {"fecha": "13 May", "ponencias": [
                {"id": "t1", "tipo": "taller", "titulo": "Taller de redes",
                 "horario": "10:20 - 12:05", "talleristas": "Luis y María"},
                {"id": "p2", "tipo": "ponencia", "titulo": "Otra cosa",
                 "horario": "09:00 - 09:30", "ponente": "Pedro"}
            ]}
        }"#;
        ScheduleDocument::from_json(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_accent_and_case_folding() {
        let hits = search_document(&doc(), "maria", None);
        let ids: Vec<&str> = hits.iter().map(|h| h.entry.id.as_str()).collect();
        assert_eq!(ids, ["p1", "t1"]);

        let hits = search_document(&doc(), "MARÍA", None);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_matches_title_and_plural_presenters() {
        let hits = search_document(&doc(), "redes", None);
        let ids: Vec<&str> = hits.iter().map(|h| h.entry.id.as_str()).collect();
        assert_eq!(ids, ["p1", "t1"]);

        let hits = search_document(&doc(), "luis", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.id, "t1");
    }

    #[test]
    fn test_day_filter() {
        let hits = search_document(&doc(), "maria", Some("dia2"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].day, "dia2");

        let hits = search_document(&doc(), "maria", Some("dia9"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_results_follow_day_then_entry_order() {
        let hits = search_document(&doc(), "a", None);
        let days: Vec<&str> = hits.iter().map(|h| h.day.as_str()).collect();
        let mut sorted = days.clone();
        sorted.sort_unstable();
        assert_eq!(days, sorted);
    }

    #[test]
    fn test_blank_term_matches_nothing() {
        assert!(search_document(&doc(), "", None).is_empty());
        assert!(search_document(&doc(), "   ", None).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(search_document(&doc(), "blockchain", None).is_empty());
    }
}
