//! Configuration for the schedule service.
//!
//! Settings come from an optional TOML file (`seminario.toml`, or `-c PATH`),
//! with a `SEMINARIO_DATA` environment override for the data file location.
//! The workshop session split is configuration, not code: each day may carry
//! `[[sessions.<day>]]` tables naming a label and the member entry ids.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::schedule::SessionAssignment;

/// Default bind address for the web server.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";
/// Default location of the schedule data file.
const DEFAULT_SOURCE: &str = "data/ponencias.json";
/// Config file looked up in the working directory when `-c` is not given.
const CONFIG_FILENAME: &str = "seminario.toml";

/// One workshop session block within a day.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub label: String,
    pub ids: Vec<String>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Schedule data file: filesystem path or HTTP(S) URL.
    pub schedule_source: String,
    /// Bind address for `serve`.
    pub bind: String,
    /// User agent for HTTP fetches.
    pub user_agent: String,
    /// HTTP request timeout in seconds.
    pub request_timeout: u64,
    /// Per-day workshop session split.
    pub sessions: HashMap<String, Vec<SessionConfig>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule_source: DEFAULT_SOURCE.to_string(),
            bind: DEFAULT_BIND.to_string(),
            user_agent: "Seminario/0.3".to_string(),
            request_timeout: 30,
            sessions: default_sessions(),
        }
    }
}

/// The second day runs workshops in two blocks; this mirrors the published
/// programme and is replaced wholesale by any `[sessions]` config section.
fn default_sessions() -> HashMap<String, Vec<SessionConfig>> {
    let first = (1..=4).map(|n| format!("taller-2-{}", n)).collect();
    let second = (5..=9).map(|n| format!("taller-2-{}", n)).collect();

    HashMap::from([(
        "dia2".to_string(),
        vec![
            SessionConfig {
                label: "Primera sesión (10:20 - 12:05)".to_string(),
                ids: first,
            },
            SessionConfig {
                label: "Segunda sesión (12:25 - 14:40)".to_string(),
                ids: second,
            },
        ],
    )])
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    schedule: Option<ScheduleSection>,
    server: Option<ServerSection>,
    sessions: Option<HashMap<String, Vec<SessionConfig>>>,
}

#[derive(Debug, Deserialize)]
struct ScheduleSection {
    source: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    bind: Option<String>,
}

impl ConfigFile {
    fn apply_to(self, settings: &mut Settings) {
        if let Some(schedule) = self.schedule {
            if let Some(source) = schedule.source {
                settings.schedule_source = source;
            }
            if let Some(user_agent) = schedule.user_agent {
                settings.user_agent = user_agent;
            }
            if let Some(timeout) = schedule.request_timeout {
                settings.request_timeout = timeout;
            }
        }
        if let Some(server) = self.server {
            if let Some(bind) = server.bind {
                settings.bind = bind;
            }
        }
        if let Some(sessions) = self.sessions {
            settings.sessions = sessions;
        }
    }
}

impl Settings {
    /// Load settings: defaults, then config file, then environment.
    ///
    /// An explicit `-c` path must exist; the well-known filename is optional.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = Self::default();

        let text = match config_path {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?,
            ),
            None => fs::read_to_string(CONFIG_FILENAME).ok(),
        };

        if let Some(text) = text {
            let config: ConfigFile = toml::from_str(&text).context("parsing config file")?;
            config.apply_to(&mut settings);
        }

        if let Ok(source) = std::env::var("SEMINARIO_DATA") {
            if !source.is_empty() {
                settings.schedule_source = source;
            }
        }

        Ok(settings)
    }

    /// Session assignments in the form the categorizer consumes.
    pub fn assignments(&self) -> HashMap<String, SessionAssignment> {
        self.sessions
            .iter()
            .map(|(day, sessions)| {
                let rules = sessions
                    .iter()
                    .map(|s| (s.label.clone(), s.ids.clone()));
                (day.clone(), SessionAssignment::new(rules))
            })
            .collect()
    }
}
