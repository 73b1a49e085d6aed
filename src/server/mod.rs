//! Web server for the seminar schedule.
//!
//! Serves rendered day pages (talks, workshop sessions, posters, and the
//! event programme) plus a JSON query API for search and lookups.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::schedule::{source_from_spec, ScheduleService};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScheduleService>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let source = source_from_spec(
            &settings.schedule_source,
            &settings.user_agent,
            settings.request_timeout,
        )?;

        Ok(Self {
            service: Arc::new(ScheduleService::new(source, settings.assignments())),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;

    // Warm the cache so the first page view does not pay for the fetch; a
    // failure here is already logged and pages will show the error state.
    let _ = state.service.load().await;

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    const DATA: &str = r#"{
        "dia1": {
            "fecha": "12 May",
            "lugar": "Aula A",
            "ponencias": [
                {"id": "p1", "tipo": "ponencia", "titulo": "Talk A",
                 "horario": "09:00 - 09:30", "ponente": "Ana"},
                {"id": "r1", "tipo": "receso", "titulo": "Receso",
                 "horario": "09:30 - 09:50"}
            ]
        },
        "dia2": {
            "fecha": "13 May",
            "lugar": "Aula B",
            "ponencias": [
                {"id": "taller-2-1", "tipo": "taller", "titulo": "Taller uno",
                 "horario": "10:20 - 12:05", "tallerista": "Luis"},
                {"id": "taller-2-5", "tipo": "taller", "titulo": "Taller cinco",
                 "horario": "12:25 - 14:40", "talleristas": "Marta y José"},
                {"id": "x1", "tipo": "clausura", "titulo": "Clausura", "horario": "15:00"}
            ]
        }
    }"#;

    fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("ponencias.json");
        std::fs::write(&data_path, DATA).unwrap();

        let settings = Settings {
            schedule_source: data_path.display().to_string(),
            ..Settings::default()
        };

        let state = AppState::new(&settings).unwrap();
        (create_router(state), dir)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_home_page() {
        let (app, _dir) = setup_test_app();
        let (status, html) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Día 1"));
        assert!(html.contains("Día 2"));
    }

    #[tokio::test]
    async fn test_day_page_sections() {
        let (app, _dir) = setup_test_app();
        let (status, html) = get(app, "/days/dia1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Talk A"));
        assert!(html.contains("Ponente"));
        assert!(html.contains("Ana"));
        assert!(html.contains("Receso"));
    }

    #[tokio::test]
    async fn test_day_page_workshop_sessions() {
        let (app, _dir) = setup_test_app();
        let (status, html) = get(app, "/days/dia2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Primera sesión"));
        assert!(html.contains("Segunda sesión"));
        assert!(html.contains("Taller uno"));
        assert!(html.contains("Talleristas"));
        assert!(html.contains("Clausura"));
    }

    #[tokio::test]
    async fn test_day_not_found_renders_error_page() {
        let (app, _dir) = setup_test_app();
        let (status, html) = get(app, "/days/dia9").await;
        // Handler returns 200 with an error page, not a bare 404
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Día no encontrado"));
    }

    #[tokio::test]
    async fn test_missing_data_file_renders_error_page() {
        let settings = Settings {
            schedule_source: "/definitely/not/here.json".to_string(),
            ..Settings::default()
        };
        let state = AppState::new(&settings).unwrap();
        let app = create_router(state);

        let (status, html) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No hay datos disponibles"));
    }

    #[tokio::test]
    async fn test_api_days() {
        let (app, _dir) = setup_test_app();
        let (status, body) = get(app, "/api/days").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let days = json.as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["key"], "dia1");
        assert_eq!(days[0]["label"], "Día 1");
        assert_eq!(days[0]["entry_count"], 2);
    }

    #[tokio::test]
    async fn test_api_day_detail() {
        let (app, _dir) = setup_test_app();
        let (status, body) = get(app, "/api/days/dia1").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["date"], "12 May");
        assert_eq!(json["entries"].as_array().unwrap().len(), 2);
        assert_eq!(json["entries"][0]["time"], "09:00 - 09:30");
    }

    #[tokio::test]
    async fn test_api_day_not_found() {
        let (app, _dir) = setup_test_app();
        let (status, body) = get(app, "/api/days/dia9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_api_entry_lookup_and_miss() {
        let (app, _dir) = setup_test_app();

        let (status, body) = get(app.clone(), "/api/days/dia1/entries/p1").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Talk A");

        let (status, _) = get(app, "/api/days/dia1/entries/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_search() {
        let (app, _dir) = setup_test_app();
        let (status, body) = get(app.clone(), "/api/search?q=jose").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let hits = json.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["day"], "dia2");
        assert_eq!(hits[0]["entry"]["id"], "taller-2-5");

        let (_, body) = get(app, "/api/search?q=taller&day=dia1").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_reload_picks_up_changes() {
        let (app, dir) = setup_test_app();

        let (_, body) = get(app.clone(), "/api/days").await;
        let before: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(before.as_array().unwrap().len(), 2);

        let data_path = dir.path().join("ponencias.json");
        std::fs::write(&data_path, r#"{"dia1": {"fecha": "x", "ponencias": []}}"#).unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/reload")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (_, body) = get(app, "/api/days").await;
        let after: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(after.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_api_health() {
        let (app, _dir) = setup_test_app();
        let (status, _) = get(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_assets() {
        let (app, _dir) = setup_test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/static/style.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap_or(""));
        assert!(content_type.unwrap_or("").contains("css"));

        let (status, js) = get(app, "/static/schedule.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(js.contains("search"));
    }
}
