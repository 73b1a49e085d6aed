//! Page handlers: home and day views.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
};

use super::super::template_structs::{DayTemplate, ErrorTemplate, HomeTemplate};
use super::super::AppState;

/// Render a template, falling back to the raw message if rendering fails.
fn render_page<T: Template>(template: T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("template error: {}", e)),
    )
}

/// Error page shown when the schedule could not be loaded.
fn no_data_page() -> Html<String> {
    render_page(ErrorTemplate {
        title: "Sin datos",
        message: "No hay datos disponibles. Inténtalo de nuevo más tarde.",
    })
}

/// Home page: one link card per day.
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.load().await {
        Ok(doc) => render_page(HomeTemplate::from_document(&doc)),
        Err(_) => no_data_page(),
    }
}

/// Day page with sectioned entries.
pub async fn day_page(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> impl IntoResponse {
    let doc = match state.service.load().await {
        Ok(doc) => doc,
        Err(_) => return no_data_page(),
    };

    match doc.day(&day) {
        Some(schedule) => render_page(DayTemplate::from_day(
            &day,
            schedule,
            state.service.assignment_for(&day),
        )),
        None => render_page(ErrorTemplate {
            title: "Día no encontrado",
            message: "El día solicitado no existe en el programa.",
        }),
    }
}
