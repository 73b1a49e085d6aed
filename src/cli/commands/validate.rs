//! Validate command: load the data file and report its contents.

use console::style;

use crate::config::Settings;
use crate::schedule::categorize;

/// Load the schedule and print per-day counts.
///
/// Malformed rows are logged as warnings during the load; running with `-v`
/// shows them alongside the summary.
pub async fn cmd_validate(settings: &Settings) -> anyhow::Result<()> {
    let service = super::create_service(settings)?;

    println!(
        "{} Loading schedule from {}",
        style("→").cyan(),
        settings.schedule_source
    );

    let doc = service.load().await?;

    if doc.is_empty() {
        println!("{} Schedule contains no days", style("!").yellow());
        return Ok(());
    }

    for (key, day) in doc.days() {
        let grouping = categorize(day);
        println!(
            "  {} {} ({}): {} ponencias, {} talleres, {} carteles, {} eventos",
            style("✓").green(),
            key,
            day.date,
            grouping.talks.len(),
            grouping.workshops.len(),
            grouping.posters.len(),
            grouping.events.len(),
        );

        if let Some(assignment) = service.assignment_for(key) {
            for (index, session) in assignment.split(&grouping.workshops).iter().enumerate() {
                let label = session.label.as_deref().unwrap_or("(sin etiqueta)");
                println!(
                    "      sesión {}: {} talleres — {}",
                    index + 1,
                    session.entries.len(),
                    label
                );
            }
        }
    }

    Ok(())
}
