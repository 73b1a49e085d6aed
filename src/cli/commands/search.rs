//! Search command: query the schedule from the terminal.

use console::style;

use crate::config::Settings;

/// Search titles and presenters, printing one line per hit.
pub async fn cmd_search(settings: &Settings, term: &str, day: Option<&str>) -> anyhow::Result<()> {
    let service = super::create_service(settings)?;
    let hits = service.search(term, day).await?;

    if hits.is_empty() {
        println!("{} No results for \"{}\"", style("!").yellow(), term);
        return Ok(());
    }

    for hit in &hits {
        println!(
            "  {} [{}] {} — {} ({})",
            style("✓").green(),
            hit.day,
            hit.entry.title,
            hit.entry.presenter_name(),
            hit.entry.time,
        );
    }
    println!("{} {} result(s)", style("→").cyan(), hits.len());

    Ok(())
}
