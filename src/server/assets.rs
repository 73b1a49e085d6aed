//! Static asset constants (CSS and JavaScript).

/// Stylesheet for the web interface.
pub const CSS: &str = include_str!("styles.css");

/// Page script: navigation glue and the debounced search box.
pub const JS: &str = include_str!("schedule.js");
