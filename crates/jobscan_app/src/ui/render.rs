use jobscan_core::{AppViewModel, MatchRowView, Phase};

pub const TITLE: &str = "Job Keyword Checker";
pub const AUTO_CHECK_BANNER: &str =
    "✓ Auto-checking enabled - keywords will be checked automatically";
pub const NO_RESULTS_HINT: &str = "No results yet. Add keywords and check them!";

/// Renders the panel as plain text lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(TITLE.to_string());
    lines.push(format!(
        "[{}] Auto-check on page/content changes",
        if view.auto_check { "x" } else { " " }
    ));

    if view.keywords.is_empty() {
        lines.push("Keywords: (none)".to_string());
    } else {
        lines.push(format!("Keywords: {}", view.keywords.join(", ")));
    }

    let check_label = if view.auto_check {
        "Manual Check"
    } else {
        "Check Keywords in Current Tab"
    };
    if view.check_enabled {
        lines.push(format!("[{check_label}] (type `check`)"));
    } else {
        lines.push(format!("[{check_label}] (disabled: no keywords)"));
    }

    if view.auto_check {
        lines.push(AUTO_CHECK_BANNER.to_string());
    }

    if let Phase::Checking { check_id } = view.phase {
        lines.push(format!("Checking… (#{check_id})"));
    }

    match &view.error {
        Some(error) => lines.push(format!("Error: {error}")),
        None if view.results.is_empty() => lines.push(NO_RESULTS_HINT.to_string()),
        None => lines.extend(view.results.iter().map(result_line)),
    }

    lines
}

pub fn result_line(row: &MatchRowView) -> String {
    if row.found {
        format!("✅ {} found", row.keyword)
    } else {
        format!("❌ {} not found", row.keyword)
    }
}
