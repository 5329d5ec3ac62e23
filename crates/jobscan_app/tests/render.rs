use jobscan_app::ui::render::{render, AUTO_CHECK_BANNER, NO_RESULTS_HINT, TITLE};
use jobscan_core::{AppViewModel, MatchRowView, Phase};
use pretty_assertions::assert_eq;

fn view() -> AppViewModel {
    AppViewModel {
        keywords: vec!["remote".to_string(), "visa".to_string()],
        auto_check: true,
        check_enabled: true,
        ..AppViewModel::default()
    }
}

#[test]
fn fresh_panel_shows_hint_and_banner() {
    let lines = render(&view());
    assert_eq!(lines[0], TITLE);
    assert!(lines.contains(&"Keywords: remote, visa".to_string()));
    assert!(lines.contains(&AUTO_CHECK_BANNER.to_string()));
    assert_eq!(lines.last().map(String::as_str), Some(NO_RESULTS_HINT));
}

#[test]
fn results_render_in_keyword_order() {
    let lines = render(&AppViewModel {
        phase: Phase::ShowingResults,
        results: vec![
            MatchRowView {
                keyword: "remote".to_string(),
                found: true,
            },
            MatchRowView {
                keyword: "visa".to_string(),
                found: false,
            },
        ],
        ..view()
    });
    let tail: Vec<&str> = lines.iter().rev().take(2).rev().map(String::as_str).collect();
    assert_eq!(tail, vec!["✅ remote found", "❌ visa not found"]);
}

#[test]
fn error_replaces_results() {
    let lines = render(&AppViewModel {
        phase: Phase::ShowingError,
        error: Some("No active tab found.".to_string()),
        ..view()
    });
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Error: No active tab found.")
    );
    assert!(!lines.iter().any(|l| l == NO_RESULTS_HINT));
}

#[test]
fn checking_phase_is_announced() {
    let lines = render(&AppViewModel {
        phase: Phase::Checking { check_id: 3 },
        ..view()
    });
    assert!(lines.iter().any(|l| l.starts_with("Checking")));
}

#[test]
fn manual_mode_hides_banner_and_disables_empty_check() {
    let lines = render(&AppViewModel::default());
    assert!(!lines.contains(&AUTO_CHECK_BANNER.to_string()));
    assert!(lines.contains(&"Keywords: (none)".to_string()));
    assert!(lines
        .iter()
        .any(|l| l.starts_with("[Check Keywords in Current Tab] (disabled")));
}
