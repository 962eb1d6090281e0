//! Text rendering of coordinator state and the enabled/disabled state of the
//! prompt's controls.

use std::fmt::Write as _;

use client_core::{AnalysisSnapshot, FetchError};
use shared::domain::SentimentLabel;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub analyze: bool,
    pub next: bool,
    pub previous: bool,
}

impl Controls {
    pub fn from_state(snapshot: &AnalysisSnapshot, loading: bool) -> Self {
        Self {
            analyze: !loading,
            next: !loading && snapshot.has_result() && snapshot.pagination.has_next(),
            previous: !loading && snapshot.has_result() && snapshot.pagination.has_previous(),
        }
    }
}

pub fn render(snapshot: &AnalysisSnapshot, loading: bool) -> String {
    let mut out = String::new();
    if !snapshot.has_result() {
        out.push_str("No analysis yet. Type `analyze <url>` to start.\n");
        if loading {
            out.push_str("Analyzing...\n");
        }
        return out;
    }

    let pagination = &snapshot.pagination;
    let _ = writeln!(
        out,
        "Video: {}  ({})",
        snapshot.video_id.as_deref().unwrap_or("unknown"),
        snapshot.url.as_deref().unwrap_or_default()
    );
    let _ = writeln!(
        out,
        "Page {} / {}  ({} comments analyzed)",
        if pagination.total_pages() == 0 { 0 } else { pagination.page() },
        pagination.total_pages(),
        pagination.total_count()
    );

    if snapshot.items.is_empty() {
        out.push_str("  (no comments on this page)\n");
    }
    let offset = u64::from(pagination.page() - 1) * u64::from(pagination.limit().get());
    for (index, item) in snapshot.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}. [{:<8}] {}",
            offset + index as u64 + 1,
            item.sentiment,
            item.comment
        );
    }

    out.push_str("Sentiment across all comments:\n");
    let tally = snapshot.tally();
    for slice in tally.chart_data() {
        let share = tally.share(slice.name);
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<8} {}{} {:>5} ({:>5.1}%)",
            slice.name,
            bar_glyph(slice.name).to_string().repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            slice.value,
            share * 100.0
        );
    }

    let controls = Controls::from_state(snapshot, loading);
    let _ = writeln!(
        out,
        "[prev: {}] [next: {}]",
        toggle(controls.previous),
        toggle(controls.next)
    );
    if loading {
        out.push_str("Analyzing...\n");
    }
    out
}

/// User-facing text for a failed fetch. The previous result stays on screen.
pub fn describe_failure(err: &FetchError) -> String {
    match err {
        FetchError::Transport(detail) => format!(
            "Analysis service unreachable ({detail}); showing previous results. Retry when ready."
        ),
        FetchError::Service { status, message } => {
            format!("Analysis failed ({status}): {message}; showing previous results.")
        }
        FetchError::Contract(violation) => format!(
            "Analysis service returned unexpected data ({violation}); showing previous results."
        ),
    }
}

fn bar_glyph(label: SentimentLabel) -> char {
    match label {
        SentimentLabel::Positive => '+',
        SentimentLabel::Neutral => '=',
        SentimentLabel::Negative => '-',
    }
}

fn toggle(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
