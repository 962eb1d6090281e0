use super::*;
use client_core::PaginationState;
use shared::{domain::CommentSentiment, error::ContractViolation};
use std::num::NonZeroU32;
use shared::domain::SentimentLabel::{Negative, Neutral, Positive};

fn snapshot(page: u32, total: u64, labels: Vec<SentimentLabel>) -> AnalysisSnapshot {
    let limit = NonZeroU32::new(10).expect("non-zero");
    let pagination = PaginationState::new(limit).settled(page, total);
    let start = u64::from(pagination.page() - 1) * 10;
    let end = (start + 10).min(total);
    AnalysisSnapshot {
        url: Some("https://youtu.be/abc".into()),
        video_id: Some("abc".into()),
        items: (start..end)
            .map(|index| CommentSentiment {
                comment: format!("comment {index}"),
                sentiment: Positive,
            })
            .collect(),
        labels,
        pagination,
    }
}

fn corpus() -> Vec<SentimentLabel> {
    let mut labels = vec![Positive; 12];
    labels.extend(vec![Neutral; 8]);
    labels.extend(vec![Negative; 5]);
    labels
}

#[test]
fn first_page_enables_only_next() {
    let controls = Controls::from_state(&snapshot(1, 25, corpus()), false);
    assert_eq!(
        controls,
        Controls {
            analyze: true,
            next: true,
            previous: false
        }
    );
}

#[test]
fn loading_disables_every_control() {
    let controls = Controls::from_state(&snapshot(2, 25, corpus()), true);
    assert!(!controls.analyze && !controls.next && !controls.previous);
}

#[test]
fn empty_corpus_disables_navigation() {
    let controls = Controls::from_state(&snapshot(1, 0, Vec::new()), false);
    assert!(controls.analyze);
    assert!(!controls.next && !controls.previous);
}

#[test]
fn renders_page_items_with_corpus_numbering() {
    let text = render(&snapshot(3, 25, corpus()), false);
    assert!(text.contains("Video: abc"));
    assert!(text.contains("Page 3 / 3  (25 comments analyzed)"));
    assert!(text.contains(" 21. [Positive] comment 20"));
    assert!(text.contains(" 25. [Positive] comment 24"));
    assert!(text.contains("[prev: enabled] [next: disabled]"));
    assert!(!text.contains("Analyzing..."));
}

#[test]
fn renders_tally_in_display_order() {
    let text = render(&snapshot(1, 25, corpus()), false);
    let positive = text.find("Positive ").expect("positive row");
    let neutral = text.find("Neutral ").expect("neutral row");
    let negative = text.find("Negative ").expect("negative row");
    assert!(positive < neutral && neutral < negative);
    assert!(text.contains("12 ( 48.0%)"));
    assert!(text.contains("8 ( 32.0%)"));
    assert!(text.contains("5 ( 20.0%)"));
}

#[test]
fn renders_zero_pages_for_empty_corpus() {
    let text = render(&snapshot(1, 0, Vec::new()), false);
    assert!(text.contains("Page 0 / 0"));
    assert!(text.contains("(no comments on this page)"));
    assert!(text.contains("[prev: disabled] [next: disabled]"));
}

#[test]
fn renders_placeholder_before_first_result() {
    let empty = AnalysisSnapshot {
        url: None,
        video_id: None,
        items: Vec::new(),
        labels: Vec::new(),
        pagination: PaginationState::new(NonZeroU32::new(10).expect("non-zero")),
    };
    let text = render(&empty, true);
    assert!(text.starts_with("No analysis yet."));
    assert!(text.contains("Analyzing..."));
}

#[test]
fn failure_text_mentions_kept_results() {
    let transport = describe_failure(&FetchError::Transport("connection refused".into()));
    assert!(transport.contains("unreachable"));
    assert!(transport.contains("previous results"));

    let service = describe_failure(&FetchError::Service {
        status: 400,
        message: "Invalid YouTube URL".into(),
    });
    assert!(service.contains("(400): Invalid YouTube URL"));

    let contract = describe_failure(&FetchError::Contract(ContractViolation::UnknownLabel(
        "Mixed".into(),
    )));
    assert!(contract.contains("unexpected data"));
    assert!(contract.contains("Mixed"));
}
