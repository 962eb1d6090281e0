use super::*;
use shared::domain::SentimentLabel::{Negative, Neutral, Positive};

fn labels(positive: usize, neutral: usize, negative: usize) -> Vec<SentimentLabel> {
    std::iter::repeat(Positive)
        .take(positive)
        .chain(std::iter::repeat(Neutral).take(neutral))
        .chain(std::iter::repeat(Negative).take(negative))
        .collect()
}

#[test]
fn empty_input_counts_zero_for_every_label() {
    let counts = tally(&[]);
    assert_eq!(counts, SentimentTally::default());
    for label in SentimentLabel::ALL {
        assert_eq!(counts.count(label), 0);
    }
    assert_eq!(counts.total(), 0);
}

#[test]
fn counts_match_occurrences_and_sum_to_length() {
    for (p, n, g) in [(12, 8, 5), (0, 3, 0), (1, 0, 9), (40, 40, 40)] {
        let input = labels(p, n, g);
        let counts = tally(&input);
        assert_eq!(counts.positive, p as u64);
        assert_eq!(counts.neutral, n as u64);
        assert_eq!(counts.negative, g as u64);
        assert_eq!(counts.total(), input.len() as u64);
    }
}

#[test]
fn permutations_yield_identical_tally() {
    let input = vec![Negative, Positive, Neutral, Positive, Negative, Positive];
    let expected = tally(&input);

    let mut reversed = input.clone();
    reversed.reverse();
    assert_eq!(tally(&reversed), expected);

    let mut sorted = input.clone();
    sorted.sort_by_key(|label| label.as_str());
    assert_eq!(tally(&sorted), expected);

    for shift in 0..input.len() {
        let mut rotated = input.clone();
        rotated.rotate_left(shift);
        assert_eq!(tally(&rotated), expected);
    }
}

#[test]
fn chart_data_follows_display_order() {
    let chart = tally(&labels(12, 8, 5)).chart_data();
    assert_eq!(
        chart,
        vec![
            ChartSlice {
                name: Positive,
                value: 12
            },
            ChartSlice {
                name: Neutral,
                value: 8
            },
            ChartSlice {
                name: Negative,
                value: 5
            },
        ]
    );
}

#[test]
fn chart_slices_serialize_as_name_value_pairs() {
    let chart = tally(&[Neutral]).chart_data();
    let json = serde_json::to_value(&chart).expect("serialize chart");
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "Positive", "value": 0 },
            { "name": "Neutral", "value": 1 },
            { "name": "Negative", "value": 0 }
        ])
    );
}

#[test]
fn share_is_zero_for_empty_tally() {
    let empty = SentimentTally::default();
    assert_eq!(empty.share(Positive), 0.0);

    let counts = tally(&labels(1, 1, 2));
    assert!((counts.share(Negative) - 0.5).abs() < f64::EPSILON);
}
