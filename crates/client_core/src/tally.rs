use serde::Serialize;
use shared::domain::SentimentLabel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTally {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: SentimentLabel,
    pub value: u64,
}

impl SentimentTally {
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a SentimentLabel>,
    {
        labels
            .into_iter()
            .fold(SentimentTally::default(), |mut tally, label| {
                match label {
                    SentimentLabel::Positive => tally.positive += 1,
                    SentimentLabel::Neutral => tally.neutral += 1,
                    SentimentLabel::Negative => tally.negative += 1,
                }
                tally
            })
    }

    pub fn count(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }

    pub fn share(&self, label: SentimentLabel) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(label) as f64 / total as f64,
        }
    }

    pub fn chart_data(&self) -> Vec<ChartSlice> {
        SentimentLabel::ALL
            .into_iter()
            .map(|name| ChartSlice {
                name,
                value: self.count(name),
            })
            .collect()
    }
}

pub fn tally(labels: &[SentimentLabel]) -> SentimentTally {
    SentimentTally::from_labels(labels)
}

#[cfg(test)]
#[path = "tests/tally_tests.rs"]
mod tests;
