//! Aggregates over recorded compression events

use crate::{CompressionEvent, Outcome};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSummary {
    pub total: usize,
    pub by_outcome: BTreeMap<String, usize>,
    pub chars_in: usize,
    pub chars_out: usize,
    pub tokens_saved: usize,
    /// Mean ratio over calls that actually used compression
    pub mean_ratio: Option<f64>,
}

impl EventSummary {
    pub fn from_events(events: &[CompressionEvent]) -> Self {
        let mut summary = Self {
            total: events.len(),
            ..Self::default()
        };

        let mut ratios = Vec::new();
        for event in events {
            *summary
                .by_outcome
                .entry(event.outcome.as_str().to_string())
                .or_default() += 1;
            summary.chars_in += event.original_chars;
            summary.chars_out += event.output_chars;
            summary.tokens_saved += event.original_tokens.saturating_sub(event.output_tokens);
            if event.outcome.used_compression() {
                ratios.push(event.ratio);
            }
        }

        if !ratios.is_empty() {
            summary.mean_ratio = Some(ratios.iter().sum::<f64>() / ratios.len() as f64);
        }
        summary
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.by_outcome.get(outcome.as_str()).copied().unwrap_or(0)
    }

    pub fn failures(&self) -> usize {
        [Outcome::BackendFailed, Outcome::TimedOut, Outcome::Cancelled]
            .into_iter()
            .map(|o| self.count(o))
            .sum()
    }
}
