//! Row styling for the status tables.
//!
//! A row is styled from its record alone: broken records get the `error`
//! class, everything else is colored by its effective completion.

use crate::model::{CompletionRecord, SourceType};
use serde::Serialize;

/// Share of identical strings above which a properties file is penalized.
pub const IDENTICAL_THRESHOLD: f64 = 20.0;

pub const ERROR_CLASS: &str = "error";

/// Presentation attributes for one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    pub class: String,
    pub style: String,
}

/// Maps a completion percentage to an inline style.
pub trait StyleLookup {
    fn style_for(&self, percentage: f64) -> String;
}

/// Default lookup: fixed color bands, checked from the highest threshold down.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageBands;

impl PercentageBands {
    /// (minimum percentage, background color)
    pub const BANDS: [(f64, &'static str); 3] =
        [(100.0, "#92cc6e"), (90.0, "#d8efc8"), (50.0, "#ffe4b3")];

    /// Used below the lowest band, including negative effective percentages.
    pub const LOW: &'static str = "#ffc2c2";
}

impl StyleLookup for PercentageBands {
    fn style_for(&self, percentage: f64) -> String {
        let color = Self::BANDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, color)| *color)
            .unwrap_or(Self::LOW);

        format!("background-color: {};", color)
    }
}

/// Percentage of strings left identical to the source, or 0 for an empty file.
pub fn identical_percentage(record: &CompletionRecord) -> f64 {
    if record.total == 0 {
        return 0.0;
    }
    f64::from(record.identical) / f64::from(record.total) * 100.0
}

/// Completion used for styling. For properties files a high share of
/// identical strings is subtracted from the nominal percentage.
pub fn effective_percentage(record: &CompletionRecord) -> f64 {
    let mut percentage = record.percentage;
    if record.source_type == SourceType::Properties {
        let identical = identical_percentage(record);
        if identical > IDENTICAL_THRESHOLD {
            percentage -= identical;
        }
    }
    percentage
}

/// Style a row with the default color bands.
pub fn row_style(record: &CompletionRecord) -> RowStyle {
    row_style_with(record, &PercentageBands)
}

pub fn row_style_with(record: &CompletionRecord, lookup: &impl StyleLookup) -> RowStyle {
    if record.error_status {
        return RowStyle {
            class: ERROR_CLASS.to_string(),
            style: String::new(),
        };
    }

    RowStyle {
        class: String::new(),
        style: lookup.style_for(effective_percentage(record)),
    }
}
