//! Core data types shared by the data provider and the view assembler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A locale identifier such as `fr` or `es-ES`.
pub type Locale = String;

/// Identifier of a tracked product (key in the sources file).
pub type ProductId = String;

/// Completion data indexed by locale, then by product id. Sparse: a
/// locale only lists the products it has data for.
pub type Matrix = BTreeMap<Locale, BTreeMap<ProductId, CompletionRecord>>;

/// Format of the localization files a product ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Properties,
    Xliff,
    Gettext,
    Lang,
    #[serde(other)]
    Other,
}

/// A tracked product, as declared in the sources file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Filled from the sources file key, not from the entry body
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    pub repository_url: String,
    pub source_type: SourceType,
}

/// Translation status of one product in one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Share of translated strings, 0-100
    pub percentage: f64,

    /// Strings whose translation equals the source text
    #[serde(default)]
    pub identical: u32,

    /// Number of strings in the reference
    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub error_status: bool,

    pub source_type: SourceType,

    #[serde(default)]
    pub translated: u32,

    #[serde(default)]
    pub untranslated: u32,

    #[serde(default)]
    pub missing: u32,

    #[serde(default)]
    pub obsolete: u32,

    /// Collection scripts write this as `errors`
    #[serde(default, alias = "errors")]
    pub error_message: String,
}

impl CompletionRecord {
    /// Minimal record, mostly useful to build fixtures.
    pub fn new(percentage: f64, source_type: SourceType) -> Self {
        Self {
            percentage,
            identical: 0,
            total: 0,
            error_status: false,
            source_type,
            translated: 0,
            untranslated: 0,
            missing: 0,
            obsolete: 0,
            error_message: String::new(),
        }
    }

    /// Whether the locale is fully localized for this product.
    pub fn is_complete(&self) -> bool {
        self.percentage >= 100.0
    }

    /// Check the invariants the dashboard relies on.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.percentage) {
            return Err(format!(
                "percentage {} is outside the 0-100 range",
                self.percentage
            ));
        }
        if self.source_type == SourceType::Properties && self.identical > self.total {
            return Err(format!(
                "identical strings ({}) exceed total strings ({})",
                self.identical, self.total
            ));
        }
        Ok(())
    }
}
