//! View assembly: turns the completion matrix into render-ready rows.
//!
//! Two views exist. With a concrete product requested the table lists that
//! product across every locale; with `product=all` it lists every product
//! for the requested locale.

use crate::model::{CompletionRecord, Locale, Matrix, Product, ProductId, SourceType};
use crate::style::{row_style, RowStyle};
use serde::Serialize;
use tracing::debug;

/// Query value selecting the per-locale view.
pub const ALL_PRODUCTS: &str = "all";

/// Product name shown when the requested product is not tracked.
pub const UNKNOWN_PRODUCT_NAME: &str = "N/A";

const TITLE_PREFIX: &str = "Web Status –";

/// Completion counters for the per-product view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewMetadata {
    pub complete_locales: usize,
    pub total_locales: usize,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub class: String,
    pub style: String,
    pub product_id: ProductId,

    /// Set in the per-product view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    /// Set in the per-locale view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    /// Set in the per-locale view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,

    pub record: CompletionRecord,
}

/// Which table is displayed, with the data only that table needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewMode {
    SingleProduct {
        product_id: ProductId,
        product_name: String,
        metadata: ViewMetadata,
    },
    SingleLocale {
        locale: Locale,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    #[serde(flatten)]
    pub mode: ViewMode,
    pub title: String,
    pub supported: bool,
    pub rows: Vec<ViewRow>,
    pub xliff_note: bool,
}

impl ViewModel {
    pub fn is_single_product(&self) -> bool {
        matches!(self.mode, ViewMode::SingleProduct { .. })
    }

    /// Counters of the per-product view, `None` for the per-locale view.
    pub fn metadata(&self) -> Option<&ViewMetadata> {
        match &self.mode {
            ViewMode::SingleProduct { metadata, .. } => Some(metadata),
            ViewMode::SingleLocale { .. } => None,
        }
    }
}

/// Assemble the view for a request.
///
/// Missing (locale, product) pairs are skipped. An untracked product or
/// locale yields an empty view with `supported == false`.
pub fn assemble(
    requested_locale: &str,
    requested_product: &str,
    matrix: &Matrix,
    available_locales: &[Locale],
    available_products: &[Product],
) -> ViewModel {
    let view = if requested_product != ALL_PRODUCTS {
        assemble_single_product(requested_product, matrix, available_locales, available_products)
    } else {
        assemble_single_locale(requested_locale, matrix, available_locales, available_products)
    };

    debug!(
        "Assembled view '{}': supported={}, {} rows",
        view.title,
        view.supported,
        view.rows.len()
    );

    view
}

fn assemble_single_product(
    product_id: &str,
    matrix: &Matrix,
    available_locales: &[Locale],
    available_products: &[Product],
) -> ViewModel {
    let Some(product) = available_products.iter().find(|p| p.id == product_id) else {
        return ViewModel {
            mode: ViewMode::SingleProduct {
                product_id: product_id.to_string(),
                product_name: UNKNOWN_PRODUCT_NAME.to_string(),
                metadata: ViewMetadata::default(),
            },
            title: format!("{} {}", TITLE_PREFIX, UNKNOWN_PRODUCT_NAME),
            supported: false,
            rows: Vec::new(),
            xliff_note: false,
        };
    };

    let mut metadata = ViewMetadata::default();
    let mut rows = Vec::new();

    for locale in available_locales {
        let Some(record) = matrix.get(locale).and_then(|products| products.get(product_id))
        else {
            continue;
        };

        metadata.total_locales += 1;
        if record.is_complete() {
            metadata.complete_locales += 1;
        }

        let RowStyle { class, style } = row_style(record);
        rows.push(ViewRow {
            class,
            style,
            product_id: product.id.clone(),
            locale: Some(locale.clone()),
            repository_url: None,
            source_type: None,
            record: record.clone(),
        });
    }

    ViewModel {
        mode: ViewMode::SingleProduct {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            metadata,
        },
        title: format!("{} {}", TITLE_PREFIX, product.name),
        supported: true,
        rows,
        xliff_note: product.source_type == SourceType::Xliff,
    }
}

fn assemble_single_locale(
    locale: &str,
    matrix: &Matrix,
    available_locales: &[Locale],
    available_products: &[Product],
) -> ViewModel {
    let mode = ViewMode::SingleLocale {
        locale: locale.to_string(),
    };
    let title = format!("{} {}", TITLE_PREFIX, locale);

    if !available_locales.iter().any(|l| l == locale) {
        return ViewModel {
            mode,
            title,
            supported: false,
            rows: Vec::new(),
            xliff_note: false,
        };
    }

    let mut rows = Vec::new();
    let mut xliff_note = false;

    // A supported locale may still be absent from the matrix
    if let Some(records) = matrix.get(locale) {
        for product in available_products {
            let Some(record) = records.get(&product.id) else {
                continue;
            };

            // One XLIFF product is enough to show the note
            if product.source_type == SourceType::Xliff {
                xliff_note = true;
            }

            let RowStyle { class, style } = row_style(record);
            rows.push(ViewRow {
                class,
                style,
                product_id: product.id.clone(),
                locale: None,
                repository_url: Some(product.repository_url.clone()),
                source_type: Some(product.source_type.clone()),
                record: record.clone(),
            });
        }
    }

    ViewModel {
        mode,
        title,
        supported: true,
        rows,
        xliff_note,
    }
}
