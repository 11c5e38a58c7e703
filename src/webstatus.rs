//! File-backed data provider.
//!
//! The dashboard reads two JSON documents produced by the collection
//! scripts: the status file, with one object per locale plus a `metadata`
//! section, and the sources file, which declares every tracked product.

use crate::error::{Result, WebstatusError};
use crate::model::{CompletionRecord, Locale, Matrix, Product, ProductId};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const METADATA_KEY: &str = "metadata";

/// Information about the status snapshot itself.
#[derive(Debug, Clone, PartialEq)]
pub struct WebstatusMetadata {
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    creation_date: String,
}

/// Read-only snapshot of everything the dashboard knows for one request.
#[derive(Debug, Clone)]
pub struct Webstatus {
    locales: Vec<Locale>,
    products: Vec<Product>,
    matrix: Matrix,
    metadata: WebstatusMetadata,
}

impl Webstatus {
    /// Load the status and sources files from disk.
    pub async fn load(status_path: &Path, sources_path: &Path) -> Result<Self> {
        let status = read_file(status_path).await?;
        let sources = read_file(sources_path).await?;

        let webstatus = Self::from_json(&status, &sources)?;

        debug!(
            "Loaded status data: {} locales, {} products",
            webstatus.locales.len(),
            webstatus.products.len()
        );

        Ok(webstatus)
    }

    /// Build a snapshot from the raw JSON documents.
    pub fn from_json(status: &str, sources: &str) -> Result<Self> {
        let mut raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(status).map_err(|source| WebstatusError::Parse {
                what: "status data",
                source,
            })?;

        let raw_metadata = raw
            .remove(METADATA_KEY)
            .ok_or(WebstatusError::MissingMetadata)?;
        let raw_metadata: RawMetadata =
            serde_json::from_value(raw_metadata).map_err(|source| WebstatusError::Parse {
                what: "status metadata",
                source,
            })?;
        let creation_date = parse_creation_date(&raw_metadata.creation_date)
            .ok_or_else(|| WebstatusError::InvalidCreationDate(raw_metadata.creation_date))?;

        let mut matrix = Matrix::new();
        for (locale, products) in raw {
            let records: BTreeMap<ProductId, CompletionRecord> = serde_json::from_value(products)
                .map_err(|source| WebstatusError::Parse {
                    what: "status data",
                    source,
                })?;

            for (product, record) in &records {
                record
                    .validate()
                    .map_err(|reason| WebstatusError::InvalidRecord {
                        locale: locale.clone(),
                        product: product.clone(),
                        reason,
                    })?;
            }

            matrix.insert(locale, records);
        }

        let products = parse_sources(sources)?;

        // BTreeMap keys are already sorted
        let locales = matrix.keys().cloned().collect();

        Ok(Self {
            locales,
            products,
            matrix,
            metadata: WebstatusMetadata { creation_date },
        })
    }

    /// All tracked locales, sorted by code.
    pub fn available_locales(&self) -> &[Locale] {
        &self.locales
    }

    /// All tracked products, sorted by display name.
    pub fn available_products(&self) -> &[Product] {
        &self.products
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn metadata(&self) -> &WebstatusMetadata {
        &self.metadata
    }
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| WebstatusError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_sources(sources: &str) -> Result<Vec<Product>> {
    let raw: BTreeMap<ProductId, Product> =
        serde_json::from_str(sources).map_err(|source| WebstatusError::Parse {
            what: "sources",
            source,
        })?;

    let mut products: Vec<Product> = raw
        .into_iter()
        .map(|(id, mut product)| {
            product.id = id;
            product
        })
        .collect();

    products.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(products)
}

/// Parse the snapshot timestamp. Naive timestamps are taken as UTC.
fn parse_creation_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
