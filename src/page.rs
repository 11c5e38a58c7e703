//! Page context handed to the renderer.
//!
//! Everything the main view template needs besides the table itself:
//! asset lists, the snapshot date, the history link and the selectors.

use crate::config::Config;
use crate::model::{Locale, Product};
use crate::params::RequestParams;
use crate::view::{assemble, ViewModel};
use crate::webstatus::Webstatus;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Displayed in place of the locale in the per-product view.
pub const ALL_LOCALES_LABEL: &str = "All locales";

const BASE_CSS: [&str; 1] = ["foundation.min.css"];
const BASE_JS: [&str; 2] = ["jquery.min.js", "foundation.min.js"];

// Unreserved characters (RFC 3986, section 2.3) stay as they are
const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub assets_folder: String,
    pub default_css: Vec<String>,
    pub default_js: Vec<String>,
    pub last_update: String,
    pub url_history: String,
    pub requested_locale: String,
    pub requested_product: String,
    pub available_locales: Vec<Locale>,
    pub available_products: Vec<Product>,
    pub view: ViewModel,
}

impl PageContext {
    /// Assemble the view for `params` and wrap it with the page data.
    pub fn build(config: &Config, webstatus: &Webstatus, params: &RequestParams) -> Self {
        let view = assemble(
            &params.locale,
            &params.product,
            webstatus.matrix(),
            webstatus.available_locales(),
            webstatus.available_products(),
        );

        let requested_locale = if view.is_single_product() {
            ALL_LOCALES_LABEL.to_string()
        } else {
            params.locale.clone()
        };

        Self {
            assets_folder: config.assets_folder.clone(),
            default_css: asset_list(&BASE_CSS, "main.css"),
            default_js: asset_list(&BASE_JS, "main.js"),
            last_update: format_last_update(&webstatus.metadata().creation_date),
            url_history: history_url(&config.history_url, &params.product, &requested_locale),
            requested_locale,
            requested_product: params.product.clone(),
            available_locales: webstatus.available_locales().to_vec(),
            available_products: webstatus.available_products().to_vec(),
            view,
        }
    }
}

fn asset_list(base: &[&str], page_asset: &str) -> Vec<String> {
    base.iter()
        .copied()
        .chain(std::iter::once(page_asset))
        .map(str::to_string)
        .collect()
}

/// Snapshot date as shown in the footer, e.g. `2016-05-03 08:15 UTC (+0000)`.
pub fn format_last_update(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M %Z (%z)").to_string()
}

/// Link to the history page for the same selection.
pub fn history_url(base: &str, product: &str, displayed_locale: &str) -> String {
    let locale = if displayed_locale == ALL_LOCALES_LABEL {
        "all"
    } else {
        displayed_locale
    };
    format!(
        "{}?product={}&locale={}",
        base,
        utf8_percent_encode(product, QUERY_VALUE_SET),
        utf8_percent_encode(locale, QUERY_VALUE_SET)
    )
}
