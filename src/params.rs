//! Request parameter resolution.
//!
//! `product` defaults to `all`. `locale` comes from the query string when it
//! is a well-formed locale code, otherwise it is detected from the
//! `Accept-Language` header against the tracked locales.

use crate::model::Locale;
use crate::view::ALL_PRODUCTS;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Raw query string of the main view.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StatusQuery {
    pub locale: Option<String>,
    pub product: Option<String>,
}

/// Locale and product a request asks for, after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub locale: Locale,
    pub product: String,
}

static LOCALE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_code_regex() -> &'static Regex {
    LOCALE_CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("Invalid locale regex")
    })
}

/// Whether a value looks like a locale code (`fr`, `es-ES`, `ja-JP-mac`).
pub fn is_locale_code(value: &str) -> bool {
    locale_code_regex().is_match(value)
}

impl RequestParams {
    pub fn resolve(
        query: &StatusQuery,
        accept_language: Option<&str>,
        available_locales: &[Locale],
        default_locale: &str,
    ) -> Self {
        let locale = query
            .locale
            .as_deref()
            .map(str::trim)
            .filter(|locale| is_locale_code(locale))
            .map(str::to_string)
            .unwrap_or_else(|| detect_locale(accept_language, available_locales, default_locale));

        let product = query
            .product
            .as_deref()
            .map(str::trim)
            .filter(|product| !product.is_empty())
            .unwrap_or(ALL_PRODUCTS)
            .to_string();

        Self { locale, product }
    }
}

/// Pick the best tracked locale for an `Accept-Language` header.
///
/// Tags are tried by descending quality. For each tag an exact
/// (case-insensitive) match wins, then a match on the primary subtag.
pub fn detect_locale(
    accept_language: Option<&str>,
    available_locales: &[Locale],
    default_locale: &str,
) -> Locale {
    let Some(header) = accept_language else {
        return default_locale.to_string();
    };

    for tag in parse_accept_language(header) {
        if let Some(locale) = available_locales
            .iter()
            .find(|locale| locale.eq_ignore_ascii_case(&tag))
        {
            return locale.clone();
        }

        let primary = tag.split('-').next().unwrap_or(&tag);
        if let Some(locale) = available_locales.iter().find(|locale| {
            locale
                .split('-')
                .next()
                .is_some_and(|p| p.eq_ignore_ascii_case(primary))
        }) {
            return locale.clone();
        }
    }

    default_locale.to_string()
}

/// Language tags of an `Accept-Language` header, best first. Wildcards,
/// malformed tags and `q=0` entries are dropped.
fn parse_accept_language(header: &str) -> Vec<String> {
    let mut tags: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut components = part.trim().split(';');
            let tag = components.next()?.trim().replace('_', "-");
            if !is_locale_code(&tag) {
                return None;
            }

            let quality = components
                .filter_map(|c| c.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            (quality > 0.0).then_some((tag, quality))
        })
        .collect();

    // Stable sort keeps header order between equal weights
    tags.sort_by(|a, b| b.1.total_cmp(&a.1));
    tags.into_iter().map(|(tag, _)| tag).collect()
}
