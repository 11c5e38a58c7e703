//! Localization status dashboard.
//!
//! Loads per-(locale, product) completion data and assembles either the
//! per-product or the per-locale status table for the renderer.

pub mod config;
pub mod error;
pub mod model;
pub mod page;
pub mod params;
pub mod server;
pub mod style;
pub mod view;
pub mod webstatus;

pub use error::WebstatusError;
pub use model::{CompletionRecord, Locale, Matrix, Product, SourceType};
pub use view::{assemble, ViewMetadata, ViewMode, ViewModel, ViewRow};
