//! URL handling module for Database360
//!
//! This module provides catalog search URL construction, resolution of anchor
//! hrefs against the page they were found on, and rewriting of Google Sheets
//! share links into their CSV export form.

mod resolve;
mod search;
mod sheets;

// Re-export main functions
pub use resolve::resolve_href;
pub use search::build_search_url;
pub use sheets::sheet_export_url;
