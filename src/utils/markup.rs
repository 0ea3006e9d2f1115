// src/utils/markup.rs

//! HTML and text matching helpers shared by the extractors.

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Compile a regular expression, mapping failures to [`AppError::Config`].
pub fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AppError::config(format!("invalid pattern '{pattern}': {e}")))
}

/// First capture group of `re` in `haystack`.
pub fn capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)?.get(1).map(|m| m.as_str())
}

/// Text content of `element`, skipping everything inside `skip`.
pub fn text_without(element: ElementRef<'_>, skip: Option<ElementRef<'_>>) -> String {
    let skip_id = skip.map(|s| (*s).id());
    element
        .descendants()
        .filter(|node| {
            skip_id.is_none_or(|id| node.id() != id && !node.ancestors().any(|a| a.id() == id))
        })
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect()
}
