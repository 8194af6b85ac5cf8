//! Selector-driven field extraction
//!
//! This module turns a fetched HTML page into a [`Record`]:
//! - `links` collects every match (href, else src, else text)
//! - every other field takes the text of its first match
//!
//! Selectors are compiled once per target, so a malformed selector is a
//! configuration error reported before anything is fetched.

use crate::config::Target;
use crate::record::{Record, CONTENT_FIELD, LINKS_FIELD, TITLE_FIELD};
use crate::ConfigError;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A target with its selectors parsed and its URL resolved
#[derive(Debug, Clone)]
pub struct CompiledTarget {
    name: String,
    url: Url,
    rules: Vec<FieldRule>,
}

#[derive(Debug, Clone)]
struct FieldRule {
    field: String,
    selector: Selector,
}

impl CompiledTarget {
    /// Parses the target's URL and every selector
    ///
    /// # Returns
    ///
    /// * `Ok(CompiledTarget)` - Ready to extract records
    /// * `Err(ConfigError)` - The URL or one of the selectors is malformed
    pub fn compile(target: &Target) -> Result<Self, ConfigError> {
        let url = Url::parse(&target.url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid URL '{}' for target '{}': {}",
                target.url, target.name, e
            ))
        })?;

        let rules = target
            .selectors
            .iter()
            .map(|(field, css)| {
                Selector::parse(css)
                    .map(|selector| FieldRule {
                        field: field.clone(),
                        selector,
                    })
                    .map_err(|e| ConfigError::InvalidSelector {
                        target: target.name.clone(),
                        field: field.clone(),
                        message: format!("'{}': {:?}", css, e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: target.name.clone(),
            url,
            rules,
        })
    }

    /// Name of the underlying target
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the underlying target
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Extracts a record from the page's HTML
    ///
    /// Zero matches never fail: singular fields become `None` and `links`
    /// stays empty.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use daria_scrape::config::Target;
    /// use daria_scrape::scrape::CompiledTarget;
    ///
    /// let target = Target::new("One", "http://x/1").with_selector("title", "h1");
    /// let compiled = CompiledTarget::compile(&target).unwrap();
    /// let record = compiled.extract("<h1>Hi</h1>", Utc::now());
    /// assert_eq!(record.title.as_deref(), Some("Hi"));
    /// ```
    pub fn extract(&self, html: &str, fetched_at: DateTime<Utc>) -> Record {
        let document = Html::parse_document(html);
        let mut record = Record::new(&self.name, self.url.as_str(), fetched_at);

        for rule in &self.rules {
            match rule.field.as_str() {
                LINKS_FIELD => {
                    record.links = document
                        .select(&rule.selector)
                        .filter_map(|element| link_value(element, &self.url))
                        .collect();
                }
                TITLE_FIELD => record.title = first_text(&document, &rule.selector),
                CONTENT_FIELD => record.content = first_text(&document, &rule.selector),
                other => {
                    record
                        .fields
                        .insert(other.to_string(), first_text(&document, &rule.selector));
                }
            }
        }

        tracing::debug!(
            "Extracted {} links from {} (title: {})",
            record.links.len(),
            self.name,
            record.title.is_some()
        );

        record
    }
}

/// Text of the first element matching `selector`
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(element_text)
}

/// Collapses an element's text into single-spaced, trimmed form
fn element_text(element: ElementRef) -> Option<String> {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Value of a `links` match: href, else src, else its text
fn link_value(element: ElementRef, base_url: &Url) -> Option<String> {
    let attr = element
        .value()
        .attr("href")
        .or_else(|| element.value().attr("src"))
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match attr {
        Some(href) => Some(resolve_link(href, base_url)),
        None => element_text(element),
    }
}

/// Resolves a link against the page URL, keeping it verbatim if that fails
fn resolve_link(href: &str, base_url: &Url) -> String {
    base_url
        .join(href)
        .map(|absolute| absolute.to_string())
        .unwrap_or_else(|_| href.to_string())
}
