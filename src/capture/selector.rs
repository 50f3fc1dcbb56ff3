//! Element selectors
//!
//! A small subset of CSS selector lists: comma separated alternatives made
//! of an optional tag name followed by any number of `.class` parts. That
//! covers the marker selectors and the interactive-role selector; the
//! source text is kept verbatim so DOM surfaces can hand it to
//! `querySelectorAll` directly.

use std::str::FromStr;
use thiserror::Error;

/// Selector for the small marker dot
pub const CURSOR_SELECTOR: &str = ".cursor";

/// Selector for the trailing ring
pub const FOLLOWER_SELECTOR: &str = ".cursor-follower";

/// Elements that grow the follower while hovered
pub const INTERACTIVE_SELECTOR: &str = "a, button, .btn, input, textarea";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Selector list is empty")]
    Empty,

    #[error("Empty selector at position {0}")]
    EmptyAlternative(usize),

    #[error("Unsupported selector syntax: {0:?}")]
    Unsupported(String),
}

/// One alternative of a selector list, e.g. `a.btn`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub classes: Vec<String>,
}

impl SimpleSelector {
    fn parse(text: &str) -> Result<Self, SelectorError> {
        let mut segments = text.split('.');
        let tag = match segments.next() {
            Some("") | None => None,
            Some(tag) if is_ident(tag) => Some(tag.to_ascii_lowercase()),
            Some(_) => return Err(SelectorError::Unsupported(text.to_string())),
        };

        let mut classes = Vec::new();
        for class in segments {
            if !is_ident(class) {
                return Err(SelectorError::Unsupported(text.to_string()));
            }
            classes.push(class.to_string());
        }

        if tag.is_none() && classes.is_empty() {
            return Err(SelectorError::Unsupported(text.to_string()));
        }

        Ok(Self { tag, classes })
    }

    /// Tag names compare case-insensitively, classes exactly
    pub fn matches<C: AsRef<str>>(&self, tag: &str, classes: &[C]) -> bool {
        let tag_ok = self
            .tag
            .as_deref()
            .map_or(true, |want| want.eq_ignore_ascii_case(tag));

        tag_ok
            && self
                .classes
                .iter()
                .all(|want| classes.iter().any(|have| have.as_ref() == want))
    }
}

fn is_ident(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<SimpleSelector>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let alternatives = source
            .split(',')
            .enumerate()
            .map(|(index, part)| {
                let part = part.trim();
                if part.is_empty() {
                    Err(SelectorError::EmptyAlternative(index))
                } else {
                    SimpleSelector::parse(part)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// True if any alternative matches an element with this tag and classes
    pub fn matches<C: AsRef<str>>(&self, tag: &str, classes: &[C]) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(tag, classes))
    }

    pub fn alternatives(&self) -> &[SimpleSelector] {
        &self.alternatives
    }

    pub fn as_css(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CLASSES: &[&str] = &[];

    #[test]
    fn test_interactive_selector_matches_roles() {
        let selector = Selector::parse(INTERACTIVE_SELECTOR).unwrap();

        assert!(selector.matches("a", NO_CLASSES));
        assert!(selector.matches("button", NO_CLASSES));
        assert!(selector.matches("input", NO_CLASSES));
        assert!(selector.matches("textarea", NO_CLASSES));
        assert!(selector.matches("div", &["card", "btn"]));
        assert!(selector.matches("BUTTON", NO_CLASSES));
    }

    #[test]
    fn test_interactive_selector_rejects_other_elements() {
        let selector = Selector::parse(INTERACTIVE_SELECTOR).unwrap();

        assert!(!selector.matches("div", NO_CLASSES));
        assert!(!selector.matches("span", &["button"]));
        assert!(!selector.matches("p", &["btn-primary"]));
    }

    #[test]
    fn test_compound_selector_requires_all_parts() {
        let selector = Selector::parse("a.btn.large").unwrap();

        assert!(selector.matches("a", &["large", "btn"]));
        assert!(!selector.matches("a", &["btn"]));
        assert!(!selector.matches("div", &["btn", "large"]));
    }

    #[test]
    fn test_marker_selectors() {
        let cursor = Selector::parse(CURSOR_SELECTOR).unwrap();
        let follower = Selector::parse(FOLLOWER_SELECTOR).unwrap();

        assert!(cursor.matches("div", &["cursor"]));
        assert!(!cursor.matches("div", &["cursor-follower"]));
        assert!(follower.matches("div", &["cursor-follower"]));
    }

    #[test]
    fn test_source_is_kept_for_css() {
        let selector: Selector = "  a, button  ".parse().unwrap();
        assert_eq!(selector.as_css(), "a, button");
        assert_eq!(selector.alternatives().len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("a,,button"), Err(SelectorError::EmptyAlternative(1)));
        assert!(matches!(
            Selector::parse("div > a"),
            Err(SelectorError::Unsupported(_))
        ));
        assert!(matches!(
            Selector::parse("a..btn"),
            Err(SelectorError::Unsupported(_))
        ));
        assert!(matches!(
            Selector::parse("#main"),
            Err(SelectorError::Unsupported(_))
        ));
    }
}
