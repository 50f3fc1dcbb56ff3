//! In-memory surface
//!
//! Holds a flat list of elements with a tag and classes and records the
//! last translation and size written to each. Used by the native demo and
//! by tests.

use crate::animator::error::{TrailError, TrailResult};
use crate::capture::input::types::Position;
use crate::capture::selector::Selector;
use crate::capture::traits::{ElementId, Surface};

/// One element and the last styles written to it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessElement {
    pub tag: String,
    pub classes: Vec<String>,
    /// Last `transform` translation, `None` until the first write
    pub translation: Option<Position>,
    /// Last `(width, height)` in pixels
    pub size: Option<(f64, f64)>,
    /// Number of style writes received
    pub writes: u64,
}

/// [`Surface`] backed by a `Vec`; element ids are insertion indices
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    elements: Vec<HeadlessElement>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface with a `.cursor` and a `.cursor-follower` element
    pub fn with_markers() -> Self {
        let mut surface = Self::new();
        surface.add_element("div", &["cursor"]);
        surface.add_element("div", &["cursor-follower"]);
        surface
    }

    pub fn add_element(&mut self, tag: &str, classes: &[&str]) -> ElementId {
        self.elements.push(HeadlessElement {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..HeadlessElement::default()
        });
        ElementId(self.elements.len() as u64 - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&HeadlessElement> {
        self.elements.get(id.0 as usize)
    }

    /// Total style writes across all elements
    pub fn total_writes(&self) -> u64 {
        self.elements.iter().map(|e| e.writes).sum()
    }

    fn element_mut(&mut self, id: ElementId) -> TrailResult<&mut HeadlessElement> {
        self.elements
            .get_mut(id.0 as usize)
            .ok_or(TrailError::UnknownElement(id))
    }

    fn matching(&self, selector: &Selector) -> impl Iterator<Item = ElementId> + '_ {
        let selector = selector.clone();
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| selector.matches(&e.tag, e.classes.as_slice()))
            .map(|(index, _)| ElementId(index as u64))
    }
}

impl Surface for HeadlessSurface {
    fn find_first(&mut self, selector: &Selector) -> Option<ElementId> {
        self.matching(selector).next()
    }

    fn find_all(&mut self, selector: &Selector) -> Vec<ElementId> {
        self.matching(selector).collect()
    }

    fn set_translation(&mut self, element: ElementId, translation: Position) -> TrailResult<()> {
        let element = self.element_mut(element)?;
        element.translation = Some(translation);
        element.writes += 1;
        Ok(())
    }

    fn set_size(&mut self, element: ElementId, width: f64, height: f64) -> TrailResult<()> {
        let element = self.element_mut(element)?;
        element.size = Some((width, height));
        element.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::selector::INTERACTIVE_SELECTOR;

    #[test]
    fn test_find_in_document_order() {
        let mut surface = HeadlessSurface::with_markers();
        let link = surface.add_element("a", &[]);
        surface.add_element("div", &[]);
        let fancy = surface.add_element("span", &["btn"]);

        let selector = Selector::parse(INTERACTIVE_SELECTOR).unwrap();
        assert_eq!(surface.find_all(&selector), vec![link, fancy]);
        assert_eq!(surface.find_first(&selector), Some(link));
    }

    #[test]
    fn test_writes_are_recorded() {
        let mut surface = HeadlessSurface::new();
        let id = surface.add_element("div", &[]);

        surface.set_translation(id, Position::new(1.0, 2.0)).unwrap();
        surface.set_size(id, 40.0, 40.0).unwrap();

        let element = surface.element(id).unwrap();
        assert_eq!(element.translation, Some(Position::new(1.0, 2.0)));
        assert_eq!(element.size, Some((40.0, 40.0)));
        assert_eq!(surface.total_writes(), 2);
    }

    #[test]
    fn test_unknown_element() {
        let mut surface = HeadlessSurface::new();
        assert!(matches!(
            surface.set_size(ElementId(7), 1.0, 1.0),
            Err(TrailError::UnknownElement(ElementId(7)))
        ));
    }
}
