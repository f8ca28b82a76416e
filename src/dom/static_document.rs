use indexmap::IndexMap;

use crate::dom::{Anchor, Document, Overlay};
use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticElement {
    id: String,
    attributes: IndexMap<String, String>,
    overlays: Vec<Overlay>,
    parent_positioned: bool,
}

impl StaticElement {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Whether the parent was switched to `position: relative`.
    #[must_use]
    pub fn parent_positioned(&self) -> bool {
        self.parent_positioned
    }
}

impl Anchor for StaticElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// In-memory document keyed by element id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDocument {
    elements: IndexMap<String, StaticElement>,
    meta: IndexMap<String, String>,
}

impl StaticDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the element with the same id.
    #[must_use]
    pub fn with_element(mut self, element: StaticElement) -> Self {
        self.insert(element);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.meta.insert(name.into(), content.into());
        self
    }

    pub fn insert(&mut self, element: StaticElement) {
        self.elements.insert(element.id.clone(), element);
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&StaticElement> {
        self.elements.get(id)
    }
}

impl Document for StaticDocument {
    fn anchor(&self, id: &str) -> Option<&dyn Anchor> {
        self.elements.get(id).map(|element| element as &dyn Anchor)
    }

    fn append_overlay(&mut self, anchor_id: &str, overlay: Overlay) -> DashboardResult<()> {
        let element = self.elements.get_mut(anchor_id).ok_or_else(|| {
            DashboardError::InvalidData(format!("no element with id `{anchor_id}`"))
        })?;
        element.parent_positioned = true;
        element.overlays.push(overlay);
        Ok(())
    }

    fn meta_content(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(String::as_str)
    }
}
