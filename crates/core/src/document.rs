//! Document snapshot model.
//!
//! The editor-state collaborator owns the canonical document; the viewport reads
//! immutable snapshots of it, usually behind an `Arc` so that a changed document
//! is detected by reference.

use crate::element::{Element, ElementId, Layer};
use crate::error::{DocumentError, DocumentResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Unique identifier for a page within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// Page rotation; only right angles are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Clockwise angle in degrees.
    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turns exchange the rendered width and height.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Next rotation clockwise.
    pub fn rotated_clockwise(&self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = DocumentError;

    /// Accepts any multiple of 90, including negative and > 360 values.
    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        if degrees % 90 != 0 {
            return Err(DocumentError::InvalidRotation(degrees));
        }

        Ok(match degrees.rem_euclid(360) {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// One page: intrinsic size, rotation and its elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// Pre-rotation intrinsic width in page units.
    pub width: f32,
    /// Pre-rotation intrinsic height in page units.
    pub height: f32,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    /// Create an unrotated page without elements.
    pub fn new(id: PageId, width: f32, height: f32) -> Self {
        Self {
            id,
            width,
            height,
            rotation: Rotation::Deg0,
            elements: Vec::new(),
        }
    }

    /// Builder-style rotation.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style element append.
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Elements of one kind, in document order.
    pub fn elements_in_layer(&self, layer: Layer) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |element| element.layer() == layer)
    }

    /// Look up an element on this page.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    /// Mutable lookup of an element on this page.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Ordered pages plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document with empty metadata.
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Parse and validate a JSON snapshot.
    pub fn from_json_str(json: &str) -> DocumentResult<Self> {
        let document: Document = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Reject snapshots whose page ids are not unique.
    pub fn validate(&self) -> DocumentResult<()> {
        let mut seen = HashSet::with_capacity(self.pages.len());
        for page in &self.pages {
            if !seen.insert(page.id) {
                return Err(DocumentError::DuplicatePageId(page.id));
            }
        }
        Ok(())
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Look up a page by id.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Position of a page in document order.
    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    /// Page at a document-order position.
    pub fn page_at(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Page that holds the given element.
    pub fn page_of_element(&self, id: ElementId) -> Option<&Page> {
        self.pages.iter().find(|page| page.element(id).is_some())
    }

    /// Mutable lookup of an element on any page.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.pages.iter_mut().find_map(|page| page.element_mut(id))
    }

    /// Remove every listed element; returns how many were removed.
    pub fn remove_elements(&mut self, ids: &[ElementId]) -> usize {
        let mut removed = 0;
        for page in &mut self.pages {
            let before = page.elements.len();
            page.elements.retain(|element| !ids.contains(&element.id()));
            removed += before - page.elements.len();
        }
        removed
    }
}

/// Boundary to the external decoder that produces document snapshots.
pub trait DocumentSource {
    /// Produce a fresh snapshot.
    fn load(&self) -> DocumentResult<Document>;
}
