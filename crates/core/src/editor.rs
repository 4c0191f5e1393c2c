//! Editor-state boundary.
//!
//! The viewport reads an [`EditorView`] snapshot and answers with
//! [`EditorCommand`]s. It never writes editor state directly: the collaborator
//! that owns the store applies commands (see [`apply_command`] for the reference
//! reducer) and hands back a fresh view.

use crate::config::ViewportConfig;
use crate::document::{Document, PageId};
use crate::element::{Color, ElementId, ElementKind};
use crate::hit_test::LayerVisibility;
use crate::selection::SelectionSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Page arrangement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Single,
    #[default]
    Continuous,
    TwoPage,
    Thumbnail,
}

/// Tool family; only `Select` enables rubber-band selection and dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    #[default]
    Select,
    Text,
    Draw,
    Annotate,
    Form,
}

/// The active tool as seen by the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub category: ToolCategory,
}

impl ToolDescriptor {
    /// Create a named tool in a category.
    pub fn new(name: impl Into<String>, category: ToolCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// The selection tool.
    pub fn select() -> Self {
        Self::new("select", ToolCategory::Select)
    }

    /// Whether selection gestures are enabled.
    pub fn is_select(&self) -> bool {
        self.category == ToolCategory::Select
    }
}

impl Default for ToolDescriptor {
    fn default() -> Self {
        Self::select()
    }
}

/// Overlay visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayFlags {
    pub grid: bool,
    pub snap: bool,
    pub rulers: bool,
    pub guides: bool,
}

impl Default for OverlayFlags {
    fn default() -> Self {
        Self {
            grid: false,
            snap: false,
            rulers: true,
            guides: true,
        }
    }
}

/// Axis a guide line runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideOrientation {
    Horizontal,
    Vertical,
}

/// Manual guide line at a page-independent pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub orientation: GuideOrientation,
    pub offset_px: f32,
    #[serde(default)]
    pub locked: bool,
    pub color: Color,
}

const GUIDE_COLOR: Color = Color::rgb(0, 170, 255);

impl Guide {
    /// Unlocked horizontal guide in the default guide color.
    pub fn horizontal(offset_px: f32) -> Self {
        Self {
            orientation: GuideOrientation::Horizontal,
            offset_px,
            locked: false,
            color: GUIDE_COLOR,
        }
    }

    /// Unlocked vertical guide in the default guide color.
    pub fn vertical(offset_px: f32) -> Self {
        Self {
            orientation: GuideOrientation::Vertical,
            offset_px,
            locked: false,
            color: GUIDE_COLOR,
        }
    }
}

/// Read model handed to the viewport for one render/event pass.
#[derive(Debug, Clone)]
pub struct EditorView {
    pub document: Arc<Document>,
    pub current_page_id: Option<PageId>,
    pub current_page_index: usize,
    pub zoom: f32,
    pub layout_mode: LayoutMode,
    pub selection: SelectionSet,
    pub tool: ToolDescriptor,
    pub flags: OverlayFlags,
    pub layers: LayerVisibility,
    pub guides: Vec<Guide>,
    /// False while the document is read-only (e.g. preview); blocks inline editing.
    pub interaction_enabled: bool,
}

impl EditorView {
    /// View positioned on the first page at zoom 1.
    pub fn new(document: Arc<Document>) -> Self {
        let current_page_id = document.pages.first().map(|page| page.id);
        Self {
            document,
            current_page_id,
            current_page_index: 0,
            zoom: 1.0,
            layout_mode: LayoutMode::default(),
            selection: SelectionSet::new(),
            tool: ToolDescriptor::default(),
            flags: OverlayFlags::default(),
            layers: LayerVisibility::default(),
            guides: Vec::new(),
            interaction_enabled: true,
        }
    }

    /// Builder-style layout mode.
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// Builder-style zoom.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Move to the page at `index`, keeping id and index in step.
    pub fn with_current_index(mut self, index: usize) -> Self {
        self.current_page_index = index;
        self.current_page_id = self.document.page_at(index).map(|page| page.id);
        self
    }
}

/// Fire-and-forget requests to the editor-state collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Set the zoom; the store clamps it to the configured range.
    SetZoom(f32),
    /// Make a page current.
    NavigateToPage(PageId),
    /// Replace the whole selection.
    ReplaceSelection(Vec<ElementId>),
    /// Select exactly one element.
    SelectSingle(ElementId),
    /// Deselect everything.
    ClearSelection,
    /// Notification that the user asked to delete these elements.
    DeleteRequested(Vec<ElementId>),
    /// Translate elements by a page-unit delta.
    MoveElements {
        ids: Vec<ElementId>,
        dx: f32,
        dy: f32,
    },
    /// Replace a text run's content after inline editing.
    CommitText { id: ElementId, content: String },
}

/// Receiver for commands emitted by the viewport.
pub trait CommandSink {
    /// Accept one command.
    fn dispatch(&mut self, command: EditorCommand);
}

impl CommandSink for Vec<EditorCommand> {
    fn dispatch(&mut self, command: EditorCommand) {
        self.push(command);
    }
}

/// Reference reducer: apply one command to an editor view.
///
/// Document mutations copy-on-write through `Arc::make_mut`, so every change
/// yields a new document reference and viewport caches rebuild.
pub fn apply_command(view: &mut EditorView, command: EditorCommand, config: &ViewportConfig) {
    match command {
        EditorCommand::SetZoom(zoom) => view.zoom = config.clamp_zoom(zoom),
        EditorCommand::NavigateToPage(page_id) => {
            if let Some(index) = view.document.page_index(page_id) {
                view.current_page_id = Some(page_id);
                view.current_page_index = index;
            }
        }
        EditorCommand::ReplaceSelection(ids) => view.selection.replace(ids),
        EditorCommand::SelectSingle(id) => view.selection = SelectionSet::single(id),
        EditorCommand::ClearSelection => view.selection.clear(),
        EditorCommand::DeleteRequested(ids) => {
            let removed = Arc::make_mut(&mut view.document).remove_elements(&ids);
            for id in &ids {
                view.selection.remove(id);
            }
            log::debug!("deleted {removed} of {} requested elements", ids.len());
        }
        EditorCommand::MoveElements { ids, dx, dy } => {
            let document = Arc::make_mut(&mut view.document);
            for id in ids {
                match document.element_mut(id) {
                    Some(element) if !element.base.locked => element.translate(dx, dy),
                    _ => {}
                }
            }
        }
        EditorCommand::CommitText { id, content } => {
            if let Some(element) = Arc::make_mut(&mut view.document).element_mut(id) {
                if let ElementKind::Text(run) = &mut element.kind {
                    run.content = content;
                }
            }
        }
    }
}
