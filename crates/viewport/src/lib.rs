//! PDF Editor viewport.
//!
//! Layout, page rendering, overlays and pointer/keyboard interaction for the
//! editor's page surface. Output is retained render trees and drawing
//! instruction lists; the host paints them.

pub mod controller;
pub mod input;
pub mod layout;
pub mod overlay;
pub mod page_renderer;
pub mod scene;
pub mod theme;
pub mod throttle;
pub mod viewport;

pub use controller::{EventContext, EventOutcome, InteractionController, InteractionState};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, PointerButton, PointerEvent, WheelEvent};
pub use layout::{arrange, Arrangement, LayoutInput, PlacedPage, Slot};
pub use overlay::{DrawOp, OverlayRenderer, OverlaySurfaces, RecordingSurface, Surface};
pub use page_renderer::{render_page, DragPreview, ElementNode, PageNode, RenderContext};
pub use scene::{Primitive, Stroke};
pub use theme::Theme;
pub use throttle::PointerThrottle;
pub use viewport::{DocumentStatus, EditorViewport, Frame, FrameBody, FrameSlot};
