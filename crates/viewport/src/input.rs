//! Input events.
//!
//! Host-neutral pointer, wheel and keyboard events. Hosts translate their native
//! events (DOM, winit, ...) into these before handing them to the viewport.
//! Positions are screen pixels relative to the viewport's top-left corner;
//! timestamps are monotonic and only compared with each other.

use pdf_editor_core::Point;
use std::time::Duration;

/// Mouse / pen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift only.
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    /// Ctrl only.
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Press, release, move or double-click of a pointer button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub timestamp: Duration,
}

impl PointerEvent {
    /// Create an unmodified event at time zero.
    pub fn new(x: f32, y: f32, button: PointerButton) -> Self {
        Self {
            position: Point::new(x, y),
            button,
            modifiers: Modifiers::NONE,
            timestamp: Duration::ZERO,
        }
    }

    /// Create an unmodified primary-button event.
    pub fn primary(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Primary)
    }

    /// Builder-style modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Builder-style timestamp in milliseconds.
    pub fn at_ms(mut self, millis: u64) -> Self {
        self.timestamp = Duration::from_millis(millis);
        self
    }
}

/// Wheel / trackpad scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    /// Horizontal scroll in pixels; positive scrolls right.
    pub delta_x: f32,
    /// Vertical scroll in pixels; positive scrolls down.
    pub delta_y: f32,
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Create an unmodified vertical scroll.
    pub fn new(x: f32, y: f32, delta_y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            delta_x: 0.0,
            delta_y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Builder-style modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the viewport reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character.
    Char(char),
    Enter,
    Escape,
    Delete,
    Backspace,
    PageUp,
    PageDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

/// Key press with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create an unmodified key press.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Builder-style modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Command chords belong to the host and never type into a draft.
    pub fn is_chord(&self) -> bool {
        self.modifiers.command()
    }
}

/// Everything the interaction controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    DoubleClick(PointerEvent),
    Wheel(WheelEvent),
    Key(KeyEvent),
    /// The inline editor lost focus.
    Blur,
}

impl InputEvent {
    /// Pointer moves are the only events subject to rate limiting.
    pub fn is_throttleable(&self) -> bool {
        matches!(self, InputEvent::PointerMove(_))
    }

    /// Host timestamp, for events that carry one.
    pub fn timestamp(&self) -> Option<Duration> {
        match self {
            InputEvent::PointerDown(pointer)
            | InputEvent::PointerMove(pointer)
            | InputEvent::PointerUp(pointer)
            | InputEvent::DoubleClick(pointer) => Some(pointer.timestamp),
            InputEvent::Wheel(_) | InputEvent::Key(_) | InputEvent::Blur => None,
        }
    }
}
