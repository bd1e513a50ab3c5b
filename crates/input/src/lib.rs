//! Pointer input: cursor tracking, click/drag separation and viewport mapping.

use glam::Vec2;

/// Default cursor travel (in pixels) past which a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 4.0;

/// Pointer and viewport state for the current window.
#[derive(Debug)]
pub struct PointerState {
    /// Viewport size in physical pixels.
    viewport: Vec2,
    /// Cursor position in window coordinates.
    cursor: Vec2,
    /// Where the primary button went down, while it is held.
    press_origin: Option<Vec2>,
    /// Whether the current press has travelled far enough to be a drag.
    dragging: bool,
    /// Drag movement accumulated since the last `take_drag_delta`.
    drag_delta: Vec2,
    drag_threshold: f32,
}

impl PointerState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Vec2::new(width.max(1) as f32, height.max(1) as f32),
            cursor: Vec2::ZERO,
            press_origin: None,
            dragging: false,
            drag_delta: Vec2::ZERO,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }

    pub fn with_drag_threshold(mut self, pixels: f32) -> Self {
        self.drag_threshold = pixels.max(0.0);
        self
    }

    /// Record a new viewport size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        let next = Vec2::new(position.0 as f32, position.1 as f32);
        if let Some(origin) = self.press_origin {
            self.drag_delta += next - self.cursor;
            if !self.dragging && next.distance(origin) > self.drag_threshold {
                log::trace!("drag started at {:?}", origin);
                self.dragging = true;
            }
        }
        self.cursor = next;
    }

    /// Process a mouse button event. Returns the click position when a
    /// primary press is released without having turned into a drag.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<Vec2> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => {
                self.press_origin = Some(self.cursor);
                self.dragging = false;
                self.drag_delta = Vec2::ZERO;
                None
            }
            ElementState::Released => {
                let was_press = self.press_origin.take().is_some();
                let was_drag = std::mem::take(&mut self.dragging);
                (was_press && !was_drag).then_some(self.cursor)
            }
        }
    }

    /// Drag movement since the last call, zero when no drag is in progress.
    pub fn take_drag_delta(&mut self) -> Vec2 {
        let delta = std::mem::take(&mut self.drag_delta);
        if self.dragging {
            delta
        } else {
            Vec2::ZERO
        }
    }

    /// Get the cursor position in window coordinates.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Is the primary button currently dragging?
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Map a window position to normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn to_ndc(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x / self.viewport.x * 2.0 - 1.0,
            -(position.y / self.viewport.y) * 2.0 + 1.0,
        )
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
