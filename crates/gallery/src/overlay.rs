//! Project detail overlay: state machine, display view and hit regions.

use engine_core::ProjectRecord;
use glam::Vec2;

pub const UNTITLED_PLACEHOLDER: &str = "Untitled project";
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";
pub const IMAGE_PLACEHOLDER: &str = "placeholder.png";

/// Whether the detail view is showing, and for which record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(ProjectRecord),
}

/// What the overlay shows. Every field is filled; missing record data is
/// replaced by a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: Option<String>,
}

impl OverlayView {
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            title: or_placeholder(&record.title, UNTITLED_PLACEHOLDER),
            description: or_placeholder(&record.description, DESCRIPTION_PLACEHOLDER),
            image: or_placeholder(&record.image, IMAGE_PLACEHOLDER),
            link: record.link().map(str::to_owned),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_owned()
    } else {
        value.to_owned()
    }
}

/// Command for the display collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEffect {
    Display(OverlayView),
    Hide,
}

/// Consumer of overlay effects (a window, a DOM, a test recorder).
pub trait OverlayPresenter {
    /// Show `view` and reveal the overlay.
    fn display(&mut self, view: &OverlayView);
    /// Conceal the overlay.
    fn hide(&mut self);
}

/// Dispatch one effect to a presenter.
pub fn present(presenter: &mut dyn OverlayPresenter, effect: &OverlayEffect) {
    match effect {
        OverlayEffect::Display(view) => presenter.display(view),
        OverlayEffect::Hide => presenter.hide(),
    }
}

/// The overlay state machine. Transitions are the only way to change state.
#[derive(Debug, Default)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    /// A pick landed on `record`. Opens the overlay, or replaces the record
    /// if already open. Records without a title cause no transition.
    pub fn pick(&mut self, record: &ProjectRecord) -> Option<OverlayEffect> {
        if !record.has_title() {
            log::debug!("ignoring pick of untitled record");
            return None;
        }
        self.state = OverlayState::Open(record.clone());
        Some(OverlayEffect::Display(OverlayView::from_record(record)))
    }

    /// Close the overlay. Always yields a hide effect, even when already closed.
    pub fn close(&mut self) -> OverlayEffect {
        self.state = OverlayState::Closed;
        OverlayEffect::Hide
    }
}

/// Part of the viewport a pointer event landed on while the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRegion {
    CloseButton,
    Content,
    Background,
}

/// Screen layout of the open overlay: a centered content panel with a square
/// close affordance in its top-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    /// Content panel size as a fraction of the viewport.
    pub content_fraction: Vec2,
    /// Close button edge in pixels.
    pub close_size: f32,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            content_fraction: Vec2::new(0.6, 0.7),
            close_size: 32.0,
        }
    }
}

impl OverlayLayout {
    /// Content panel as (min, max) corners in pixels.
    pub fn content_rect(&self, viewport: Vec2) -> (Vec2, Vec2) {
        let size = viewport * self.content_fraction.clamp(Vec2::ZERO, Vec2::ONE);
        let min = (viewport - size) * 0.5;
        (min, min + size)
    }

    pub fn hit_test(&self, position: Vec2, viewport: Vec2) -> OverlayRegion {
        let (min, max) = self.content_rect(viewport);
        let inside = |lo: Vec2, hi: Vec2| position.cmpge(lo).all() && position.cmple(hi).all();
        if !inside(min, max) {
            return OverlayRegion::Background;
        }
        let close_min = Vec2::new(max.x - self.close_size, min.y);
        let close_max = Vec2::new(max.x, min.y + self.close_size);
        if inside(close_min, close_max) {
            OverlayRegion::CloseButton
        } else {
            OverlayRegion::Content
        }
    }
}
