//! Overlay presenter for the desktop viewer.
//!
//! There is no UI toolkit in this binary, so the open project is shown in the
//! window title and its details go to the log.

use gallery::overlay::{OverlayPresenter, OverlayView};
use std::sync::Arc;
use winit::window::Window;

pub struct WindowTitlePresenter {
    window: Arc<Window>,
    base_title: String,
}

impl WindowTitlePresenter {
    pub fn new(window: Arc<Window>, base_title: impl Into<String>) -> Self {
        Self {
            window,
            base_title: base_title.into(),
        }
    }
}

impl OverlayPresenter for WindowTitlePresenter {
    fn display(&mut self, view: &OverlayView) {
        self.window.set_title(&format!("{} | {}", self.base_title, view.title));
        log::info!("{}: {}", view.title, view.description);
        log::info!("  image: {}", view.image);
        if let Some(link) = &view.link {
            log::info!("  link: {}", link);
        }
    }

    fn hide(&mut self) {
        self.window.set_title(&self.base_title);
    }
}
