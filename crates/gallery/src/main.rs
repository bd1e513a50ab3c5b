//! Desktop viewer for the project gallery.

mod events;
mod presenter;

use anyhow::Result;
use engine_core::SessionClock;
use gallery::{FileSource, GalleryConfig, MetadataTask, Session};
use presenter::WindowTitlePresenter;
use renderer::HeadlessBackend;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

const TITLE: &str = "Project Gallery";

/// Frames between frame-rate log lines.
const FPS_LOG_INTERVAL: u64 = 300;

/// A running window with its session.
pub(crate) struct Viewer {
    window: Arc<Window>,
    session: Session<HeadlessBackend, WindowTitlePresenter>,
    clock: SessionClock,
    running: bool,
}

impl Viewer {
    fn new(window: Arc<Window>, config: &GalleryConfig) -> Self {
        let presenter = WindowTitlePresenter::new(window.clone(), TITLE);
        let mut session = Session::new(config, HeadlessBackend::new(), Some(presenter));
        session.start_fetch(MetadataTask::spawn(FileSource::new(config.metadata_path.clone())));
        let size = window.inner_size();
        session.resize(size.width, size.height);
        Self {
            window,
            session,
            clock: SessionClock::new().with_max_delta(Duration::from_millis(config.max_frame_delta_ms)),
            running: true,
        }
    }

    fn frame(&mut self) {
        self.clock.update();
        self.session.frame(self.clock.elapsed_seconds());
        if self.clock.frame_count() % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps", self.clock.fps());
        }
        self.window.request_redraw();
    }
}

/// Application handler for winit.
struct App {
    viewer: Option<Viewer>,
}

impl App {
    fn new() -> Self {
        Self { viewer: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_none() {
            let config = GalleryConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title(TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let viewer = Viewer::new(window.clone(), &config);
            self.viewer = Some(viewer);
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(viewer) = &mut self.viewer {
            if viewer.handle_window_event(event) || !viewer.running {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting project gallery");
    log::info!("Click a billboard to open its project, Escape to close, drag to orbit");

    let event_loop = EventLoop::new()?;
    // Frames are driven by RedrawRequested; each frame requests the next.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
