//! The frame loop and pointer routing for one viewing session.

use crate::config::GalleryConfig;
use crate::metadata::{FetchStatus, MetadataTask};
use crate::overlay::{present, OverlayEffect, OverlayLayout, OverlayPresenter, OverlayRegion};
use crate::scene::SceneContext;
use engine_core::Entity;
use glam::Vec2;
use input::{ElementState, MouseButton, PointerState};
use renderer::RenderBackend;

/// One running scene: context, collaborators and the pending metadata fetch.
pub struct Session<B: RenderBackend, P: OverlayPresenter> {
    ctx: SceneContext,
    backend: B,
    /// `None` when the overlay element could not be bound; picking is then
    /// not wired up but the scene keeps rendering.
    presenter: Option<P>,
    pointer: PointerState,
    layout: OverlayLayout,
    modal_overlay: bool,
    fetch: Option<MetadataTask>,
    render_failing: bool,
}

impl<B: RenderBackend, P: OverlayPresenter> Session<B, P> {
    pub fn new(config: &GalleryConfig, mut backend: B, presenter: Option<P>) -> Self {
        let ctx = SceneContext::build(config, &mut backend);
        if presenter.is_none() {
            log::error!("overlay display is unavailable; project billboards will not respond to clicks");
        }
        Self {
            ctx,
            backend,
            presenter,
            pointer: PointerState::new(config.window_width, config.window_height)
                .with_drag_threshold(config.drag_threshold),
            layout: OverlayLayout::default(),
            modal_overlay: config.modal_overlay,
            fetch: None,
            render_failing: false,
        }
    }

    /// Hand over the one metadata fetch of this session.
    pub fn start_fetch(&mut self, task: MetadataTask) {
        if self.fetch.is_some() {
            log::warn!("metadata fetch already pending; ignoring second request");
            return;
        }
        self.fetch = Some(task);
    }

    /// One tick: apply a finished fetch, move the focal object and camera for
    /// `elapsed` seconds since session start, then render.
    pub fn frame(&mut self, elapsed: f32) {
        self.apply_pending_batch();

        let drag = self.pointer.take_drag_delta();
        if drag != Vec2::ZERO && !self.ctx.overlay.is_open() {
            self.ctx.motion.drag(drag);
        }

        self.ctx.advance(elapsed, &mut self.backend);

        match self.backend.render_frame() {
            Ok(()) => {
                if self.render_failing {
                    log::info!("rendering recovered");
                    self.render_failing = false;
                }
            }
            Err(e) => {
                if !self.render_failing {
                    log::error!("render failed: {}", e);
                    self.render_failing = true;
                }
            }
        }
    }

    fn apply_pending_batch(&mut self) {
        let Some(task) = &self.fetch else {
            return;
        };
        let result = match task.poll() {
            FetchStatus::Pending => return,
            FetchStatus::Ready(result) => result,
        };
        self.fetch = None;
        match result {
            Ok(records) => {
                let added = self.ctx.apply_projects(records, &mut self.backend);
                log::info!("{} project billboards placed", added);
            }
            Err(e) => log::warn!("project metadata unavailable, continuing without billboards: {}", e),
        }
    }

    /// Cursor moved, window coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.process_cursor_position((x, y));
    }

    /// Mouse button changed. A completed click is routed immediately.
    pub fn pointer_button(&mut self, button: MouseButton, state: ElementState) {
        if let Some(position) = self.pointer.process_mouse_button(button, state) {
            self.click(position);
        }
    }

    /// Route one click at a window position.
    pub fn click(&mut self, position: Vec2) {
        if self.presenter.is_none() {
            return;
        }
        if self.ctx.overlay.is_open() {
            match self.layout.hit_test(position, self.pointer.viewport()) {
                OverlayRegion::CloseButton => {
                    self.close();
                    return;
                }
                OverlayRegion::Content => return,
                OverlayRegion::Background if self.modal_overlay => {
                    self.close();
                    return;
                }
                OverlayRegion::Background => {}
            }
        }
        let ndc = self.pointer.to_ndc(position);
        self.pick(ndc);
    }

    /// Pick at a pointer position in NDC and open the overlay on a hit.
    /// Untitled billboards are passed over, so a titled one behind them
    /// still opens.
    pub fn pick(&mut self, ndc: Vec2) -> Option<Entity> {
        let registry = &self.ctx.registry;
        let hit = picking::pick(ndc, &self.ctx.camera, registry.pickable_candidates(), |entity| {
            registry.has_titled_record(*entity)
        })?;
        log::debug!("pick hit {:?} at distance {:.2}", hit.key, hit.distance);
        let record = self.ctx.registry.record(hit.key)?;
        if let Some(effect) = self.ctx.overlay.pick(&record) {
            log::info!("opening project {:?}", record.title);
            self.emit(&effect);
        }
        Some(hit.key)
    }

    /// Explicit close command (close affordance, Escape, background click).
    pub fn close(&mut self) {
        if self.ctx.overlay.is_open() {
            log::info!("closing project overlay");
        } else {
            log::debug!("close requested with overlay already closed");
        }
        let effect = self.ctx.overlay.close();
        self.emit(&effect);
    }

    fn emit(&mut self, effect: &OverlayEffect) {
        if let Some(presenter) = self.presenter.as_mut() {
            present(presenter, effect);
        }
    }

    /// Viewport changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pointer.set_viewport(width, height);
        self.ctx.resize(width, height, &mut self.backend);
    }

    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn presenter(&self) -> Option<&P> {
        self.presenter.as_ref()
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.fetch.is_some()
    }
}
