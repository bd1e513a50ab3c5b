//! Window event handling for the viewer.

use winit::event::WindowEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

impl crate::Viewer {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.session.resize(size.width, size.height);
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.session.pointer_moved(position.x, position.y);
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.session.pointer_button(button, state);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && event.state.is_pressed()
                    && !event.repeat
                {
                    self.session.close();
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                false
            }
            _ => false,
        }
    }
}
