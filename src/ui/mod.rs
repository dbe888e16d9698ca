use std::num::NonZeroU32;
use std::sync::Arc;
use softbuffer::Surface;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::monitor::MonitorHandle;
use winit::window::{Window, WindowId};

use crate::error::ViewerError;
use crate::fit::available_area;
use crate::ui::state::{action_for_key, Action, Outcome, ViewerState};

pub mod render;
pub mod state;

/// Monitor size assumed when the platform reports no monitors.
const FALLBACK_MONITOR: (u32, u32) = (1920, 1080);

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

pub struct App {
    pub state: ViewerState,
    pub window: Option<Arc<Window>>,
    pub context: Option<softbuffer::Context<Arc<Window>>>,
    pub surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    /// Set when the session ended on an unrecoverable error.
    pub error: Option<ViewerError>,
}

impl App {
    pub fn new(state: ViewerState) -> Self {
        Self {
            state,
            window: None,
            context: None,
            surface: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let (mon_w, mon_h) = monitor
            .as_ref()
            .map(|m| (m.size().width, m.size().height))
            .unwrap_or(FALLBACK_MONITOR);
        let area = available_area(mon_w, mon_h);
        log::info!("Monitor {}x{}, usable area {}x{}", mon_w, mon_h, area.0, area.1);

        self.state.show_initial(area)?;
        let (w, h) = self.state.frame_size().unwrap_or(area);

        let mut attrs = Window::default_attributes()
            .with_title(self.state.title.clone())
            .with_inner_size(PhysicalSize::new(w, h))
            .with_resizable(false);
        if let Some(pos) = monitor.as_ref().map(|m| centered(m, w, h)) {
            attrs = attrs.with_position(pos);
        }

        let window = Arc::new(event_loop.create_window(attrs).map_err(ViewerError::window)?);
        let context = softbuffer::Context::new(Arc::clone(&window)).map_err(ViewerError::window)?;
        let mut surface = Surface::new(&context, Arc::clone(&window)).map_err(ViewerError::window)?;
        resize_surface(&mut surface, w, h)?;

        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }

    /// Push the session's current title and frame size to the window.
    fn redisplay(&mut self) {
        let Some(ref window) = self.window else { return };
        window.set_title(&self.state.title);
        if let Some((w, h)) = self.state.frame_size() {
            if let Some(size) = window.request_inner_size(PhysicalSize::new(w, h)) {
                if let Some(ref mut surface) = self.surface {
                    if let Err(e) = resize_surface(surface, size.width, size.height) {
                        log::warn!("{}", e);
                    }
                }
            }
        }
        window.request_redraw();
    }

    fn move_window_by(&self, dx: i32, dy: i32) {
        let Some(ref window) = self.window else { return };
        if let Ok(pos) = window.outer_position() {
            window.set_outer_position(PhysicalPosition::new(pos.x + dx, pos.y + dy));
        }
    }
}

fn centered(monitor: &MonitorHandle, w: u32, h: u32) -> PhysicalPosition<i32> {
    let origin = monitor.position();
    let size = monitor.size();
    PhysicalPosition::new(
        origin.x + (size.width as i32 - w as i32) / 2,
        origin.y + (size.height as i32 - h as i32) / 2,
    )
}

fn resize_surface(
    surface: &mut Surface<Arc<Window>, Arc<Window>>,
    width: u32,
    height: u32,
) -> Result<(), ViewerError> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width.max(1)), NonZeroU32::new(height.max(1))) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(ViewerError::window)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(ref mut surface) = self.surface {
                    if let Err(e) = resize_surface(surface, width, height) {
                        log::warn!("{}", e);
                    }
                }
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let Some(action) = action_for_key(&event.logical_key) else {
                    return;
                };
                // Holding Delete must not wipe the directory.
                if event.repeat && matches!(action, Action::Delete | Action::Quit) {
                    return;
                }
                match self.state.apply(action) {
                    Outcome::Quit => event_loop.exit(),
                    Outcome::Redisplay => self.redisplay(),
                    Outcome::Unchanged => {}
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if button != MouseButton::Left {
                    return;
                }
                if state == ElementState::Pressed {
                    let Some(ref window) = self.window else { return };
                    // Without window positions (Wayland) the compositor moves the window.
                    if window.outer_position().is_ok() {
                        self.state.drag.begin(self.state.mouse_pos);
                    } else if let Err(e) = window.drag_window() {
                        log::debug!("drag_window unavailable: {}", e);
                    }
                } else {
                    self.state.drag.end();
                }
            }

            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                self.state.mouse_pos = (x, y);
                if let Some((dx, dy)) = self.state.drag.motion((x, y)) {
                    self.move_window_by(dx, dy);
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(surface)) = (self.window.as_ref(), self.surface.as_mut()) else {
                    return;
                };
                let size = window.inner_size();
                let fb_w = size.width.max(1);
                let fb_h = size.height.max(1);
                if let Err(e) = resize_surface(surface, fb_w, fb_h) {
                    log::warn!("{}", e);
                    return;
                }
                match surface.buffer_mut() {
                    Ok(mut buffer) => {
                        match self.state.frame {
                            Some(ref frame) => render::draw_frame(&mut buffer, fb_w, fb_h, &frame.pixels),
                            None => buffer.fill(0),
                        }
                        if let Err(e) = buffer.present() {
                            log::warn!("present failed: {}", e);
                        }
                    }
                    Err(e) => log::warn!("no framebuffer: {}", e),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
