use std::num::NonZeroU32;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};
use softbuffer::{Context, Surface};

use crate::ui::render::Frame;
use crate::ui::state::{Canvas, InputEvent, ViewerState};

pub mod render;
pub mod state;

/// Translate a pressed key into a viewer action.
pub fn map_key(key: &Key) -> Option<InputEvent> {
    match key {
        Key::Named(NamedKey::ArrowRight) => Some(InputEvent::Next),
        Key::Named(NamedKey::ArrowLeft) => Some(InputEvent::Previous),
        Key::Named(NamedKey::Escape) => Some(InputEvent::Quit),
        Key::Character(s) => match s.as_str() {
            "l" | "L" => Some(InputEvent::Next),
            "h" | "H" => Some(InputEvent::Previous),
            "i" | "I" => Some(InputEvent::ToggleInfo),
            "?" => Some(InputEvent::ToggleHelp),
            "q" | "Q" => Some(InputEvent::Quit),
            _ => None,
        },
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

pub struct App {
    pub state: ViewerState<Canvas>,
    pub title: String,
    pub size: LogicalSize<u32>,
    pub window: Option<Arc<Window>>,
    pub context: Option<Context<Arc<Window>>>,
    pub surface: Option<Surface<Arc<Window>, Arc<Window>>>,
}

impl App {
    pub fn new(state: ViewerState<Canvas>, title: String, width: u32, height: u32) -> Self {
        Self {
            state,
            title,
            size: LogicalSize::new(width, height),
            window: None,
            context: None,
            surface: None,
        }
    }

    fn refresh(&self) {
        if let Some(ref window) = self.window {
            window.set_title(&self.state.title(&self.title));
            window.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(surface)) = (self.window.as_ref(), self.surface.as_mut()) else {
            return;
        };
        let PhysicalSize { width, height } = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        if let Err(e) = surface.resize(w, h) {
            log::error!("Failed to resize surface: {}", e);
            return;
        }
        match surface.buffer_mut() {
            Ok(mut buffer) => {
                let mut frame = Frame::new(&mut buffer, width, height);
                self.state.render(&mut frame);
                if let Err(e) = buffer.present() {
                    log::error!("Failed to present frame: {}", e);
                }
            }
            Err(e) => log::error!("Failed to map surface buffer: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(self.state.title(&self.title))
            .with_inner_size(self.size);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let surface = Context::new(Arc::clone(&window)).and_then(|context| {
            let surface = Surface::new(&context, Arc::clone(&window))?;
            Ok((context, surface))
        });
        match surface {
            Ok((context, surface)) => {
                self.context = Some(context);
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("Failed to create drawing surface: {}", e);
                event_loop.exit();
                return;
            }
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        window.request_redraw();
        self.window = Some(window);
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

            WindowEvent::Resized(_) => {
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let Some(input) = map_key(&event.logical_key) else {
                    return;
                };
                if self.state.handle(input) {
                    event_loop.exit();
                    return;
                }
                self.refresh();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_vi_keys_navigate() {
        assert_eq!(map_key(&Key::Named(NamedKey::ArrowRight)), Some(InputEvent::Next));
        assert_eq!(map_key(&Key::Named(NamedKey::ArrowLeft)), Some(InputEvent::Previous));
        assert_eq!(map_key(&Key::Character("l".into())), Some(InputEvent::Next));
        assert_eq!(map_key(&Key::Character("h".into())), Some(InputEvent::Previous));
    }

    #[test]
    fn other_keys() {
        assert_eq!(map_key(&Key::Named(NamedKey::Escape)), Some(InputEvent::Quit));
        assert_eq!(map_key(&Key::Character("q".into())), Some(InputEvent::Quit));
        assert_eq!(map_key(&Key::Character("i".into())), Some(InputEvent::ToggleInfo));
        assert_eq!(map_key(&Key::Character("?".into())), Some(InputEvent::ToggleHelp));
        assert_eq!(map_key(&Key::Named(NamedKey::ArrowUp)), None);
        assert_eq!(map_key(&Key::Character("x".into())), None);
    }
}
