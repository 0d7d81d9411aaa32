mod app;
mod config;
mod editor;
mod font;
mod graphics;
mod grid;
mod input;
mod layout;
mod material;
mod palette_panel;
mod scheduler;
mod start_screen;

use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::app::App;
use crate::config::EditorConfig;
use crate::font::FontRenderer;
use crate::graphics::Renderer;
use crate::input::{InputAction, InputHandler};
use crate::scheduler::RedrawScheduler;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = EditorConfig::load()?;

    match FontRenderer::discover(config.font_path.as_deref()) {
        Ok(renderer) => font::install(renderer),
        Err(err) => log::warn!("Text will not be drawn: {}", err),
    }

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Tile Map Editor")
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
        .with_min_inner_size(LogicalSize::new(480, 320))
        .with_resizable(true)
        .build(&event_loop)?;

    let size = window.inner_size();
    log::info!("Window created at {}x{}", size.width, size.height);

    let mut renderer = Renderer::new(&window, size.width, size.height)?;
    let mut scheduler = RedrawScheduler::new(config.redraw_interval(), Instant::now());
    let mut app = App::new(config, size.width, size.height);
    let mut input_handler = InputHandler::new();

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::NewEvents(StartCause::Init) => {
                *control_flow = ControlFlow::WaitUntil(scheduler.deadline());
            }
            Event::WindowEvent { event, .. } => {
                let action = match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                        InputAction::None
                    }
                    WindowEvent::Resized(size) => {
                        if size.width > 0 && size.height > 0 {
                            renderer.resize(size.width, size.height);
                            app.resize(size.width, size.height);
                        }
                        InputAction::None
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        let size = *new_inner_size;
                        if size.width > 0 && size.height > 0 {
                            renderer.resize(size.width, size.height);
                            app.resize(size.width, size.height);
                        }
                        InputAction::None
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input_handler.handle_cursor_moved(position.x, position.y)
                    }
                    WindowEvent::CursorLeft { .. } => input_handler.handle_cursor_left(),
                    WindowEvent::MouseInput { state, button, .. } => {
                        input_handler.handle_mouse_button(button, state)
                    }
                    WindowEvent::MouseWheel { delta, .. } => input_handler.handle_mouse_wheel(delta),
                    WindowEvent::ReceivedCharacter(ch) => input_handler.handle_received_character(ch),
                    WindowEvent::KeyboardInput { input, .. } => input_handler.handle_keyboard_input(&input),
                    _ => InputAction::None,
                };
                app.handle(action);
            }
            Event::RedrawRequested(_) => {
                // Exposed or damaged by the compositor.
                app.mark_dirty();
            }
            Event::MainEventsCleared => {
                if *control_flow == ControlFlow::Exit {
                    return;
                }

                let now = Instant::now();
                let mut present_failed = false;
                let painted = scheduler.tick(now, app.needs_redraw(), || {
                    renderer.render(&app);
                    if let Err(err) = renderer.present() {
                        log::error!("Render error: {}", err);
                        present_failed = true;
                    }
                });
                if painted {
                    app.clear_dirty();
                }

                *control_flow = if present_failed {
                    ControlFlow::Exit
                } else {
                    ControlFlow::WaitUntil(scheduler.deadline())
                };
            }
            _ => {}
        }
    });
}
