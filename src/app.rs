use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use crate::error::RendererError;
use crate::pose::{AnimationDriver, PoseBuilder};
use crate::renderer::Renderer;
use crate::ui::Ui;

pub struct App {
    pub window: Arc<Window>,
    ui: Ui,
    renderer: Renderer,
    driver: AnimationDriver,
    builder: PoseBuilder,
    started: Instant,
    last_frame: Option<Instant>,
    frame_ms: f32,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    egui_state: egui_winit::State,
}

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

impl App {
    pub async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let ui = Ui::new();
        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = renderer.egui_context();
        let egui_state = egui_winit::State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &*window,
            None,
            None,
            None,
        );

        Ok(Self {
            window,
            ui,
            renderer,
            driver: AnimationDriver::new(),
            builder: PoseBuilder::new(),
            started: Instant::now(),
            last_frame: None,
            frame_ms: 0.0,
            mouse_pressed: false,
            last_mouse_pos: None,
            egui_state,
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        // Let egui claim the event first.
        let egui_response = self.egui_state.on_window_event(&self.window, event);
        if egui_response.consumed {
            return EventResponse {
                repaint: egui_response.repaint,
                exit: false,
            };
        }

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            winit::event::WindowEvent::MouseInput { state, button, .. } => {
                if *button == winit::event::MouseButton::Left {
                    self.mouse_pressed = *state == winit::event::ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            winit::event::WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some(last_pos) = self.last_mouse_pos {
                        let delta_x = position.x - last_pos.0;
                        let delta_y = position.y - last_pos.1;
                        self.renderer.rotate_camera(delta_x as f32, delta_y as f32);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            winit::event::WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => *y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.renderer.zoom_camera(scroll_delta);
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    /// One tick: clock -> animation driver -> pose builder -> renderer,
    /// with the egui pass layered on top. UI input written this frame is
    /// applied to the driver synchronously and posed on the same pass.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        if let Some(last) = self.last_frame {
            self.frame_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        }
        self.last_frame = Some(now);

        let elapsed = now.duration_since(self.started).as_secs_f32();
        self.driver.tick(elapsed);

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut reset_camera = false;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            let response = self.ui.show(ctx, &mut self.driver, self.frame_ms);
            reset_camera = response.reset_camera;
        });

        if reset_camera {
            self.renderer.reset_camera();
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);
        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.window.inner_size().width,
                self.window.inner_size().height,
            ],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let params = self.driver.params();
        let primitives = self.builder.build(params);

        self.renderer.render(
            primitives,
            params.global_yaw,
            self.ui.settings.background_color,
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }
}
