use std::ffi::CString;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Arg, Command};
use egui_glow::Painter;
use glutin::config::ConfigTemplate;
use glutin::context::{ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::Surface;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::window::{Window, WindowId};

use egui_winit::State as EguiState;

mod gui;
use gui::Gui;

mod natural;

mod session;
use session::ViewerSession;

mod sheet;
use sheet::SheetParams;

mod textures;

mod viewport;

struct App {
    window: Option<Window>,
    current_context: Option<PossiblyCurrentContext>,
    surface: Option<Surface<WindowSurface>>,

    gl: Option<Arc<glow::Context>>,

    gui: Option<Gui>,
    session: Option<ViewerSession>,

    egui_context: Option<egui::Context>,
    egui_painter: Option<Painter>,
    egui_state: Option<EguiState>,

    initial_file: Option<PathBuf>,
    initial_params: SheetParams,
}

impl App {
    fn new(initial_file: Option<PathBuf>, initial_params: SheetParams) -> Self {
        Self {
            window: None,
            current_context: None,
            surface: None,
            gl: None,
            gui: None,
            session: None,
            egui_context: None,
            egui_painter: None,
            egui_state: None,
            initial_file,
            initial_params,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Create a new window and store it in self.window
        self.window = Some(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Sprite Sheet Viewer")
                        .with_inner_size(LogicalSize::new(800.0, 600.0)),
                )
                .expect("Failed to create window"),
        );

        let window = self.window.as_ref().unwrap();

        // Get platform-specific handles to the display and window
        let display_handle = window.display_handle().unwrap();
        let window_handle = window.window_handle().unwrap();

        #[cfg(target_os = "windows")]
        let api_preference = DisplayApiPreference::Wgl(Some(window_handle.into()));
        #[cfg(target_os = "macos")]
        let api_preference = DisplayApiPreference::Cgl;
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        let api_preference = DisplayApiPreference::Egl;

        let display = unsafe {
            Display::new(display_handle.into(), api_preference)
                .expect("Failed to create GL display")
        };

        // Create a default OpenGL configuration
        let config_template = ConfigTemplate::default();
        let config = unsafe {
            display
                .find_configs(config_template)
                .unwrap()
                .next()
                .unwrap()
        };

        // Get the window dimensions
        let physical_size = window.inner_size();
        let width = NonZeroU32::new(physical_size.width).unwrap();
        let height = NonZeroU32::new(physical_size.height).unwrap();

        // Create attributes for the window surface
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::build(
            SurfaceAttributesBuilder::new(),
            window_handle.into(),
            width,
            height,
        );

        // Create context attributes (e.g., OpenGL version, flags)
        let context_attributes = ContextAttributesBuilder::new().build(Some(window_handle.into()));

        // Create the OpenGL window surface using the display and attributes
        let surface = unsafe {
            display
                .create_window_surface(&config, &surface_attributes)
                .unwrap()
        };

        // Create a non current OpenGL context
        let non_current_context = unsafe {
            display
                .create_context(&config, &context_attributes)
                .unwrap()
        };

        // Make the context current
        let current_context = non_current_context.make_current(&surface).unwrap();

        // Create the glow context
        let gl = unsafe {
            Arc::new(glow::Context::from_loader_function(|s| {
                let c_str = CString::new(s).unwrap();
                display.get_proc_address(&c_str) as *const _
            }))
        };

        self.surface = Some(surface);
        self.current_context = Some(current_context);
        self.gl = Some(gl);

        self.gui = Some(Gui::new());
        self.session = Some(ViewerSession::new(
            self.initial_params,
            self.initial_file.take(),
        ));

        self.egui_context = Some(egui::Context::default());
        self.egui_painter = Some(
            Painter::new(self.gl.as_ref().unwrap().clone(), "", None, false)
                .expect("Failed to create egui_glow painter"),
        );
        self.egui_state = Some(EguiState::new(
            self.egui_context.as_ref().unwrap().clone(),
            self.egui_context.as_ref().unwrap().viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        ));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let window = self.window.as_ref().unwrap();

        // give egui any winit events
        _ = self
            .egui_state
            .as_mut()
            .unwrap()
            .on_window_event(window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let (Some(w), Some(h)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    self.surface
                        .as_ref()
                        .unwrap()
                        .resize(self.current_context.as_ref().unwrap(), w, h);
                }
            }
            WindowEvent::RedrawRequested => {
                // Clear the framebuffer
                self.gui.as_ref().unwrap().clear(self.gl.as_ref().unwrap());

                // Run the UI code, including any pending sheet reload
                let raw_input = self.egui_state.as_mut().unwrap().take_egui_input(window);
                let full_output = self.gui.as_mut().unwrap().update(
                    raw_input,
                    self.egui_context.as_ref().unwrap(),
                    self.gl.as_ref().unwrap(),
                    self.egui_painter.as_mut().unwrap(),
                    self.session.as_mut().unwrap(),
                );

                // Handle the platform output (like copy/paste)
                self.egui_state
                    .as_mut()
                    .unwrap()
                    .handle_platform_output(window, full_output.platform_output);

                // Get the triangles from egui's UI
                let clipped_primitives = self
                    .egui_context
                    .as_ref()
                    .unwrap()
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                // Paint the egui UI
                let physical_size = window.inner_size();
                self.egui_painter
                    .as_mut()
                    .unwrap()
                    .paint_and_update_textures(
                        [physical_size.width, physical_size.height],
                        full_output.pixels_per_point,
                        &clipped_primitives,
                        &full_output.textures_delta,
                    );

                // Swap the frame buffers
                self.surface
                    .as_ref()
                    .unwrap()
                    .swap_buffers(self.current_context.as_ref().unwrap())
                    .unwrap();

                window.request_redraw();
            }
            _ => (),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(painter) = self.egui_painter.as_mut() {
            painter.destroy();
        }
    }
}

fn parse_cli() -> (Option<PathBuf>, SheetParams) {
    let matches = Command::new("spritesheet-viewer")
        .about("View a sprite sheet image as a grid of named sprites")
        .arg(
            Arg::new("sheet")
                .value_name("FILE")
                .help("Sprite sheet image to open on startup"),
        )
        .arg(
            Arg::new("grid-size")
                .long("grid-size")
                .value_name("PX")
                .value_parser(clap::value_parser!(i32))
                .default_value("16")
                .help("Cell side length in pixels (1-64)"),
        )
        .arg(
            Arg::new("margin")
                .long("margin")
                .value_name("PX")
                .value_parser(clap::value_parser!(i32))
                .default_value("1")
                .help("Gap between cells in pixels (0-10)"),
        )
        .get_matches();

    let file = matches.get_one::<String>("sheet").map(PathBuf::from);
    let params = SheetParams::new(
        *matches.get_one::<i32>("margin").unwrap(),
        *matches.get_one::<i32>("grid-size").unwrap(),
    );

    (file, params)
}

fn main() {
    env_logger::init();

    let (initial_file, initial_params) = parse_cli();

    let event_loop = EventLoop::new().unwrap();

    // ControlFlow::Wait pauses the event loop if no events are available to process.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(initial_file, initial_params);

    event_loop.run_app(&mut app).unwrap();
}
