//! Anxious entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use anxious::Settings;
    use anxious::consts::*;
    use anxious::renderer::{RenderState, VertexCanvas, draw_frame};
    use anxious::sim::{Phase, SceneState, TickInput, tick};

    /// Animation instance holding all state
    struct Scene {
        state: SceneState,
        render_state: Option<RenderState>,
        canvas: VertexCanvas,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        last_phase: Phase,
    }

    impl Scene {
        fn new(seed: u64, bounds: Vec2, settings: Settings) -> Self {
            Self {
                state: SceneState::new(seed, bounds),
                render_state: None,
                canvas: VertexCanvas::new(bounds, settings.ellipse_segments(), settings.stroke_scale),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_phase: Phase::Idle,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= FRAME_DT;
                substeps += 1;

                // Clicks are one-shot
                self.input.click = None;
            }

            if self.state.phase != self.last_phase {
                log::debug!("{:?} -> {:?}", self.last_phase, self.state.phase);
                self.last_phase = self.state.phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            self.canvas.begin(self.state.bounds);
            draw_frame(&self.state, &self.settings, &mut self.canvas);

            match render_state.render(self.canvas.vertices(), self.canvas.clear_color()) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    let logical = render_state.logical_size;
                    render_state.resize(w, h, logical);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
            let (width, height, logical) = canvas_size(canvas, dpr);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, (logical.x, logical.y));
            }
            self.state.resize(logical);
        }
    }

    /// Physical pixel size plus the CSS size the scene draws in
    fn canvas_size(canvas: &HtmlCanvasElement, dpr: f64) -> (u32, u32, Vec2) {
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (width, height, Vec2::new(client_w as f32, client_h as f32))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Anxious starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let (width, height, logical) = canvas_size(&canvas, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        log::info!("Quality preset: {}", settings.quality.as_str());

        let seed = js_sys::Date::now() as u64;
        let scene = Rc::new(RefCell::new(Scene::new(seed, logical, settings)));
        log::info!("Scene initialized with seed: {}", seed);

        // WebGPU first, WebGL2 as a fallback
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, (logical.x, logical.y))
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        scene.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, scene.clone());
        setup_resize_handler(&window, &canvas, scene.clone());

        request_animation_frame(scene);

        log::info!("Anxious running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, scene: Rc<RefCell<Scene>>) {
        // Pointer position for button hover
        {
            let scene = scene.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                scene.borrow_mut().input.pointer = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click starts the sequence when it lands on the button
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let mut s = scene.borrow_mut();
                s.input.pointer = Some(pos);
                s.input.click = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        scene: Rc<RefCell<Scene>>,
    ) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            scene.borrow_mut().resize(&canvas, dpr);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(scene: Rc<RefCell<Scene>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(scene, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(scene: Rc<RefCell<Scene>>, time: f64) {
        {
            let mut s = scene.borrow_mut();

            let dt = if s.last_time > 0.0 {
                ((time - s.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            s.last_time = time;

            s.update(dt);
            s.render();
        }

        request_animation_frame(scene);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_scene::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Anxious (native) starting...");
    log::info!("Native mode runs a headless preview; build for wasm32 for the animated version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => anxious::Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            std::process::exit(1);
        }
        None => 42,
    };

    preview(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<anxious::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(anxious::Tuning::from_json(&json)?)
}

/// Click the button and run one full cycle, painting every frame off-screen
#[cfg(not(target_arch = "wasm32"))]
fn preview(seed: u64, tuning: anxious::Tuning) {
    use anxious::Settings;
    use anxious::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use anxious::renderer::{RecordingCanvas, draw_frame};
    use anxious::sim::{Phase, SceneState, TickInput, start_button_center, tick};
    use glam::Vec2;

    // Generous upper bound on one cycle, in case a tuning never settles
    const MAX_TICKS: u64 = 100_000;

    let bounds = Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let settings = Settings::default();
    let mut state = match SceneState::with_tuning(seed, bounds, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return;
        }
    };
    let mut canvas = RecordingCanvas::new(bounds);
    log::info!("Seed {}, {} stages", seed, state.tuning.max_stage);

    let click = TickInput {
        click: Some(start_button_center(bounds)),
        ..Default::default()
    };
    tick(&mut state, &click);

    let mut last_phase = state.phase;
    let mut peak_marks = 0;
    let mut peak_commands = 0;
    let mut ticks = 1;
    while state.phase != Phase::Idle && ticks < MAX_TICKS {
        tick(&mut state, &TickInput::default());
        ticks += 1;

        canvas.clear();
        draw_frame(&state, &settings, &mut canvas);
        peak_marks = peak_marks.max(state.marks.len());
        peak_commands = peak_commands.max(canvas.commands.len());

        if state.phase != last_phase {
            log::info!("tick {}: {:?} -> {:?}", ticks, last_phase, state.phase);
            last_phase = state.phase;
        }
    }

    if state.phase == Phase::Idle {
        println!(
            "Cycle complete in {} ticks ({:.1}s), peak {} marks, peak {} draw calls",
            ticks,
            ticks as f32 * anxious::consts::FRAME_DT,
            peak_marks,
            peak_commands
        );
    } else {
        log::warn!("Cycle did not finish within {} ticks (phase {:?})", MAX_TICKS, state.phase);
    }
}
