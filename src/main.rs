//! Brickbatch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use brickbatch::platform::time::BrowserTime;
    use brickbatch::platform::{KeyEvent, TimeSource};
    use brickbatch::renderer::BatchRenderer;
    use brickbatch::{Game, Settings};

    /// Everything the animation frame callback needs
    struct App {
        game: Game,
        renderer: BatchRenderer,
        time: BrowserTime,
    }

    impl App {
        /// Run and draw one frame. Returns false once the loop should stop.
        fn frame(&mut self) -> bool {
            let now = self.time.now_ms();
            if let Err(e) = self.game.frame(now) {
                log::error!("Fatal: {}", e);
                self.game.quit();
                return false;
            }

            match self.renderer.render(self.game.batch()) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    self.renderer
                        .resize(self.renderer.size.0, self.renderer.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    self.game.quit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            self.game.is_running()
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brickbatch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));

        let settings = Settings::default();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(&settings, seed).expect("Invalid default settings");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let field = glam::Vec2::new(settings.field_width, settings.field_height);
        let renderer = BatchRenderer::new(
            surface,
            &adapter,
            width.max(1),
            height.max(1),
            field,
            settings.batch_capacity,
        )
        .await;

        let time = BrowserTime::new().expect("no performance clock");
        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            time,
        }));

        setup_input_handlers(app.clone());

        // Start game loop
        request_animation_frame(app);
        log::info!("Brickbatch running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = KeyEvent::from_key(&event.key(), pressed, event.repeat()) {
                    event.prevent_default();
                    app.borrow_mut().game.handle_key(key);
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never deliver keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_running = app.borrow_mut().frame();

        if keep_running {
            request_animation_frame(app);
        } else {
            log::info!("Game loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run: `brickbatch [--realtime] [settings.json] [seconds]`
///
/// Without `--realtime` frames are simulated back to back on a manual clock;
/// with it they follow the OS monotonic clock at roughly 60 Hz.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use brickbatch::platform::ManualTime;
    use brickbatch::platform::time::MonotonicTime;
    use brickbatch::{Game, Settings};

    env_logger::init();
    log::info!("Brickbatch (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let (flags, mut args): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a.starts_with("--"));
    let realtime = flags.iter().any(|f| f == "--realtime");
    if let Some(unknown) = flags.iter().find(|f| *f != "--realtime") {
        log::error!("Unknown flag: {}", unknown);
        return ExitCode::FAILURE;
    }
    args.reverse();

    let settings = match args.pop() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::error!("Failed to load settings from {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Settings::default(),
    };

    let seconds: f64 = match args.pop().map(|s| s.parse()) {
        None => 10.0,
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            log::error!("Invalid duration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut game = match Game::new(&settings, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = if realtime {
        log::info!("Running {:.1}s in real time", seconds);
        let mut time = MonotonicTime::new();
        headless::run(&mut game, &mut time, seconds, |_| {
            std::thread::sleep(std::time::Duration::from_millis(headless::FRAME_MS as u64))
        })
    } else {
        let mut time = ManualTime::new(0.0);
        headless::run(&mut game, &mut time, seconds, |t| t.advance(headless::FRAME_MS))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brickbatch::platform::{Action, KeyEvent, TimeSource};
    use brickbatch::{BatchError, Game};

    /// ~60 Hz
    pub const FRAME_MS: f64 = 16.0;
    const SWEEP_MS: f64 = 2000.0;

    /// Drive `game` from `time` for `seconds`, sweeping the paddle back and
    /// forth. `wait` moves time on to the next frame.
    pub fn run<T: TimeSource>(
        game: &mut Game,
        time: &mut T,
        seconds: f64,
        mut wait: impl FnMut(&mut T),
    ) -> Result<(), BatchError> {
        let start = time.now_ms();
        let end = start + seconds * 1000.0;
        let mut last_sweep = start;
        let mut steps = 0u64;
        let mut destroyed = 0u64;
        let mut held = Action::MoveRight;
        game.handle_key(KeyEvent::down(held));

        while game.is_running() && time.now_ms() < end {
            let now = time.now_ms();
            if now - last_sweep >= SWEEP_MS {
                last_sweep = now;
                game.handle_key(KeyEvent::up(held));
                held = match held {
                    Action::MoveRight => Action::MoveLeft,
                    _ => Action::MoveRight,
                };
                game.handle_key(KeyEvent::down(held));
            }

            let stats = game.frame(now)?;
            steps += stats.steps as u64;
            destroyed += stats.bricks_destroyed as u64;
            wait(time);
        }

        log::info!(
            "Simulated {:.1}s: {} frames, {} steps, {} bricks destroyed, wave {}",
            (time.now_ms() - start) / 1000.0,
            game.clock().frames(),
            steps,
            destroyed,
            game.world().waves
        );
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
