//! Star Strike entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use star_strike::Settings;
    use star_strike::ms_to_frames;
    use star_strike::platform::{KeyEvent, Route};
    use star_strike::renderer::{RenderState, scene_vertices};
    use star_strike::sim::{Game, GameEvent, KeyState, Stage};

    /// How long the health bar stays white after a hit
    const FLASH_MS: f64 = 150.0;

    /// Browser-side app holding the match and the GPU state
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Damage flash visible until this timestamp
        flash_until: f64,
        /// Set on navigation or page hide; the frame loop stops
        stopped: bool,
    }

    impl App {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                game: Game::new(Stage::new(), seed, &settings),
                render_state: None,
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                flash_until: 0.0,
                stopped: false,
            }
        }

        /// Run timers and one simulation step for this animation frame
        fn update(&mut self, time: f64) {
            if !self.game.state.started {
                self.game.start(time);
            }

            let dt = if self.last_time > 0.0 {
                ms_to_frames(time - self.last_time)
            } else {
                1.0
            };
            self.last_time = time;

            self.game.run_timers(time);
            self.game.advance(dt);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// React to what happened in the match this frame
        fn handle_events(&mut self, time: f64) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::PlayerHit { health } => {
                        log::info!("Player hit, {} health left", health);
                        if self.settings.effective_damage_flash() {
                            self.flash_until = time + FLASH_MS;
                        }
                    }
                    GameEvent::GameOver { score } => {
                        log::info!("Game over with {} points", score);
                        show_game_over(score);
                    }
                    GameEvent::PhaseAdvanced(phase) => {
                        log::info!("Entering phase {}", phase);
                    }
                    GameEvent::EnemyDestroyed { .. } => {}
                    GameEvent::Navigate(route) => {
                        self.stopped = true;
                        self.game.teardown();
                        navigate(route);
                        return;
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene_vertices(&self.game);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, time: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.game.score().to_string()));
            }

            // Update phase
            if let Some(el) = document.query_selector("#hud-phase .hud-value").ok().flatten() {
                el.set_text_content(Some(&(self.game.state.phase + 1).to_string()));
            }

            // Update health bar
            if let Some(bar) = document
                .get_element_by_id("health-bar")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let max = self.settings.player_health.max(1) as f32;
                let ratio = (self.game.player.health().max(0) as f32 / max).clamp(0.0, 1.0);
                let _ = bar
                    .style()
                    .set_property("width", &format!("{:.0}%", ratio * 100.0));
            }

            // Damage flash
            if let Some(el) = document.get_element_by_id("damages") {
                let _ = if time < self.flash_until {
                    el.class_list().add_1("flash")
                } else {
                    el.class_list().remove_1("flash")
                };
            }

            // Update FPS
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
        }
    }

    fn show_game_over(score: u64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn navigate(route: Route) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(route.path());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Star Strike starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize match
        let settings = Settings::load();
        // Write back so a first run leaves an editable copy in LocalStorage
        settings.save();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let app = Rc::new(RefCell::new(App::new(settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(app.clone());
        setup_teardown(app.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Star Strike running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for event_type in ["keydown", "keyup"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Keep arrows and space from scrolling the page
                if matches!(
                    key.as_str(),
                    KeyState::LEFT | KeyState::RIGHT | KeyState::FIRE | KeyState::FIRE_ALT
                ) {
                    event.prevent_default();
                }
                let event = KeyEvent::from_dom(&key, &event.type_());
                app.borrow_mut().game.record_key_event(&event);
            });
            let _ = window
                .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Cancel the spawn schedule when the page goes away
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.stopped = true;
            a.game.teardown();
            log::info!("Page hidden, match torn down");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.stopped {
                return;
            }

            a.update(time);
            a.handle_events(time);
            if a.stopped {
                return;
            }
            a.render();
            a.update_hud(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    log::info!("Star Strike (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless match...");
    headless_match();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted match on the in-memory stage: hold fire, sweep left and
/// right, and stop at the score screen or after five minutes.
#[cfg(not(target_arch = "wasm32"))]
fn headless_match() {
    use star_strike::Settings;
    use star_strike::consts::FRAME_MS;
    use star_strike::platform::KeyEvent;
    use star_strike::sim::{Game, GameEvent, Stage};

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(2024);
    let mut game = Game::new(Stage::new(), seed, &settings);
    game.start(0.0);
    game.record_key_event(&KeyEvent::down(" "));

    let mut kills = 0u32;
    let mut frame = 0u64;
    let max_frames = 5 * 60 * 60;
    'frames: while frame < max_frames {
        let now = frame as f64 * FRAME_MS;

        // Sweep direction every two seconds
        if frame % 120 == 0 {
            let left = (frame / 120) % 2 == 0;
            game.record_key_event(&KeyEvent { key: "ArrowLeft".into(), pressed: left });
            game.record_key_event(&KeyEvent { key: "ArrowRight".into(), pressed: !left });
        }

        game.run_timers(now);
        game.advance(1.0);

        for event in game.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PlayerHit { health } => log::info!("Hit at {:.1}s, health {}", now / 1000.0, health),
                GameEvent::PhaseAdvanced(phase) => log::info!("Phase {} at {:.1}s", phase, now / 1000.0),
                GameEvent::GameOver { score } => log::info!("Game over at {:.1}s, score {}", now / 1000.0, score),
                GameEvent::Navigate(route) => {
                    log::info!("Would navigate to {}", route.path());
                    break 'frames;
                }
            }
        }
        frame += 1;
    }

    println!(
        "✓ Match finished after {:.1}s: score {}, {} kills, phase {}, {} enemies on stage",
        frame as f64 * FRAME_MS / 1000.0,
        game.score(),
        kills,
        game.state.phase,
        game.enemies.len(),
    );
}
