//! Star Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use star_dash::audio::AudioManager;
    use star_dash::consts::*;
    use star_dash::platform::Keyboard;
    use star_dash::sim::{ActiveScene, GameEvent, GameState, HazardKind, SceneHost};
    use star_dash::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        host: SceneHost,
        keyboard: Keyboard,
        audio: AudioManager,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, seed: u64) -> Self {
            let settings = Settings::load();
            let mut host = SceneHost::new(Tuning::default(), seed);
            host.set_last_difficulty(settings.last_difficulty);
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                host,
                keyboard: Keyboard::new(),
                audio,
                settings,
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keyboard.snapshot();
                self.host.update(time, SIM_DT * 1000.0, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.keyboard.clear_presses();
            }

            let events = match self.host.game_mut() {
                Some(state) => state.drain_events(),
                None => Vec::new(),
            };
            for event in &events {
                self.audio.handle(event);
                if let GameEvent::GameOver { score } = event {
                    log::info!("Run ended with {} points", score);
                }
            }
        }

        /// Draw the level as flat shapes
        fn render(&self) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("#7ec8f0");
            ctx.fill_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);

            let Some(state) = self.host.game() else {
                return;
            };

            ctx.set_fill_style_str("#3f8f3a");
            for p in &state.world.platforms {
                let min = p.min();
                ctx.fill_rect(
                    min.x as f64,
                    min.y as f64,
                    (p.half.x * 2.0) as f64,
                    (p.half.y * 2.0) as f64,
                );
            }

            ctx.set_fill_style_str("#ffd700");
            for star in state.stars.iter().filter(|s| s.is_active()) {
                fill_body(ctx, &star.body);
            }

            for hazard in &state.hazards {
                let color = match hazard.kind {
                    HazardKind::Bomb => "#222222",
                    HazardKind::Meteor => "#b3471d",
                };
                ctx.set_fill_style_str(color);
                fill_body(ctx, &hazard.body);
            }

            ctx.set_fill_style_str("#b44cff");
            for powerup in state.powerups.iter().filter(|p| p.is_active()) {
                fill_body(ctx, &powerup.body);
            }

            let player_color = if state.player.tinted { "#ff0000" } else { "#5b3b8c" };
            ctx.set_fill_style_str(player_color);
            fill_body(ctx, &state.player.body);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let in_menu = matches!(self.host.active(), ActiveScene::Menu(_));
            set_visible(&document, "menu", in_menu);
            set_visible(&document, "hud", !in_menu);

            let Some(state) = self.host.game() else {
                set_visible(&document, "game-over", false);
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&format!("Score: {}", state.score)));
            }
            update_ability_hud(&document, state);
            set_visible(&document, "game-over", state.is_game_over());
        }

        fn start_difficulty(&mut self, label: &str) {
            self.audio.resume();
            self.audio.stop_all();
            match self.host.select_difficulty(label) {
                Ok(()) => {
                    self.settings.last_difficulty = self.host.last_difficulty();
                    self.settings.save();
                    self.keyboard.release_all();
                    self.accumulator = 0.0;
                }
                Err(e) => log::error!("Cannot start game: {}", e),
            }
        }

        fn restart(&mut self) {
            self.audio.stop_all();
            self.host.restart();
            self.keyboard.release_all();
            self.accumulator = 0.0;
            log::info!("Game restarted");
        }

        fn return_to_menu(&mut self) {
            self.audio.stop_all();
            self.host.return_to_menu();
            self.accumulator = 0.0;
        }
    }

    fn fill_body(ctx: &CanvasRenderingContext2d, body: &star_dash::sim::Body) {
        let min = body.aabb().min();
        ctx.fill_rect(
            min.x as f64,
            min.y as f64,
            body.size.x as f64,
            body.size.y as f64,
        );
    }

    fn update_ability_hud(document: &web_sys::Document, state: &GameState) {
        let ability = &state.player.ability;
        let active = ability.is_active();
        set_visible(document, "double-jump", active);
        if !active {
            return;
        }
        if let Some(el) = document.get_element_by_id("double-jump-text") {
            el.set_text_content(Some(&format!("Double Jump: {}", ability.seconds_left())));
        }
        if let Some(el) = document.get_element_by_id("double-jump-fill") {
            let _ = el.set_attribute("style", &format!("width: {:.1}%", ability.fraction() * 100.0));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Star Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(ctx, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_menu_buttons(game.clone());
        setup_game_over_buttons(game.clone());

        request_animation_frame(game);
        log::info!("Star Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keyboard.key_down(&event.key()) {
                    // Keep arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events are lost, so drop all held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keyboard.release_all();
                if g.settings.mute_on_blur {
                    g.audio.stop_all();
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for label in ["easy", "medium", "hard"] {
            let Some(btn) = document.get_element_by_id(&format!("btn-{label}")) else {
                log::warn!("Missing menu button for {}", label);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start_difficulty(label);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_game_over_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().return_to_menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Dash (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Headless demo: a simple bot chases stars for a fixed number of frames
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use star_dash::consts::*;
    use star_dash::sim::{Difficulty, GameEvent, GameState, SceneHost, TickInput};
    use star_dash::{Result, Tuning};

    /// Two minutes of play at 60 Hz
    const DEMO_FRAMES: u32 = 60 * 120;

    /// Usage: `star-dash [easy|medium|hard] [tuning.json]`
    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let difficulty: Difficulty = match args.next() {
            Some(label) => label.parse()?,
            None => Difficulty::Easy,
        };
        let tuning = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path).map_err(|e| {
                    star_dash::Error::InvalidTuning(format!("cannot read {path}: {e}"))
                })?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        let mut host = SceneHost::new(tuning, 0x5eed);
        host.select_difficulty(difficulty.as_str())?;

        let mut up_was_held = false;
        for frame in 0..DEMO_FRAMES {
            let Some(state) = host.game() else { break };
            if state.is_game_over() {
                log::info!("Demo bot was hit after {} frames", frame);
                break;
            }
            let mut input = bot_input(state);
            input.up_pressed = input.up && !up_was_held;
            up_was_held = input.up;

            host.update(frame as f64 * SIM_DT as f64 * 1000.0, SIM_DT * 1000.0, &input);

            if let Some(state) = host.game_mut() {
                for event in state.drain_events() {
                    if let GameEvent::WaveCleared { wave } = event {
                        log::info!("Bot cleared wave {}", wave);
                    }
                }
            }
        }

        if let Some(state) = host.game() {
            println!(
                "difficulty={} score={} waves={} phase={:?}",
                state.difficulty, state.score, state.wave, state.phase
            );
        }
        Ok(())
    }

    /// Walk toward the nearest active star, jump when it is overhead
    fn bot_input(state: &GameState) -> TickInput {
        let player = state.player.body.pos;
        let target = state
            .stars
            .iter()
            .filter(|s| s.is_active())
            .min_by(|a, b| {
                let da = (a.body.pos - player).length_squared();
                let db = (b.body.pos - player).length_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(star) = target else {
            return TickInput::default();
        };
        let dx = star.body.pos.x - player.x;
        let overhead = star.body.pos.y < player.y - PLAYER_SIZE.1 && dx.abs() < 60.0;
        TickInput {
            left: dx < -4.0,
            right: dx > 4.0,
            up: overhead,
            ..Default::default()
        }
    }
}
