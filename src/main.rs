//! Circus Juggle entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use circus_juggle::audio::{AudioManager, SoundCue};
    use circus_juggle::consts::FRAME_MS;
    use circus_juggle::renderer::Renderer;
    use circus_juggle::sim::{GameEvent, GameState, TickInput, Variant, tick};
    use circus_juggle::{Settings, lane_for_x};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        input: TickInput,
        /// Held walking keys; the free-fall variant reads these every tick
        held_left: bool,
        held_right: bool,
        last_time: f64,
    }

    impl Game {
        /// Input for this tick: one-shot lane shifts in the lane variant,
        /// held walking direction in the free-fall variant
        fn tick_input(&self) -> TickInput {
            match self.state.variant {
                Variant::LaneArc => self.input.clone(),
                Variant::FreeFall => TickInput {
                    move_left: self.held_left,
                    move_right: self.held_right,
                    ..self.input.clone()
                },
            }
        }

        /// Run one simulation step and map its cues onto the sound emitter
        fn update(&mut self, time: f64) {
            // Raw frame delta in nominal-frame units; tick bounds it itself
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / FRAME_MS as f64) as f32
            } else {
                1.0
            };
            self.last_time = time;

            let input = self.tick_input();
            tick(&mut self.state, &input, dt);

            // Clear one-shot inputs after processing
            self.input.move_left = false;
            self.input.move_right = false;
            self.input.target_lane = None;
            self.input.begin = false;

            for event in self.state.take_events() {
                match event {
                    GameEvent::BallThrown => self.audio.play(SoundCue::Throw),
                    GameEvent::LevelUp => self.audio.play(SoundCue::LevelUp),
                    GameEvent::Dropped => self.audio.play(SoundCue::GameOver),
                    GameEvent::Caught => {}
                }
            }
        }

        fn render(&self) {
            self.renderer.render(&self.state);
        }

        /// Audio may only start after a user gesture; called from every
        /// input handler, idempotent past the first call
        fn poke_audio(&mut self) {
            self.audio.resume();
            self.audio.start_music();
        }
    }

    /// Pick the session variant from the page query string
    fn variant_from_location() -> Variant {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if search.contains("variant=fall") || search.contains("variant=freefall") {
            Variant::FreeFall
        } else {
            Variant::LaneArc
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Circus Juggle starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no game canvas")
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let variant = variant_from_location();
        log::info!("Session variant {variant:?}, seed {seed}");

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, variant),
            renderer: Renderer::new(&canvas)?,
            audio,
            settings,
            input: TickInput::default(),
            held_left: false,
            held_right: false,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_blur_mute(game.clone());

        request_animation_frame(game);

        log::info!("Circus Juggle running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.poke_audio();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        g.held_left = true;
                        if !event.repeat() {
                            g.input.move_left = true;
                        }
                    }
                    "ArrowRight" | "d" | "D" => {
                        g.held_right = true;
                        if !event.repeat() {
                            g.input.move_right = true;
                        }
                    }
                    " " | "Enter" => g.input.begin = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.held_left = false,
                    "ArrowRight" | "d" | "D" => g.held_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer lane select
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.poke_audio();
                let scale = canvas_clone.width() as f32 / canvas_clone.client_width().max(1) as f32;
                let x = event.offset_x() as f32 * scale;
                g.input.target_lane = Some(lane_for_x(x));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch lane select
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.poke_audio();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let scale =
                        canvas_clone.width() as f32 / canvas_clone.client_width().max(1) as f32;
                    let x = (touch.client_x() as f32 - rect.left() as f32) * scale;
                    g.input.target_lane = Some(lane_for_x(x));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circus Juggle (native) starting...");
    log::info!("The playable build targets the browser - run with `trunk serve`");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a deterministic session with a lane-following script and report how
/// far it got
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use circus_juggle::sim::{Flight, GamePhase, GameState, TickInput, Variant, tick};

    let mut state = GameState::new(7, Variant::LaneArc);
    tick(
        &mut state,
        &TickInput {
            begin: true,
            ..Default::default()
        },
        1.0,
    );

    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 50_000 {
        // Always stand where the first ball will land
        let target_lane = state.balls.first().and_then(|b| match b.flight {
            Flight::Arc { to_lane, .. } => Some(to_lane),
            _ => None,
        });
        tick(
            &mut state,
            &TickInput {
                target_lane,
                ..Default::default()
            },
            1.0,
        );
        for event in state.take_events() {
            log::debug!("tick {ticks}: {event:?}");
        }
        ticks += 1;
    }

    log::info!(
        "demo finished after {} ticks: juggled up to {} balls, streak {}",
        ticks,
        state.difficulty.highest_balls,
        state.difficulty.catch_streak,
    );
}
