//! Canvas 2D rendering of the big-top stage
//!
//! Strictly a read-only consumer of the session snapshot: nothing here
//! mutates game state, and draw failures are discarded so rendering can
//! never halt the simulation.

mod hud;
mod scene;
mod sprites;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{GamePhase, GameState};

/// Stage palette shared by the scene and sprite layers
pub(crate) mod palette {
    pub const SKY: &str = "#6cc0ff";
    pub const TENT_RED: &str = "#ff7cab";
    pub const TENT_PINK: &str = "#ffd1e8";
    pub const VALANCE: &str = "#fff6d8";
    pub const FLOOR: &str = "#ffecae";
    pub const FLOORBOARD: &str = "#ffd17b";
    pub const SPOTLIGHT: &str = "#fff4c8";
    pub const STRING_LIGHT: &str = "#fff";
    pub const OUTLINE: &str = "#3a2b4c";
    pub const BALL: [&str; 4] = ["#ffed66", "#79d6ff", "#ff9f6e", "#b3ff7a"];
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame from the session snapshot
    pub fn render(&self, state: &GameState) {
        scene::draw_background(&self.ctx, &state.world);
        for ball in &state.balls {
            sprites::draw_ball(&self.ctx, state, ball);
        }
        sprites::draw_juggler(&self.ctx, &state.world, &state.juggler);
        hud::draw_hud(&self.ctx, state);

        match state.phase {
            GamePhase::Start => {
                hud::draw_message(&self.ctx, "Kati's Big Top!", "Press SPACE to start juggling.");
            }
            GamePhase::GameOver => {
                let subtext = format!(
                    "You juggled {} balls. Press SPACE to try again.",
                    state.difficulty.highest_balls
                );
                hud::draw_message(&self.ctx, "Game Over!", &subtext);
            }
            GamePhase::Playing => {}
        }
    }
}
