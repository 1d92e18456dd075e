//! HUD panel and message overlays

use web_sys::CanvasRenderingContext2d;

use super::palette;
use crate::sim::GameState;

pub fn draw_hud(ctx: &CanvasRenderingContext2d, state: &GameState) {
    ctx.set_fill_style_str("rgba(255,255,255,0.85)");
    ctx.fill_rect(6.0, 6.0, 110.0, 28.0);
    ctx.set_stroke_style_str(palette::OUTLINE);
    ctx.stroke_rect(6.0, 6.0, 110.0, 28.0);

    ctx.set_fill_style_str(palette::OUTLINE);
    ctx.set_font("8px Trebuchet MS");
    let _ = ctx.fill_text(
        &format!("Balls: {}", state.difficulty.target_balls),
        12.0,
        18.0,
    );
    let _ = ctx.fill_text(
        &format!("Caught: {}", state.difficulty.catch_streak),
        12.0,
        28.0,
    );
}

pub fn draw_message(ctx: &CanvasRenderingContext2d, text: &str, subtext: &str) {
    ctx.set_fill_style_str("rgba(255,255,255,0.9)");
    ctx.fill_rect(50.0, 54.0, 220.0, 72.0);
    ctx.set_stroke_style_str(palette::OUTLINE);
    ctx.stroke_rect(50.0, 54.0, 220.0, 72.0);

    ctx.set_fill_style_str(palette::OUTLINE);
    ctx.set_font("10px Trebuchet MS");
    let _ = ctx.fill_text(text, 64.0, 82.0);
    ctx.set_font("8px Trebuchet MS");
    let _ = ctx.fill_text(subtext, 64.0, 100.0);
}
