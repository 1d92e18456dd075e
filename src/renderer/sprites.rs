//! Ball and juggler sprites

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::palette;
use crate::consts::BALL_RADIUS;
use crate::sim::{Ball, GameState, Juggler, Mood, World};

pub fn draw_ball(ctx: &CanvasRenderingContext2d, state: &GameState, ball: &Ball) {
    let pos = state.ball_position(ball);

    ctx.set_fill_style_str(palette::BALL[ball.color as usize % palette::BALL.len()]);
    ctx.begin_path();
    ctx.arc(pos.x as f64, pos.y as f64, BALL_RADIUS as f64, 0.0, TAU)
        .ok();
    ctx.fill();
    ctx.set_stroke_style_str(palette::OUTLINE);
    ctx.stroke();
}

/// Kati, rect by rect. Pupils track `facing`; the mouth drops when sad.
pub fn draw_juggler(ctx: &CanvasRenderingContext2d, world: &World, juggler: &Juggler) {
    let x = juggler.x as f64;
    let y = world.ground_y as f64;

    // Hair and bun
    ctx.set_fill_style_str("#5a3a2c");
    ctx.fill_rect(x - 12.0, y - 32.0, 24.0, 14.0);
    ctx.set_fill_style_str("#6c4735");
    ctx.fill_rect(x - 14.0, y - 28.0, 28.0, 12.0);
    ctx.set_fill_style_str("#4a2f23");
    ctx.fill_rect(x - 10.0, y - 38.0, 20.0, 6.0);
    ctx.fill_rect(x - 12.0, y - 36.0, 4.0, 6.0);
    ctx.fill_rect(x + 8.0, y - 36.0, 4.0, 6.0);

    // Face
    ctx.set_fill_style_str("#f6d7c3");
    ctx.fill_rect(x - 6.0, y - 24.0, 12.0, 10.0);
    ctx.fill_rect(x - 7.0, y - 16.0, 14.0, 8.0);

    // Eyes, pupils glancing the way she walks
    ctx.set_fill_style_str("#2b2b2b");
    ctx.fill_rect(x - 7.0, y - 22.0, 6.0, 4.0);
    ctx.fill_rect(x + 1.0, y - 22.0, 6.0, 4.0);
    ctx.fill_rect(x - 1.0 + juggler.facing as f64, y - 20.0, 2.0, 2.0);

    // Earrings
    ctx.set_stroke_style_str("#d7d7d7");
    ctx.begin_path();
    ctx.arc(x - 9.0, y - 16.0, 3.0, 0.0, TAU).ok();
    ctx.stroke();
    ctx.begin_path();
    ctx.arc(x + 9.0, y - 16.0, 3.0, 0.0, TAU).ok();
    ctx.stroke();

    // Mouth
    ctx.set_fill_style_str("#b35252");
    if juggler.mood == Mood::Sad {
        ctx.fill_rect(x - 3.0, y - 10.0, 6.0, 1.0);
    } else {
        ctx.fill_rect(x - 3.0, y - 9.0, 6.0, 1.0);
    }

    // Dress
    ctx.set_fill_style_str("#c9c5f3");
    ctx.fill_rect(x - 10.0, y - 6.0, 20.0, 14.0);
    ctx.set_fill_style_str("#b6b0ee");
    ctx.fill_rect(x - 10.0, y + 4.0, 20.0, 4.0);
    ctx.set_fill_style_str("#d7d3f7");
    ctx.fill_rect(x - 6.0, y, 12.0, 6.0);

    // Arms
    ctx.set_fill_style_str("#b5b5c8");
    ctx.fill_rect(x - 14.0, y - 4.0, 4.0, 10.0);
    ctx.fill_rect(x + 10.0, y - 4.0, 4.0, 10.0);

    // Legs
    ctx.set_fill_style_str("#b6b0ee");
    ctx.fill_rect(x - 8.0, y + 8.0, 6.0, 8.0);
    ctx.fill_rect(x + 2.0, y + 8.0, 6.0, 8.0);
}
