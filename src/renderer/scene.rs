//! Stage backdrop: tent, spotlights, floor

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::palette;
use crate::sim::World;

pub fn draw_background(ctx: &CanvasRenderingContext2d, world: &World) {
    let (w, h) = (world.width as f64, world.height as f64);
    let ground = world.ground_y as f64;

    ctx.set_fill_style_str(palette::SKY);
    ctx.fill_rect(0.0, 0.0, w, h);

    // Spotlight pools behind the rigging
    ctx.set_fill_style_str(palette::SPOTLIGHT);
    ctx.begin_path();
    ctx.ellipse(80.0, 40.0, 50.0, 26.0, 0.0, 0.0, TAU).ok();
    ctx.fill();
    ctx.begin_path();
    ctx.ellipse(240.0, 36.0, 55.0, 28.0, 0.0, 0.0, TAU).ok();
    ctx.fill();

    // Tent stripes
    let stripe = 20.0;
    let mut x = 0.0;
    let mut red = true;
    while x < w {
        ctx.set_fill_style_str(if red {
            palette::TENT_RED
        } else {
            palette::TENT_PINK
        });
        ctx.fill_rect(x, 0.0, stripe, 80.0);
        x += stripe;
        red = !red;
    }

    ctx.set_fill_style_str(palette::VALANCE);
    ctx.fill_rect(0.0, 80.0, w, 20.0);

    ctx.set_fill_style_str(palette::FLOOR);
    ctx.fill_rect(0.0, ground, w, h - ground);

    // Floorboards
    ctx.set_fill_style_str(palette::FLOORBOARD);
    let mut x = 12.0;
    while x < w {
        ctx.fill_rect(x, ground + 8.0, 12.0, 6.0);
        x += 28.0;
    }

    // String lights along the valance
    ctx.set_fill_style_str(palette::STRING_LIGHT);
    let mut x = 0.0;
    while x < w {
        ctx.begin_path();
        ctx.arc(x + 10.0, 70.0, 3.0, 0.0, TAU).ok();
        ctx.fill();
        x += 24.0;
    }
}
