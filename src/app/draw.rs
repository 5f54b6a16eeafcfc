use macroquad::prelude::*;

use snake_arcade::game::grid::{Cell, Rect as GameRect, SCREEN_HEIGHT, SCREEN_WIDTH};
use snake_arcade::game::{Canvas, Direction, Particle};

pub const TEXT_COLOR: Color = Color::new(0.78, 0.78, 0.82, 1.0);
pub const BUTTON_COLOR: Color = Color::new(0.2, 0.2, 0.27, 1.0);
pub const BUTTON_HOVER: Color = Color::new(0.27, 0.27, 0.35, 1.0);
pub const FOOD_COLOR: Color = Color::new(1.0, 0.2, 0.29, 1.0);
const SNAKE_HEAD: Color = Color::new(0.64, 1.0, 0.64, 1.0);
const SNAKE_BODY: Color = Color::new(0.25, 0.9, 0.25, 1.0);
const SPECIAL_LEFT: Color = Color::new(0.2, 1.0, 0.2, 1.0);
const SPECIAL_RIGHT: Color = Color::new(1.0, 1.0, 0.2, 1.0);
const GRADIENT_TOP: (f32, f32, f32) = (30.0, 30.0, 60.0);
const GRADIENT_BOTTOM: (f32, f32, f32) = (10.0, 10.0, 40.0);
/// Height of each gradient band
const BAND: f32 = 4.0;

/// Vertical gradient used behind every screen
pub fn draw_background() {
    let height = SCREEN_HEIGHT as f32;
    let mut y = 0.0;
    while y < height {
        let t = y / height;
        let mix = |a: f32, b: f32| (a * (1.0 - t) + b * t) / 255.0;
        let color = Color::new(
            mix(GRADIENT_TOP.0, GRADIENT_BOTTOM.0),
            mix(GRADIENT_TOP.1, GRADIENT_BOTTOM.1),
            mix(GRADIENT_TOP.2, GRADIENT_BOTTOM.2),
            1.0,
        );
        draw_rectangle(0.0, y, SCREEN_WIDTH as f32, BAND, color);
        y += BAND;
    }
}

/// Text centred horizontally on `cx`, vertically on `cy`
pub fn draw_centered(text: &str, cx: f32, cy: f32, size: u16, color: Color) {
    let dims = measure_text(text, None, size, 1.0);
    draw_text(
        text,
        cx - dims.width / 2.0,
        cy + dims.offset_y / 2.0,
        size as f32,
        color,
    );
}

/// Translucent black layer over the current frame
pub fn draw_dim_overlay() {
    draw_rectangle(
        0.0,
        0.0,
        SCREEN_WIDTH as f32,
        SCREEN_HEIGHT as f32,
        Color::new(0.0, 0.0, 0.0, 0.5),
    );
}

/// Draws session frames with macroquad primitives
pub struct ScreenCanvas {
    cell: f32,
}

impl ScreenCanvas {
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell: cell_size as f32,
        }
    }

    fn fill_cell(&self, x: f32, y: f32, color: Color) {
        draw_rectangle(x + 1.0, y + 1.0, self.cell - 2.0, self.cell - 2.0, color);
    }
}

impl Canvas for ScreenCanvas {
    fn background(&mut self) {
        draw_background();
    }

    fn food(&mut self, cell: Cell) {
        let half = self.cell / 2.0;
        draw_circle(cell.x as f32 + half, cell.y as f32 + half, half - 2.0, FOOD_COLOR);
    }

    fn special_food(&mut self, footprint: GameRect) {
        self.fill_cell(footprint.x, footprint.y, SPECIAL_LEFT);
        self.fill_cell(footprint.x + self.cell, footprint.y, SPECIAL_RIGHT);
    }

    fn particle(&mut self, particle: &Particle) {
        // Whole-pixel radius, so a dot disappears once it drops below one.
        let radius = particle.radius.floor();
        if radius >= 1.0 {
            draw_circle(particle.x, particle.y, radius, FOOD_COLOR);
        }
    }

    fn snake_head(&mut self, cell: Cell, facing: Direction) {
        let (x, y) = (cell.x as f32, cell.y as f32);
        self.fill_cell(x, y, SNAKE_HEAD);

        let (dx, dy) = facing.delta();
        let half = self.cell / 2.0;
        let (cx, cy) = (x + half, y + half);
        // Two eyes on the leading edge.
        let ahead = half * 0.45;
        let side = half * 0.45;
        for sign in [-1.0, 1.0] {
            let ex = cx + dx as f32 * ahead + dy as f32 * side * sign;
            let ey = cy + dy as f32 * ahead + dx as f32 * side * sign;
            draw_circle(ex, ey, 2.0, BLACK);
        }
    }

    fn snake_segment(&mut self, cell: Cell) {
        self.fill_cell(cell.x as f32, cell.y as f32, SNAKE_BODY);
    }

    fn score(&mut self, score: u32, area: GameRect) {
        draw_text(
            &format!("Score: {score}"),
            area.x + 10.0,
            area.y + 32.0,
            36.0,
            TEXT_COLOR,
        );
    }

    fn pause_icon(&mut self, area: GameRect) {
        draw_rectangle(area.x, area.y, area.w, area.h, BUTTON_COLOR);
        let bar_w = area.w * 0.2;
        let bar_h = area.h * 0.6;
        let top = area.y + (area.h - bar_h) / 2.0;
        draw_rectangle(area.x + area.w * 0.25, top, bar_w, bar_h, TEXT_COLOR);
        draw_rectangle(area.x + area.w * 0.55, top, bar_w, bar_h, TEXT_COLOR);
    }
}
