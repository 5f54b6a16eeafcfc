use macroquad::prelude::*;

use super::draw::{BUTTON_COLOR, BUTTON_HOVER, TEXT_COLOR};

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Leaderboard,
    Settings,
    HowTo,
    Quit,
}

/// Game-over screen entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    MainMenu,
    Restart,
    Exit,
}

/// Pause overlay entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    MainMenu,
}

/// A clickable, keyboard-selectable button carrying the value it stands for
pub struct Button<T> {
    rect: Rect,
    label: &'static str,
    value: T,
    scale: f32,
}

impl<T: Copy> Button<T> {
    pub fn new(x: f32, y: f32, w: f32, h: f32, label: &'static str, value: T) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            label,
            value,
            scale: 1.0,
        }
    }

    fn hit(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    fn draw(&mut self, highlighted: bool) {
        let target = if highlighted { 1.1 } else { 1.0 };
        self.scale += (target - self.scale) * 0.2;

        let w = self.rect.w * self.scale;
        let h = self.rect.h * self.scale;
        let center = self.rect.center();
        let color = if highlighted { BUTTON_HOVER } else { BUTTON_COLOR };
        draw_rectangle(center.x - w / 2.0, center.y - h / 2.0, w, h, color);

        let dims = measure_text(self.label, None, 32, 1.0);
        draw_text(
            self.label,
            center.x - dims.width / 2.0,
            center.y + dims.offset_y / 2.0,
            32.0,
            TEXT_COLOR,
        );
    }
}

/// A group of buttons navigated with the arrow keys or the mouse.
pub struct ButtonList<T> {
    buttons: Vec<Button<T>>,
    selected: usize,
}

impl<T: Copy> ButtonList<T> {
    pub fn new(buttons: Vec<Button<T>>) -> Self {
        Self {
            buttons,
            selected: 0,
        }
    }

    /// Buttons stacked in a centred column
    pub fn column(top: f32, width: f32, entries: &[(&'static str, T)]) -> Self {
        let x = screen_width() / 2.0 - width / 2.0;
        let buttons = entries
            .iter()
            .enumerate()
            .map(|(i, (label, value))| Button::new(x, top + i as f32 * 60.0, width, 50.0, *label, *value))
            .collect();
        Self::new(buttons)
    }

    /// Buttons laid out side by side, centred
    pub fn row(y: f32, width: f32, entries: &[(&'static str, T)]) -> Self {
        let gap = 20.0;
        let total = entries.len() as f32 * (width + gap) - gap;
        let left = screen_width() / 2.0 - total / 2.0;
        let buttons = entries
            .iter()
            .enumerate()
            .map(|(i, (label, value))| Button::new(left + i as f32 * (width + gap), y, width, 50.0, *label, *value))
            .collect();
        Self::new(buttons)
    }

    /// Poll input; returns the activated value, if any
    pub fn update(&mut self) -> Option<T> {
        if self.buttons.is_empty() {
            return None;
        }
        let count = self.buttons.len();
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::Left) {
            self.selected = (self.selected + count - 1) % count;
        }
        if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::Right) {
            self.selected = (self.selected + 1) % count;
        }

        let mouse = Vec2::from(mouse_position());
        if let Some(index) = self.buttons.iter().position(|b| b.hit(mouse)) {
            self.selected = index;
            if is_mouse_button_pressed(MouseButton::Left) {
                return Some(self.buttons[index].value);
            }
        }

        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            return Some(self.buttons[self.selected].value);
        }
        None
    }

    /// Mouse-only activation, for screens where Enter means something else
    pub fn hovered_click(&self) -> bool {
        let mouse = Vec2::from(mouse_position());
        is_mouse_button_pressed(MouseButton::Left) && self.buttons.iter().any(|b| b.hit(mouse))
    }

    pub fn draw(&mut self) {
        let selected = self.selected;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.draw(i == selected);
        }
    }
}
