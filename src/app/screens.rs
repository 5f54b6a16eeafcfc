use macroquad::prelude::*;

use snake_arcade::persistence::{Leaderboard, Settings};

use super::draw::{TEXT_COLOR, draw_background, draw_centered};
use super::menu::ButtonList;

/// Longest accepted player name
const MAX_NAME_LEN: usize = 20;
/// Settings slider step
const SLIDER_STEP: f32 = 0.05;

const INSTRUCTIONS: &[&str] = &[
    "Objective:",
    "- Eat the food to grow your snake.",
    "- Avoid hitting the walls or yourself.",
    "",
    "Controls:",
    "- Use ARROW KEYS to move the snake.",
    "- Press P (or click the pause icon) to pause.",
    "",
    "Rules:",
    "- Each food eaten increases your score by 10.",
    "- The game ends if you hit a wall or yourself.",
    "- Special food appears 4 seconds after the last one",
    "  and is worth double the points.",
];

/// Single "Back" button at the bottom of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Back;

pub enum NameEntryResult {
    Pending,
    Back,
    Confirmed(String),
}

/// Text box asking for the player's name
pub struct NameEntry {
    text: String,
    back: ButtonList<Back>,
    blink: f32,
}

impl NameEntry {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            back: ButtonList::column(screen_height() - 80.0, 100.0, &[("Back", Back)]),
            blink: 0.0,
        }
    }

    pub fn update(&mut self) -> NameEntryResult {
        while let Some(ch) = get_char_pressed() {
            if !ch.is_control() && self.text.chars().count() < MAX_NAME_LEN {
                self.text.push(ch);
            }
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.text.pop();
        }
        if is_key_pressed(KeyCode::Escape) {
            return NameEntryResult::Back;
        }
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            return NameEntryResult::Confirmed(normalize_name(&self.text));
        }
        // Only the mouse can hit Back here; Enter confirms the name.
        if self.back.hovered_click() {
            return NameEntryResult::Back;
        }
        NameEntryResult::Pending
    }

    pub fn draw(&mut self) {
        draw_background();
        let (cx, cy) = (screen_width() / 2.0, screen_height() / 2.0);
        draw_centered("Welcome", cx, cy - 100.0, 60, TEXT_COLOR);

        let shown = if self.text.is_empty() { "Enter your username" } else { self.text.as_str() };
        let dims = measure_text(shown, None, 48, 1.0);
        let width = dims.width.max(280.0) + 20.0;
        draw_rectangle(cx - width / 2.0, cy - 30.0, width, 60.0, Color::new(0.2, 0.2, 0.2, 1.0));
        draw_rectangle_lines(cx - width / 2.0, cy - 30.0, width, 60.0, 2.0, SKYBLUE);
        let color = if self.text.is_empty() { GRAY } else { TEXT_COLOR };
        draw_text(shown, cx - width / 2.0 + 10.0, cy + dims.offset_y / 2.0, 48.0, color);

        self.blink = (self.blink + get_frame_time()) % 1.0;
        if !self.text.is_empty() && self.blink < 0.5 {
            let x = cx - width / 2.0 + 12.0 + dims.width;
            draw_line(x, cy - 20.0, x, cy + 20.0, 2.0, TEXT_COLOR);
        }

        draw_centered("Press ENTER to continue", cx, cy + 60.0, 32, TEXT_COLOR);
        self.back.draw();
    }
}

/// Trimmed name, or "Player" when blank
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Player".to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsRow {
    Volume,
    Speed,
}

pub enum SettingsResult {
    Pending,
    Changed(Settings),
    Back,
}

/// Two sliders: sound volume and game speed
pub struct SettingsScreen {
    settings: Settings,
    row: SettingsRow,
    back: ButtonList<Back>,
}

impl SettingsScreen {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            row: SettingsRow::Volume,
            back: ButtonList::column(400.0, 200.0, &[("Back", Back)]),
        }
    }

    fn slider_x() -> f32 {
        screen_width() / 2.0 - 150.0
    }

    fn slider_y(row: SettingsRow) -> f32 {
        match row {
            SettingsRow::Volume => 200.0,
            SettingsRow::Speed => 300.0,
        }
    }

    fn value(&self, row: SettingsRow) -> f32 {
        match row {
            SettingsRow::Volume => self.settings.sound_volume,
            SettingsRow::Speed => self.settings.game_speed,
        }
    }

    fn set(&mut self, row: SettingsRow, value: f32) {
        self.settings = match row {
            SettingsRow::Volume => self.settings.with_volume(value),
            SettingsRow::Speed => self.settings.with_speed(value),
        };
    }

    pub fn update(&mut self) -> SettingsResult {
        if is_key_pressed(KeyCode::Escape) || self.back.hovered_click() {
            return SettingsResult::Back;
        }
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::Down) {
            self.row = match self.row {
                SettingsRow::Volume => SettingsRow::Speed,
                SettingsRow::Speed => SettingsRow::Volume,
            };
        }

        let before = self.settings;
        let current = self.value(self.row);
        if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::Minus) {
            self.set(self.row, current - SLIDER_STEP);
        }
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Equal) {
            self.set(self.row, current + SLIDER_STEP);
        }

        if is_mouse_button_down(MouseButton::Left) {
            let (mx, my) = mouse_position();
            for row in [SettingsRow::Volume, SettingsRow::Speed] {
                if (my - Self::slider_y(row)).abs() <= 12.0 {
                    self.row = row;
                    self.set(row, (mx - Self::slider_x()) / 300.0);
                }
            }
        }

        if self.settings != before {
            SettingsResult::Changed(self.settings)
        } else {
            SettingsResult::Pending
        }
    }

    pub fn draw(&mut self) {
        draw_background();
        draw_centered("Settings", screen_width() / 2.0, 100.0, 64, TEXT_COLOR);

        for (row, label) in [(SettingsRow::Volume, "Sound Volume"), (SettingsRow::Speed, "Game Speed")] {
            let (x, y) = (Self::slider_x(), Self::slider_y(row));
            let value = self.value(row);
            draw_line(x, y, x + 300.0, y, 4.0, Color::new(0.6, 0.6, 0.6, 1.0));
            let knob = if row == self.row { WHITE } else { Color::new(0.8, 0.8, 0.8, 1.0) };
            draw_circle(x + value * 300.0, y, 10.0, knob);
            let text = format!("{label}: {}%", (value * 100.0).round() as i32);
            draw_centered(&text, x + 150.0, y + 30.0, 24, TEXT_COLOR);
        }
        self.back.draw();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardAction {
    Clear,
    Back,
}

/// Table of the best scores
pub struct LeaderboardScreen {
    buttons: ButtonList<LeaderboardAction>,
}

impl LeaderboardScreen {
    pub fn new() -> Self {
        Self {
            buttons: ButtonList::column(
                screen_height() - 140.0,
                260.0,
                &[
                    ("Clear Leaderboard", LeaderboardAction::Clear),
                    ("Back", LeaderboardAction::Back),
                ],
            ),
        }
    }

    pub fn update(&mut self) -> Option<LeaderboardAction> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(LeaderboardAction::Back);
        }
        self.buttons.update()
    }

    pub fn draw(&mut self, board: &Leaderboard) {
        draw_background();
        let cx = screen_width() / 2.0;
        draw_centered("Leaderboard", cx, 50.0, 64, TEXT_COLOR);

        if board.is_empty() {
            draw_centered("No scores yet", cx, 200.0, 32, GRAY);
        }
        for (i, entry) in board.entries().iter().enumerate() {
            let line = format!("{}. {} - {} ({})", i + 1, entry.username, entry.score, entry.date);
            draw_centered(&line, cx, 110.0 + i as f32 * 34.0, 30, TEXT_COLOR);
        }
        self.buttons.draw();
    }
}

/// Static instructions
pub struct HowToScreen {
    back: ButtonList<Back>,
}

impl HowToScreen {
    pub fn new() -> Self {
        Self {
            back: ButtonList::column(screen_height() - 80.0, 200.0, &[("Back", Back)]),
        }
    }

    pub fn update(&mut self) -> bool {
        is_key_pressed(KeyCode::Escape) || self.back.update().is_some()
    }

    pub fn draw(&mut self) {
        draw_background();
        let cx = screen_width() / 2.0;
        let spacing = 28.0;
        let top = (screen_height() - INSTRUCTIONS.len() as f32 * spacing) / 2.0;
        draw_centered("How to Play", cx, top - 50.0, 48, TEXT_COLOR);
        for (i, line) in INSTRUCTIONS.iter().enumerate() {
            draw_centered(line, cx, top + i as f32 * spacing, 26, TEXT_COLOR);
        }
        self.back.draw();
    }
}
