//! Windowed shell: screens, input polling and the frame loop.

mod draw;
mod menu;
mod screens;
mod sound;

use std::time::Duration;

use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use macroquad::prelude::*;

use snake_arcade::game::{Direction, Grid, Intent, Phase, Session};
use snake_arcade::persistence::{FileStore, Leaderboard, Settings};

use crate::cli::Cli;
use draw::{ScreenCanvas, TEXT_COLOR, draw_background, draw_centered, draw_dim_overlay};
use menu::{ButtonList, GameOverChoice, MenuChoice, PauseChoice};
use screens::{
    HowToScreen, LeaderboardAction, LeaderboardScreen, NameEntry, NameEntryResult, SettingsResult, SettingsScreen,
};
use sound::Tones;

enum Screen {
    MainMenu(ButtonList<MenuChoice>),
    NameEntry(NameEntry),
    Playing {
        session: Box<Session>,
        pause_menu: ButtonList<PauseChoice>,
    },
    GameOver {
        player: String,
        score: u32,
        buttons: ButtonList<GameOverChoice>,
    },
    Leaderboard(LeaderboardScreen),
    Settings(SettingsScreen),
    HowTo(HowToScreen),
}

fn main_menu() -> Screen {
    Screen::MainMenu(ButtonList::column(
        200.0,
        300.0,
        &[
            ("Start Game", MenuChoice::Start),
            ("Leaderboard", MenuChoice::Leaderboard),
            ("Settings", MenuChoice::Settings),
            ("How to Play", MenuChoice::HowTo),
            ("Quit", MenuChoice::Quit),
        ],
    ))
}

fn game_over(player: String, score: u32) -> Screen {
    Screen::GameOver {
        player,
        score,
        buttons: ButtonList::row(
            screen_height() / 2.0 + 60.0,
            200.0,
            &[
                ("Main Menu", GameOverChoice::MainMenu),
                ("Restart", GameOverChoice::Restart),
                ("Exit", GameOverChoice::Exit),
            ],
        ),
    }
}

/// Seconds since startup as a duration
fn now() -> Duration {
    Duration::from_secs_f64(get_time())
}

/// Keyboard and mouse input of this frame, as session intents
fn poll_intents() -> Vec<Intent> {
    let mut intents = Vec::new();
    let turns = [
        (KeyCode::Up, KeyCode::W, Direction::Up),
        (KeyCode::Down, KeyCode::S, Direction::Down),
        (KeyCode::Left, KeyCode::A, Direction::Left),
        (KeyCode::Right, KeyCode::D, Direction::Right),
    ];
    for (arrow, letter, direction) in turns {
        if is_key_pressed(arrow) || is_key_pressed(letter) {
            intents.push(Intent::Turn(direction));
        }
    }
    if is_key_pressed(KeyCode::P) {
        intents.push(Intent::TogglePause);
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        let (x, y) = mouse_position();
        intents.push(Intent::Pointer { x, y });
    }
    intents
}

/// A fresh session with an OS-seeded generator, not yet started
fn new_session(settings: &Settings, player: String) -> Result<Session> {
    Session::with_rng(Grid::standard(), settings, player, StdRng::from_os_rng())
        .context("Failed to start a new game")
}

/// Long-lived state shared by all screens
struct App {
    store: FileStore,
    settings: Settings,
    leaderboard: Leaderboard,
    tones: Tones,
}

impl App {
    async fn load(cli: &Cli) -> Result<Self> {
        let store = FileStore::new(&cli.data_dir);
        let settings = Settings::load(&store);
        let leaderboard = Leaderboard::load(&store);
        let tones = Tones::load(settings.sound_volume).await?;
        info!(
            "loaded data from {}: {} leaderboard entries",
            store.dir().display(),
            leaderboard.len()
        );
        Ok(Self {
            store,
            settings,
            leaderboard,
            tones,
        })
    }

    fn start_session(&mut self, player: String) -> Result<Screen> {
        let mut session = new_session(&self.settings, player)?;
        self.tones.stop_music();
        session.begin(now(), &mut self.tones);
        Ok(Screen::Playing {
            session: Box::new(session),
            pause_menu: ButtonList::column(
                screen_height() / 2.0,
                300.0,
                &[("Resume", PauseChoice::Resume), ("Main Menu", PauseChoice::MainMenu)],
            ),
        })
    }

    fn record_score(&mut self, player: &str, score: u32) {
        self.leaderboard.add_score(player, score);
        if let Err(err) = self.leaderboard.save(&self.store) {
            warn!("could not save leaderboard: {err:#}");
        }
    }

    fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.tones.set_volume(settings.sound_volume);
        if let Err(err) = settings.save(&self.store) {
            warn!("could not save settings: {err:#}");
        }
    }

    fn flush(&self) {
        if let Err(err) = self.settings.save(&self.store) {
            warn!("could not save settings on exit: {err:#}");
        }
    }
}

/// Run the screen loop until the player quits
pub async fn run(cli: Cli) -> Result<()> {
    let mut app = App::load(&cli).await?;
    let mut canvas = ScreenCanvas::new(Grid::standard().cell_size());
    let mut screen = main_menu();
    app.tones.start_music();
    prevent_quit();

    loop {
        if is_quit_requested() {
            break;
        }
        clear_background(BLACK);

        let mut next_screen: Option<Screen> = None;
        let mut quit = false;
        match &mut screen {
            Screen::MainMenu(buttons) => {
                draw_background();
                draw_centered("Snake Game", screen_width() / 2.0, 100.0, 72, TEXT_COLOR);
                let choice = buttons.update();
                buttons.draw();
                match choice {
                    Some(MenuChoice::Start) => next_screen = Some(Screen::NameEntry(NameEntry::new())),
                    Some(MenuChoice::Leaderboard) => next_screen = Some(Screen::Leaderboard(LeaderboardScreen::new())),
                    Some(MenuChoice::Settings) => next_screen = Some(Screen::Settings(SettingsScreen::new(app.settings))),
                    Some(MenuChoice::HowTo) => next_screen = Some(Screen::HowTo(HowToScreen::new())),
                    Some(MenuChoice::Quit) => quit = true,
                    None => {}
                }
            }

            Screen::NameEntry(entry) => {
                let result = entry.update();
                entry.draw();
                match result {
                    NameEntryResult::Pending => {}
                    NameEntryResult::Back => next_screen = Some(main_menu()),
                    NameEntryResult::Confirmed(player) => next_screen = Some(app.start_session(player)?),
                }
            }

            Screen::Playing { session, pause_menu } => {
                let time = now();
                for intent in poll_intents() {
                    session.handle(intent, time, &mut app.tones);
                }
                session.frame(time, &mut app.tones)?;
                session.render(&mut canvas);

                if let Some(label) = session.countdown_label(time) {
                    draw_centered(&label, screen_width() / 2.0, screen_height() / 2.0, 96, TEXT_COLOR);
                }

                if session.phase() == Phase::Paused {
                    draw_dim_overlay();
                    draw_centered("Paused", screen_width() / 2.0, screen_height() / 2.0 - 80.0, 64, TEXT_COLOR);
                    let choice = if is_key_pressed(KeyCode::M) {
                        Some(PauseChoice::MainMenu)
                    } else {
                        pause_menu.update()
                    };
                    pause_menu.draw();
                    match choice {
                        Some(PauseChoice::Resume) => session.resume(time, &mut app.tones),
                        Some(PauseChoice::MainMenu) => {
                            session.abandon();
                            next_screen = Some(main_menu());
                        }
                        None => {}
                    }
                }

                if let Some(outcome) = session.outcome() {
                    let (player, score) = (outcome.player.clone(), outcome.score);
                    app.record_score(&player, score);
                    next_screen = Some(game_over(player, score));
                }
            }

            Screen::GameOver { player, score, buttons } => {
                draw_background();
                let cx = screen_width() / 2.0;
                let cy = screen_height() / 2.0;
                draw_centered("Game Over", cx, cy - 100.0, 72, RED);
                draw_centered(&format!("Score: {score}"), cx, cy - 30.0, 40, TEXT_COLOR);
                let choice = buttons.update();
                buttons.draw();
                match choice {
                    Some(GameOverChoice::MainMenu) => next_screen = Some(main_menu()),
                    Some(GameOverChoice::Restart) => next_screen = Some(app.start_session(player.clone())?),
                    Some(GameOverChoice::Exit) => quit = true,
                    None => {}
                }
            }

            Screen::Leaderboard(view) => {
                let action = view.update();
                view.draw(&app.leaderboard);
                match action {
                    Some(LeaderboardAction::Clear) => {
                        info!("leaderboard cleared");
                        app.leaderboard.clear();
                        if let Err(err) = app.leaderboard.save(&app.store) {
                            warn!("could not save leaderboard: {err:#}");
                        }
                    }
                    Some(LeaderboardAction::Back) => next_screen = Some(main_menu()),
                    None => {}
                }
            }

            Screen::Settings(view) => {
                let result = view.update();
                view.draw();
                match result {
                    SettingsResult::Pending => {}
                    SettingsResult::Changed(settings) => app.apply_settings(settings),
                    SettingsResult::Back => next_screen = Some(main_menu()),
                }
            }

            Screen::HowTo(view) => {
                let back = view.update();
                view.draw();
                if back {
                    next_screen = Some(main_menu());
                }
            }
        }

        if quit {
            break;
        }
        if let Some(ns) = next_screen {
            debug!("screen change");
            if matches!(ns, Screen::MainMenu(_)) {
                app.tones.start_music();
            }
            screen = ns;
        }

        next_frame().await;
    }

    app.flush();
    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_waits_for_begin() {
        let session = new_session(&Settings::default(), "Ann".to_string()).unwrap();

        assert_eq!(session.player(), "Ann");
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.score(), 0);
    }
}
