use std::time::Duration;

use snake_arcade::game::audio::{CueLog, Silent};
use snake_arcade::game::{Cue, DeathCause, Grid, Intent, Phase, Session};
use snake_arcade::persistence::{FileStore, Leaderboard, Settings};

const COUNTDOWN: Duration = Duration::from_secs(4);

fn started_session(seed: u64) -> (Session, CueLog, Duration) {
    let mut session = Session::new(Grid::standard(), &Settings::default(), "Runner", seed).unwrap();
    let mut audio = CueLog::default();
    session.begin(Duration::ZERO, &mut audio);
    session.frame(COUNTDOWN, &mut audio).unwrap();
    assert_eq!(session.phase(), Phase::Running);
    (session, audio, COUNTDOWN)
}

#[test]
fn test_straight_run_ends_at_the_wall() {
    let (mut session, mut audio, mut now) = started_session(7);
    let interval = session.tick_rate().interval();

    for _ in 0..1000 {
        if session.is_over() {
            break;
        }
        now += interval;
        session.frame(now, &mut audio).unwrap();
    }

    // Centre column 400 to the right edge at 800, one cell per tick.
    assert_eq!(session.ticks(), 20);
    let outcome = session.outcome().expect("session should have ended");
    assert_eq!(outcome.cause, DeathCause::Wall);
    assert_eq!(outcome.player, "Runner");
    assert_eq!(outcome.score, session.score());
    assert_eq!(audio.count(Cue::Fail), 1);

    // A finished session stays put.
    session.frame(now + interval * 10, &mut audio).unwrap();
    assert_eq!(session.ticks(), 20);
    assert_eq!(audio.count(Cue::Fail), 1);
}

#[test]
fn test_frames_between_ticks_do_nothing() {
    let (mut session, mut audio, now) = started_session(3);
    let interval = session.tick_rate().interval();

    session.frame(now + interval / 2, &mut audio).unwrap();
    assert_eq!(session.ticks(), 0);
    session.frame(now + interval, &mut audio).unwrap();
    assert_eq!(session.ticks(), 1);
}

#[test]
fn test_pause_icon_click_pauses_and_p_resumes() {
    let (mut session, mut audio, mut now) = started_session(11);
    let interval = session.tick_rate().interval();
    let pause = session.grid().pause_rect();

    session.handle(
        Intent::Pointer {
            x: pause.x + pause.w / 2.0,
            y: pause.y + pause.h / 2.0,
        },
        now,
        &mut audio,
    );
    now += interval;
    session.frame(now, &mut audio).unwrap();
    assert_eq!(session.phase(), Phase::Paused);
    let head = session.snake().head();

    now += interval * 5;
    session.frame(now, &mut audio).unwrap();
    assert_eq!(session.snake().head(), head);

    session.handle(Intent::TogglePause, now, &mut audio);
    assert!(matches!(session.phase(), Phase::Countdown { .. }));
    assert_eq!(audio.count(Cue::Countdown), 2);

    now += COUNTDOWN;
    session.frame(now, &mut audio).unwrap();
    assert_eq!(session.phase(), Phase::Running);
}

#[test]
fn test_scores_and_settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let store = FileStore::new(dir.path());
    let settings = Settings::default().with_volume(0.8).with_speed(0.5);
    settings.save(&store).unwrap();
    let mut board = Leaderboard::load(&store);
    assert!(board.is_empty());
    board.add_score("Dana", 120);
    board.add_score("dana", 60);
    board.add_score("Eli", 200);
    board.save(&store).unwrap();

    let reopened = FileStore::new(dir.path());
    assert_eq!(Settings::load(&reopened), settings);
    let board = Leaderboard::load(&reopened);
    let names: Vec<_> = board.entries().iter().map(|e| (e.username.as_str(), e.score)).collect();
    assert_eq!(names, vec![("Eli", 200), ("Dana", 120)]);

    let mut session = Session::new(Grid::standard(), &Settings::load(&reopened), "Dana", 1).unwrap();
    session.begin(Duration::ZERO, &mut Silent);
    assert_eq!(session.tick_rate().fps(), 20);
    assert_eq!(session.countdown_label(Duration::ZERO).as_deref(), Some("3"));
}
