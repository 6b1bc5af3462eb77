//! End-to-end session tests: lifecycle, wait mode, pause/resume, and
//! terminal states, driven through a mock clock.

use clef::config::GameOptions;
use clef::model::{Note, PitchClass};
use clef::play::{EndReason, GameSession, JudgeOutcome, SessionPhase};
use clef::traits::time::MockTimeProvider;

fn options() -> GameOptions {
    GameOptions {
        hit_window_good_ms: 70.0,
        pre_delay_seconds: 0.0,
        ..Default::default()
    }
}

fn arpeggio() -> Vec<Note> {
    vec![
        Note::new(60, 1.0, 0.5), // C
        Note::new(64, 2.0, 0.5), // E
        Note::new(67, 3.0, 0.5), // G
    ]
}

fn running_session(opts: GameOptions, notes: Vec<Note>) -> (MockTimeProvider, GameSession<MockTimeProvider>) {
    let tp = MockTimeProvider::new();
    let mut session = GameSession::new(opts, tp.clone());
    session.load(notes).unwrap();
    session.start().unwrap();
    (tp, session)
}

#[test]
fn clean_run_finishes_with_full_accuracy() {
    let (tp, mut session) = running_session(options(), arpeggio());

    for (pc, t) in [(PitchClass::C, 1.0), (PitchClass::E, 2.0), (PitchClass::G, 3.0)] {
        tp.set_time(t);
        session.tick();
        let fx = session.key_pressed(pc).unwrap();
        assert_eq!(fx.judgment.unwrap().outcome, JudgeOutcome::Perfect);
    }

    tp.set_time(3.6);
    let fx = session.tick();
    assert!(fx.song_finished);
    assert_eq!(session.end_reason(), Some(EndReason::SongFinished));

    let result = session.result().unwrap();
    assert!(result.cleared);
    assert_eq!(result.perfect_count, 3);
    assert_eq!(result.miss_count, 0);
    assert_eq!(result.max_combo, 3);
    assert!((result.accuracy - 100.0).abs() < 1e-9);
}

#[test]
fn pre_delay_applies_only_to_the_fresh_start() {
    let mut opts = options();
    opts.pre_delay_seconds = 2.0;
    let (tp, mut session) = running_session(opts, arpeggio());

    // Within the pre-delay the song clock holds at zero and nothing ages out.
    tp.set_time(1.5);
    let fx = session.tick();
    assert_eq!(fx.now, 0.0);
    assert!(fx.missed.is_empty());

    // 2.0s of wall time have elapsed at provider time 3.2 -> song time 1.2.
    tp.set_time(3.2);
    assert!((session.tick().now - 1.2).abs() < 1e-9);

    // Resume after a pause starts immediately, with no second pre-delay.
    session.pause();
    tp.set_time(10.0);
    session.start().unwrap();
    tp.set_time(10.5);
    assert!((session.tick().now - 1.7).abs() < 1e-9);
}

#[test]
fn pause_suspends_judgment_and_sweep() {
    let (tp, mut session) = running_session(options(), arpeggio());
    tp.set_time(0.9);
    session.pause();

    // No input is accepted and nothing becomes a miss while paused.
    tp.set_time(20.0);
    assert!(session.key_pressed(PitchClass::C).is_none());
    assert!(session.tick().missed.is_empty());

    // The first note is still hittable right after resume.
    session.start().unwrap();
    tp.set_time(20.1);
    let fx = session.key_pressed(PitchClass::C).unwrap();
    assert_eq!(fx.judgment.unwrap().note_index, 0);
}

#[test]
fn misses_drain_health_until_game_over() {
    let mut opts = options();
    opts.score_policy.initial_health = 8;
    let notes: Vec<Note> = (0..5).map(|i| Note::new(60, 1.0 + i as f64, 0.25)).collect();
    let (tp, mut session) = running_session(opts, notes);

    tp.set_time(2.5); // notes at 1.0 and 2.0 are overdue
    let fx = session.tick();
    assert_eq!(fx.missed.len(), 2);
    assert!(fx.game_over);
    assert_eq!(session.phase(), SessionPhase::Over);
    assert_eq!(session.end_reason(), Some(EndReason::GameOver));
    assert!(!session.result().unwrap().cleared);

    // Terminal: further ticks and presses change nothing.
    tp.set_time(10.0);
    assert!(session.tick().missed.is_empty());
    assert!(session.key_pressed(PitchClass::C).is_none());
}

#[test]
fn no_death_mode_survives_zero_health() {
    let mut opts = options();
    opts.score_policy.initial_health = 8;
    opts.no_death_mode = true;
    let (tp, mut session) = running_session(opts, arpeggio());

    tp.set_time(2.5);
    let fx = session.tick();
    assert_eq!(fx.missed.len(), 2);
    assert!(!fx.game_over);
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(fx.score.unwrap().health, 0);

    // Play continues; the last note is still winnable.
    tp.set_time(3.0);
    let fx = session.key_pressed(PitchClass::G).unwrap();
    assert_eq!(fx.judgment.unwrap().outcome, JudgeOutcome::Perfect);
}

#[test]
fn wait_mode_freeze_and_release() {
    let mut opts = options();
    opts.wait_mode = true;
    let (tp, mut session) = running_session(opts, arpeggio());

    tp.set_time(1.2); // the C at 1.0 ages out
    let fx = session.tick();
    assert_eq!(fx.wait_engaged.unwrap().pitch_class, PitchClass::C);
    assert_eq!(session.phase(), SessionPhase::Waiting);
    assert_eq!(session.hud().waiting_on, Some("C"));
    let frozen = session.current_time();

    // Time does not progress and the E at 2.0 never ages out while frozen.
    tp.set_time(50.0);
    assert!(session.tick().missed.is_empty());
    assert!((session.current_time() - frozen).abs() < 1e-9);

    // A non-matching pitch class is swallowed; the matching one resumes.
    assert!(session.key_pressed(PitchClass::G).is_none());
    let fx = session.key_pressed(PitchClass::C).unwrap();
    assert!(fx.resumed);
    assert_eq!(session.phase(), SessionPhase::Running);

    // Song time carries on from the freeze point: the E is still ahead.
    tp.set_time(50.8); // frozen at 1.2 -> song time 2.0
    let fx = session.key_pressed(PitchClass::E).unwrap();
    assert_eq!(fx.judgment.unwrap().outcome, JudgeOutcome::Perfect);
}

#[test]
fn wait_release_matches_pitch_class_across_octaves() {
    let mut opts = options();
    opts.wait_mode = true;
    // Missed note is C4 (60); the player answers with C5 (72).
    let (tp, mut session) = running_session(opts, arpeggio());
    tp.set_time(1.2);
    session.tick();
    assert_eq!(session.phase(), SessionPhase::Waiting);

    let fx = session.key_pressed(Note::new(72, 0.0, 0.0).pitch_class).unwrap();
    assert!(fx.resumed);
}

#[test]
fn disabling_wait_mode_mid_freeze_resumes_playback() {
    let mut opts = options();
    opts.wait_mode = true;
    let (tp, mut session) = running_session(opts, arpeggio());
    tp.set_time(1.2);
    session.tick();
    assert_eq!(session.phase(), SessionPhase::Waiting);

    session.set_wait_mode(false);
    assert_eq!(session.phase(), SessionPhase::Running);

    // With the mode off, later misses score but no longer freeze.
    tp.set_time(5.0);
    let fx = session.tick();
    assert_eq!(fx.missed.len(), 2);
    assert!(fx.wait_engaged.is_none());
}

#[test]
fn restart_after_game_over_plays_again() {
    let mut opts = options();
    opts.score_policy.initial_health = 4;
    let (tp, mut session) = running_session(opts, arpeggio());
    tp.set_time(10.0);
    session.tick();
    assert_eq!(session.end_reason(), Some(EndReason::GameOver));

    session.restart();
    assert_eq!(session.phase(), SessionPhase::Initialized);
    assert_eq!(session.current_time(), 0.0);
    assert!(session.statuses().iter().all(|s| s.is_unjudged()));

    session.start().unwrap();
    tp.set_time(11.0);
    let fx = session.key_pressed(PitchClass::C).unwrap();
    assert_eq!(fx.judgment.unwrap().note_index, 0);
    assert_eq!(fx.score.unwrap().snapshot.combo, 1);
}

#[test]
fn media_end_is_ignored_unless_natural() {
    let (tp, mut session) = running_session(options(), arpeggio());

    tp.set_time(2.0);
    assert!(!session.handle_media_end()); // mid-song glitch
    assert_eq!(session.phase(), SessionPhase::Running);

    session.pause();
    tp.set_time(3.5);
    assert!(!session.handle_media_end()); // raced the explicit pause
    session.start().unwrap();

    tp.set_time(5.0); // resumed from 2.0 at 3.5 -> song time 3.5, the last note end
    assert!(session.handle_media_end());
    assert_eq!(session.end_reason(), Some(EndReason::SongFinished));
}

#[test]
fn hud_snapshot_tracks_play_state() {
    let (tp, mut session) = running_session(options(), arpeggio());
    tp.set_time(1.0);
    session.key_pressed(PitchClass::C).unwrap();

    let hud = session.hud();
    assert_eq!(hud.phase, SessionPhase::Running);
    assert_eq!(hud.score.perfect_count, 1);
    assert_eq!(hud.score.combo, 1);
    assert!((hud.accuracy - 100.0).abs() < 1e-9);
    assert_eq!(hud.waiting_on, None);
}
