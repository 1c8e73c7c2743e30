use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use typewriter::{
    clock::TickOutcome,
    runtime::{dispatch, Dispatched, Runner, TestEventSource, TypewriterEvent},
    TestConfig, TestState, Typewriter,
};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn key(code: KeyCode) -> TypewriterEvent {
    TypewriterEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn typed(text: &str) -> Vec<TypewriterEvent> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn ticks(n: usize) -> Vec<TypewriterEvent> {
    vec![TypewriterEvent::Tick; n]
}

// Queue everything up front, close the channel and let the runner drain it.
fn drive(tw: &mut Typewriter, events: Vec<TypewriterEvent>) -> Vec<Dispatched> {
    let (tx, rx) = mpsc::channel();
    for ev in events {
        tx.send(ev).unwrap();
    }
    drop(tx);

    let runner = Runner::new(TestEventSource::new(rx));
    let mut out = Vec::new();
    while let Some(ev) = runner.step(None) {
        out.push(dispatch(tw, &ev));
    }
    out
}

#[test]
fn headless_first_word_is_completed() {
    let mut tw = Typewriter::with_words(TestConfig::words(3), words(&["the", "of", "and"])).unwrap();

    drive(&mut tw, typed("the "));

    assert_eq!(tw.matcher().completed(), ["the"]);
    assert_eq!(tw.matcher().current_index(), 1);
    assert_eq!(tw.state(), TestState::Running);
}

#[test]
fn headless_countdown_runs_out() {
    let mut tw = Typewriter::with_words(TestConfig::timed(5), words(&["the", "of"])).unwrap();

    let mut events = typed("t");
    events.extend(ticks(5));
    let out = drive(&mut tw, events);

    assert_eq!(out.last(), Some(&Dispatched::Tick(TickOutcome::Finished)));
    assert_eq!(tw.clock().time_remaining(), 0);
    assert_eq!(tw.state(), TestState::Finished);
    assert!(tw.clock().interval().is_none());
    assert!(tw.report().is_some());
}

#[test]
fn headless_progress_tracks_elapsed_share() {
    let mut tw = Typewriter::with_words(TestConfig::timed(100), words(&["the"])).unwrap();

    let mut events = typed("t");
    events.extend(ticks(25));
    drive(&mut tw, events);

    assert_eq!(tw.view().progress, 25.0);
}

#[test]
fn headless_warning_in_last_ten_seconds() {
    let mut tw = Typewriter::with_words(TestConfig::timed(15), words(&["the"])).unwrap();

    let mut events = typed("t");
    events.extend(ticks(4));
    drive(&mut tw, events);
    assert_eq!(tw.clock().time_remaining(), 11);
    assert!(!tw.view().is_warning);

    drive(&mut tw, ticks(1));
    assert_eq!(tw.clock().time_remaining(), 10);
    assert!(tw.view().is_warning);
}

#[test]
fn headless_warning_starts_at_ten_seconds_left() {
    for (elapsed, remaining, warning) in [(19, 11, false), (20, 10, true), (29, 1, true)] {
        let mut tw = Typewriter::with_words(TestConfig::timed(30), words(&["the"])).unwrap();

        let mut events = typed("t");
        events.extend(ticks(elapsed));
        drive(&mut tw, events);

        assert_eq!(tw.clock().time_remaining(), remaining);
        assert_eq!(tw.view().is_warning, warning, "{remaining}s left");
    }
}

#[test]
fn headless_warning_can_be_switched_off() {
    let mut config = TestConfig::timed(15);
    config.timer_settings.show_warnings = false;
    let mut tw = Typewriter::with_words(config, words(&["the"])).unwrap();

    let mut events = typed("t");
    events.extend(ticks(6));
    drive(&mut tw, events);

    assert!(tw.clock().is_warning());
    assert!(!tw.view().is_warning);
}

#[test]
fn headless_final_statistics() {
    let mut tw = Typewriter::with_words(TestConfig::timed(60), words(&["abcde", "fghij"])).unwrap();

    // 10 characters, two of them wrong
    let mut events = typed("abcxe fghiz");
    events.extend(ticks(60));
    drive(&mut tw, events);

    let report = tw.report().expect("finished test has a report");
    assert_eq!(report.total_chars, 10);
    assert_eq!(report.correct_chars, 8);
    assert_eq!(report.incorrect_chars, 2);
    assert_eq!(report.elapsed_seconds, 60);
    assert_eq!(report.wpm, 2);
    assert_eq!(report.accuracy_pct, 80);
    assert_eq!(report.wpm_over_time.len(), 60);
}

#[test]
fn headless_word_target_finishes_early() {
    let mut tw = Typewriter::with_words(TestConfig::words(3), words(&["the", "of", "and"])).unwrap();

    let mut events = typed("the ");
    events.extend(ticks(2));
    events.extend(typed("of and "));
    drive(&mut tw, events);

    assert_eq!(tw.state(), TestState::Finished);
    assert_eq!(tw.clock().elapsed(), 2);

    let report = tw.report().unwrap();
    assert_eq!(report.total_words, 3);
    assert_eq!(report.correct_words, 3);
    assert_eq!(report.config.word_count, Some(3));
    assert_eq!(report.config.duration, None);
}

#[test]
fn headless_report_serializes_to_json() {
    let mut tw = Typewriter::with_words(TestConfig::words(1), words(&["hola"])).unwrap();
    drive(&mut tw, typed("hola "));

    let json = serde_json::to_value(tw.report().unwrap()).unwrap();
    assert_eq!(json["correct_words"], 1);
    assert_eq!(json["config"]["language"], "spanish");
    assert!(json["config"].get("duration").is_none());
}

#[test]
fn headless_escape_resets_everything() {
    let mut tw = Typewriter::with_words(TestConfig::timed(30), words(&["the", "of"])).unwrap();

    let mut events = typed("the o");
    events.extend(ticks(3));
    events.push(key(KeyCode::Esc));
    drive(&mut tw, events);

    assert_eq!(tw.state(), TestState::Waiting);
    assert_eq!(tw.matcher().current_index(), 0);
    assert_eq!(tw.matcher().current_input(), "");
    assert_eq!(tw.clock().time_remaining(), 30);
    assert!(tw.clock().interval().is_none());
    assert!(tw.stats().samples().is_empty());
    assert_eq!(tw.matcher().words(), ["the", "of"]);
}

#[test]
fn headless_paused_test_ignores_ticks_and_keys() {
    let mut tw = Typewriter::with_words(TestConfig::timed(30), words(&["the", "of"])).unwrap();

    let mut events = typed("t");
    events.extend(ticks(2));
    drive(&mut tw, events);

    assert!(tw.pause());
    let out = drive(&mut tw, [typed("h"), ticks(3)].concat());
    assert!(out
        .iter()
        .all(|d| matches!(d, Dispatched::Tick(TickOutcome::Ignored) | Dispatched::Key(_))));
    assert_eq!(tw.matcher().current_input(), "t");
    assert_eq!(tw.clock().elapsed(), 2);

    assert!(tw.resume());
    drive(&mut tw, [typed("h"), ticks(1)].concat());
    assert_eq!(tw.matcher().current_input(), "th");
    assert_eq!(tw.clock().elapsed(), 3);
}

#[test]
fn headless_time_test_never_runs_dry() {
    let mut tw = Typewriter::seeded(TestConfig::timed(600), 7).unwrap();

    // submit 200 words regardless of correctness
    let events = (0..200).flat_map(|_| typed("a ")).collect();
    drive(&mut tw, events);

    assert_eq!(tw.matcher().current_index(), 200);
    assert!(tw.matcher().remaining_words() >= 30);
    assert_eq!(tw.rows().rowed_count(), tw.matcher().words().len());
    assert_eq!(tw.view().rows.len(), 3);
}
