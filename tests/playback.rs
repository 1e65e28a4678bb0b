mod common;

use std::time::{Duration, Instant};

use ascii_dialogue::engine::boxes::BoxLayout;
use ascii_dialogue::engine::{Pacing, Playback, PlaybackState, Tick};
use ascii_dialogue::script::{NamePosition, TextPosition};
use ascii_dialogue::types::TerminalContract;

use common::{RecordingSurface, RecordingTones, instant, is_blank, script, textbox_lines, visible_text};

fn run_frames(
    playback: &mut Playback,
    surface: &mut RecordingSurface,
    tones: &mut RecordingTones,
    n: usize,
) -> Vec<Tick> {
    (0..n).map(|_| playback.frame(surface, tones).unwrap()).collect()
}

#[test]
fn hi_is_typed_blipped_held_and_advanced() {
    let mut playback = Playback::new(
        script(r#"[{"name": "Mike", "text": "Hi!", "mood": "talking", "autoplay": false}]"#),
        instant(),
    );
    let mut surface = RecordingSurface::new().press_on(&[4]);
    let mut tones = RecordingTones::default();

    let ticks = run_frames(&mut playback, &mut surface, &mut tones, 3);
    assert_eq!(
        ticks,
        [
            Tick::Typed { ch: 'H', blip: true },
            Tick::Typed { ch: 'i', blip: true },
            Tick::Typed { ch: '!', blip: false },
        ]
    );
    let shown: Vec<String> = surface.presented().iter().map(visible_text).collect();
    assert_eq!(shown, ["H", "Hi", "Hi!"]);
    assert_eq!(*tones.played.borrow(), [440.0, 440.0]);
    assert_eq!(playback.state(), PlaybackState::Revealed);

    // Waiting for input: the blinker is on.
    assert_eq!(playback.frame(&mut surface, &mut tones).unwrap(), Tick::Holding);
    assert!(playback.blinker().is_active());
    assert_eq!(visible_text(surface.last()), "Hi!");

    // Frame 4 has the key press.
    assert_eq!(playback.frame(&mut surface, &mut tones).unwrap(), Tick::Advanced);
    assert_eq!(playback.cursor().line_index, 1);
    assert!(!playback.blinker().is_visible());
    assert!(!playback.blinker().is_active());

    for _ in 0..3 {
        assert_eq!(playback.frame(&mut surface, &mut tones).unwrap(), Tick::Finished);
        assert!(is_blank(surface.last()));
    }
    assert_eq!(playback.state(), PlaybackState::Finished);
    assert_eq!(tones.count(), 2);
}

#[test]
fn manual_line_holds_until_pressed() {
    let mut playback = Playback::new(script(r#"[{"name": "Mike", "text": "ok"}]"#), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    run_frames(&mut playback, &mut surface, &mut tones, 2);
    let ticks = run_frames(&mut playback, &mut surface, &mut tones, 20);
    assert!(ticks.iter().all(|t| *t == Tick::Holding));
    assert_eq!(playback.cursor().line_index, 0);
}

#[test]
fn every_char_is_revealed_once_in_order() {
    let text = "Héllo, wörld_1";
    let mut playback = Playback::new(
        script(&format!(r#"[{{"name": "Anna", "text": "{text}"}}]"#)),
        instant(),
    );
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    let mut typed = String::new();
    while playback.state() == PlaybackState::Revealing {
        match playback.frame(&mut surface, &mut tones).unwrap() {
            Tick::Typed { ch, .. } => typed.push(ch),
            other => panic!("unexpected {other:?} while revealing"),
        }
    }
    assert_eq!(typed, text);
    assert_eq!(surface.presented().len(), text.chars().count());
    // Everything but ',' and ' ' blips.
    assert_eq!(tones.count(), text.chars().count() - 2);
    assert!(tones.played.borrow().iter().all(|&hz| hz == 660.0));
}

#[test]
fn press_mid_reveal_skips_to_full_text() {
    let mut playback = Playback::new(script(r#"[{"name": "Mike", "text": "Hello there"}]"#), instant());
    let mut surface = RecordingSurface::new().press_on(&[1]);
    let mut tones = RecordingTones::default();

    let ticks = run_frames(&mut playback, &mut surface, &mut tones, 3);
    assert_eq!(ticks[0], Tick::Typed { ch: 'H', blip: true });
    assert_eq!(ticks[1], Tick::Typed { ch: 'e', blip: true });
    assert_eq!(ticks[2], Tick::Holding);
    assert_eq!(playback.cursor().char_index, 1);
    assert!(playback.cursor().text_revealed);
    assert_eq!(visible_text(surface.last()), "Hello there");
    assert_eq!(tones.count(), 2);
}

#[test]
fn autoplay_ignores_skip_and_advances_by_itself() {
    let dialogue = r#"[
        {"name": "Mike", "text": "abc", "autoplay": true},
        {"name": "Anna", "text": "next"}
    ]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new().press_on(&[0, 1]);
    let mut tones = RecordingTones::default();

    let ticks = run_frames(&mut playback, &mut surface, &mut tones, 4);
    assert_eq!(
        ticks,
        [
            Tick::Typed { ch: 'a', blip: true },
            Tick::Typed { ch: 'b', blip: true },
            Tick::Typed { ch: 'c', blip: true },
            Tick::Advanced,
        ]
    );
    // Autoplay lines never ask for input.
    assert!(!playback.blinker().is_active());
    assert_eq!(playback.cursor().line_index, 1);
    assert_eq!(playback.state(), PlaybackState::Revealing);
}

#[test]
fn autoplay_pause_delays_advance() {
    let pause = Duration::from_millis(30);
    let dialogue = r#"[{"name": "Mike", "text": "x", "autoplay": true, "pause": 30}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    playback.frame(&mut surface, &mut tones).unwrap();
    let started = Instant::now();
    assert_eq!(playback.frame(&mut surface, &mut tones).unwrap(), Tick::Advanced);
    assert!(started.elapsed() >= pause);
}

#[test]
fn autoplay_without_pause_advances_on_the_next_frame() {
    let dialogue = r#"[{"name": "Mike", "mood": "idle", "autoplay": true},
                       {"name": "Mike", "mood": "idle", "autoplay": true}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    let ticks = run_frames(&mut playback, &mut surface, &mut tones, 3);
    assert_eq!(ticks, [Tick::Advanced, Tick::Advanced, Tick::Finished]);
}

#[test]
fn idle_line_shows_name_only_and_waits_for_input() {
    let dialogue = r#"[{"name": "Anna", "text": "unused", "mood": "idle"}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new().press_on(&[5]);
    let mut tones = RecordingTones::default();

    assert_eq!(playback.state(), PlaybackState::Revealed);
    let ticks = run_frames(&mut playback, &mut surface, &mut tones, 6);
    assert!(ticks[..5].iter().all(|t| *t == Tick::Holding));
    assert_eq!(ticks[5], Tick::Advanced);

    assert_eq!(tones.count(), 0);
    let first = &surface.presented()[0];
    assert!(textbox_lines(first, TextPosition::Bottom).iter().all(|l| l.is_empty()));
    assert!(first.row_text(16).contains("Anna"));
    // No "press to continue" cue on static beats.
    assert!(!playback.blinker().is_active());
}

#[test]
fn long_text_scrolls_three_lines_at_a_time() {
    let dialogue = r#"[{"name": "Mike", "text": "a\nb\nc\nd"}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    run_frames(&mut playback, &mut surface, &mut tones, 7);
    let shown: Vec<String> = surface.presented().iter().map(visible_text).collect();
    assert_eq!(shown[4], "a\nb\nc");
    // The third newline was typed but its (empty) line is not visible yet.
    assert_eq!(shown[5], "a\nb\nc");
    assert_eq!(shown[6], "b\nc\nd");
    assert_eq!(playback.cursor().lines_drawn, 3);
    assert_eq!(playback.state(), PlaybackState::Revealed);
}

#[test]
fn skipping_long_text_shows_its_last_lines() {
    let dialogue = r#"[{"name": "Mike", "text": "1\n2\n3\n4\n5"}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new().press_on(&[0]);
    let mut tones = RecordingTones::default();

    run_frames(&mut playback, &mut surface, &mut tones, 2);
    assert_eq!(visible_text(surface.last()), "3\n4\n5");
}

#[test]
fn top_textbox_and_right_name_box() {
    let dialogue = r#"[{"name": "Anna", "text": "hey", "namePos": "right", "textPos": "top"}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    run_frames(&mut playback, &mut surface, &mut tones, 3);
    let frame = surface.last();
    assert_eq!(textbox_lines(frame, TextPosition::Top)[0], "hey");

    let layout = BoxLayout::compute(TerminalContract::default(), TextPosition::Top, NamePosition::Right, 4);
    let namebox = layout.namebox.unwrap();
    let name_row = frame.row_text(namebox.y + 1);
    let col = name_row.find("Anna").expect("name drawn");
    assert!(col > 40, "name should sit on the right: {name_row:?}");
}

#[test]
fn hidden_name_draws_no_name_box() {
    let dialogue = r#"[{"name": "Anna", "text": "hey", "namePos": "hidden"}]"#;
    let mut playback = Playback::new(script(dialogue), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    run_frames(&mut playback, &mut surface, &mut tones, 1);
    let frame = surface.last();
    assert!((0..frame.contract().height).all(|y| !frame.row_text(y).contains("Anna")));
}

#[test]
fn blinker_square_appears_while_waiting() {
    let pacing = Pacing {
        char_delay: Duration::ZERO,
        blink_period: Duration::from_millis(2),
    };
    let mut playback = Playback::new(script(r#"[{"name": "Mike", "text": "k"}]"#), pacing);
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();
    playback.frame(&mut surface, &mut tones).unwrap();

    let layout = BoxLayout::compute(TerminalContract::default(), TextPosition::Bottom, NamePosition::Left, 4);
    let started = Instant::now();
    let mut seen = false;
    while !seen && started.elapsed() < Duration::from_secs(2) {
        playback.frame(&mut surface, &mut tones).unwrap();
        seen = surface
            .last()
            .cell(layout.blinker.x, layout.blinker.y)
            .is_some_and(|c| c.style.bg.is_some());
        std::thread::sleep(Duration::from_millis(1));
    }
    assert!(seen, "blinker never became visible");
}

#[test]
fn empty_script_is_finished_from_the_start() {
    let mut playback = Playback::new(script("[]"), instant());
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    assert!(playback.is_finished());
    assert_eq!(playback.frame(&mut surface, &mut tones).unwrap(), Tick::Finished);
    assert!(is_blank(surface.last()));
}

#[test]
fn typing_respects_char_delay() {
    let pacing = Pacing {
        char_delay: Duration::from_millis(5),
        ..instant()
    };
    let mut playback = Playback::new(script(r#"[{"name": "Mike", "text": "abcd"}]"#), pacing);
    let mut surface = RecordingSurface::new();
    let mut tones = RecordingTones::default();

    let started = Instant::now();
    run_frames(&mut playback, &mut surface, &mut tones, 4);
    assert!(started.elapsed() >= Duration::from_millis(20));
}
