//! End-to-end replays through files on disk.

use std::io::Write;

use invite_core::{InteractionKind, Length};
use invite_replay::{Outcome, Replay, ReplayConfig, ReplayError, Script};
use tempfile::NamedTempFile;

fn file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

fn replay(config: &ReplayConfig) -> Replay {
    let editor_config = config.editor_config().expect("editor config");
    Replay::new(editor_config, config.layout()).expect("replay")
}

#[test]
fn demo_script_replays_cleanly() {
    let script = Script::from_json(include_str!("../scripts/demo.json")).expect("demo script");
    let mut replay = replay(&ReplayConfig::new("demo.json"));

    let outcome = replay.run(&script, true).expect("strict run");
    assert_eq!(
        outcome,
        Outcome {
            applied: script.steps.len(),
            skipped: 0
        }
    );

    let editor = replay.editor();
    assert_eq!(editor.slide_indicator(), "Editing: Slide 3");
    let counts: Vec<usize> = editor
        .cards()
        .iter()
        .map(|c| editor.registry().count(c.id))
        .collect();
    assert_eq!(counts, vec![2, 1, 1]);

    let first = editor.cards().id(0).expect("card 1");
    let moved = editor
        .registry()
        .list(first)
        .find(|o| o.content == "Reception to follow")
        .expect("added overlay");
    assert!(matches!(moved.geometry.top, Length::Px(_)));

    let second = editor.cards().id(1).expect("card 2");
    assert!(editor.cards().get(second).and_then(|c| c.background.as_ref()).is_some());
    assert_eq!(replay.count(InteractionKind::Reset), 1);
}

#[test]
fn script_and_config_load_from_files() {
    let script = file(r#"{"steps": [{"action": "add_text", "text": "Hi"}]}"#);
    let config = file(
        r#"{
            "card_count": 2,
            "seed_texts": ["One", "Two"],
            "placeholder_text": "Type here"
        }"#,
    );

    let mut replay_config = ReplayConfig::new(script.path());
    replay_config.config = Some(config.path().to_path_buf());

    let mut replay = replay(&replay_config);
    let script = Script::load(&replay_config.script).expect("load script");
    replay.run(&script, true).expect("run");

    let editor = replay.editor();
    assert_eq!(editor.cards().len(), 2);
    let previews: Vec<String> = editor.side_list().into_iter().map(|e| e.preview).collect();
    assert_eq!(previews, vec!["One".to_string(), "Hi".to_string()]);
}

#[test]
fn invalid_config_file_is_rejected() {
    let config = file(r#"{"card_count": 2}"#);
    let mut replay_config = ReplayConfig::new("unused.json");
    replay_config.config = Some(config.path().to_path_buf());

    assert!(matches!(
        replay_config.editor_config(),
        Err(ReplayError::Editor(_))
    ));
}

#[test]
fn missing_script_file_reports_path() {
    let err = Script::load(std::path::Path::new("/nonexistent/script.json")).expect_err("missing");
    assert!(matches!(err, ReplayError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/script.json"));
}

#[test]
fn strict_mode_stops_at_first_bad_step() {
    let script = Script::from_json(
        r#"{"steps": [
            {"action": "delete", "overlay": 0},
            {"action": "delete", "overlay": 0},
            {"action": "add_text"}
        ]}"#,
    )
    .expect("script");

    let mut lenient = replay(&ReplayConfig::new("s.json"));
    let outcome = lenient.run(&script, false).expect("lenient");
    assert_eq!(outcome, Outcome { applied: 2, skipped: 1 });
    assert_eq!(lenient.editor().visible_overlays().count(), 1);

    let mut strict = replay(&ReplayConfig::new("s.json"));
    assert!(strict.run(&script, true).is_err());
    assert_eq!(strict.editor().visible_overlays().count(), 0);
}

#[test]
fn pointer_steps_use_card_coordinates() {
    let script = Script::from_json(
        r#"{"steps": [
            {"action": "pointer_down", "on": {"handle": 0}, "x": 300, "y": 260},
            {"action": "pointer_move", "x": 0, "y": 0},
            {"action": "pointer_up"},
            {"action": "pointer_move", "x": 100, "y": 100}
        ]}"#,
    )
    .expect("script");

    let mut replay = replay(&ReplayConfig::new("s.json"));
    replay.run(&script, true).expect("run");

    assert_eq!(replay.count(InteractionKind::ResizeStart), 1);
    assert_eq!(replay.count(InteractionKind::DragStart), 0);
    assert_eq!(replay.count(InteractionKind::ResizeEnd), 1);
    assert_eq!(replay.count(InteractionKind::DragMove), 0);
}
