//! Unit tests for canvas options loading.

use shapeboard::{Canvas, CanvasError, CanvasOptions, ModifierKey};
use std::io::Write;

#[test]
fn test_load_options_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "selectionKey": "ctrl", "centeredScaling": false,
            "cornerSize": 20.0, "hoverCursor": "pointer" }}"#
    )
    .unwrap();

    let options = CanvasOptions::load(file.path()).unwrap();

    assert_eq!(options.selection_key, ModifierKey::Ctrl);
    assert!(!options.centered_scaling);
    assert_eq!(options.corner_size, 20.0);
    assert_eq!(options.hover_cursor, "pointer");
    // Untouched keys keep their defaults
    assert!(options.centered_rotation);
    assert_eq!(options.uni_scale_key, ModifierKey::Shift);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CanvasOptions::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CanvasError::Io(_)));
}

#[test]
fn test_saved_options_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.json");
    let options = CanvasOptions {
        selection_fully_contained: true,
        touch_idle_debounce_ms: 250,
        ..Default::default()
    };
    std::fs::write(&path, options.to_json_string().unwrap()).unwrap();

    assert_eq!(CanvasOptions::load(&path).unwrap(), options);
}

#[test]
fn test_ctrl_selection_key_drives_grouping() {
    let options = CanvasOptions {
        selection_key: ModifierKey::Ctrl,
        ..Default::default()
    };
    let mut canvas = Canvas::new(options);
    let a = canvas.add(shapeboard::Shape::rect(50.0, 50.0).at(100.0, 100.0));
    let b = canvas.add(shapeboard::Shape::rect(50.0, 50.0).at(300.0, 100.0));

    let plain = shapeboard::PointerEvent::mouse(100.0, 100.0);
    canvas.on_mouse_down(&plain).unwrap();
    canvas.on_mouse_up(&plain).unwrap();

    let ctrl = shapeboard::PointerEvent::mouse(300.0, 100.0).with_modifiers(shapeboard::Modifiers {
        ctrl: true,
        ..Default::default()
    });
    canvas.on_mouse_down(&ctrl).unwrap();
    canvas.on_mouse_up(&ctrl).unwrap();

    assert_eq!(canvas.active_objects(), vec![a, b]);
}
