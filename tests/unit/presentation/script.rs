use super::*;

const SCRIPT: &str = r#"{
  "views": {
    "intro": { "element": "title" },
    "detail": { "element": "chart", "scale": 1.5 }
  },
  "slides": [
    [ { "op": "change_view", "view": "intro" } ],
    [
      { "op": "fade_in", "ids": ["a", "b"], "duration": 300, "delay": 50 },
      { "op": "move", "id": "badge", "x": "a" },
      { "op": "set_color", "ids": ["logo"], "color": "red" }
    ],
    [
      { "op": "change_view", "view": "detail", "slowdown": 1.0 },
      { "op": "align_vertically", "anchor": "a", "ids": ["b", "c"] },
      { "op": "invert", "action": { "op": "fade_out", "ids": ["a"] } },
      { "op": "toggle_overlay" }
    ]
  ]
}"#;

#[test]
fn parses_and_compiles() {
    let p = Presentation::from_json_str(SCRIPT).unwrap();
    assert_eq!(p.len(), 3);

    let kinds: Vec<&str> = p.slides()[2].actions().iter().map(Action::kind).collect();
    assert_eq!(
        kinds,
        ["viewport_change", "move", "move", "invert", "toggle_overlay"]
    );

    let Action::Fade(fade) = &p.slides()[1].actions()[0] else {
        panic!("expected a fade");
    };
    assert_eq!(fade.duration_ms(), 300);
    assert_eq!(fade.delay_ms(), 50);

    let Action::ViewportChange(vc) = &p.slides()[2].actions()[0] else {
        panic!("expected a viewport change");
    };
    assert_eq!(vc.view().element_id(), "chart");
    assert_eq!(vc.view().fit_scale(), 1.5);
    assert_eq!(vc.slowdown_factor(), 1.0);
    assert_eq!(vc.delay_ms(), 250);
}

#[test]
fn unknown_view_is_a_validation_error() {
    let err = Presentation::from_json_str(
        r#"{ "slides": [[ { "op": "change_view", "view": "nowhere" } ]] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, PanslideError::Validation(_)));
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn out_of_range_opacity_is_rejected() {
    let err = Presentation::from_json_str(
        r#"{ "slides": [[ { "op": "fade", "ids": ["a"], "opacity": 3.0 } ]] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, PanslideError::Validation(_)));
}

#[test]
fn unknown_op_is_a_parse_error() {
    let err = Presentation::from_json_str(r#"{ "slides": [[ { "op": "spin" } ]] }"#)
        .unwrap_err();
    assert!(matches!(err, PanslideError::Serde(_)));
}

#[test]
fn definitions_serialize_back() {
    let def: PresentationDef = serde_json::from_str(SCRIPT).unwrap();
    let json = serde_json::to_string(&def).unwrap();
    let again: PresentationDef = serde_json::from_str(&json).unwrap();
    assert_eq!(def, again);
}

#[test]
fn playback_block_sets_the_presentation_opts() {
    let p = Presentation::from_json_str(
        r#"{ "playback": { "ease": "linear", "overlay_event": "overlay" }, "slides": [[]] }"#,
    )
    .unwrap();
    assert_eq!(p.opts().ease, Ease::Linear);
    assert_eq!(p.opts().overlay_event, "overlay");
    assert_eq!(p.opts().rho, PlaybackOpts::default().rho);

    let plain = Presentation::from_json_str(r#"{ "slides": [[]] }"#).unwrap();
    assert_eq!(plain.opts(), &PlaybackOpts::default());
}

#[test]
fn playback_block_is_checked() {
    let err = Presentation::from_json_str(r#"{ "playback": { "ease": "bounce" }, "slides": [] }"#)
        .unwrap_err();
    assert!(matches!(err, PanslideError::Serde(_)));

    let err = Presentation::from_json_str(r#"{ "playback": { "rho": 0 }, "slides": [] }"#)
        .unwrap_err();
    assert!(matches!(err, PanslideError::Validation(_)));
}
