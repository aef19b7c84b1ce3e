use super::*;
use crate::action::PlaybackOpts;
use crate::foundation::core::Rect;
use crate::scene::memory::{Issued, MemoryScene};
use crate::scene::model::NodeDef;

fn scene() -> MemoryScene {
    let mut s = MemoryScene::new(Rect::new(0.0, 0.0, 1000.0, 500.0));
    let root = s.root();
    s.add_node(
        root,
        NodeDef::new("g").id("wide").bbox(100.0, 100.0, 200.0, 100.0),
    )
    .unwrap();
    s.add_node(
        root,
        NodeDef::new("g").id("flat").bbox(0.0, 400.0, 400.0, 100.0),
    )
    .unwrap();
    s
}

fn home() -> ViewportPos {
    ViewportPos::new(500.0, 250.0, 1000.0)
}

fn wired(id: &str, target: ViewportPos) -> ViewportChange {
    let mut vc = ViewportChange::new(View::new(id));
    vc.set_wiring(Some(Wiring {
        target,
        prior: home(),
    }));
    vc
}

#[test]
fn view_target_fits_the_element() {
    let s = scene();
    let target = View::new("wide").with_scale(1.0).compute_target(&s).unwrap();
    assert_eq!(target, ViewportPos::new(200.0, 150.0, 200.0));

    let flat = View::new("flat").with_scale(1.0).compute_target(&s).unwrap();
    assert_eq!(flat.width, 400.0);
}

#[test]
fn default_padding_widens_the_view() {
    let s = scene();
    let target = View::new("wide").compute_target(&s).unwrap();
    assert!((target.width - 220.0).abs() < 1e-9);
}

#[test]
fn unknown_view_element_is_reported() {
    let s = scene();
    let err = View::new("ghost").compute_target(&s).unwrap_err();
    assert!(matches!(err, PanslideError::ElementNotFound(_)));
}

#[test]
fn exec_and_undo_move_the_camera_between_wired_ends() {
    let mut s = scene();
    let target = ViewportPos::new(200.0, 150.0, 200.0);
    let mut vc = wired("wide", target);
    let mut viewport = home();
    let opts = PlaybackOpts::default();

    vc.exec(&mut Stage::new(&mut s, &mut viewport, &opts))
        .unwrap();
    assert_eq!(viewport, target);
    s.settle();
    assert_eq!(s.camera(), target);

    vc.undo(&mut Stage::new(&mut s, &mut viewport, &opts))
        .unwrap();
    assert_eq!(viewport, home());
    s.settle();
    assert_eq!(s.camera(), home());
}

#[test]
fn camera_move_uses_delay_and_slowdown() {
    let mut s = scene();
    let target = ViewportPos::new(200.0, 150.0, 200.0);
    let mut vc = wired("wide", target).delay(40).slowdown(3.0);
    let mut viewport = home();
    let opts = PlaybackOpts::default();
    vc.exec(&mut Stage::new(&mut s, &mut viewport, &opts))
        .unwrap();

    let Some(Issued::Zoom { transition, .. }) = s.issued().last() else {
        panic!("expected a zoom");
    };
    let natural = ZoomPath::new(home(), target, opts.rho)
        .unwrap()
        .duration_ms();
    assert_eq!(transition.delay_ms, 40);
    assert_eq!(transition.duration_ms, (natural * 3.0).round() as u64);
    assert_eq!(transition.path.from(), home());
    assert_eq!(transition.path.to(), target);
}

#[test]
fn unwired_change_is_not_armed() {
    let mut s = scene();
    let mut vc = ViewportChange::new(View::new("wide"));
    let mut viewport = home();
    let opts = PlaybackOpts::default();

    let err = vc
        .exec(&mut Stage::new(&mut s, &mut viewport, &opts))
        .unwrap_err();
    assert!(matches!(err, PanslideError::PrecondNotArmed(_)));
    let err = vc
        .undo(&mut Stage::new(&mut s, &mut viewport, &opts))
        .unwrap_err();
    assert!(matches!(err, PanslideError::PrecondNotArmed(_)));
    assert_eq!(viewport, home());
    assert!(s.issued().is_empty());
}

#[test]
fn validate_rejects_bad_knobs() {
    let bad_scale = ViewportChange::new(View::new("wide").with_scale(0.0));
    assert!(matches!(
        bad_scale.validate(),
        Err(PanslideError::Validation(_))
    ));
    let bad_slowdown = ViewportChange::new(View::new("wide")).slowdown(-1.0);
    assert!(bad_slowdown.validate().is_err());
    assert!(ViewportChange::new(View::new("wide")).validate().is_ok());
}

#[test]
fn defaults_match_authoring_conventions() {
    let vc = ViewportChange::new(View::new("wide"));
    assert_eq!(vc.delay_ms(), 250);
    assert_eq!(vc.slowdown_factor(), 2.0);
    assert_eq!(vc.view().fit_scale(), 1.1);
    assert!(vc.wiring().is_none());
}
