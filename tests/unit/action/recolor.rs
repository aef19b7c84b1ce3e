use super::*;
use crate::action::PlaybackOpts;
use crate::foundation::core::{Rect, ViewportPos};
use crate::foundation::error::PanslideError;
use crate::scene::memory::MemoryScene;
use crate::scene::model::NodeDef;
use crate::scene::node::Scene;

fn scene() -> MemoryScene {
    let mut s = MemoryScene::new(Rect::new(0.0, 0.0, 1000.0, 500.0));
    let root = s.root();
    s.add_node(
        root,
        NodeDef::new("g")
            .id("logo")
            .child(NodeDef::new("path").id("red").fill("#ff0000"))
            .child(
                NodeDef::new("g")
                    .child(NodeDef::new("path").id("bare"))
                    .child(NodeDef::new("text").id("caption").fill("#00ff00")),
            ),
    )
    .unwrap();
    s
}

fn run(
    scene: &mut MemoryScene,
    f: impl FnOnce(&mut Stage<'_>) -> PanslideResult<()>,
) -> PanslideResult<()> {
    let mut viewport = ViewportPos::from_rect(scene.viewport_rect());
    let opts = PlaybackOpts::default();
    f(&mut Stage::new(scene, &mut viewport, &opts))
}

fn fill(s: &MemoryScene, id: &str) -> String {
    s.fill(s.select(id).unwrap())
}

#[test]
fn recolors_only_path_descendants() {
    let mut s = scene();
    let mut recolor = Recolor::new(["logo"], "blue");
    run(&mut s, |st| recolor.exec(st)).unwrap();
    s.settle();

    assert_eq!(fill(&s, "red"), "blue");
    assert_eq!(fill(&s, "bare"), "blue");
    assert_eq!(fill(&s, "caption"), "#00ff00");
}

#[test]
fn undo_restores_fills_per_path() {
    let mut s = scene();
    let mut recolor = Recolor::new(["logo"], "blue");
    run(&mut s, |st| recolor.exec(st)).unwrap();
    s.settle();
    run(&mut s, |st| recolor.undo(st)).unwrap();
    s.settle();

    assert_eq!(fill(&s, "red"), "#ff0000");
    assert_eq!(fill(&s, "bare"), "black");
}

#[test]
fn every_exec_recaptures() {
    let mut s = scene();
    let mut recolor = Recolor::new(["logo"], "blue");
    run(&mut s, |st| recolor.exec(st)).unwrap();
    s.settle();
    run(&mut s, |st| recolor.exec(st)).unwrap();
    s.settle();
    run(&mut s, |st| recolor.undo(st)).unwrap();
    s.settle();

    // The second exec saw the blue fills, so undo goes back to blue.
    assert_eq!(fill(&s, "red"), "blue");
    assert_eq!(fill(&s, "bare"), "blue");
}

#[test]
fn paint_holds_until_the_transition_ends() {
    let mut s = scene();
    let mut recolor = Recolor::new(["logo"], "blue").duration(400);
    run(&mut s, |st| recolor.exec(st)).unwrap();
    s.tick(200);
    assert_eq!(fill(&s, "red"), "#ff0000");
    s.tick(200);
    assert_eq!(fill(&s, "red"), "blue");
}

#[test]
fn undo_before_exec_is_rejected() {
    let mut s = scene();
    let mut recolor = Recolor::new(["logo"], "blue");
    let err = run(&mut s, |st| recolor.undo(st)).unwrap_err();
    assert!(matches!(err, PanslideError::PrecondNotArmed(_)));
    assert!(s.issued().is_empty());
}

#[test]
fn missing_id_fails_before_any_transition() {
    let mut s = scene();
    let mut recolor = Recolor::new(["logo", "ghost"], "blue");
    let err = run(&mut s, |st| recolor.exec(st)).unwrap_err();
    assert!(matches!(err, PanslideError::ElementNotFound(_)));
    assert!(s.issued().is_empty());
    assert!(!recolor.is_armed());
}
