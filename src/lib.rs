//! panslide is a reversible slide presentation engine for retained vector scenes.
//!
//! A [`Presentation`] is a list of [`Slide`]s, each an ordered list of [`Action`]s. Every action
//! can be undone, so navigation works both ways:
//!
//! - Author slides with the [`dsl`] helpers or a JSON script ([`PresentationDef`])
//! - Load a [`Scene`], either [`MemoryScene`] from JSON or SVG, or your own implementation
//! - Drive it with a [`Presenter`]: [`Presenter::start`], then `advance` / `retreat`
//!
//! Camera moves follow the smooth pan/zoom path of van Wijk & Nuij ([`ZoomPath`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod action;
pub(crate) mod animation;
pub(crate) mod geometry;
pub(crate) mod input;
pub(crate) mod presentation;
pub(crate) mod scene;

pub use crate::foundation::core::{Affine, Point, Rect, Size, Vec2, ViewportPos};
pub use crate::foundation::error::{PanslideError, PanslideResult};

pub use crate::action::{
    Action, Fade, Move, PlaybackOpts, Recolor, SnapshotPolicy, Stage, TOGGLE_OVERLAY_EVENT,
    ToggleOverlay, View, ViewportChange, Wiring,
};
pub use crate::animation::ease::{Ease, progress};
pub use crate::animation::zoom::{DEFAULT_RHO, ZoomPath, ZoomTransition};
pub use crate::geometry::transform::{
    absolute_position, bounding_rect, compose, cumulative_transform,
};
pub use crate::geometry::viewport::{fit_viewport, zoom_transform};
pub use crate::input::adapter::{Command, Key, Signal, map_signal};
pub use crate::presentation::dsl;
pub use crate::presentation::model::{Presentation, PresentationBuilder, Slide};
pub use crate::presentation::script::{ActionDef, PlaybackDef, PresentationDef, ViewDef};
pub use crate::presentation::sequencer::{
    ActionFailure, Presenter, SequencerState, SlideReport, WireReport, WiredView, wire,
};
pub use crate::scene::memory::{Issued, MemoryScene, ROOT_ID};
pub use crate::scene::model::{NodeDef, SceneDef};
pub use crate::scene::node::{Attr, AttrValue, NodeId, Scene, Transition, resolve, resolve_all};
pub use crate::scene::raster::{CameraFrame, render_camera_frame};
pub use crate::scene::svg::{load_scene, load_svg, parse_svg};
