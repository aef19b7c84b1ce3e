//! Authoring helpers: short constructors for every action.
//!
//! ```
//! use panslide::dsl::*;
//! use panslide::{Presentation, Slide};
//!
//! let intro = view("intro");
//! let deck = Presentation::builder()
//!     .slide(Slide::new().then(change_view(intro.clone())))
//!     .slide(
//!         Slide::new()
//!             .then(fade_in(["title"]))
//!             .then(move_to("badge", "title").duration(300)),
//!     )
//!     .slide(Slide::new().then_all(align_vertically("title", ["a", "b"])))
//!     .build()
//!     .unwrap();
//! assert_eq!(deck.len(), 3);
//! ```

use crate::action::{Action, Fade, Move, Recolor, ToggleOverlay, View, ViewportChange};

/// View onto `element_id` with the default padding.
pub fn view(element_id: impl Into<String>) -> View {
    View::new(element_id)
}

/// Move `source` to the x of `target_x`; the y anchor starts as `target_x` too.
pub fn move_to(source: impl Into<String>, target_x: impl Into<String>) -> Move {
    let target_x = target_x.into();
    Move::new(source, target_x.clone(), target_x)
}

/// Fade the elements to full opacity.
pub fn fade_in<I, S>(ids: I) -> Fade
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Fade::new(ids, 1.0)
}

/// Fade the elements to zero opacity.
pub fn fade_out<I, S>(ids: I) -> Fade
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Fade::new(ids, 0.0)
}

/// Recolor the paths below the elements.
pub fn set_color<I, S>(ids: I, color: impl Into<String>) -> Recolor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Recolor::new(ids, color)
}

/// Camera move onto `view`.
pub fn change_view(view: View) -> ViewportChange {
    ViewportChange::new(view)
}

/// Overlay toggle notification.
pub fn toggle_overlay() -> ToggleOverlay {
    ToggleOverlay
}

/// Run `action` backwards.
pub fn invert(action: impl Into<Action>) -> Action {
    Action::Invert(Box::new(action.into()))
}

/// Give every element the y of `anchor`, keeping its own x.
pub fn align_vertically<I, S>(anchor: impl Into<String>, ids: I) -> Vec<Move>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let anchor = anchor.into();
    ids.into_iter()
        .map(|id| {
            let id = id.into();
            Move::new(id.clone(), id, anchor.clone())
        })
        .collect()
}

/// Give every element the x of `anchor`, keeping its own y.
pub fn align_horizontally<I, S>(anchor: impl Into<String>, ids: I) -> Vec<Move>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let anchor = anchor.into();
    ids.into_iter()
        .map(|id| {
            let id = id.into();
            Move::new(id.clone(), anchor.clone(), id)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/dsl.rs"]
mod tests;
