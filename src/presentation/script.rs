//! JSON presentation scripts.
//!
//! ```json
//! {
//!   "playback": { "ease": "linear" },
//!   "views": { "intro": { "element": "title", "scale": 1.2 } },
//!   "slides": [
//!     [ { "op": "change_view", "view": "intro" } ],
//!     [ { "op": "fade_in", "ids": ["a", "b"], "duration": 300 },
//!       { "op": "move", "id": "badge", "x": "a", "y": "b" } ]
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::action::{Action, Fade, PlaybackOpts, View};
use crate::animation::ease::Ease;
use crate::foundation::error::{PanslideError, PanslideResult};
use crate::presentation::dsl;
use crate::presentation::model::{Presentation, Slide};

/// Named view in a script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewDef {
    /// Framed element id.
    pub element: String,
    /// Padding factor; the default padding when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// One scripted action. `align_*` ops expand to one move per id.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum ActionDef {
    /// Move `id` to the x of `x` and the y of `y` (`x` when absent).
    Move {
        /// Moved element.
        id: String,
        /// X anchor.
        x: String,
        /// Y anchor.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<String>,
        /// Duration in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    /// Fade to full opacity.
    FadeIn {
        /// Faded elements.
        ids: Vec<String>,
        /// Duration in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
        /// Delay in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u64>,
    },
    /// Fade to zero opacity.
    FadeOut {
        /// Faded elements.
        ids: Vec<String>,
        /// Duration in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
        /// Delay in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u64>,
    },
    /// Fade to an explicit opacity.
    Fade {
        /// Faded elements.
        ids: Vec<String>,
        /// Target opacity in `[0, 1]`.
        opacity: f64,
        /// Duration in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
        /// Delay in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u64>,
    },
    /// Recolor the paths below the elements.
    SetColor {
        /// Recolored elements.
        ids: Vec<String>,
        /// Target paint.
        color: String,
        /// Duration in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    /// Camera move onto a named view.
    ChangeView {
        /// Key into the script's `views`.
        view: String,
        /// Delay in ms.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u64>,
        /// Multiplier on the natural path duration.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slowdown: Option<f64>,
    },
    /// Overlay toggle.
    ToggleOverlay,
    /// Run the wrapped action backwards.
    Invert {
        /// Wrapped action.
        action: Box<ActionDef>,
    },
    /// Give every element the y of `anchor`.
    AlignVertically {
        /// Element providing the y.
        anchor: String,
        /// Aligned elements.
        ids: Vec<String>,
    },
    /// Give every element the x of `anchor`.
    AlignHorizontally {
        /// Element providing the x.
        anchor: String,
        /// Aligned elements.
        ids: Vec<String>,
    },
}

impl ActionDef {
    /// Build the actions this entry stands for.
    pub fn compile(&self, views: &BTreeMap<String, ViewDef>) -> PanslideResult<Vec<Action>> {
        let action: Action = match self {
            Self::Move { id, x, y, duration } => {
                let mut mv = dsl::move_to(id, x);
                if let Some(y) = y {
                    mv = mv.target_y(y);
                }
                if let Some(d) = duration {
                    mv = mv.duration(*d);
                }
                mv.into()
            }
            Self::FadeIn {
                ids,
                duration,
                delay,
            } => fade(dsl::fade_in(ids), *duration, *delay).into(),
            Self::FadeOut {
                ids,
                duration,
                delay,
            } => fade(dsl::fade_out(ids), *duration, *delay).into(),
            Self::Fade {
                ids,
                opacity,
                duration,
                delay,
            } => fade(Fade::new(ids, *opacity), *duration, *delay).into(),
            Self::SetColor {
                ids,
                color,
                duration,
            } => {
                let mut r = dsl::set_color(ids, color);
                if let Some(d) = duration {
                    r = r.duration(*d);
                }
                r.into()
            }
            Self::ChangeView {
                view,
                delay,
                slowdown,
            } => {
                let def = views.get(view).ok_or_else(|| {
                    PanslideError::validation(format!("unknown view '{view}'"))
                })?;
                let mut v = View::new(&def.element);
                if let Some(s) = def.scale {
                    v = v.with_scale(s);
                }
                let mut vc = dsl::change_view(v);
                if let Some(d) = delay {
                    vc = vc.delay(*d);
                }
                if let Some(s) = slowdown {
                    vc = vc.slowdown(*s);
                }
                vc.into()
            }
            Self::ToggleOverlay => dsl::toggle_overlay().into(),
            Self::Invert { action } => {
                return Ok(action
                    .compile(views)?
                    .into_iter()
                    .map(dsl::invert)
                    .collect());
            }
            Self::AlignVertically { anchor, ids } => {
                return Ok(dsl::align_vertically(anchor, ids)
                    .into_iter()
                    .map(Action::from)
                    .collect());
            }
            Self::AlignHorizontally { anchor, ids } => {
                return Ok(dsl::align_horizontally(anchor, ids)
                    .into_iter()
                    .map(Action::from)
                    .collect());
            }
        };
        Ok(vec![action])
    }
}

fn fade(mut f: Fade, duration: Option<u64>, delay: Option<u64>) -> Fade {
    if let Some(d) = duration {
        f = f.duration(d);
    }
    if let Some(d) = delay {
        f = f.delay(d);
    }
    f
}

/// Playback knobs in a script; absent fields keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackDef {
    /// Easing of element transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
    /// Curvature of camera paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho: Option<f64>,
    /// Event name delivered by overlay toggles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_event: Option<String>,
}

impl PlaybackDef {
    /// Resolve against the defaults.
    pub fn compile(&self) -> PlaybackOpts {
        let mut opts = PlaybackOpts::default();
        if let Some(ease) = self.ease {
            opts.ease = ease;
        }
        if let Some(rho) = self.rho {
            opts.rho = rho;
        }
        if let Some(event) = &self.overlay_event {
            opts.overlay_event = event.clone();
        }
        opts
    }
}

/// Serialized form of a [`Presentation`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresentationDef {
    /// Playback knobs.
    #[serde(default)]
    pub playback: PlaybackDef,
    /// Named views referenced by `change_view`.
    #[serde(default)]
    pub views: BTreeMap<String, ViewDef>,
    /// Slides, each a list of actions.
    pub slides: Vec<Vec<ActionDef>>,
}

impl PresentationDef {
    /// Build and validate the presentation.
    pub fn compile(&self) -> PanslideResult<Presentation> {
        let mut slides = Vec::with_capacity(self.slides.len());
        for (si, defs) in self.slides.iter().enumerate() {
            let mut slide = Slide::new();
            for (ai, def) in defs.iter().enumerate() {
                let actions = def.compile(&self.views).map_err(|e| {
                    PanslideError::validation(format!("slide {si} action {ai}: {e}"))
                })?;
                slide = slide.then_all(actions);
            }
            slides.push(slide);
        }
        let p = Presentation::new(slides).with_opts(self.playback.compile());
        p.validate()?;
        Ok(p)
    }
}

impl Presentation {
    /// Parse and compile a JSON script from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PanslideResult<Self> {
        let def: PresentationDef = serde_json::from_reader(r)
            .map_err(|e| PanslideError::serde(format!("parse presentation JSON: {e}")))?;
        def.compile()
    }

    /// Parse and compile a JSON script.
    pub fn from_json_str(s: &str) -> PanslideResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse and compile a JSON script file.
    pub fn from_path(path: impl AsRef<Path>) -> PanslideResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PanslideError::validation(format!("open presentation JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presentation/script.rs"]
mod tests;
