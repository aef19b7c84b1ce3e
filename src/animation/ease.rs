/// Easing curve applied to element transitions.
///
/// `InOutCubic` is the default, matching the usual browser/d3 transition feel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

impl std::str::FromStr for Ease {
    type Err = crate::foundation::error::PanslideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "out_cubic" | "out-cubic" | "cubic-out" => Ok(Self::OutCubic),
            "in_out_cubic" | "in-out-cubic" | "cubic-in-out" => Ok(Self::InOutCubic),
            other => Err(crate::foundation::error::PanslideError::validation(format!(
                "unknown easing '{other}'"
            ))),
        }
    }
}

/// Normalized progress of a transition issued at `issued_ms`, observed at `now_ms`.
///
/// Before the delay elapses progress is 0. Zero-length transitions jump straight to 1.
pub fn progress(now_ms: u64, issued_ms: u64, delay_ms: u64, duration_ms: u64) -> f64 {
    let start = issued_ms.saturating_add(delay_ms);
    if now_ms < start {
        return 0.0;
    }
    if duration_ms == 0 {
        return 1.0;
    }
    ((now_ms - start) as f64 / duration_ms as f64).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
