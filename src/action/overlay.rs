use crate::action::Stage;
use crate::foundation::error::PanslideResult;

/// Ask the host document to toggle its overlay.
///
/// Stateless: exec and undo send the same notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleOverlay;

impl ToggleOverlay {
    pub(crate) fn exec(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        tracing::debug!(event = %stage.opts.overlay_event, "toggle overlay");
        stage.scene.notify(&stage.opts.overlay_event);
        Ok(())
    }

    pub(crate) fn undo(&mut self, stage: &mut Stage<'_>) -> PanslideResult<()> {
        self.exec(stage)
    }
}
