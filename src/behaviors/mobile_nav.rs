use crate::page::Page;
use crate::Result;

impl Page {
    pub(super) fn toggle_menu(&mut self) -> Result<()> {
        let state = self.behavior_state()?;
        let Some(sidebar) = state.sidebar else {
            return Ok(());
        };
        let active_class = state.config.active_class.clone();
        let open = self.dom.class_toggle(sidebar, &active_class)?;
        self.trace_behavior_line(format!("[behavior] menu open={open}"));
        Ok(())
    }

    // Desktop layouts keep the sidebar as is.
    pub(super) fn close_menu_on_narrow_viewport(&mut self) -> Result<()> {
        let state = self.behavior_state()?;
        if self.viewport.inner_width > state.config.mobile_breakpoint_px {
            return Ok(());
        }
        let Some(sidebar) = state.sidebar else {
            return Ok(());
        };
        let active_class = state.config.active_class.clone();
        self.dom.class_remove(sidebar, &active_class)?;
        self.trace_behavior_line(format!(
            "[behavior] menu closed width={}",
            self.viewport.inner_width
        ));
        Ok(())
    }
}
