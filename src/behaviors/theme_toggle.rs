use crate::page::Page;
use crate::theme::Theme;
use crate::{Error, Result};

impl Page {
    /// Writes `theme` onto the document root and the toggle icon.
    pub(crate) fn apply_theme(&mut self, theme: Theme) -> Result<()> {
        let state = self.behavior_state()?;
        let attribute = state.config.theme_attribute.clone();
        let toggle = state.theme_toggle;

        let root = self
            .dom
            .document_element()
            .ok_or_else(|| Error::Runtime("document has no root element".into()))?;
        self.dom.set_attr(root, &attribute, theme.as_str())?;
        if let Some(toggle) = toggle {
            self.dom.set_text_content(toggle, theme.icon())?;
        }
        Ok(())
    }

    pub(super) fn toggle_theme(&mut self) -> Result<()> {
        let attribute = self.behavior_state()?.config.theme_attribute.clone();
        let root = self
            .dom
            .document_element()
            .ok_or_else(|| Error::Runtime("document has no root element".into()))?;
        let next = Theme::toggled_from_attr(self.dom.attr(root, &attribute));
        self.apply_theme(next)?;

        let Some(state) = self.behaviors.as_mut() else {
            return Ok(());
        };
        state.preference.set(next);
        let persisted = state.preference.persist(self.store.as_mut());
        let key = state.preference.key().to_string();
        match persisted {
            Ok(()) => self.trace_behavior_line(format!(
                "[behavior] theme toggled to={next} persisted key={key}"
            )),
            // The new theme stays applied for this page even if it can't be saved.
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to persist theme preference");
                self.trace_behavior_line(format!(
                    "[behavior] theme toggled to={next} persist_failed={err}"
                ));
            }
        }
        Ok(())
    }

    /// Theme the reader currently has selected, as tracked by the installed
    /// behaviors.
    pub fn theme(&self) -> Option<Theme> {
        self.behaviors
            .as_ref()
            .map(|state| state.preference.theme())
    }
}
