use crate::dom::NodeId;
use crate::page::Page;
use crate::Result;

impl Page {
    // Linear scan per keystroke; pages are small and fully loaded.
    pub(super) fn filter_sections(&mut self, input: NodeId) -> Result<()> {
        let query = self.dom.value(input)?.to_lowercase();
        let sections_selector = self.behavior_state()?.config.selectors.sections.clone();
        let sections = self.dom.query_selector_all(&sections_selector)?;

        let mut shown = 0usize;
        for section in &sections {
            let visible =
                query.is_empty() || self.dom.text_content(*section).to_lowercase().contains(&query);
            let display = if visible { "block" } else { "none" };
            self.dom.set_style_property(*section, "display", display)?;
            if visible {
                shown += 1;
            }
        }

        self.trace_behavior_line(format!(
            "[behavior] search query={:?} shown={}/{}",
            query,
            shown,
            sections.len()
        ));
        Ok(())
    }
}
