use crate::page::Page;
use crate::Result;

impl Page {
    /// Marks every nav link pointing at `page_identifier`. Runs once at
    /// install.
    pub(super) fn mark_active_nav(&mut self, page_identifier: &str) -> Result<usize> {
        let state = self.behavior_state()?;
        let links_selector = state.config.selectors.nav_links.clone();
        let active_class = state.config.active_class.clone();

        let mut marked = 0;
        for link in self.dom.query_selector_all(&links_selector)? {
            if self.dom.attr(link, "href") == Some(page_identifier) {
                self.dom.class_add(link, &active_class)?;
                marked += 1;
            }
        }

        self.trace_behavior_line(format!(
            "[behavior] active nav page={page_identifier} marked={marked}"
        ));
        Ok(marked)
    }
}
