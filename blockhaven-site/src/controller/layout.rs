use super::{Deferred, Effect, SiteController};
use crate::timer::Scheduler;

impl<S: Scheduler<Deferred>> SiteController<S> {
    pub(super) fn toggle_menu(&mut self) -> Vec<Effect> {
        self.state.menu_open = !self.state.menu_open;
        vec![Effect::SetMenuOpen(self.state.menu_open)]
    }

    pub(super) fn close_menu(&mut self) -> Vec<Effect> {
        self.state.menu_open = false;
        vec![Effect::SetMenuOpen(false)]
    }

    /// The 300px check runs on every event so the last position always
    /// wins. Only the frame hook is throttled.
    pub(super) fn on_scroll(&mut self, y: f64, at_ms: f64) -> Vec<Effect> {
        if self.scroll_gate.admit(at_ms) {
            self.state.scroll_frames += 1;
            log::trace!("scroll frame at {at_ms}ms (y={y})");
        }
        let visible = y > self.config.layout.scroll_top_threshold_px;
        if visible == self.state.scroll_top_visible {
            return Vec::new();
        }
        self.state.scroll_top_visible = visible;
        vec![Effect::SetScrollTopVisible(visible)]
    }

    pub(super) fn follow_link(&mut self, href: String, same_origin: bool) -> Vec<Effect> {
        if !same_origin {
            return Vec::new();
        }
        log::debug!("page transition to {href}");
        self.scheduler.schedule(
            self.config.layout.page_transition_ms,
            Deferred::Navigate(href),
        );
        vec![Effect::ShowPageTransition]
    }

    pub(super) fn reveal(&mut self, index: usize, ratio: f64) -> Vec<Effect> {
        if self.state.reveal.observe(index, ratio) {
            vec![Effect::RevealCard(index)]
        } else {
            Vec::new()
        }
    }
}
