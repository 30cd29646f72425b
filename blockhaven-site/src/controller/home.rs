use super::{Deferred, Effect, SiteController};
use crate::notify::NoticeKind;
use crate::timer::Scheduler;

impl<S: Scheduler<Deferred>> SiteController<S> {
    /// One step of the cosmetic player-count walk, with a short pulse.
    pub(super) fn tick_player_count(&mut self) -> Vec<Effect> {
        let value = self.state.player_count.tick(&mut self.rng);
        self.scheduler
            .schedule(self.config.player_count.pulse_ms, Deferred::EndPlayerPulse);
        vec![Effect::SetPlayerCount(value), Effect::PulsePlayerCount(true)]
    }

    pub(super) fn clipboard_written(&mut self, ok: bool) -> Vec<Effect> {
        if ok {
            self.notify_key("notice.copy.ok", NoticeKind::Success)
        } else {
            log::warn!("clipboard write rejected");
            self.notify_key("notice.copy.failed", NoticeKind::Error)
        }
    }
}
