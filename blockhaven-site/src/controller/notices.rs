use super::{Deferred, Effect, SiteController};
use crate::notify::{NoticeId, NoticeKind};
use crate::timer::Scheduler;

impl<S: Scheduler<Deferred>> SiteController<S> {
    /// Show a notice, then schedule its slide-in and auto-dismiss.
    pub fn notify(&mut self, message: String, kind: NoticeKind) -> Vec<Effect> {
        let view = self.state.notices.insert(message, kind);
        let id = view.id;
        let slide_in = self.config.notices.slide_in_ms;
        let auto_dismiss = self.config.notices.auto_dismiss_ms;
        self.scheduler.schedule(slide_in, Deferred::SlideInNotice(id));
        let handle = self
            .scheduler
            .schedule(auto_dismiss, Deferred::AutoDismissNotice(id));
        self.state.notices.set_auto_dismiss(id, handle);
        vec![Effect::ShowNotice(view)]
    }

    pub(super) fn notify_key(&mut self, key: &str, kind: NoticeKind) -> Vec<Effect> {
        let message = self.catalog.t(key);
        self.notify(message, kind)
    }

    pub(super) fn slide_in_notice(&mut self, id: NoticeId) -> Vec<Effect> {
        if self.state.notices.mark_visible(id) {
            vec![Effect::SlideInNotice(id)]
        } else {
            Vec::new()
        }
    }

    /// Manual close: slide out now, drop the pending auto-dismiss, remove
    /// after the slide-out finishes.
    pub(super) fn close_notice(&mut self, id: NoticeId) -> Vec<Effect> {
        let Some(pending) = self.state.notices.begin_close(id) else {
            return Vec::new();
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        self.scheduler
            .schedule(self.config.notices.slide_out_ms, Deferred::RemoveNotice(id));
        vec![Effect::SlideOutNotice(id)]
    }

    pub(super) fn auto_dismiss_notice(&mut self, id: NoticeId) -> Vec<Effect> {
        self.close_notice(id)
    }

    pub(super) fn remove_notice(&mut self, id: NoticeId) -> Vec<Effect> {
        if self.state.notices.remove(id) {
            vec![Effect::RemoveNotice(id)]
        } else {
            Vec::new()
        }
    }
}
