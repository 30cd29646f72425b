use super::{Deferred, Effect, SiteController};
use crate::cart::CartView;
use crate::notify::NoticeKind;
use crate::timer::Scheduler;

impl<S: Scheduler<Deferred>> SiteController<S> {
    /// Current cart as a render-ready view.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::render(&self.state.cart, &*self.format_price)
    }

    pub(super) fn add_to_cart(&mut self, name: &str, unit_price: i64) -> Vec<Effect> {
        let quantity = self.state.cart.add(name, unit_price);
        log::debug!("cart: {name} now x{quantity}");
        let message = self.catalog.tr1("notice.cart.added", "name", name);
        let mut effects = self.notify(message, NoticeKind::Success);
        effects.push(Effect::RenderCart(self.cart_view()));
        effects
    }

    pub(super) fn remove_from_cart(&mut self, name: &str) -> Vec<Effect> {
        let removed = self.state.cart.remove(name);
        log::debug!("cart: removed {removed} line(s) named {name}");
        let mut effects = vec![Effect::RenderCart(self.cart_view())];
        effects.extend(self.notify_key("notice.cart.removed", NoticeKind::Info));
        effects
    }

    pub(super) fn checkout(&mut self) -> Vec<Effect> {
        if self.state.checkout_busy {
            log::debug!("checkout already in progress");
            return Vec::new();
        }
        let total = match self.state.cart.ensure_not_empty() {
            Ok(total) => total,
            Err(err) => {
                log::info!("checkout rejected: {err}");
                return self.notify_key(err.message_key(), NoticeKind::Error);
            }
        };
        let label = self.price(total);
        let message = self.catalog.tr1("notice.cart.paid", "total", &label);
        let mut effects = self.notify(message, NoticeKind::Success);
        self.state.checkout_busy = true;
        effects.push(Effect::SetCheckoutBusy(Some(
            self.catalog.t("cart.processing"),
        )));
        self.scheduler.schedule(
            self.config.shop.checkout_processing_ms,
            Deferred::CompleteCheckout,
        );
        effects
    }

    pub(super) fn complete_checkout(&mut self) -> Vec<Effect> {
        self.state.cart.clear();
        self.state.checkout_busy = false;
        vec![
            Effect::RenderCart(self.cart_view()),
            Effect::HideCart,
            Effect::SetCheckoutBusy(None),
        ]
    }
}
