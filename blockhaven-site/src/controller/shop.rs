use super::{Deferred, Effect, SiteController};
use crate::products::{FilterQuery, filter_products};
use crate::timer::Scheduler;

impl<S: Scheduler<Deferred>> SiteController<S> {
    /// Recompute the visible products and schedule their staggered entrance.
    pub(super) fn apply_filter(&mut self, query: FilterQuery) -> Vec<Effect> {
        if self.state.products.is_empty() {
            return Vec::new();
        }
        let order = filter_products(&self.state.products, &query, &mut self.rng);
        log::debug!(
            "filter {:?}/{:?}/{:?} shows {} of {}",
            query.category,
            query.search,
            query.sort,
            order.len(),
            self.state.products.len()
        );
        self.state.filter = query;
        self.scheduler.schedule(
            self.config.shop.filter_settle_ms,
            Deferred::AnimateProducts(order.clone()),
        );
        vec![Effect::LayoutProducts(order)]
    }
}
