//! The one running site per page load.
//!
//! Listener closures, timers, and clipboard futures all reach the controller
//! through [`dispatch`] and [`fire_timer`]. Effects are applied after the
//! controller borrow is released so that handlers triggered synchronously by
//! DOM changes can dispatch again.
use std::cell::RefCell;
use std::rc::Rc;

use blockhaven_site::{Deferred, Effect, Page, SiteController, TimerHandle, UiEvent};

use crate::apply::{Applier, Labels, read_products};
use crate::dom::{self, WebError};
use crate::format::price_formatter;
use crate::listeners::{DomEventSource, read_filter};
use crate::scheduler::BrowserScheduler;
use crate::settings;

struct Site {
    controller: RefCell<SiteController<BrowserScheduler>>,
    applier: Applier,
    _source: DomEventSource,
}

thread_local! {
    static SITE: RefCell<Option<Rc<Site>>> = const { RefCell::new(None) };
}

fn current() -> Option<Rc<Site>> {
    SITE.with(|slot| slot.borrow().clone())
}

fn run(
    site: &Site,
    label: &str,
    step: impl FnOnce(&mut SiteController<BrowserScheduler>) -> Vec<Effect>,
) {
    let effects = match site.controller.try_borrow_mut() {
        Ok(mut controller) => step(&mut controller),
        Err(_) => {
            log::warn!("dropping re-entrant {label}");
            return;
        }
    };
    site.applier.apply_all(&effects);
}

/// Feed one DOM event to the running site.
pub fn dispatch(event: UiEvent) {
    let Some(site) = current() else {
        log::debug!("site not started; ignoring {event:?}");
        return;
    };
    run(&site, "event", |controller| controller.handle(event));
}

/// Entry point for elapsed `setTimeout` callbacks.
pub(crate) fn fire_timer(handle: TimerHandle, task: Deferred) {
    let Some(site) = current() else {
        return;
    };
    run(&site, "timer", |controller| {
        controller.scheduler_mut().retire(handle);
        controller.fire(task)
    });
}

fn seed() -> u64 {
    js_sys::Date::now().to_bits() ^ js_sys::Math::random().to_bits()
}

/// Build the controller for the current document and boot it.
///
/// # Errors
/// Returns an error when the location cannot be read.
pub fn start_site() -> Result<(), WebError> {
    let config = settings::load_from_static();
    let catalog = settings::catalog_for(&config);
    let labels = Labels::from_catalog(&catalog);
    let formatter = price_formatter(config.number_locale.clone(), catalog.t("price.suffix"));
    let page = Page::from_path(&dom::window().location().pathname()?);
    let mut source = DomEventSource::new(config.layout.clone());

    let mut controller =
        SiteController::with_formatter(config, catalog, BrowserScheduler::new(), seed(), formatter);
    let (cards, products) = read_products();
    controller.load_products(products);
    if page == Page::Shop {
        controller.set_filter(read_filter());
    }
    let effects = controller.boot(page, &mut source);

    let site = Rc::new(Site {
        controller: RefCell::new(controller),
        applier: Applier::new(labels, cards),
        _source: source,
    });
    SITE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&site)));
    site.applier.apply_all(&effects);
    Ok(())
}
