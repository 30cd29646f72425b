//! QA scenarios driven against the site controller on virtual time.
//!
//! Every check takes an iteration seed and either passes or explains what
//! went wrong. Randomized inputs come from `ChaCha8Rng` so a failing seed can
//! be replayed exactly.
use std::collections::BTreeMap;
use std::hash::Hasher;

use anyhow::{Result, bail, ensure};
use blockhaven_site::{
    AuthError, Deferred, Effect, EventSource, FilterQuery, LoginForm, NoticeKind, Page, Product,
    RegisterForm, SiteController, SortKey, Subscription, Throttle, UiEvent, VirtualScheduler,
    filter_products, virtual_site,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twox_hash::XxHash64;

type Site = SiteController<VirtualScheduler<Deferred>>;

/// A named QA check.
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub check: fn(u64) -> Result<()>,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "smoke",
        name: "Smoke",
        description: "Boot every page and exercise the home widgets",
        check: smoke,
    },
    Scenario {
        key: "cart-fuzz",
        name: "Cart Fuzz",
        description: "Random add/remove/checkout sequences keep cart totals consistent",
        check: cart_fuzz,
    },
    Scenario {
        key: "auth-matrix",
        name: "Auth Matrix",
        description: "Every blank/mismatch/terms combination of the auth forms",
        check: auth_matrix,
    },
    Scenario {
        key: "filter-order",
        name: "Filter Order",
        description: "Category, search, and sort rules over random catalogs",
        check: filter_order,
    },
    Scenario {
        key: "notices",
        name: "Notice Lifecycle",
        description: "Slide-in, auto-dismiss, manual close, and removal timings",
        check: notice_lifecycle,
    },
    Scenario {
        key: "throttle",
        name: "Scroll Throttle",
        description: "Scroll frames run once per throttle window; visibility follows every event",
        check: scroll_throttle,
    },
    Scenario {
        key: "determinism",
        name: "Determinism",
        description: "Identical seeds replay identical effect streams",
        check: determinism,
    },
];

/// `(key, description)` for every scenario.
pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

pub fn get_scenario(key: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.key == key)
}

pub fn all_keys() -> Vec<&'static str> {
    SCENARIOS.iter().map(|s| s.key).collect()
}

/// A page where every element the controller asks for exists.
struct FullPage;

impl EventSource for FullPage {
    fn subscribe(&mut self, _subscription: &Subscription) -> bool {
        true
    }
}

const CATALOG: &[(&str, &str, i64)] = &[
    ("Diamond Sword", "weapons", 50_000),
    ("Netherite Axe", "weapons", 80_000),
    ("Iron Armor", "armor", 30_000),
    ("Elytra", "items", 75_000),
    ("Totem of Undying", "items", 12_500),
    ("VIP Rank", "ranks", 200_000),
];

fn catalog_products() -> Vec<Product> {
    CATALOG
        .iter()
        .map(|&(title, category, price)| Product {
            category: category.to_string(),
            price,
            title: title.to_string(),
            description: format!("{category} for survival"),
        })
        .collect()
}

fn shown_notices(effects: &[Effect]) -> Vec<NoticeKind> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::ShowNotice(view) => Some(view.kind),
            _ => None,
        })
        .collect()
}

fn smoke(seed: u64) -> Result<()> {
    for page in [Page::Home, Page::Shop, Page::Login, Page::Register] {
        let mut site = virtual_site(seed);
        if page == Page::Shop {
            site.load_products(catalog_products());
        }
        let boot = site.boot(page, &mut FullPage);
        let offset = site.config().layout.reveal_offset_px;
        ensure!(
            boot.first() == Some(&Effect::PrepareReveal(offset)),
            "{page:?} boot should prepare reveal cards first, got {:?}",
            boot.first()
        );
        ensure!(
            boot.iter().any(|e| matches!(e, Effect::SetPlayerCount(_))),
            "{page:?} boot should tick the player count"
        );
        if page == Page::Shop {
            ensure!(
                boot.contains(&Effect::LayoutProducts((0..CATALOG.len()).collect())),
                "shop boot should lay out every product in markup order"
            );
        }
    }

    let mut site = virtual_site(seed);
    site.boot(Page::Home, &mut FullPage);
    let cfg = site.config().player_count.clone();
    let ticks = site.advance(u64::from(cfg.interval_ms) * 3);
    let counts: Vec<u32> = ticks
        .iter()
        .filter_map(|e| match e {
            Effect::SetPlayerCount(n) => Some(*n),
            _ => None,
        })
        .collect();
    ensure!(counts.len() == 3, "expected 3 player ticks, saw {}", counts.len());
    if let Some(n) = counts.iter().find(|n| !(cfg.min..=cfg.max).contains(*n)) {
        bail!("player count {n} escaped [{}, {}]", cfg.min, cfg.max);
    }

    let copy = site.handle(UiEvent::CopyAddressClicked);
    ensure!(
        copy == vec![Effect::CopyText(site.config().server_address.clone())],
        "copy should request the server address, got {copy:?}"
    );
    let written = site.handle(UiEvent::ClipboardWritten { ok: true });
    ensure!(
        shown_notices(&written) == [NoticeKind::Success],
        "copy confirmation should be a success notice"
    );
    Ok(())
}

fn cart_fuzz(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut site = virtual_site(seed);
    let mut model: BTreeMap<&str, (i64, u32)> = BTreeMap::new();

    for step in 0..rng.gen_range(10..60) {
        let roll = rng.gen_range(0..10);
        let (name, _, price) = CATALOG[rng.gen_range(0..CATALOG.len())];
        if roll < 6 {
            let effects = site.handle(UiEvent::AddToCart {
                name: name.to_string(),
                unit_price: price,
            });
            ensure!(
                shown_notices(&effects) == [NoticeKind::Success],
                "step {step}: add should notify success"
            );
            model.entry(name).or_insert((price, 0)).1 += 1;
        } else if roll < 9 {
            site.handle(UiEvent::RemoveFromCart {
                name: name.to_string(),
            });
            model.remove(name);
        } else {
            let effects = site.handle(UiEvent::CheckoutClicked);
            if model.is_empty() {
                ensure!(
                    shown_notices(&effects) == [NoticeKind::Error],
                    "step {step}: empty checkout should be an error"
                );
                continue;
            }
            ensure!(
                effects.iter().any(|e| matches!(e, Effect::SetCheckoutBusy(Some(_)))),
                "step {step}: checkout should disable the button"
            );
            ensure!(
                site.handle(UiEvent::CheckoutClicked).is_empty(),
                "step {step}: a second checkout while busy should be ignored"
            );
            let done = site.advance(u64::from(site.config().shop.checkout_processing_ms));
            ensure!(
                done.contains(&Effect::HideCart) && done.contains(&Effect::SetCheckoutBusy(None)),
                "step {step}: checkout should finish by closing the cart"
            );
            model.clear();
        }

        let view = site.cart_view();
        let expected_total: i64 = model.values().map(|(p, q)| p * i64::from(*q)).sum();
        ensure!(
            view.total == expected_total,
            "step {step}: total {} != expected {expected_total}",
            view.total
        );
        ensure!(
            view.lines.len() == model.len(),
            "step {step}: {} lines for {} distinct names",
            view.lines.len(),
            model.len()
        );
        for line in &view.lines {
            let Some(&(_, quantity)) = model.get(line.name.as_str()) else {
                bail!("step {step}: unexpected line {}", line.name);
            };
            ensure!(
                line.quantity == quantity,
                "step {step}: {} has quantity {} not {quantity}",
                line.name,
                line.quantity
            );
        }
    }
    Ok(())
}

fn pick(rng: &mut ChaCha8Rng, value: &str) -> String {
    if rng.gen_bool(0.5) {
        value.to_string()
    } else {
        String::new()
    }
}

fn auth_matrix(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for mask in 0_u32..64 {
        let bit = |n: u32| mask & (1 << n) != 0;
        let form = RegisterForm {
            username: if bit(0) { "steve".into() } else { String::new() },
            email: if bit(1) { "steve@example.com".into() } else { String::new() },
            password: if bit(2) { "creeper1".into() } else { String::new() },
            confirm_password: match (bit(3), bit(4)) {
                (false, _) => String::new(),
                (true, true) => "creeper1".into(),
                (true, false) => "creeper2".into(),
            },
            terms: bit(5),
        };
        let expected = if !(bit(0) && bit(1) && bit(2) && bit(3)) {
            Err(AuthError::MissingFields)
        } else if !bit(4) {
            Err(AuthError::PasswordMismatch)
        } else if !bit(5) {
            Err(AuthError::TermsNotAccepted)
        } else {
            Ok(())
        };
        ensure!(
            form.validate() == expected,
            "mask {mask:06b}: expected {expected:?}, got {:?}",
            form.validate()
        );

        let mut site = virtual_site(seed);
        let effects = site.handle(UiEvent::RegisterSubmitted(form));
        let timers = site.scheduler().pending();
        match expected {
            Ok(()) => {
                ensure!(timers == 1, "mask {mask:06b}: valid form should start one timer");
                let settled = site.advance(u64::from(site.config().auth.processing_ms));
                ensure!(
                    shown_notices(&settled) == [NoticeKind::Success],
                    "mask {mask:06b}: registration should succeed"
                );
            }
            Err(_) => {
                ensure!(
                    shown_notices(&effects) == [NoticeKind::Error],
                    "mask {mask:06b}: rejected form should notify an error"
                );
                // Only the notice's own slide-in and auto-dismiss timers remain.
                ensure!(timers == 2, "mask {mask:06b}: rejected form started work");
            }
        }
    }

    let login = LoginForm {
        username: pick(&mut rng, "alex"),
        password: pick(&mut rng, "hunter22"),
    };
    let complete = login.is_complete();
    let mut site = virtual_site(seed);
    let effects = site.handle(UiEvent::LoginSubmitted(login));
    ensure!(
        shown_notices(&effects).is_empty(),
        "login is only judged after the round-trip"
    );
    let settled = site.advance(u64::from(site.config().auth.processing_ms));
    let expected = if complete {
        NoticeKind::Success
    } else {
        NoticeKind::Error
    };
    ensure!(
        shown_notices(&settled) == [expected],
        "login settled with {:?}, expected {expected:?}",
        shown_notices(&settled)
    );
    Ok(())
}

fn random_catalog(rng: &mut ChaCha8Rng) -> Vec<Product> {
    let categories = ["weapons", "armor", "items", "ranks"];
    let words = ["Sword", "Pickaxe", "Shield", "Bow", "Helmet", "Potion"];
    (0..rng.gen_range(0..12))
        .map(|_| Product {
            category: categories[rng.gen_range(0..categories.len())].to_string(),
            price: rng.gen_range(1..500) * 1_000,
            title: format!("{} {}", words[rng.gen_range(0..words.len())], rng.gen_range(1..9)),
            description: words.choose(&mut *rng).copied().unwrap_or("Block").to_lowercase(),
        })
        .collect()
}

fn filter_order(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let products = random_catalog(&mut rng);
    let category = ["all", "weapons", "armor", "items", "ranks"][rng.gen_range(0..5)];
    let search = ["", "sword", "SHIELD", "  ", "potion"][rng.gen_range(0..5)];
    let sort = [
        SortKey::None,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Popular,
        SortKey::Newest,
    ][rng.gen_range(0..5)];
    let query = FilterQuery::new(category, search, sort);
    let shown = filter_products(&products, &query, &mut rng);

    let needle = search.to_lowercase();
    let expected: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| category == "all" || p.category == category)
        .filter(|(_, p)| {
            search.trim().is_empty()
                || p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .map(|(i, _)| i)
        .collect();

    let mut sorted_shown = shown.clone();
    sorted_shown.sort_unstable();
    ensure!(
        sorted_shown == expected,
        "{query:?}: shown set {sorted_shown:?} != expected {expected:?}"
    );
    let prices: Vec<i64> = shown.iter().map(|&i| products[i].price).collect();
    match sort {
        SortKey::None => ensure!(shown == expected, "{query:?}: markup order lost"),
        SortKey::PriceLow => ensure!(
            prices.windows(2).all(|w| w[0] <= w[1]),
            "{query:?}: prices not ascending {prices:?}"
        ),
        SortKey::PriceHigh => ensure!(
            prices.windows(2).all(|w| w[0] >= w[1]),
            "{query:?}: prices not descending {prices:?}"
        ),
        SortKey::Popular | SortKey::Newest => {}
    }
    Ok(())
}

fn notice_lifecycle(seed: u64) -> Result<()> {
    let mut site = virtual_site(seed);
    let timing = site.config().notices.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let shown = site.notify("first".into(), NoticeKind::Info);
    let Some(Effect::ShowNotice(first)) = shown.first().cloned() else {
        bail!("notify should show a notice, got {shown:?}");
    };
    let slide = site.advance(u64::from(timing.slide_in_ms));
    ensure!(
        slide == vec![Effect::SlideInNotice(first.id)],
        "slide-in expected after {}ms, got {slide:?}",
        timing.slide_in_ms
    );

    // Close a second notice by hand at a random point of its life.
    let second = site.notify("second".into(), NoticeKind::Warning);
    let Some(Effect::ShowNotice(second)) = second.first().cloned() else {
        bail!("second notice missing");
    };
    site.advance(rng.gen_range(0..u64::from(timing.auto_dismiss_ms)));
    let closed = site.handle(UiEvent::NoticeCloseClicked(second.id));
    ensure!(
        closed == vec![Effect::SlideOutNotice(second.id)],
        "manual close should slide out, got {closed:?}"
    );
    ensure!(
        site.handle(UiEvent::NoticeCloseClicked(second.id)).is_empty(),
        "closing twice should do nothing"
    );

    let rest = site.advance(u64::from(timing.auto_dismiss_ms + timing.slide_out_ms));
    let removals = rest
        .iter()
        .filter(|e| matches!(e, Effect::RemoveNotice(_)))
        .count();
    let slide_outs = rest
        .iter()
        .filter(|e| matches!(e, Effect::SlideOutNotice(id) if *id == second.id))
        .count();
    ensure!(removals == 2, "both notices should be removed, saw {removals}");
    ensure!(slide_outs == 0, "a closed notice must not auto-dismiss again");
    ensure!(site.state().notices.is_empty(), "notices left behind");
    Ok(())
}

fn scroll_throttle(seed: u64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut site = virtual_site(seed);
    let interval = site.config().layout.scroll_throttle_ms;
    let threshold = site.config().layout.scroll_top_threshold_px;
    let mut gate = Throttle::new(interval);
    let mut at = 0.0;
    let mut visible = false;
    let mut frames = 0_u64;

    for _ in 0..200 {
        at += f64::from(rng.gen_range(0_u32..40));
        let y = f64::from(rng.gen_range(0_u32..1_000));
        let effects = site.handle(UiEvent::Scrolled { y, at_ms: at });
        let mut expected = Vec::new();
        if gate.admit(at) {
            frames += 1;
        }
        if (y > threshold) != visible {
            visible = y > threshold;
            expected.push(Effect::SetScrollTopVisible(visible));
        }
        ensure!(
            effects == expected,
            "scroll y={y} at {at}ms: got {effects:?}, expected {expected:?}"
        );
    }
    ensure!(
        site.state().scroll_top_visible == visible,
        "state drifted from the effect stream"
    );
    ensure!(
        site.state().scroll_frames == frames,
        "throttle admitted {} frames, expected {frames}",
        site.state().scroll_frames
    );
    Ok(())
}

fn session(seed: u64) -> Vec<Effect> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut site: Site = virtual_site(seed);
    site.load_products(catalog_products());
    let mut log = site.boot(Page::Shop, &mut FullPage);
    for _ in 0..40 {
        let event = match rng.gen_range(0..5) {
            0 => UiEvent::FilterChanged(FilterQuery::new("all", "", SortKey::Popular)),
            1 => {
                let (name, _, price) = CATALOG[rng.gen_range(0..CATALOG.len())];
                UiEvent::AddToCart {
                    name: name.to_string(),
                    unit_price: price,
                }
            }
            2 => UiEvent::CheckoutClicked,
            3 => UiEvent::ButtonClicked {
                x: f64::from(rng.gen_range(0_u32..800)),
                y: f64::from(rng.gen_range(0_u32..600)),
            },
            _ => UiEvent::MenuToggled,
        };
        log.extend(site.handle(event));
        log.extend(site.advance(rng.gen_range(0..2_000)));
    }
    log
}

fn digest(effects: &[Effect]) -> Result<u64> {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&serde_json::to_vec(effects)?);
    Ok(hasher.finish())
}

fn determinism(seed: u64) -> Result<()> {
    let first = digest(&session(seed))?;
    let second = digest(&session(seed))?;
    ensure!(
        first == second,
        "seed {seed} replayed differently: {first:016x} vs {second:016x}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_passes_for_a_few_seeds() {
        for scenario in SCENARIOS {
            for seed in [1, 42, 1337] {
                if let Err(err) = (scenario.check)(seed) {
                    panic!("{} failed for seed {seed}: {err:#}", scenario.key);
                }
            }
        }
    }

    #[test]
    fn keys_are_unique_and_resolvable() {
        let keys = all_keys();
        for key in &keys {
            assert_eq!(get_scenario(key).map(|s| s.key), Some(*key));
        }
        let mut deduped = keys.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), keys.len());
        assert!(get_scenario("nope").is_none());
    }
}
