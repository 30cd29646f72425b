mod common;

use blockhaven_site::{
    Effect, FilterQuery, Page, Product, SortKey, UiEvent, filter_products, virtual_site,
};
use common::MockPage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn product(category: &str, price: i64, title: &str) -> Product {
    Product {
        category: category.into(),
        price,
        title: title.into(),
        description: format!("{title} for your survival world"),
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("ranks", 100, "Knight"),
        product("items", 50, "Pickaxe"),
        product("items", 75, "Bow"),
    ]
}

fn layout(effects: &[Effect]) -> Option<&[usize]> {
    effects.iter().find_map(|e| match e {
        Effect::LayoutProducts(order) => Some(order.as_slice()),
        _ => None,
    })
}

#[test]
fn shop_boot_lays_out_everything_then_animates() {
    let mut site = virtual_site(41);
    site.load_products(catalog());
    let effects = site.boot(Page::Shop, &mut MockPage::full());
    assert_eq!(layout(&effects), Some(&[0, 1, 2][..]));
    let animated = site.advance(100);
    assert!(animated.contains(&Effect::AnimateProducts(vec![(0, 0.0), (1, 0.1), (2, 0.2)])));
}

#[test]
fn shop_boot_honours_preselected_controls() {
    let mut site = virtual_site(43);
    site.load_products(catalog());
    site.set_filter(FilterQuery::new("items", "", SortKey::PriceHigh));
    let effects = site.boot(Page::Shop, &mut MockPage::full());
    assert_eq!(layout(&effects), Some(&[2, 1][..]));
    assert_eq!(site.state().filter.category, "items");
    let animated = site.advance(100);
    assert!(animated.contains(&Effect::AnimateProducts(vec![(2, 0.0), (1, 0.1)])));
}

#[test]
fn price_sorts_from_the_controller() {
    let mut site = virtual_site(42);
    site.load_products(catalog());
    let low = site.handle(UiEvent::FilterChanged(FilterQuery::new(
        "all",
        "",
        SortKey::PriceLow,
    )));
    assert_eq!(layout(&low), Some(&[1, 2, 0][..]));
    let high = site.handle(UiEvent::FilterChanged(FilterQuery::new(
        "all",
        "",
        SortKey::PriceHigh,
    )));
    assert_eq!(layout(&high), Some(&[0, 2, 1][..]));
    assert_eq!(site.state().filter.sort, SortKey::PriceHigh);
}

#[test]
fn category_and_search_compose() {
    let mut site = virtual_site(43);
    site.load_products(catalog());
    let effects = site.handle(UiEvent::FilterChanged(FilterQuery::new(
        "items",
        "BOW",
        SortKey::None,
    )));
    assert_eq!(layout(&effects), Some(&[2][..]));
    let nothing = site.handle(UiEvent::FilterChanged(FilterQuery::new(
        "all",
        "nether star",
        SortKey::None,
    )));
    assert_eq!(layout(&nothing), Some(&[][..]));
}

#[test]
fn simulated_sorts_are_permutations_of_the_filtered_set() {
    let products: Vec<Product> = (0..30)
        .map(|i| product(if i % 3 == 0 { "ranks" } else { "items" }, i * 10, "Block"))
        .collect();
    for sort in [SortKey::Popular, SortKey::Newest] {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut order = filter_products(&products, &FilterQuery::new("items", "", sort), &mut rng);
            order.sort_unstable();
            let expected: Vec<usize> = (0..30).filter(|i| i % 3 != 0).collect();
            assert_eq!(order, expected);
        }
    }
}

#[test]
fn filtering_without_a_grid_does_nothing() {
    let mut site = virtual_site(44);
    assert!(
        site.handle(UiEvent::FilterChanged(FilterQuery::default()))
            .is_empty()
    );
}

#[test]
fn card_hover_lifts_and_restores() {
    let mut site = virtual_site(45);
    assert_eq!(
        site.handle(UiEvent::CardHovered {
            index: 1,
            hovered: true
        }),
        vec![Effect::LiftCard {
            index: 1,
            lifted: true
        }]
    );
    assert_eq!(
        site.handle(UiEvent::CardHovered {
            index: 1,
            hovered: false
        }),
        vec![Effect::LiftCard {
            index: 1,
            lifted: false
        }]
    );
}
