use proptest::prelude::*;

use urban_wraps_rs::builder::{tax_for, Limit, Selection, SelectionState, Toggle, TAX_RATE_BPS};
use urban_wraps_rs::checkout::build_charge_lines;
use urban_wraps_rs::config::AppConfig;
use urban_wraps_rs::menu_seed::default_menu;
use urban_wraps_rs::models::{DeliveryType, IngredientCategory, Menu, MenuIngredient, Money};
use urban_wraps_rs::state::Cart;

fn menu() -> Menu {
    default_menu()
}

fn by_category(menu: &Menu, category: IngredientCategory) -> Vec<MenuIngredient> {
    menu.ingredients_in(category).into_iter().cloned().collect()
}

fn toggle_all(mut selection: Selection, ingredients: &[MenuIngredient]) -> Selection {
    for ing in ingredients {
        let (next, outcome) = selection.toggle_ingredient(ing);
        assert_eq!(outcome, Toggle::Added, "{} should be accepted", ing.name);
        selection = next;
    }
    selection
}

fn assert_totals_consistent(selection: &Selection) {
    let t = selection.totals();
    assert_eq!(t.subtotal, t.base_price + t.ingredients_total + t.add_ons_total);
    assert_eq!(t.total, t.subtotal + t.tax);
    assert_eq!(t.tax, tax_for(t.subtotal, selection.tax_bps()));
}

proptest! {
    #[test]
    fn prop_caps_hold_for_any_toggle_sequence(
        ops in proptest::collection::vec((0..3u8, 0..20usize), 0..80)
    ) {
        let menu = menu();
        let mut selection = Selection::new();

        for (kind, idx) in ops {
            selection = match kind {
                0 => selection.select_base(&menu.bases[idx % menu.bases.len()]),
                1 => selection.toggle_ingredient(&menu.ingredients[idx % menu.ingredients.len()]).0,
                _ => selection.toggle_add_on(&menu.add_ons[idx % menu.add_ons.len()]),
            };

            prop_assert!(selection.ingredients().len() <= 10);
            prop_assert!(selection.protein_count() <= 2);
            let t = selection.totals();
            prop_assert_eq!(t.subtotal, t.base_price + t.ingredients_total + t.add_ons_total);
            prop_assert_eq!(t.total, t.subtotal + t.tax);
        }
    }

    #[test]
    fn prop_rejected_toggle_leaves_selection_unchanged(
        picks in proptest::collection::vec(0..15usize, 0..30),
        candidate in 0..15usize
    ) {
        let menu = menu();
        let mut selection = Selection::new().select_base(&menu.bases[0]);
        for idx in picks {
            selection = selection.toggle_ingredient(&menu.ingredients[idx]).0;
        }

        let before = selection.clone();
        let (after, outcome) = selection.toggle_ingredient(&menu.ingredients[candidate]);
        if let Toggle::Rejected(_) = outcome {
            prop_assert_eq!(after, before);
        }
    }
}

#[test]
fn test_price_scenario() {
    let menu = menu();
    let base = menu.bases.iter().find(|b| b.name == "Classic Flour Tortilla").unwrap();
    let chicken = menu.ingredients.iter().find(|i| i.name == "Grilled Chicken").unwrap();
    let aioli = menu.add_ons.iter().find(|a| a.name == "Garlic Aioli").unwrap();

    let (selection, outcome) = Selection::new().select_base(base).toggle_ingredient(chicken);
    assert_eq!(outcome, Toggle::Added);
    let selection = selection.toggle_add_on(aioli);

    assert_eq!(selection.subtotal(), Money::from_cents(1199));
    assert_eq!(selection.tax(), Money::from_cents(102));
    assert_eq!(selection.total(), Money::from_cents(1301));
    assert_eq!(selection.total().to_string(), "$13.01");
    assert_totals_consistent(&selection);
}

#[test]
fn test_third_protein_rejected_at_five_of_ten() {
    let menu = menu();
    let proteins = by_category(&menu, IngredientCategory::Protein);
    let veggies = by_category(&menu, IngredientCategory::Vegetable);

    let selection = Selection::new().select_base(&menu.bases[0]);
    let selection = toggle_all(selection, &proteins[..2]);
    let selection = toggle_all(selection, &veggies[..3]);
    assert_eq!(selection.ingredients().len(), 5);

    let before = selection.clone();
    let (after, outcome) = selection.toggle_ingredient(&proteins[2]);
    assert_eq!(
        outcome,
        Toggle::Rejected(Limit::Category {
            category: IngredientCategory::Protein,
            max: 2
        })
    );
    assert!(!outcome.accepted());
    assert_eq!(after, before);
    assert_eq!(outcome_message(outcome), "Maximum 2 proteins allowed");
}

fn outcome_message(outcome: Toggle) -> String {
    match outcome {
        Toggle::Rejected(limit) => limit.to_string(),
        other => format!("{other:?}"),
    }
}

#[test]
fn test_eleventh_ingredient_rejected_regardless_of_category() {
    let menu = menu();
    let proteins = by_category(&menu, IngredientCategory::Protein);
    let others: Vec<MenuIngredient> = menu
        .ingredients
        .iter()
        .filter(|i| i.category != IngredientCategory::Protein)
        .cloned()
        .collect();
    assert_eq!(others.len(), 10);

    let selection = toggle_all(Selection::new(), &proteins[..2]);
    let selection = toggle_all(selection, &others[..8]);
    assert_eq!(selection.ingredients().len(), 10);

    for extra in &others[8..] {
        let before = selection.clone();
        let (after, outcome) = selection.clone().toggle_ingredient(extra);
        assert_eq!(outcome, Toggle::Rejected(Limit::Ingredients { max: 10 }));
        assert_eq!(outcome_message(outcome), "Maximum 10 ingredients allowed");
        assert_eq!(after, before);
    }

    let (_, outcome) = selection.toggle_ingredient(&proteins[2]);
    assert!(!outcome.accepted());
}

#[test]
fn test_toggle_twice_round_trips() {
    let menu = menu();
    let start = Selection::new().select_base(&menu.bases[1]);
    let ing = &menu.ingredients[6];

    let (once, first) = start.clone().toggle_ingredient(ing);
    let (twice, second) = once.toggle_ingredient(ing);

    assert_eq!(first, Toggle::Added);
    assert_eq!(second, Toggle::Removed);
    assert!(first.accepted() && second.accepted());
    assert_eq!(twice, start);
}

#[test]
fn test_removal_allowed_at_cap() {
    let menu = menu();
    let proteins = by_category(&menu, IngredientCategory::Protein);
    let selection = toggle_all(Selection::new(), &proteins[..2]);

    let (selection, outcome) = selection.toggle_ingredient(&proteins[0]);
    assert_eq!(outcome, Toggle::Removed);
    let (selection, outcome) = selection.toggle_ingredient(&proteins[3]);
    assert_eq!(outcome, Toggle::Added);
    assert_eq!(selection.protein_count(), 2);
}

#[test]
fn test_reset_clears_everything() {
    let menu = menu();
    let (selection, _) = Selection::with_tax_rate(700)
        .select_base(&menu.bases[2])
        .toggle_ingredient(&menu.ingredients[0]);
    let selection = selection.toggle_add_on(&menu.add_ons[8]);
    assert_eq!(selection.state(), SelectionState::InProgress);

    let reset = selection.reset();
    assert!(reset.base().is_none());
    assert!(reset.ingredients().is_empty());
    assert!(reset.add_ons().is_empty());
    assert_eq!(reset.subtotal(), Money::ZERO);
    assert_eq!(reset.tax(), Money::ZERO);
    assert_eq!(reset.total(), Money::ZERO);
    assert_eq!(reset.state(), SelectionState::Empty);
    assert_eq!(reset.tax_bps(), 700);
}

#[test]
fn test_can_finalize() {
    let menu = menu();
    let empty = Selection::new();
    assert!(!empty.can_finalize());
    assert!(empty.to_line_item(1).is_none());

    let base_only = empty.select_base(&menu.bases[0]);
    assert!(!base_only.can_finalize());

    let (ready, _) = base_only.toggle_ingredient(&menu.ingredients[5]);
    assert!(ready.can_finalize());
    assert!(ready.to_line_item(1).is_some());

    let (ingredient_only, _) = Selection::new().toggle_ingredient(&menu.ingredients[5]);
    assert!(!ingredient_only.can_finalize());
}

#[test]
fn test_preview_tax_matches_checkout_tax_line() {
    let menu = menu();
    let config = AppConfig::new("/tmp/unused");
    assert_eq!(config.tax_rate_bps, TAX_RATE_BPS);

    for base in &menu.bases {
        for ing in &menu.ingredients {
            let (selection, _) = Selection::with_tax_rate(config.tax_rate_bps)
                .select_base(base)
                .toggle_ingredient(ing);
            let item = selection.to_line_item(1).unwrap();
            assert_eq!(item.item_total, selection.subtotal());

            let mut cart = Cart::new(config.tax_rate_bps);
            cart.add(item);
            assert_eq!(cart.tax(), selection.tax());
            assert_eq!(cart.total(), selection.total());

            let lines = build_charge_lines(cart.items(), DeliveryType::Pickup, &config);
            let tax_line = lines
                .iter()
                .find(|l| l.name.starts_with("Sales Tax"))
                .unwrap();
            assert_eq!(tax_line.unit_amount_cents, selection.tax().cents());
        }
    }
}

#[test]
fn test_extreme_prices_saturate_instead_of_overflowing() {
    let menu = menu();
    let mut base = menu.bases[0].clone();
    base.base_price = Money::from_cents(3_000_000_000_000_000_000);
    let mut ing = menu.ingredients[0].clone();
    ing.price_add = Money::from_cents(u64::MAX);

    let (selection, outcome) = Selection::new().select_base(&base).toggle_ingredient(&ing);
    assert_eq!(outcome, Toggle::Added);
    assert_eq!(selection.subtotal().cents(), u64::MAX);
    assert_eq!(selection.total().cents(), u64::MAX);

    let mut cart = Cart::new(TAX_RATE_BPS);
    cart.add(selection.to_line_item(20).unwrap());
    assert_eq!(cart.total().cents(), u64::MAX);
}
