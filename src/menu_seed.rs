use crate::models::{
    AddOnKind, IngredientCategory, Menu, MenuAddOn, MenuBase, MenuIngredient, MenuStatus, Money,
};

/// Lowercase, hyphen-separated id derived from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn base(name: &str, description: &str, cents: u64) -> MenuBase {
    MenuBase {
        id: slugify(name),
        name: name.to_string(),
        description: description.to_string(),
        base_price: Money::from_cents(cents),
        status: MenuStatus::Active,
    }
}

fn ingredient(
    name: &str,
    category: IngredientCategory,
    cents: u64,
    allergens: &[&str],
) -> MenuIngredient {
    MenuIngredient {
        id: slugify(name),
        name: name.to_string(),
        category,
        price_add: Money::from_cents(cents),
        status: MenuStatus::Active,
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
    }
}

fn add_on(name: &str, kind: AddOnKind, cents: u64) -> MenuAddOn {
    MenuAddOn {
        id: slugify(name),
        name: name.to_string(),
        kind,
        price: Money::from_cents(cents),
        status: MenuStatus::Active,
    }
}

/// The house menu written by the `seed` binary.
pub fn default_menu() -> Menu {
    use AddOnKind::{Extra, Sauce, Spice};
    use IngredientCategory::{Cheese, Protein, Vegetable};

    Menu {
        bases: vec![
            base("Classic Flour Tortilla", "Traditional soft flour tortilla wrap", 799),
            base("Whole Wheat Wrap", "Healthy whole wheat tortilla", 849),
            base("Spinach Herb Wrap", "Green spinach tortilla with herbs", 899),
            base("Lettuce Bowl", "Fresh lettuce bowl (low-carb option)", 749),
            base("Tomato Basil Wrap", "Sun-dried tomato and basil tortilla", 899),
        ],
        ingredients: vec![
            ingredient("Grilled Chicken", Protein, 350, &[]),
            ingredient("Spicy Beef", Protein, 400, &[]),
            ingredient("Falafel", Protein, 300, &["gluten"]),
            ingredient("Grilled Shrimp", Protein, 450, &["shellfish"]),
            ingredient("Black Beans", Protein, 250, &[]),
            ingredient("Romaine Lettuce", Vegetable, 50, &[]),
            ingredient("Tomatoes", Vegetable, 50, &[]),
            ingredient("Red Onions", Vegetable, 50, &[]),
            ingredient("Bell Peppers", Vegetable, 75, &[]),
            ingredient("Cucumbers", Vegetable, 50, &[]),
            ingredient("Avocado", Vegetable, 150, &[]),
            ingredient("Pickles", Vegetable, 50, &[]),
            ingredient("Cheddar Cheese", Cheese, 100, &["dairy"]),
            ingredient("Feta Cheese", Cheese, 125, &["dairy"]),
            ingredient("Pepper Jack", Cheese, 100, &["dairy"]),
        ],
        add_ons: vec![
            add_on("Garlic Aioli", Sauce, 50),
            add_on("Chipotle Mayo", Sauce, 50),
            add_on("Tzatziki", Sauce, 75),
            add_on("Hot Sauce", Sauce, 0),
            add_on("Ranch Dressing", Sauce, 50),
            add_on("Cajun Spice Mix", Spice, 0),
            add_on("Mediterranean Herbs", Spice, 0),
            add_on("Smoky BBQ Rub", Spice, 0),
            add_on("Extra Protein", Extra, 300),
            add_on("Crispy Onions", Extra, 75),
            add_on("Jalapeños", Extra, 50),
        ],
    }
}
