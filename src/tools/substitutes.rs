//! Ingredient Substitute Tool
//!
//! Static lookup table of common ingredient swaps with dietary tags.

use serde::Serialize;

/// One substitute option for an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Substitute {
    pub substitute: &'static str,
    pub ratio: &'static str,
    pub notes: &'static str,
    pub dietary: &'static [&'static str],
}

/// Response for get_substitutes
#[derive(Debug, Serialize)]
pub struct SubstitutesResponse {
    pub ingredient: String,
    pub key: String,
    pub found: bool,
    pub dietary: Option<String>,
    /// False when the dietary filter matched nothing and all options are returned
    pub filtered: bool,
    pub substitutes: Vec<Substitute>,
}

const fn sub(
    substitute: &'static str,
    ratio: &'static str,
    notes: &'static str,
    dietary: &'static [&'static str],
) -> Substitute {
    Substitute { substitute, ratio, notes, dietary }
}

const VEGAN_DF: &[&str] = &["vegan", "dairy_free"];
const VEGETARIAN: &[&str] = &["vegetarian"];

static SUBSTITUTES: &[(&str, &[Substitute])] = &[
    // Dairy
    ("butter", &[
        sub("Coconut Oil", "1:1", "Great for baking", VEGAN_DF),
        sub("Olive Oil", "3/4:1", "Good for savory dishes", VEGAN_DF),
        sub("Applesauce", "1/2:1", "Adds moisture", &["vegan", "dairy_free", "low_fat"]),
        sub("Avocado", "1:1", "Healthy fats", VEGAN_DF),
        sub("Greek Yogurt", "1:1", "Tangy, good for baking", VEGETARIAN),
    ]),
    ("milk", &[
        sub("Almond Milk", "1:1", "Light, nutty flavor", &["vegan", "dairy_free", "nut_free"]),
        sub("Oat Milk", "1:1", "Creamy texture", &["vegan", "dairy_free", "nut_free"]),
        sub("Coconut Milk", "1:1", "Rich and creamy", VEGAN_DF),
        sub("Soy Milk", "1:1", "High protein", VEGAN_DF),
        sub("Rice Milk", "1:1", "Light and sweet", &["vegan", "dairy_free", "nut_free"]),
    ]),
    ("cream", &[
        sub("Coconut Cream", "1:1", "Rich and thick", VEGAN_DF),
        sub("Cashew Cream", "1:1", "Creamy and neutral", VEGAN_DF),
        sub("Silken Tofu", "1:1", "Blend until smooth", VEGAN_DF),
    ]),
    ("cheese", &[
        sub("Nutritional Yeast", "1:1", "Cheesy flavor", VEGAN_DF),
        sub("Cashew Cheese", "1:1", "Creamy texture", VEGAN_DF),
        sub("Tofu Cheese", "1:1", "Firm, good for melting", VEGAN_DF),
    ]),
    ("sour_cream", &[
        sub("Greek Yogurt", "1:1", "Tangy and creamy", VEGETARIAN),
        sub("Coconut Cream + Lemon", "1:1", "Mix with lemon juice", VEGAN_DF),
        sub("Cashew Sour Cream", "1:1", "Blend cashews with vinegar", VEGAN_DF),
    ]),
    ("yogurt", &[
        sub("Coconut Yogurt", "1:1", "Creamy, probiotic", VEGAN_DF),
        sub("Soy Yogurt", "1:1", "High protein, tangy", VEGAN_DF),
        sub("Almond Yogurt", "1:1", "Light and creamy", VEGAN_DF),
    ]),
    ("buttermilk", &[
        sub("Milk + Lemon Juice", "1 cup + 1 tbsp", "Let sit 5 minutes", VEGETARIAN),
        sub("Milk + Vinegar", "1 cup + 1 tbsp", "White vinegar works best", VEGETARIAN),
        sub("Plant Milk + Lemon", "1:1", "Same method as dairy", VEGAN_DF),
    ]),
    ("heavy_cream", &[
        sub("Coconut Cream", "1:1", "Rich and thick", VEGAN_DF),
        sub("Cashew Cream", "1:1", "Blend cashews with water", VEGAN_DF),
        sub("Evaporated Milk", "1:1", "Lower fat option", VEGETARIAN),
    ]),
    // Eggs & binders
    ("eggs", &[
        sub("Flax Egg", "1 tbsp flax + 3 tbsp water", "Best for baking", &["vegan"]),
        sub("Chia Egg", "1 tbsp chia + 3 tbsp water", "Similar to flax", &["vegan"]),
        sub("Banana", "1/2 per egg", "Adds sweetness", &["vegan"]),
        sub("Applesauce", "1/4 cup per egg", "Adds moisture", &["vegan"]),
        sub("Silken Tofu", "1/4 cup per egg", "Neutral flavor", &["vegan"]),
        sub("Aquafaba", "3 tbsp per egg", "Chickpea liquid", &["vegan"]),
    ]),
    // Sweeteners
    ("sugar", &[
        sub("Honey", "3/4:1", "Reduce liquid", VEGETARIAN),
        sub("Maple Syrup", "3/4:1", "Reduce liquid", VEGAN_DF),
        sub("Stevia", "1 tsp per cup", "Very sweet", &["vegan", "dairy_free", "keto"]),
        sub("Coconut Sugar", "1:1", "Lower glycemic", VEGAN_DF),
        sub("Monk Fruit", "1/2 tsp per cup", "Zero-calorie", &["vegan", "dairy_free", "keto"]),
    ]),
    ("honey", &[
        sub("Maple Syrup", "1:1", "Similar consistency", VEGAN_DF),
        sub("Agave Nectar", "1:1", "Very sweet", VEGAN_DF),
        sub("Date Syrup", "1:1", "Caramel-like", VEGAN_DF),
    ]),
    // Flours & starches
    ("flour", &[
        sub("Almond Flour", "1:1", "Gluten-free, nutty", &["gluten_free", "vegetarian"]),
        sub("Rice Flour", "1:1", "Gluten-free", &["gluten_free", "vegetarian"]),
        sub("Oat Flour", "1:1", "Blend oats", VEGETARIAN),
        sub("Coconut Flour", "1/4:1", "Very absorbent", &["gluten_free", "vegetarian"]),
        sub("GF Flour Blend", "1:1", "Best for most recipes", &["gluten_free", "vegetarian"]),
    ]),
    ("cornstarch", &[
        sub("Arrowroot Powder", "1:1", "Works at lower temps", &["vegan", "dairy_free", "gluten_free"]),
        sub("Tapioca Starch", "1:1", "Glossy finish", &["vegan", "dairy_free", "gluten_free"]),
        sub("Potato Starch", "1:1", "Good for baking", &["vegan", "dairy_free", "gluten_free"]),
    ]),
    ("baking_powder", &[
        sub("Baking Soda + Cream of Tartar", "1/4 tsp + 1/2 tsp per 1 tsp", "Mix immediately", VEGAN_DF),
        sub("Baking Soda + Lemon Juice", "1/2 tsp + 1 tsp per 1 tsp", "Use immediately", VEGAN_DF),
    ]),
    ("yeast", &[
        sub("Baking Powder", "1 tsp per packet", "For quick breads only", VEGAN_DF),
        sub("Sourdough Starter", "1:1", "Longer rising time", VEGAN_DF),
    ]),
    // Fats & oils
    ("oil", &[
        sub("Butter", "1:1", "Adds richness", VEGETARIAN),
        sub("Applesauce", "1:1", "For baking, lower fat", &["vegan", "dairy_free", "low_fat"]),
        sub("Mashed Avocado", "1:1", "Healthy fats", VEGAN_DF),
        sub("Greek Yogurt", "1:1", "Creamy, adds protein", VEGETARIAN),
    ]),
    ("vegetable_oil", &[
        sub("Coconut Oil", "1:1", "Solid at room temp", VEGAN_DF),
        sub("Olive Oil", "3/4:1", "Good for savory", VEGAN_DF),
        sub("Avocado Oil", "1:1", "Neutral, high smoke point", VEGAN_DF),
    ]),
    // Condiments & seasonings
    ("vinegar", &[
        sub("Lemon Juice", "1:1", "Similar acidity", VEGAN_DF),
        sub("Lime Juice", "1:1", "Works in most recipes", VEGAN_DF),
        sub("Apple Cider Vinegar", "1:1", "Similar tang", VEGAN_DF),
    ]),
    ("soy_sauce", &[
        sub("Tamari", "1:1", "Gluten-free alternative", &["vegan", "dairy_free", "gluten_free"]),
        sub("Coconut Aminos", "1:1", "Gluten-free, less sodium", &["vegan", "dairy_free", "gluten_free"]),
        sub("Liquid Aminos", "1:1", "Similar flavor", VEGAN_DF),
    ]),
    ("garlic", &[
        sub("Garlic Powder", "1/8 tsp per clove", "More potent", &["vegan", "dairy_free", "low_fodmap"]),
        sub("Shallots", "1 small per clove", "Milder flavor", VEGAN_DF),
        sub("Asafoetida", "Small pinch", "Strong when cooked", &["vegan", "dairy_free", "low_fodmap"]),
    ]),
    ("onion", &[
        sub("Shallots", "1:1", "Milder, sweeter", VEGAN_DF),
        sub("Green Onions", "1:1", "Less strong", VEGAN_DF),
        sub("Onion Powder", "1 tbsp per onion", "Use sparingly", &["vegan", "dairy_free", "low_fodmap"]),
    ]),
    ("lemon", &[
        sub("Lime", "1:1", "Similar acidity", VEGAN_DF),
        sub("Orange", "1:1", "Sweeter", VEGAN_DF),
        sub("White Wine Vinegar", "1:1", "For cooking only", VEGAN_DF),
    ]),
    ("lime", &[
        sub("Lemon", "1:1", "Similar acidity", VEGAN_DF),
        sub("Grapefruit", "1:1", "Tarter", VEGAN_DF),
    ]),
    // Grains & pasta
    ("bread_crumbs", &[
        sub("Rolled Oats", "1:1", "Process briefly", VEGETARIAN),
        sub("Crushed Crackers", "1:1", "Salted or unsalted", VEGETARIAN),
        sub("Almond Flour", "1:1", "Gluten-free coating", &["gluten_free", "vegetarian"]),
        sub("Panko", "1:1", "Extra crispy", VEGETARIAN),
    ]),
    ("pasta", &[
        sub("Zucchini Noodles", "1:1", "Low carb", &["vegan", "dairy_free", "keto", "low_carb"]),
        sub("Rice Noodles", "1:1", "Gluten-free", &["vegan", "dairy_free", "gluten_free"]),
        sub("Spiralized Squash", "1:1", "Spaghetti squash", &["vegan", "dairy_free", "keto"]),
        sub("Chickpea Pasta", "1:1", "Higher protein", &["vegan", "dairy_free", "gluten_free"]),
        sub("Quinoa Pasta", "1:1", "Gluten-free", &["vegan", "dairy_free", "gluten_free"]),
    ]),
    ("rice", &[
        sub("Cauliflower Rice", "1:1", "Low carb", &["vegan", "dairy_free", "keto", "low_carb"]),
        sub("Quinoa", "1:1", "Higher protein", &["vegan", "dairy_free", "gluten_free"]),
        sub("Basmati Rice", "1:1", "Fragrant", &["vegan", "dairy_free", "gluten_free"]),
        sub("Wild Rice", "1:1", "Nuttier flavor", &["vegan", "dairy_free", "gluten_free"]),
    ]),
    // Baking
    ("chocolate", &[
        sub("Carob", "1:1", "Caffeine-free", VEGAN_DF),
        sub("Cocoa Powder + Sugar", "1:1", "Mix with sweetener", VEGAN_DF),
        sub("Dark Chocolate 70%+", "1:1", "Check for dairy-free", VEGAN_DF),
        sub("Cacao Nibs", "1:1", "Crunchy, intense", &["vegan", "dairy_free", "raw"]),
    ]),
    ("vanilla", &[
        sub("Maple Syrup", "1:1", "Distinct flavor", VEGAN_DF),
        sub("Almond Extract", "1/2:1", "Much stronger", VEGAN_DF),
    ]),
    ("cinnamon", &[
        sub("Nutmeg", "1/4:1", "Warmer, sweeter", VEGAN_DF),
        sub("Pumpkin Pie Spice", "1:1", "Contains cinnamon", VEGAN_DF),
        sub("Allspice", "1/2:1", "More intense", VEGAN_DF),
        sub("Ginger", "1/2:1", "More zesty", VEGAN_DF),
    ]),
    ("nutmeg", &[
        sub("Cinnamon", "2:1", "Milder", VEGAN_DF),
        sub("Allspice", "1:1", "Similar warmth", VEGAN_DF),
        sub("Mace", "1:1", "From same plant", VEGAN_DF),
    ]),
];

/// Table key for an ingredient: lowercased, whitespace runs become `_`
pub fn substitute_key(ingredient: &str) -> String {
    ingredient
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// All options for an ingredient, unfiltered
pub fn lookup(ingredient: &str) -> Option<&'static [Substitute]> {
    let key = substitute_key(ingredient);
    SUBSTITUTES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, options)| *options)
}

/// Ingredients the table knows about
pub fn known_ingredients() -> impl Iterator<Item = &'static str> {
    SUBSTITUTES.iter().map(|(name, _)| *name)
}

pub fn get_substitutes(ingredient: &str, dietary: Option<&str>) -> SubstitutesResponse {
    let key = substitute_key(ingredient);
    let dietary = dietary
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty());

    let Some(options) = lookup(ingredient) else {
        return SubstitutesResponse {
            ingredient: ingredient.to_string(),
            key,
            found: false,
            dietary,
            filtered: false,
            substitutes: Vec::new(),
        };
    };

    let matching: Vec<Substitute> = match &dietary {
        Some(tag) => options
            .iter()
            .filter(|option| option.dietary.iter().any(|t| t == tag))
            .copied()
            .collect(),
        None => Vec::new(),
    };

    let (filtered, substitutes) = if matching.is_empty() {
        (false, options.to_vec())
    } else {
        (true, matching)
    };

    SubstitutesResponse {
        ingredient: ingredient.to_string(),
        key,
        found: true,
        dietary,
        filtered,
        substitutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_key() {
        assert_eq!(substitute_key("Sour Cream"), "sour_cream");
        assert_eq!(substitute_key("  heavy   cream "), "heavy_cream");
        assert_eq!(substitute_key("soy_sauce"), "soy_sauce");
    }

    #[test]
    fn test_table_covers_common_ingredients() {
        assert_eq!(known_ingredients().count(), 30);
        for name in ["butter", "eggs", "baking_powder", "nutmeg"] {
            assert!(lookup(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let response = get_substitutes("BUTTER", None);
        assert!(response.found);
        assert!(!response.filtered);
        assert_eq!(response.substitutes.len(), 5);
        assert_eq!(response.substitutes[0].substitute, "Coconut Oil");
    }

    #[test]
    fn test_dietary_filter() {
        let response = get_substitutes("butter", Some("Vegetarian"));
        assert!(response.filtered);
        assert_eq!(response.dietary.as_deref(), Some("vegetarian"));
        assert_eq!(response.substitutes.len(), 1);
        assert_eq!(response.substitutes[0].substitute, "Greek Yogurt");
    }

    #[test]
    fn test_dietary_filter_falls_back_when_empty() {
        let response = get_substitutes("eggs", Some("keto"));
        assert!(response.found);
        assert!(!response.filtered);
        assert_eq!(response.substitutes.len(), 6);
    }

    #[test]
    fn test_unknown_ingredient() {
        let response = get_substitutes("dragon fruit", Some("vegan"));
        assert!(!response.found);
        assert_eq!(response.key, "dragon_fruit");
        assert!(response.substitutes.is_empty());
    }
}
