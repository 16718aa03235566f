//! Fixed nutrition guidance tables keyed by age bracket, and the bracket
//! resolution used by the recommendations endpoint.

use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct FoodItem {
    pub emoji: &'static str,
    pub name: &'static str,
    pub benefit: &'static str,
}

#[derive(Serialize, Debug)]
pub struct FoodCategory {
    pub category: &'static str,
    pub icon: &'static str,
    pub items: &'static [FoodItem],
}

#[derive(Serialize, Debug)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Serialize, Debug)]
pub struct MealPlanEntry {
    pub time: &'static str,
    pub items: &'static str,
}

#[derive(Serialize, Debug)]
pub struct NutritionGuide {
    pub title: &'static str,
    pub description: &'static str,
    pub foods: &'static [FoodCategory],
    pub avoid: &'static [&'static str],
    pub tips: &'static [Tip],
    pub sample_meal_plan: &'static [MealPlanEntry],
}

/// All four brackets, keyed the way clients address them.
#[derive(Serialize, Debug)]
pub struct FullGuide {
    #[serde(rename = "0-6")]
    pub zero_to_six: &'static NutritionGuide,
    #[serde(rename = "6-8")]
    pub six_to_eight: &'static NutritionGuide,
    #[serde(rename = "8-12")]
    pub eight_to_twelve: &'static NutritionGuide,
    #[serde(rename = "12+")]
    pub twelve_plus: &'static NutritionGuide,
}

pub fn full_guide() -> FullGuide {
    FullGuide {
        zero_to_six: &GUIDE_0_6,
        six_to_eight: &GUIDE_6_8,
        eight_to_twelve: &GUIDE_8_12,
        twelve_plus: &GUIDE_12_PLUS,
    }
}

pub fn guide_for(age_group: &str) -> Option<&'static NutritionGuide> {
    match age_group {
        "0-6" => Some(&GUIDE_0_6),
        "6-8" => Some(&GUIDE_6_8),
        "8-12" => Some(&GUIDE_8_12),
        "12+" => Some(&GUIDE_12_PLUS),
        _ => None,
    }
}

pub fn age_group_for_months(age_in_months: i32) -> &'static str {
    if age_in_months < 6 {
        "0-6"
    } else if age_in_months < 8 {
        "6-8"
    } else if age_in_months < 12 {
        "8-12"
    } else {
        "12+"
    }
}

pub static GUIDE_0_6: NutritionGuide = NutritionGuide {
    title: "0-6 Months: Exclusive Milk Feeding",
    description: "Breast milk or formula provides all necessary nutrients. No solid foods or water needed.",
    foods: &[FoodCategory {
        category: "Primary Nutrition",
        icon: "🍼",
        items: &[
            FoodItem { emoji: "🤱", name: "Breast Milk", benefit: "Best source of nutrition, antibodies, perfect temperature" },
            FoodItem { emoji: "🍼", name: "Iron-Fortified Formula", benefit: "Complete nutrition if breastfeeding not possible" },
            FoodItem { emoji: "💧", name: "No Water Needed", benefit: "Milk provides adequate hydration" },
        ],
    }],
    avoid: &[
        "Solid foods before 6 months",
        "Honey (botulism risk)",
        "Cow's milk as main drink",
        "Water (except as advised by doctor)",
        "Juice or sweetened beverages",
    ],
    tips: &[
        Tip { title: "Feeding Frequency", description: "Feed 8-12 times per day (every 2-3 hours)" },
        Tip { title: "Watch for Hunger Cues", description: "Rooting, sucking on hands, fussiness" },
        Tip { title: "Burp Regularly", description: "After each feeding to prevent gas" },
    ],
    sample_meal_plan: &[MealPlanEntry {
        time: "Every 2-3 hours",
        items: "Breast milk or formula (2-4 oz per feeding)",
    }],
};

pub static GUIDE_6_8: NutritionGuide = NutritionGuide {
    title: "6-8 Months: Introduction to Solid Foods",
    description: "Start introducing pureed foods while continuing breast milk or formula.",
    foods: &[
        FoodCategory {
            category: "First Foods",
            icon: "🥄",
            items: &[
                FoodItem { emoji: "🥣", name: "Iron-Fortified Cereals", benefit: "Rice, oatmeal - mix with breast milk/formula" },
                FoodItem { emoji: "🥕", name: "Pureed Vegetables", benefit: "Carrots, sweet potatoes, peas, squash" },
                FoodItem { emoji: "🍎", name: "Pureed Fruits", benefit: "Apples, pears, bananas, avocado" },
                FoodItem { emoji: "🍗", name: "Pureed Meats", benefit: "Chicken, turkey - iron source" },
            ],
        },
        FoodCategory {
            category: "Continue Milk",
            icon: "🍼",
            items: &[
                FoodItem { emoji: "🤱", name: "Breast Milk", benefit: "Still primary nutrition source" },
                FoodItem { emoji: "🍼", name: "Formula", benefit: "24-32 oz per day" },
            ],
        },
    ],
    avoid: &[
        "Honey (until 12 months)",
        "Whole cow's milk as main drink",
        "Choking hazards (nuts, popcorn, grapes)",
        "Added salt or sugar",
        "Egg whites (allergies)",
    ],
    tips: &[
        Tip { title: "Start Slowly", description: "Begin with 1-2 tablespoons once a day" },
        Tip { title: "One Food at a Time", description: "Wait 3-5 days before introducing new foods to watch for allergies" },
        Tip { title: "Texture Matters", description: "Smooth purees first, gradually increase thickness" },
    ],
    sample_meal_plan: &[
        MealPlanEntry { time: "Morning", items: "Breast milk/formula + 2 tbsp iron-fortified cereal" },
        MealPlanEntry { time: "Midday", items: "Breast milk/formula + 2 tbsp pureed vegetables" },
        MealPlanEntry { time: "Evening", items: "Breast milk/formula + 2 tbsp pureed fruits" },
        MealPlanEntry { time: "Throughout Day", items: "Breast milk/formula every 3-4 hours" },
    ],
};

pub static GUIDE_8_12: NutritionGuide = NutritionGuide {
    title: "8-12 Months: Expanding Variety",
    description: "Introduce more textures and finger foods. Continue breast milk or formula.",
    foods: &[
        FoodCategory {
            category: "Proteins",
            icon: "🍗",
            items: &[
                FoodItem { emoji: "🥚", name: "Eggs", benefit: "Scrambled or hard-boiled" },
                FoodItem { emoji: "🍗", name: "Poultry", benefit: "Chicken, turkey - diced small" },
                FoodItem { emoji: "🐟", name: "Fish", benefit: "Salmon, cod - boneless, flaked" },
                FoodItem { emoji: "🫘", name: "Legumes", benefit: "Beans, lentils - mashed" },
            ],
        },
        FoodCategory {
            category: "Grains",
            icon: "🍞",
            items: &[
                FoodItem { emoji: "🍞", name: "Bread", benefit: "Whole grain, cut small" },
                FoodItem { emoji: "🍝", name: "Pasta", benefit: "Small shapes, well-cooked" },
                FoodItem { emoji: "🍚", name: "Rice", benefit: "Soft-cooked" },
            ],
        },
        FoodCategory {
            category: "Dairy",
            icon: "🧀",
            items: &[
                FoodItem { emoji: "🧀", name: "Cheese", benefit: "Mild varieties, shredded or cubed" },
                FoodItem { emoji: "🥛", name: "Yogurt", benefit: "Plain, full-fat" },
            ],
        },
        FoodCategory {
            category: "Fruits & Vegetables",
            icon: "🥦",
            items: &[
                FoodItem { emoji: "🥦", name: "Soft Vegetables", benefit: "Cooked broccoli, carrots, green beans" },
                FoodItem { emoji: "🍌", name: "Soft Fruits", benefit: "Banana, melon, berries (cut small)" },
            ],
        },
    ],
    avoid: &[
        "Honey (until 12 months)",
        "Whole nuts (choking hazard)",
        "Raw vegetables",
        "Large pieces of food",
        "Added salt or sugar",
    ],
    tips: &[
        Tip { title: "Encourage Self-Feeding", description: "Offer finger foods baby can pick up" },
        Tip { title: "Variety is Key", description: "Introduce different flavors and textures" },
        Tip { title: "Family Meals", description: "Let baby join family meals for social eating" },
    ],
    sample_meal_plan: &[
        MealPlanEntry { time: "Breakfast", items: "Oatmeal with mashed banana + breast milk/formula" },
        MealPlanEntry { time: "Mid-Morning", items: "Breast milk/formula" },
        MealPlanEntry { time: "Lunch", items: "Soft vegetables, diced chicken, rice + water" },
        MealPlanEntry { time: "Afternoon", items: "Yogurt with soft fruit + breast milk/formula" },
        MealPlanEntry { time: "Dinner", items: "Pasta with cheese, steamed broccoli + water" },
        MealPlanEntry { time: "Before Bed", items: "Breast milk/formula" },
    ],
};

pub static GUIDE_12_PLUS: NutritionGuide = NutritionGuide {
    title: "12+ Months: Family Foods",
    description: "Transition to family meals with healthy variety. Can start whole milk.",
    foods: &[
        FoodCategory {
            category: "Proteins",
            icon: "🥩",
            items: &[
                FoodItem { emoji: "🥩", name: "Lean Meats", benefit: "Beef, pork, lamb - tender cuts" },
                FoodItem { emoji: "🍗", name: "Poultry", benefit: "Chicken, turkey" },
                FoodItem { emoji: "🐟", name: "Fish", benefit: "Variety of fish, boneless" },
                FoodItem { emoji: "🥚", name: "Eggs", benefit: "Any style" },
                FoodItem { emoji: "🫘", name: "Beans", benefit: "All varieties" },
            ],
        },
        FoodCategory {
            category: "Dairy",
            icon: "🥛",
            items: &[
                FoodItem { emoji: "🥛", name: "Whole Milk", benefit: "16-24 oz per day (after 12 months)" },
                FoodItem { emoji: "🧀", name: "Cheese", benefit: "Various types" },
                FoodItem { emoji: "🥛", name: "Yogurt", benefit: "Plain or low-sugar varieties" },
            ],
        },
        FoodCategory {
            category: "Grains",
            icon: "🍞",
            items: &[
                FoodItem { emoji: "🍞", name: "Whole Grain Bread", benefit: "Toast, sandwiches" },
                FoodItem { emoji: "🍝", name: "Pasta", benefit: "Various shapes" },
                FoodItem { emoji: "🍚", name: "Rice", benefit: "Brown or white" },
                FoodItem { emoji: "🥣", name: "Cereals", benefit: "Low-sugar options" },
            ],
        },
        FoodCategory {
            category: "Fruits & Vegetables",
            icon: "🥗",
            items: &[
                FoodItem { emoji: "🥗", name: "All Vegetables", benefit: "Cooked or raw (age-appropriate)" },
                FoodItem { emoji: "🍎", name: "All Fruits", benefit: "Fresh, cut appropriately" },
            ],
        },
    ],
    avoid: &[
        "Choking hazards (whole grapes, nuts, popcorn)",
        "Excessive juice or sweetened drinks",
        "Foods high in salt or sugar",
        "Unpasteurized dairy or juice",
        "Raw or undercooked eggs/meat",
    ],
    tips: &[
        Tip { title: "Balanced Meals", description: "Include protein, grains, fruits/vegetables" },
        Tip { title: "Limit Milk", description: "Too much milk can reduce appetite for solids" },
        Tip { title: "Healthy Snacks", description: "Offer nutritious snacks between meals" },
        Tip { title: "Stay Hydrated", description: "Offer water throughout the day" },
    ],
    sample_meal_plan: &[
        MealPlanEntry { time: "Breakfast", items: "Scrambled eggs, whole grain toast, fruit, milk" },
        MealPlanEntry { time: "Mid-Morning Snack", items: "Yogurt with berries, water" },
        MealPlanEntry { time: "Lunch", items: "Turkey sandwich, carrot sticks, cheese, milk" },
        MealPlanEntry { time: "Afternoon Snack", items: "Apple slices with peanut butter, water" },
        MealPlanEntry { time: "Dinner", items: "Grilled chicken, rice, steamed vegetables, water" },
        MealPlanEntry { time: "Before Bed", items: "Small snack if needed, water" },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries() {
        assert_eq!(age_group_for_months(0), "0-6");
        assert_eq!(age_group_for_months(5), "0-6");
        assert_eq!(age_group_for_months(6), "6-8");
        assert_eq!(age_group_for_months(7), "6-8");
        assert_eq!(age_group_for_months(8), "8-12");
        assert_eq!(age_group_for_months(11), "8-12");
        assert_eq!(age_group_for_months(12), "12+");
        assert_eq!(age_group_for_months(30), "12+");
    }

    #[test]
    fn every_bracket_resolves() {
        for group in ["0-6", "6-8", "8-12", "12+"] {
            assert!(guide_for(group).is_some(), "missing guide for {group}");
        }
        assert!(guide_for("3-4").is_none());
    }

    #[test]
    fn full_guide_serializes_with_bracket_keys() {
        let value = serde_json::to_value(full_guide()).unwrap();
        assert!(value.get("0-6").is_some());
        assert!(value.get("12+").is_some());
        assert_eq!(
            value["0-6"]["title"],
            "0-6 Months: Exclusive Milk Feeding"
        );
    }
}
