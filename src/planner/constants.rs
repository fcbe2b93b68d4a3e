/// Side dishes above this sodium level trigger a low-sodium substitution
/// for hypertensive patients.
pub const HYPERTENSION_SODIUM_TRIGGER_MG: f64 = 400.0;

/// A low-sodium substitute must have strictly less sodium than this.
pub const LOW_SODIUM_LIMIT_MG: f64 = 300.0;

/// Coarse daily energy need per kg of body weight.
pub const DAILY_KCAL_PER_KG: f64 = 30.0;

/// Meals per day; the per-meal target is the daily need divided by this.
pub const MEALS_PER_DAY: f64 = 3.0;

/// Calorie-balancing ratio range for staple items.
pub const BALANCE_RATIO_MIN: f64 = 0.7;
pub const BALANCE_RATIO_MAX: f64 = 1.3;

/// Porridge carries less energy per gram than rice, so a converted staple
/// is served at this multiple of the rice portion.
pub const PORRIDGE_PORTION_MULTIPLIER: f64 = 1.5;

/// Item served in place of rice for porridge-texture patients.
pub const PLAIN_PORRIDGE_ITEM: &str = "흰죽";

/// Master-menu items considered per meal.
pub const ITEMS_PER_MEAL: usize = 6;

/// Inventory summary flags stock below this many grams.
pub const LOW_STOCK_THRESHOLD_G: f64 = 1000.0;

/// Mock inventory draws stock from `0..MOCK_STOCK_MAX_G`.
pub const MOCK_STOCK_MAX_G: u32 = 5000;

/// Ingredient names offered to the advisory payload.
pub const ADVISORY_INGREDIENT_LIMIT: usize = 10;
