//! Shared vocabularies — food-type flags, category names, trade tags,
//! and builder step budgets.
//!
//! These are plain constants with no engine dependency. Both the host
//! integration and the native simtest use these.

/// Food-type bit flags carried by ingestible item definitions.
///
/// Stored as a `u16` mask on [`crate::defs::IngestibleProps`].
pub mod food_flags {
    pub const NONE: u16 = 0;
    pub const VEGETABLE: u16 = 1 << 0;
    pub const FRUIT: u16 = 1 << 1;
    pub const MEAT: u16 = 1 << 2;
    pub const ANIMAL_PRODUCT: u16 = 1 << 3;
    pub const PLANT: u16 = 1 << 4;
    pub const SEED: u16 = 1 << 5;
    pub const MEAL: u16 = 1 << 6;
    pub const LIQUOR: u16 = 1 << 7;
    pub const PROCESSED: u16 = 1 << 8;

    /// Flags that classify an ingestible drug/medicine as food rather
    /// than a medical item.
    pub const FOODLIKE: u16 = LIQUOR | MEAL | VEGETABLE | FRUIT;
}

/// Well-known thing-category names referenced by the classifier.
///
/// Categories form a parent chain; membership checks walk the chain
/// (see [`crate::defs::GameData::belongs_to_category`]).
pub mod categories {
    pub const ROOT: &str = "Root";
    pub const ITEMS: &str = "Items";
    pub const CORPSES: &str = "Corpses";
    pub const CHUNKS: &str = "Chunks";
    pub const TOYS: &str = "Toys";
    pub const FOODS: &str = "Foods";
    pub const SWEET_MEALS: &str = "SweetMeals";
    pub const MEAT_RAW: &str = "MeatRaw";
    pub const MEDICAL_DRUGS: &str = "MedicalDrugs";
    pub const BODY_PARTS: &str = "BodyParts";
    pub const PROSTHESES: &str = "Prostheses";
    pub const EXOTIC_PARTS: &str = "ExoticParts";

    /// Suffix marking organ categories ("AnimalOrgans", "HumanOrgans", ...).
    pub const ORGANS_SUFFIX: &str = "Organs";

    /// Def-name prefix for medical serums classified into Medical.
    pub const SERUM_PREFIX: &str = "Serum";
}

/// Trade tags referenced by the classifier.
pub mod trade_tags {
    pub const AMMUNITION: &str = "Ammunition";
}

/// Per-step work budgets for the incremental catalog builder.
///
/// One `drive_one_step` call advances the cursor by at most the budget of
/// the current phase, so the host can call it once per tick without the
/// frame ever blocking on a full catalog pass.
pub mod budgets {
    /// Defs counted per step while totalling the universe.
    pub const COUNT_STEP: usize = 500;
    /// Defs inspected per step while collecting material definitions.
    pub const STUFF_STEP: usize = 100;
    /// Defs classified and expanded per step.
    pub const THING_STEP: usize = 50;
}
