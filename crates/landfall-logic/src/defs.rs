//! Item, category, and recipe definitions — the read-only data the host
//! environment exposes to the catalog.
//!
//! Everything here is an immutable snapshot for the process lifetime.
//! [`GameData`] is the enumerable def source plus the market-value
//! resolver; the catalog builder takes ownership of one at construction
//! and never mutates it.
//!
//! All structs are serde-ready with struct-level defaults so sparse JSON
//! fixtures (see `data/item_defs.json` in the simtest harness) only spell
//! out the fields they care about.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Display color (linear RGB, 0.0–1.0 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Biological sex of an animal catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// How willing colonists are to eat a food, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FoodPreferability {
    /// Eaten only when starving.
    DesperateOnly,
    RawBad,
    RawTasty,
    MealAwful,
    MealSimple,
    MealFine,
    MealLavish,
}

/// Drug classification for ingestible items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrugCategory {
    None,
    Social,
    Medical,
    Hard,
}

impl Default for DrugCategory {
    fn default() -> Self {
        DrugCategory::None
    }
}

/// Ingestion properties of a food or drug definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestibleProps {
    /// Bit mask of [`crate::constants::food_flags`].
    pub food_type: u16,
    pub preferability: FoodPreferability,
    pub drug_category: DrugCategory,
}

impl Default for IngestibleProps {
    fn default() -> Self {
        Self {
            food_type: 0,
            preferability: FoodPreferability::MealSimple,
            drug_category: DrugCategory::None,
        }
    }
}

/// Properties of a definition usable as a construction material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StuffProps {
    /// Stuff-category tags this material belongs to ("Metallic", "Fabric", ...).
    pub categories: Vec<String>,
    /// Multiplier applied to the base value of items built from this material.
    pub value_factor: f64,
    /// Color items built from this material take on.
    pub color: Color,
}

impl Default for StuffProps {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            value_factor: 1.0,
            color: Color::WHITE,
        }
    }
}

/// Properties of an animal race definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceProps {
    /// Whether the race has distinct male/female variants.
    pub has_sexes: bool,
}

impl Default for RaceProps {
    fn default() -> Self {
        Self { has_sexes: true }
    }
}

/// A static, read-only description of a kind of spawnable thing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDef {
    pub def_name: String,
    pub label: String,
    /// Thing category this def belongs to, if any (see [`CategoryDef`]).
    pub category: Option<String>,
    /// Base market value before any material factor.
    pub market_value: f64,
    pub color: Color,

    // Lifecycle and placement flags.
    /// Transient visual effect; never a real item.
    pub is_mote: bool,
    /// In-progress construction product.
    pub is_unfinished: bool,
    /// Can be scattered into a start area.
    pub scatterable: bool,
    pub destroy_on_drop: bool,
    pub is_blueprint: bool,
    pub is_frame: bool,
    pub is_plant: bool,

    // Role flags.
    pub is_apparel: bool,
    pub is_weapon: bool,
    pub weapon_tags: Vec<String>,
    pub is_ranged_weapon: bool,
    pub is_drug: bool,
    pub is_medicine: bool,
    pub counts_as_resource: bool,
    pub trade_tags: Vec<String>,
    /// Mortar shell or similar launchable ordnance.
    pub is_shell: bool,
    pub is_building: bool,
    /// Building can be packed up and reinstalled.
    pub minifiable: bool,

    pub ingestible: Option<IngestibleProps>,

    // Construction.
    /// Built from a material chosen at construction time.
    pub made_from_material: bool,
    /// Stuff-category tags eligible to build this item.
    pub stuff_categories: Vec<String>,
    /// Set when this def is itself usable as a material.
    pub stuff: Option<StuffProps>,

    /// Set for animal race definitions.
    pub race: Option<RaceProps>,
}

impl Default for ItemDef {
    fn default() -> Self {
        Self {
            def_name: String::new(),
            label: String::new(),
            category: None,
            market_value: 0.0,
            color: Color::WHITE,
            is_mote: false,
            is_unfinished: false,
            scatterable: true,
            destroy_on_drop: false,
            is_blueprint: false,
            is_frame: false,
            is_plant: false,
            is_apparel: false,
            is_weapon: false,
            weapon_tags: Vec::new(),
            is_ranged_weapon: false,
            is_drug: false,
            is_medicine: false,
            counts_as_resource: false,
            trade_tags: Vec::new(),
            is_shell: false,
            is_building: false,
            minifiable: false,
            ingestible: None,
            made_from_material: false,
            stuff_categories: Vec::new(),
            stuff: None,
            race: None,
        }
    }
}

impl ItemDef {
    /// New def with the given name and label and default flags
    /// (scatterable, zero value, no category).
    pub fn named(def_name: &str, label: &str) -> Self {
        Self {
            def_name: def_name.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn is_ingestible(&self) -> bool {
        self.ingestible.is_some()
    }

    /// Whether this def is usable as a construction material.
    pub fn is_material(&self) -> bool {
        self.stuff.is_some()
    }

    pub fn is_animal(&self) -> bool {
        self.race.is_some()
    }

    pub fn has_trade_tag(&self, tag: &str) -> bool {
        self.trade_tags.iter().any(|t| t == tag)
    }
}

/// A thing category — a named node in a parent chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub parent: Option<String>,
}

/// One ingredient of a surgical recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCount {
    pub def_name: String,
    pub count: u32,
}

/// A surgical recipe — the ingredient list used to price an implant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDef {
    pub def_name: String,
    pub ingredients: Vec<IngredientCount>,
}

/// The enumerable source of definitions plus the market-value resolver.
///
/// A read-only snapshot of everything the host environment exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub items: Vec<ItemDef>,
    pub categories: HashMap<String, CategoryDef>,
    pub recipes: HashMap<String, RecipeDef>,
}

impl GameData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: ItemDef) {
        self.items.push(item);
    }

    pub fn add_category(&mut self, name: &str, parent: Option<&str>) {
        self.categories.insert(
            name.to_string(),
            CategoryDef {
                name: name.to_string(),
                parent: parent.map(|p| p.to_string()),
            },
        );
    }

    pub fn add_recipe(&mut self, recipe: RecipeDef) {
        self.recipes.insert(recipe.def_name.clone(), recipe);
    }

    /// Look up an item definition by def name.
    pub fn item(&self, def_name: &str) -> Option<&ItemDef> {
        self.items.iter().find(|i| i.def_name == def_name)
    }

    /// Market value for an (item, material) pair: the item's base value
    /// scaled by the material's value factor.
    pub fn market_value(&self, item: &ItemDef, material: Option<&ItemDef>) -> f64 {
        match material.and_then(|m| m.stuff.as_ref()) {
            Some(stuff) => item.market_value * stuff.value_factor,
            None => item.market_value,
        }
    }

    /// Walk the item's category parent chain, calling `visit` on each
    /// category name until it returns true or the chain ends.
    ///
    /// A visited set keyed by category name guards against cycles in
    /// malformed data; a cycle terminates the walk instead of looping.
    pub fn category_in_chain<F>(&self, item: &ItemDef, mut visit: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        let Some(start) = item.category.as_deref() else {
            return false;
        };
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = Some(start);
        while let Some(name) = current {
            if !visited.insert(name) {
                return false; // cycle
            }
            if visit(name) {
                return true;
            }
            current = self
                .categories
                .get(name)
                .and_then(|c| c.parent.as_deref());
        }
        false
    }

    /// Whether the item belongs to `target` directly or through its
    /// category's parent chain.
    pub fn belongs_to_category(&self, item: &ItemDef, target: &str) -> bool {
        self.category_in_chain(item, |name| name == target)
    }
}
