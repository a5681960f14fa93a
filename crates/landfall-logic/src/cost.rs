//! Cost engine — point totals for equipment selections and for fully
//! customized colonists.
//!
//! Aggregation is synchronous and allocation-light over the already
//! built, read-only catalog; it may run once per UI refresh. Every call
//! recomputes the caller-owned [`CostDetails`] buffer from scratch.
//! Missing catalog entries price as zero — presets may reference defs
//! that disappeared from the environment between sessions, and that is
//! not an error.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::builder::CatalogBuilder;
use crate::catalog::CatalogKey;
use crate::defs::RecipeDef;
use crate::pricing;

/// Flat point overhead added to every colonist's market value.
const COLONIST_OVERHEAD: f64 = 300.0;

/// Starter synthetic fabric eligible for the apparel discount table.
const STARTER_MATERIAL: &str = "Synthweave";
/// Starter-material apparel issued free.
const FREE_STARTER_APPAREL: &[&str] = &["Apparel_WorkPants", "Apparel_BasicShirt"];
/// Starter-material apparel priced at a fraction of catalog cost.
const CHEAP_STARTER_APPAREL: &[&str] = &["Apparel_FieldJacket", "Apparel_WorkBoots"];
const CHEAP_STARTER_RATE: f64 = 0.15;

/// A chosen catalog record plus a quantity. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSelection {
    pub key: CatalogKey,
    pub count: u32,
}

impl EquipmentSelection {
    pub fn new(key: CatalogKey, count: u32) -> Self {
        Self { key, count }
    }
}

/// Interest level in one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassionLevel {
    None,
    Minor,
    Major,
}

/// One worn apparel item, resolved by the host to a body layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WornApparel {
    pub item: String,
    pub material: Option<String>,
}

/// One installed implant, priced through its surgical recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implant {
    /// Surgical recipe def name (see [`crate::defs::RecipeDef`]).
    pub recipe: String,
    /// Body part the implant occupies.
    pub body_part: Option<String>,
    /// Part names from the implant's body part up to the body root.
    pub ancestor_parts: Vec<String>,
}

/// Read-only snapshot of a customized colonist, as supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonistSnapshot {
    /// Stable identity; cost details are keyed by this.
    pub id: u64,
    pub name: String,
    /// Computed market value, before the flat overhead.
    pub market_value: f64,
    /// One entry per skill.
    pub passions: Vec<PassionLevel>,
    pub trait_count: usize,
    pub apparel: Vec<WornApparel>,
    pub implants: Vec<Implant>,
    /// Animals bonded to this colonist, priced into its own total.
    pub bonded_animals: Vec<EquipmentSelection>,
}

impl Default for ColonistSnapshot {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            market_value: 0.0,
            passions: Vec::new(),
            trait_count: 0,
            apparel: Vec::new(),
            implants: Vec::new(),
            bonded_animals: Vec::new(),
        }
    }
}

/// Point-cost breakdown for one colonist, keyed by colonist identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColonistCostDetails {
    pub colonist_id: u64,
    pub name: String,
    pub passions: f64,
    pub traits: f64,
    pub apparel: f64,
    pub bionics: f64,
    pub animals: f64,
    /// Market value plus the flat colonist overhead.
    pub market_value: f64,
    pub total: f64,
}

impl ColonistCostDetails {
    fn compute_total(&mut self) {
        self.total = (self.passions
            + self.traits
            + self.apparel
            + self.bionics
            + self.market_value
            + self.animals)
            .ceil();
    }
}

/// Aggregate cost buffer, recomputed from scratch on every
/// [`calculate`] call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostDetails {
    pub colonist_details: Vec<ColonistCostDetails>,
    /// Sum of all colonist totals.
    pub colonists: f64,
    pub equipment: f64,
    /// Loose animal selections not bonded to any colonist.
    pub animals: f64,
    pub total: f64,
}

/// Cost of one selection: `count × unit_cost`, or 0 for an unknown key.
pub fn calculate_equipment_cost(builder: &CatalogBuilder, selection: &EquipmentSelection) -> f64 {
    match builder.lookup(&selection.key) {
        Some(record) => record.cost * f64::from(selection.count),
        None => 0.0,
    }
}

/// Full point-cost breakdown for one colonist.
pub fn calculate_pawn_cost(builder: &CatalogBuilder, colonist: &ColonistSnapshot) -> ColonistCostDetails {
    let mut details = ColonistCostDetails {
        colonist_id: colonist.id,
        name: colonist.name.clone(),
        ..Default::default()
    };
    details.market_value = colonist.market_value + COLONIST_OVERHEAD;

    let major = colonist
        .passions
        .iter()
        .filter(|p| **p == PassionLevel::Major)
        .count() as u32;
    let minor = colonist
        .passions
        .iter()
        .filter(|p| **p == PassionLevel::Minor)
        .count() as u32;
    details.passions = pricing::passion_cost(major, minor);
    details.traits = pricing::trait_cost(colonist.trait_count);
    details.apparel = apparel_cost(builder, &colonist.apparel).ceil();
    details.bionics = implant_cost(builder, &colonist.implants).ceil();
    details.animals = colonist
        .bonded_animals
        .iter()
        .map(|sel| calculate_equipment_cost(builder, sel))
        .sum();

    details.compute_total();
    details
}

/// Recompute the whole cost buffer: every colonist in input order, all
/// equipment selections, and loose animal selections.
pub fn calculate(
    details: &mut CostDetails,
    builder: &CatalogBuilder,
    colonists: &[ColonistSnapshot],
    equipment: &[EquipmentSelection],
    animals: &[EquipmentSelection],
) {
    details.colonist_details.clear();
    details
        .colonist_details
        .extend(colonists.iter().map(|c| calculate_pawn_cost(builder, c)));

    details.colonists = details.colonist_details.iter().map(|d| d.total).sum();
    details.equipment = pricing::round2(
        equipment
            .iter()
            .map(|sel| calculate_equipment_cost(builder, sel))
            .sum(),
    );
    details.animals = pricing::round2(
        animals
            .iter()
            .map(|sel| calculate_equipment_cost(builder, sel))
            .sum(),
    );
    details.total = (details.colonists + details.equipment + details.animals).ceil();
}

/// Worn apparel subtotal with the starter-material discount table.
fn apparel_cost(builder: &CatalogBuilder, worn: &[WornApparel]) -> f64 {
    worn.iter()
        .map(|w| {
            let key = match &w.material {
                Some(material) => CatalogKey::with_material(&w.item, material),
                None => CatalogKey::of(&w.item),
            };
            let cost = calculate_equipment_cost(builder, &EquipmentSelection::new(key, 1));
            discounted_apparel_cost(w, cost)
        })
        .sum()
}

/// Hard-coded starter discounts: free and 15%-of-cost allowlists,
/// applicable only to the starter synthetic fabric.
fn discounted_apparel_cost(worn: &WornApparel, cost: f64) -> f64 {
    if worn.material.as_deref() == Some(STARTER_MATERIAL) {
        if FREE_STARTER_APPAREL.contains(&worn.item.as_str()) {
            return 0.0;
        }
        if CHEAP_STARTER_APPAREL.contains(&worn.item.as_str()) {
            return cost * CHEAP_STARTER_RATE;
        }
    }
    cost
}

/// Implant subtotal.
///
/// An implant shadowed by an ancestor part that itself carries an
/// implant is skipped (replacing the whole part already paid for the
/// children). Each priced implant averages its recipe's non-medicine
/// ingredients, weighted by required quantity.
fn implant_cost(builder: &CatalogBuilder, implants: &[Implant]) -> f64 {
    let carrying: HashSet<&str> = implants
        .iter()
        .filter_map(|i| i.body_part.as_deref())
        .collect();

    implants
        .iter()
        .filter(|implant| {
            !implant
                .ancestor_parts
                .iter()
                .any(|part| carrying.contains(part.as_str()))
        })
        .filter_map(|implant| builder.data().recipes.get(&implant.recipe))
        .map(|recipe| recipe_ingredient_cost(builder, recipe))
        .sum()
}

/// Quantity-weighted average catalog cost of a recipe's non-medicine
/// ingredients. Unknown ingredients price as zero, like any missing
/// lookup.
fn recipe_ingredient_cost(builder: &CatalogBuilder, recipe: &RecipeDef) -> f64 {
    let mut weighted = 0.0;
    let mut counted = 0u32;
    for ingredient in &recipe.ingredients {
        if let Some(def) = builder.data().item(&ingredient.def_name) {
            if def.is_medicine {
                continue;
            }
        }
        let unit = calculate_equipment_cost(
            builder,
            &EquipmentSelection::new(CatalogKey::of(&ingredient.def_name), 1),
        );
        weighted += unit * f64::from(ingredient.count);
        counted += 1;
    }
    if counted == 0 {
        0.0
    } else {
        weighted / f64::from(counted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{GameData, IngredientCount, ItemDef};

    /// Builder over a tiny loaded catalog with known prices.
    fn loaded_builder() -> CatalogBuilder {
        let mut data = GameData::new();

        let mut spice = ItemDef::named("Spice", "spice");
        spice.counts_as_resource = true;
        spice.market_value = 3.5;
        data.add_item(spice);

        let mut pants = ItemDef::named("Apparel_WorkPants", "work pants");
        pants.is_apparel = true;
        pants.market_value = 30.0;
        data.add_item(pants);

        let mut jacket = ItemDef::named("Apparel_FieldJacket", "field jacket");
        jacket.is_apparel = true;
        jacket.market_value = 80.0;
        data.add_item(jacket);

        let mut core = ItemDef::named("ImplantCore", "implant core");
        core.counts_as_resource = true;
        core.market_value = 40.0;
        data.add_item(core);

        let mut medkit = ItemDef::named("MedkitIndustrial", "medkit");
        medkit.is_medicine = true;
        medkit.market_value = 18.0;
        data.add_item(medkit);

        let mut grazer = ItemDef::named("Grazer", "grazer");
        grazer.race = Some(Default::default());
        grazer.market_value = 200.0;
        data.add_item(grazer);

        data.add_recipe(RecipeDef {
            def_name: "InstallOcularImplant".to_string(),
            ingredients: vec![
                IngredientCount {
                    def_name: "ImplantCore".to_string(),
                    count: 2,
                },
                IngredientCount {
                    def_name: "MedkitIndustrial".to_string(),
                    count: 3,
                },
            ],
        });

        let mut builder = CatalogBuilder::new(data);
        while !builder.is_loaded() {
            builder.drive_one_step();
        }
        builder
    }

    fn bare_colonist(id: u64) -> ColonistSnapshot {
        ColonistSnapshot {
            id,
            name: format!("Colonist {id}"),
            market_value: 1000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_equipment_cost_quantity_times_unit() {
        let builder = loaded_builder();
        let sel = EquipmentSelection::new(CatalogKey::of("Spice"), 10);
        assert_eq!(calculate_equipment_cost(&builder, &sel), 35.0);
    }

    #[test]
    fn test_equipment_cost_absent_key_is_zero() {
        let builder = loaded_builder();
        let sel = EquipmentSelection::new(CatalogKey::of("VanishedDef"), 7);
        assert_eq!(calculate_equipment_cost(&builder, &sel), 0.0);
    }

    #[test]
    fn test_pawn_base_includes_overhead() {
        let builder = loaded_builder();
        let details = calculate_pawn_cost(&builder, &bare_colonist(1));
        assert_eq!(details.market_value, 1300.0);
        assert_eq!(details.total, 1300.0);
        assert_eq!(details.colonist_id, 1);
    }

    #[test]
    fn test_pawn_passion_term() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.passions = vec![PassionLevel::Major, PassionLevel::Minor, PassionLevel::None];
        let details = calculate_pawn_cost(&builder, &colonist);
        assert_eq!(details.passions, 80.0);
        assert_eq!(details.total, 1380.0);
    }

    #[test]
    fn test_pawn_trait_escalation() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.trait_count = 5;
        let details = calculate_pawn_cost(&builder, &colonist);
        assert_eq!(details.traits, 350.0);
    }

    #[test]
    fn test_pawn_apparel_full_price_without_starter_material() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.apparel = vec![WornApparel {
            item: "Apparel_WorkPants".to_string(),
            material: None,
        }];
        let details = calculate_pawn_cost(&builder, &colonist);
        assert_eq!(details.apparel, 30.0);
    }

    #[test]
    fn test_starter_free_apparel_discount() {
        let worn = WornApparel {
            item: "Apparel_WorkPants".to_string(),
            material: Some("Synthweave".to_string()),
        };
        assert_eq!(discounted_apparel_cost(&worn, 30.0), 0.0);
    }

    #[test]
    fn test_starter_cheap_apparel_discount() {
        let worn = WornApparel {
            item: "Apparel_FieldJacket".to_string(),
            material: Some("Synthweave".to_string()),
        };
        assert_eq!(discounted_apparel_cost(&worn, 80.0), 12.0);
        // Other materials pay full price.
        let full = WornApparel {
            item: "Apparel_FieldJacket".to_string(),
            material: Some("Leather".to_string()),
        };
        assert_eq!(discounted_apparel_cost(&full, 80.0), 80.0);
    }

    #[test]
    fn test_implant_cost_skips_medicine_and_averages() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.implants = vec![Implant {
            recipe: "InstallOcularImplant".to_string(),
            body_part: Some("LeftEye".to_string()),
            ancestor_parts: vec!["Head".to_string(), "Torso".to_string()],
        }];
        let details = calculate_pawn_cost(&builder, &colonist);
        // One non-medicine ingredient: 40 × 2 / 1 = 80.
        assert_eq!(details.bionics, 80.0);
    }

    #[test]
    fn test_implant_shadowed_by_ancestor_implant() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.implants = vec![
            Implant {
                recipe: "InstallOcularImplant".to_string(),
                body_part: Some("Head".to_string()),
                ancestor_parts: vec!["Torso".to_string()],
            },
            // Eye implant shadowed by the head implant above.
            Implant {
                recipe: "InstallOcularImplant".to_string(),
                body_part: Some("LeftEye".to_string()),
                ancestor_parts: vec!["Head".to_string(), "Torso".to_string()],
            },
        ];
        let details = calculate_pawn_cost(&builder, &colonist);
        assert_eq!(details.bionics, 80.0);
    }

    #[test]
    fn test_unknown_recipe_prices_zero() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.implants = vec![Implant {
            recipe: "InstallMysteryOrgan".to_string(),
            body_part: None,
            ancestor_parts: Vec::new(),
        }];
        let details = calculate_pawn_cost(&builder, &colonist);
        assert_eq!(details.bionics, 0.0);
    }

    #[test]
    fn test_bonded_animals_priced_into_colonist() {
        let builder = loaded_builder();
        let mut colonist = bare_colonist(1);
        colonist.bonded_animals = vec![EquipmentSelection::new(
            CatalogKey::with_sex("Grazer", crate::defs::Sex::Female),
            1,
        )];
        let details = calculate_pawn_cost(&builder, &colonist);
        assert_eq!(details.animals, 200.0);
        assert_eq!(details.total, 1500.0);
    }

    #[test]
    fn test_calculate_rebuilds_details_by_identity() {
        let builder = loaded_builder();
        let mut details = CostDetails::default();
        let colonists = vec![bare_colonist(7), bare_colonist(9)];
        calculate(&mut details, &builder, &colonists, &[], &[]);
        assert_eq!(details.colonist_details.len(), 2);
        assert_eq!(details.colonist_details[0].colonist_id, 7);
        assert_eq!(details.colonist_details[1].colonist_id, 9);

        // Shrinks when the roster shrinks.
        calculate(&mut details, &builder, &colonists[..1], &[], &[]);
        assert_eq!(details.colonist_details.len(), 1);
        assert_eq!(details.colonist_details[0].colonist_id, 7);
    }

    #[test]
    fn test_calculate_grand_total() {
        let builder = loaded_builder();
        let mut details = CostDetails::default();
        let colonists = vec![bare_colonist(1)];
        let equipment = vec![EquipmentSelection::new(CatalogKey::of("Spice"), 10)];
        let animals = vec![EquipmentSelection::new(
            CatalogKey::with_sex("Grazer", crate::defs::Sex::Male),
            2,
        )];
        calculate(&mut details, &builder, &colonists, &equipment, &animals);
        assert_eq!(details.colonists, 1300.0);
        assert_eq!(details.equipment, 35.0);
        assert_eq!(details.animals, 400.0);
        assert_eq!(details.total, 1735.0);
    }

    #[test]
    fn test_calculate_is_pure_recompute() {
        let builder = loaded_builder();
        let mut details = CostDetails::default();
        let colonists = vec![bare_colonist(1)];
        calculate(&mut details, &builder, &colonists, &[], &[]);
        let first = details.total;
        calculate(&mut details, &builder, &colonists, &[], &[]);
        assert_eq!(details.total, first);
        assert_eq!(details.colonist_details.len(), 1);
    }
}
