//! Equipment classification — one purchasing category per item definition.
//!
//! [`classify`] is a pure, total function of an item's static properties.
//! Rules are evaluated as an ordered cascade and the first match wins, so
//! precedence is part of the contract: an apparel item that also sits in a
//! "Foods" category is Apparel, never Food.

use serde::{Deserialize, Serialize};

use crate::constants::{categories, food_flags, trade_tags};
use crate::defs::{DrugCategory, FoodPreferability, GameData, ItemDef};

/// Purchasing category of a catalog record.
///
/// Identified by name; equality is identity. `Discard` and
/// `Uncategorized` never price anything: discarded defs produce no
/// catalog keys, and `Uncategorized` is only reachable through explicit
/// API calls, never from [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    Resources,
    Food,
    Weapons,
    Apparel,
    Medical,
    Buildings,
    Animals,
    /// Excluded from the catalog entirely.
    Discard,
    /// Explicit-API marker; the classifier never produces this.
    Uncategorized,
}

impl EquipmentType {
    /// Display name of the category.
    pub fn label(self) -> &'static str {
        match self {
            EquipmentType::Resources => "Resources",
            EquipmentType::Food => "Food",
            EquipmentType::Weapons => "Weapons",
            EquipmentType::Apparel => "Apparel",
            EquipmentType::Medical => "Medical",
            EquipmentType::Buildings => "Buildings",
            EquipmentType::Animals => "Animals",
            EquipmentType::Discard => "Discard",
            EquipmentType::Uncategorized => "Uncategorized",
        }
    }
}

/// Classify one item definition into exactly one purchasing category.
///
/// Deterministic and order-dependent; see module docs. Defs that should
/// never appear in the catalog return [`EquipmentType::Discard`].
pub fn classify(data: &GameData, item: &ItemDef) -> EquipmentType {
    // 1. Things that are never purchasable.
    if should_discard(data, item) {
        return EquipmentType::Discard;
    }

    // 2. Apparel beats every food/resource rule below.
    if item.is_apparel {
        return EquipmentType::Apparel;
    }

    // 3. Tagged weapons.
    if !item.weapon_tags.is_empty() && item.is_weapon {
        return EquipmentType::Weapons;
    }

    // 4. Toys are resources even when their category name says otherwise.
    if data.belongs_to_category(item, categories::TOYS) {
        return EquipmentType::Resources;
    }

    // 5. Anything in a "…Weapon…" category.
    if data.category_in_chain(item, |name| name.contains("Weapon")) {
        return EquipmentType::Weapons;
    }

    // 6. Foods category.
    if data.belongs_to_category(item, categories::FOODS) {
        return EquipmentType::Food;
    }

    // 7. Drugs and medicine: edible ones are food, the rest medical.
    if item.is_drug || item.is_medicine {
        if let Some(ingestible) = &item.ingestible {
            let sweet = data.belongs_to_category(item, categories::SWEET_MEALS);
            if sweet || ingestible.food_type & food_flags::FOODLIKE != 0 {
                return EquipmentType::Food;
            }
        }
        return EquipmentType::Medical;
    }

    // 8. Remaining ingestibles.
    if let Some(ingestible) = &item.ingestible {
        if data.belongs_to_category(item, categories::MEAT_RAW) {
            return EquipmentType::Food;
        }
        if ingestible.drug_category == DrugCategory::Medical {
            return EquipmentType::Medical;
        }
        if ingestible.preferability == FoodPreferability::DesperateOnly {
            return EquipmentType::Resources;
        }
        return EquipmentType::Food;
    }

    // 9. Resources, except ammunition and shells.
    if item.counts_as_resource {
        if item.has_trade_tag(trade_tags::AMMUNITION) || item.is_shell {
            return EquipmentType::Weapons;
        }
        return EquipmentType::Resources;
    }

    // 10. Buildings that can be packed up.
    if item.is_building && item.minifiable {
        return EquipmentType::Buildings;
    }

    // 11. Animal races.
    if item.is_animal() {
        return EquipmentType::Animals;
    }

    // 12. Remaining Items-category things: medical subtree or resources.
    if data.belongs_to_category(item, categories::ITEMS) && is_medical_item(data, item) {
        return EquipmentType::Medical;
    }

    // 13. Default.
    EquipmentType::Resources
}

/// Rule 1: defs that must never enter the catalog.
fn should_discard(data: &GameData, item: &ItemDef) -> bool {
    item.is_mote
        || item.is_unfinished
        || !item.scatterable
        || item.destroy_on_drop
        || data.belongs_to_category(item, categories::CORPSES)
        || data.belongs_to_category(item, categories::CHUNKS)
        || item.is_blueprint
        || item.is_frame
        || item.is_plant
}

/// Rule 12 medical subtree: serums, body parts, prostheses, exotic parts,
/// and anything in an "…Organs" category.
fn is_medical_item(data: &GameData, item: &ItemDef) -> bool {
    item.def_name.starts_with(categories::SERUM_PREFIX)
        || data.belongs_to_category(item, categories::BODY_PARTS)
        || data.belongs_to_category(item, categories::PROSTHESES)
        || data.belongs_to_category(item, categories::EXOTIC_PARTS)
        || data.category_in_chain(item, |name| name.ends_with(categories::ORGANS_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::IngestibleProps;

    fn base_data() -> GameData {
        let mut data = GameData::new();
        data.add_category("Root", None);
        data.add_category("Items", Some("Root"));
        data.add_category("Foods", Some("Items"));
        data.add_category("SweetMeals", Some("Foods"));
        data.add_category("MeatRaw", Some("Foods"));
        data.add_category("Toys", Some("Items"));
        data.add_category("Corpses", Some("Root"));
        data.add_category("Chunks", Some("Root"));
        data.add_category("GrenadeWeapons", Some("Items"));
        data.add_category("BodyParts", Some("Items"));
        data.add_category("Prostheses", Some("BodyParts"));
        data.add_category("AnimalOrgans", Some("BodyParts"));
        data
    }

    fn in_category(def_name: &str, category: &str) -> ItemDef {
        let mut item = ItemDef::named(def_name, def_name);
        item.category = Some(category.to_string());
        item.market_value = 10.0;
        item
    }

    #[test]
    fn test_classify_is_deterministic() {
        let data = base_data();
        let mut item = ItemDef::named("Rifle", "rifle");
        item.is_weapon = true;
        item.weapon_tags = vec!["Gun".to_string()];
        assert_eq!(classify(&data, &item), classify(&data, &item));
        assert_eq!(classify(&data, &item), EquipmentType::Weapons);
    }

    #[test]
    fn test_mote_discarded() {
        let data = base_data();
        let mut item = ItemDef::named("Mote_Smoke", "smoke");
        item.is_mote = true;
        assert_eq!(classify(&data, &item), EquipmentType::Discard);
    }

    #[test]
    fn test_unscatterable_discarded() {
        let data = base_data();
        let mut item = ItemDef::named("Ship_Beacon", "beacon");
        item.scatterable = false;
        assert_eq!(classify(&data, &item), EquipmentType::Discard);
    }

    #[test]
    fn test_corpse_chain_discarded() {
        let data = base_data();
        let item = in_category("Corpse_Grazer", "Corpses");
        assert_eq!(classify(&data, &item), EquipmentType::Discard);
    }

    #[test]
    fn test_plant_discarded() {
        let data = base_data();
        let mut item = ItemDef::named("Plant_Grass", "grass");
        item.is_plant = true;
        assert_eq!(classify(&data, &item), EquipmentType::Discard);
    }

    #[test]
    fn test_apparel_precedes_foods_category() {
        // An item that is both apparel and in Foods must be Apparel
        // (rule 2 before rule 6).
        let data = base_data();
        let mut item = in_category("Apparel_EdibleHat", "Foods");
        item.is_apparel = true;
        assert_eq!(classify(&data, &item), EquipmentType::Apparel);
    }

    #[test]
    fn test_untagged_weapon_not_rule_3() {
        // Weapon flag without tags falls through rule 3.
        let data = base_data();
        let mut item = ItemDef::named("Club", "club");
        item.is_weapon = true;
        assert_eq!(classify(&data, &item), EquipmentType::Resources);
    }

    #[test]
    fn test_toys_are_resources() {
        let data = base_data();
        let item = in_category("Toy_Ball", "Toys");
        assert_eq!(classify(&data, &item), EquipmentType::Resources);
    }

    #[test]
    fn test_weapon_category_name_match() {
        let data = base_data();
        let item = in_category("Grenade_Frag", "GrenadeWeapons");
        assert_eq!(classify(&data, &item), EquipmentType::Weapons);
    }

    #[test]
    fn test_foods_category() {
        let data = base_data();
        let item = in_category("MealSimple", "Foods");
        assert_eq!(classify(&data, &item), EquipmentType::Food);
    }

    #[test]
    fn test_liquor_drug_is_food() {
        let data = base_data();
        let mut item = ItemDef::named("Ale", "ale");
        item.is_drug = true;
        item.ingestible = Some(IngestibleProps {
            food_type: food_flags::LIQUOR,
            ..Default::default()
        });
        assert_eq!(classify(&data, &item), EquipmentType::Food);
    }

    #[test]
    fn test_sweet_meal_medicine_is_food() {
        let data = base_data();
        let mut item = in_category("ChocolateTonic", "SweetMeals");
        item.is_medicine = true;
        item.ingestible = Some(IngestibleProps::default());
        assert_eq!(classify(&data, &item), EquipmentType::Food);
    }

    #[test]
    fn test_plain_medicine_is_medical() {
        let data = base_data();
        let mut item = ItemDef::named("MedkitIndustrial", "medkit");
        item.is_medicine = true;
        assert_eq!(classify(&data, &item), EquipmentType::Medical);
    }

    #[test]
    fn test_raw_meat_is_food() {
        let data = base_data();
        let mut item = in_category("Meat_Grazer", "MeatRaw");
        item.ingestible = Some(IngestibleProps {
            food_type: food_flags::MEAT,
            preferability: FoodPreferability::RawBad,
            ..Default::default()
        });
        assert_eq!(classify(&data, &item), EquipmentType::Food);
    }

    #[test]
    fn test_medical_drug_category_ingestible() {
        let data = base_data();
        let mut item = ItemDef::named("HerbalPaste", "herbal paste");
        item.ingestible = Some(IngestibleProps {
            drug_category: DrugCategory::Medical,
            ..Default::default()
        });
        assert_eq!(classify(&data, &item), EquipmentType::Medical);
    }

    #[test]
    fn test_desperate_only_ingestible_is_resource() {
        let data = base_data();
        let mut item = ItemDef::named("Kibble", "kibble");
        item.ingestible = Some(IngestibleProps {
            preferability: FoodPreferability::DesperateOnly,
            ..Default::default()
        });
        assert_eq!(classify(&data, &item), EquipmentType::Resources);
    }

    #[test]
    fn test_ammunition_resource_is_weapon() {
        let data = base_data();
        let mut item = ItemDef::named("Cartridge_8mm", "8mm cartridge");
        item.counts_as_resource = true;
        item.trade_tags = vec!["Ammunition".to_string()];
        assert_eq!(classify(&data, &item), EquipmentType::Weapons);
    }

    #[test]
    fn test_shell_resource_is_weapon() {
        let data = base_data();
        let mut item = ItemDef::named("Shell_HighExplosive", "HE shell");
        item.counts_as_resource = true;
        item.is_shell = true;
        assert_eq!(classify(&data, &item), EquipmentType::Weapons);
    }

    #[test]
    fn test_plain_resource() {
        let data = base_data();
        let mut item = ItemDef::named("Steel", "steel");
        item.counts_as_resource = true;
        assert_eq!(classify(&data, &item), EquipmentType::Resources);
    }

    #[test]
    fn test_minifiable_building() {
        let data = base_data();
        let mut item = ItemDef::named("SolarPanel", "solar panel");
        item.is_building = true;
        item.minifiable = true;
        assert_eq!(classify(&data, &item), EquipmentType::Buildings);
    }

    #[test]
    fn test_fixed_building_falls_through() {
        let data = base_data();
        let mut item = ItemDef::named("Wall", "wall");
        item.is_building = true;
        assert_eq!(classify(&data, &item), EquipmentType::Resources);
    }

    #[test]
    fn test_animal_race() {
        let data = base_data();
        let mut item = ItemDef::named("Grazer", "grazer");
        item.race = Some(Default::default());
        assert_eq!(classify(&data, &item), EquipmentType::Animals);
    }

    #[test]
    fn test_serum_prefix_is_medical() {
        let data = base_data();
        let item = in_category("SerumRegen", "Items");
        assert_eq!(classify(&data, &item), EquipmentType::Medical);
    }

    #[test]
    fn test_prosthesis_is_medical() {
        let data = base_data();
        let item = in_category("ProstheticLeg", "Prostheses");
        assert_eq!(classify(&data, &item), EquipmentType::Medical);
    }

    #[test]
    fn test_organs_suffix_is_medical() {
        let data = base_data();
        let item = in_category("Heart_Grazer", "AnimalOrgans");
        assert_eq!(classify(&data, &item), EquipmentType::Medical);
    }

    #[test]
    fn test_default_is_resources() {
        let data = base_data();
        let item = ItemDef::named("MysteryCube", "mystery cube");
        assert_eq!(classify(&data, &item), EquipmentType::Resources);
    }
}
