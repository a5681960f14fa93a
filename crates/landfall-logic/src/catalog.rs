//! Catalog keys, records, the keyed store, and the record factory.
//!
//! A catalog record is an immutable, priced, classified entry derived
//! from one (item, material-or-sex) combination. Records are created
//! exactly once — the store is first-write-wins, so a duplicate insert
//! is a silent no-op — and live for the process session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::EquipmentType;
use crate::defs::{Color, GameData, ItemDef, Sex};
use crate::pricing;

/// Apparel defs whose records are hidden from the character portrait.
const HIDDEN_FROM_PORTRAIT: &[&str] = &["Apparel_ShieldBelt", "Apparel_VoidShroud"];

/// Identity of a catalog record: item plus optional material or sex.
///
/// Two expansions of the same item with different materials or sexes are
/// distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogKey {
    pub item: String,
    pub material: Option<String>,
    pub sex: Option<Sex>,
}

impl CatalogKey {
    pub fn of(item: &str) -> Self {
        Self {
            item: item.to_string(),
            material: None,
            sex: None,
        }
    }

    pub fn with_material(item: &str, material: &str) -> Self {
        Self {
            item: item.to_string(),
            material: Some(material.to_string()),
            sex: None,
        }
    }

    pub fn with_sex(item: &str, sex: Sex) -> Self {
        Self {
            item: item.to_string(),
            material: None,
            sex: Some(sex),
        }
    }
}

/// An immutable, priced, ready-to-select catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub key: CatalogKey,
    pub equipment_type: EquipmentType,
    /// Display label, material-qualified ("vest (synthweave)").
    pub label: String,
    /// Unit cost, non-negative, rounded to 2 decimal places.
    pub cost: f64,
    /// Units per record. Currently always 1.
    pub stack_size: u32,
    /// Sold/held as a stack of consumables.
    pub stacks: bool,
    /// Single wearable/equippable piece.
    pub gear: bool,
    pub animal: bool,
    pub color: Color,
    pub hide_from_portrait: bool,
}

/// Failure expanding one item definition into records.
///
/// Never fatal: the builder logs the error and skips the one item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("material `{0}` is not a known item definition")]
    UnknownMaterial(String),
    #[error("material `{0}` has no material properties")]
    NotAMaterial(String),
}

/// The keyed mapping from catalog key to record.
///
/// Grows monotonically during building; read-only afterward. Insertion
/// order is irrelevant — the per-type views sort by label on access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStore {
    records: HashMap<CatalogKey, CatalogRecord>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its key is already present.
    ///
    /// Returns true if the record was added; a duplicate key is a no-op
    /// and returns false.
    pub fn insert(&mut self, record: CatalogRecord) -> bool {
        if self.records.contains_key(&record.key) {
            return false;
        }
        self.records.insert(record.key.clone(), record);
        true
    }

    pub fn get(&self, key: &CatalogKey) -> Option<&CatalogRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &CatalogKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.records.values()
    }

    /// All records of one category, sorted by label then key.
    ///
    /// Recomputed on every call; the store itself stays unordered.
    pub fn of_type(&self, equipment_type: EquipmentType) -> Vec<&CatalogRecord> {
        let mut records: Vec<&CatalogRecord> = self
            .records
            .values()
            .filter(|r| r.equipment_type == equipment_type)
            .collect();
        records.sort_by(|a, b| {
            a.label
                .cmp(&b.label)
                .then_with(|| a.key.item.cmp(&b.key.item))
                .then_with(|| a.key.material.cmp(&b.key.material))
        });
        records
    }
}

/// Build a record for an (item, optional material) pair.
///
/// Returns `None` when the base cost resolves to zero — the item is
/// skipped silently, not discarded-and-cached, so transient zero-value
/// defs can price in later without poisoning classification.
pub fn make_record(
    data: &GameData,
    item: &ItemDef,
    material: Option<&ItemDef>,
    equipment_type: EquipmentType,
) -> Option<CatalogRecord> {
    let base = pricing::base_cost(data, item, material);
    if base <= 0.0 {
        return None;
    }
    let cost = pricing::stack_cost(item, base);
    let gear = item.is_apparel || item.is_weapon;
    let key = match material {
        Some(m) => CatalogKey::with_material(&item.def_name, &m.def_name),
        None => CatalogKey::of(&item.def_name),
    };
    let label = match material {
        Some(m) => format!("{} ({})", item.label, m.label),
        None => item.label.clone(),
    };
    let color = material
        .and_then(|m| m.stuff.as_ref())
        .map(|s| s.color)
        .unwrap_or(item.color);
    Some(CatalogRecord {
        key,
        equipment_type,
        label,
        cost,
        stack_size: pricing::stack_count(item, base),
        stacks: !gear,
        gear,
        animal: false,
        color,
        hide_from_portrait: item.is_apparel
            && HIDDEN_FROM_PORTRAIT.contains(&item.def_name.as_str()),
    })
}

/// Build a record for one sex variant of an animal race.
///
/// Returns `None` when the race's base market value is zero.
pub fn make_animal_record(data: &GameData, item: &ItemDef, sex: Option<Sex>) -> Option<CatalogRecord> {
    let cost = pricing::base_cost(data, item, None);
    if cost <= 0.0 {
        return None;
    }
    let key = match sex {
        Some(sex) => CatalogKey::with_sex(&item.def_name, sex),
        None => CatalogKey::of(&item.def_name),
    };
    let label = match sex {
        Some(Sex::Male) => format!("{} (male)", item.label),
        Some(Sex::Female) => format!("{} (female)", item.label),
        None => item.label.clone(),
    };
    Some(CatalogRecord {
        key,
        equipment_type: EquipmentType::Animals,
        label,
        cost,
        stack_size: 1,
        stacks: false,
        gear: false,
        animal: true,
        color: item.color,
        hide_from_portrait: false,
    })
}

/// Expand one classified item definition into zero or more records and
/// insert them into the store (first-write-wins).
///
/// Material-built items produce one record per eligible known material;
/// animal races produce one record per sex; everything else produces a
/// single material-less record. Returns the number of records newly
/// inserted.
pub fn expand(
    data: &GameData,
    materials: &[String],
    item: &ItemDef,
    equipment_type: EquipmentType,
    store: &mut CatalogStore,
) -> Result<usize, CatalogError> {
    let mut inserted = 0;

    if item.made_from_material {
        // Resolve every material before touching the store, so a failed
        // item inserts nothing at all.
        let mut eligible: Vec<&ItemDef> = Vec::new();
        for name in materials {
            let material = data
                .item(name)
                .ok_or_else(|| CatalogError::UnknownMaterial(name.clone()))?;
            let stuff = material
                .stuff
                .as_ref()
                .ok_or_else(|| CatalogError::NotAMaterial(name.clone()))?;
            if material_allows(item, &stuff.categories) {
                eligible.push(material);
            }
        }
        for material in eligible {
            if let Some(record) = make_record(data, item, Some(material), equipment_type) {
                if store.insert(record) {
                    inserted += 1;
                }
            }
        }
        return Ok(inserted);
    }

    if let Some(race) = &item.race {
        let sexes: &[Option<Sex>] = if race.has_sexes {
            &[Some(Sex::Male), Some(Sex::Female)]
        } else {
            &[None]
        };
        for sex in sexes {
            if let Some(record) = make_animal_record(data, item, *sex) {
                if store.insert(record) {
                    inserted += 1;
                }
            }
        }
        return Ok(inserted);
    }

    if let Some(record) = make_record(data, item, None, equipment_type) {
        if store.insert(record) {
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Whether the item's stuffing rules permit construction from a material
/// with the given stuff-category tags.
fn material_allows(item: &ItemDef, stuff_categories: &[String]) -> bool {
    item.stuff_categories
        .iter()
        .any(|c| stuff_categories.contains(c))
}
