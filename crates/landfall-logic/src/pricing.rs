//! Cost-model primitives — base value lookup, stack pricing, and the
//! escalating passion/trait pricing used for colonists.
//!
//! Every rule here must reproduce the established balance numbers
//! exactly; point totals are compared across machines and save files.

use crate::defs::{GameData, ItemDef};

/// Passion points above this weight start costing extra per point.
const PASSION_FREE_WEIGHT: f64 = 8.0;
/// Base cost of one passion weight point.
const PASSION_BASE_COST: f64 = 20.0;
/// Extra cost per weight point of overage.
const PASSION_OVERAGE_RATE: f64 = 0.4;
/// Weight of a major passion; a minor passion weighs 1.
const MAJOR_PASSION_WEIGHT: u32 = 3;

/// Traits included in the base colonist price.
const FREE_TRAIT_COUNT: usize = 3;
/// Cost of the first trait over the free allotment.
const TRAIT_BASE_COST: f64 = 100.0;
/// Escalation factor for each further extra trait.
const TRAIT_ESCALATION: f64 = 2.5;

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unit base cost for an (item, material) pair.
///
/// Market values above 100 snap to the nearest multiple of 5; the result
/// is rounded to 2 decimal places.
pub fn base_cost(data: &GameData, item: &ItemDef, material: Option<&ItemDef>) -> f64 {
    let mut value = data.market_value(item, material);
    if value > 100.0 {
        value = (value / 5.0).round() * 5.0;
    }
    round2(value)
}

/// Unit cost actually stored on a catalog record.
///
/// Material-built items halve in price unless they are apparel; ranged
/// weapons double. Rounded to 2 decimal places.
pub fn stack_cost(item: &ItemDef, base: f64) -> f64 {
    let mut cost = base;
    if item.made_from_material {
        cost *= if item.is_apparel { 1.0 } else { 0.5 };
    }
    if item.is_ranged_weapon {
        cost *= 2.0;
    }
    round2(cost)
}

/// Units per catalog record.
///
/// Fixed at 1; price-based stack sizing is disabled.
pub fn stack_count(_item: &ItemDef, _base: f64) -> u32 {
    1
}

/// Combined passion weight: majors weigh 3, minors weigh 1.
pub fn passion_weight(major: u32, minor: u32) -> f64 {
    f64::from(MAJOR_PASSION_WEIGHT * major + minor)
}

/// Point cost of a colonist's skill passions.
///
/// Each weight point costs 20, plus 0.4 per point of weight over 8.
pub fn passion_cost(major: u32, minor: u32) -> f64 {
    let weight = passion_weight(major, minor);
    let level_cost = PASSION_BASE_COST + (weight - PASSION_FREE_WEIGHT).max(0.0) * PASSION_OVERAGE_RATE;
    level_cost * weight
}

/// Point cost of a colonist's traits.
///
/// The first 3 traits are free. Extras escalate: 100 for the first,
/// then each subsequent extra is the previous cost × 2.5, ceilinged.
pub fn trait_cost(trait_count: usize) -> f64 {
    let extra = trait_count.saturating_sub(FREE_TRAIT_COUNT);
    let mut total = 0.0;
    let mut step = TRAIT_BASE_COST;
    for i in 0..extra {
        if i > 0 {
            step = (step * TRAIT_ESCALATION).ceil();
        }
        total += step;
    }
    total
}
