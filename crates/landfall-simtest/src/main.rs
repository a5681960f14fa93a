//! Landfall Headless Catalog Harness
//!
//! Validates catalog and cost logic against the synthetic def set in
//! `data/item_defs.json`. Runs entirely in-process — no engine, no
//! persistence, no rendering.
//!
//! Usage:
//!   cargo run -p landfall-simtest
//!   cargo run -p landfall-simtest -- --verbose

use landfall_logic::builder::{CatalogBuilder, LoadingPhase};
use landfall_logic::catalog::CatalogKey;
use landfall_logic::cost::{
    calculate, calculate_equipment_cost, calculate_pawn_cost, ColonistSnapshot, CostDetails,
    EquipmentSelection, Implant, PassionLevel, WornApparel,
};
use landfall_logic::defs::{GameData, Sex};

// ── Def universe (same JSON a host integration would feed in) ──────────
const DEFS_JSON: &str = include_str!("../../../data/item_defs.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Landfall Catalog Harness ===\n");

    let data: GameData = match serde_json::from_str(DEFS_JSON) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("item_defs.json parse error: {}", e);
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();

    // 1. Drive the builder to completion
    let builder = validate_build(data, &mut results);

    // 2. Catalog content
    results.extend(validate_catalog(&builder));

    // 3. Preload semantics
    results.extend(validate_preload(&builder));

    // 4. Cost engine
    results.extend(validate_costs(&builder));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Builder ─────────────────────────────────────────────────────────

fn validate_build(data: GameData, results: &mut Vec<TestResult>) -> CatalogBuilder {
    println!("--- Catalog Build ---");
    let mut builder = CatalogBuilder::new(data);

    let mut phases = vec![builder.phase()];
    let mut steps = 0;
    while !builder.is_loaded() && steps < 1000 {
        let phase = builder.drive_one_step();
        steps += 1;
        if *phases.last().unwrap() != phase {
            phases.push(phase);
        }
    }

    results.push(check(
        "build_reaches_loaded",
        builder.is_loaded(),
        format!("{} steps", steps),
    ));
    results.push(check(
        "build_phase_order",
        phases
            == vec![
                LoadingPhase::NotStarted,
                LoadingPhase::CountingDefs,
                LoadingPhase::ProcessingStuff,
                LoadingPhase::ProcessingThings,
                LoadingPhase::Loaded,
            ],
        format!("{:?}", phases),
    ));
    results.push(check(
        "build_counts_defs",
        builder.counted_defs == 21,
        format!("{} defs counted", builder.counted_defs),
    ));
    results.push(check(
        "build_no_items_skipped",
        builder.skipped == 0,
        format!("{} skipped", builder.skipped),
    ));
    results.push(check(
        "build_materials_discovered",
        builder.materials() == ["Ironweave", "Synthweave", "Leather"],
        format!("{:?}", builder.materials()),
    ));

    // Loaded is terminal.
    let len_before = builder.store().len();
    builder.drive_one_step();
    results.push(check(
        "build_loaded_is_terminal",
        builder.store().len() == len_before,
        format!("{} records", builder.store().len()),
    ));

    builder
}

// ── 2. Catalog content ─────────────────────────────────────────────────

fn validate_catalog(builder: &CatalogBuilder) -> Vec<TestResult> {
    println!("--- Catalog Content ---");
    let mut results = Vec::new();

    let expected = [
        ("resources", builder.resources().len(), 5),
        ("apparel", builder.apparel().len(), 6),
        ("weapons", builder.weapons().len(), 2),
        ("food", builder.food().len(), 3),
        ("implants", builder.implants().len(), 2),
        ("buildings", builder.buildings().len(), 1),
        ("animals", builder.animals().len(), 3),
    ];
    for (name, got, want) in expected {
        results.push(check(
            &format!("catalog_{}_count", name),
            got == want,
            format!("{} records (want {})", got, want),
        ));
    }

    results.push(check(
        "catalog_discards_excluded",
        builder.lookup(&CatalogKey::of("Mote_Dust")).is_none()
            && builder.lookup(&CatalogKey::of("Corpse_Grazer")).is_none(),
        "mote and corpse produce no keys".into(),
    ));
    results.push(check(
        "catalog_zero_value_excluded",
        builder.lookup(&CatalogKey::of("Slag")).is_none(),
        "zero-value def produces no key".into(),
    ));

    let rifle = builder.lookup(&CatalogKey::with_material("Gun_Rifle", "Ironweave"));
    results.push(check(
        "catalog_ranged_weapon_cost",
        rifle.map(|r| r.cost) == Some(60.0),
        format!("{:?} (want 60, material halves then ranged doubles)", rifle.map(|r| r.cost)),
    ));

    let jacket = builder.lookup(&CatalogKey::with_material("Apparel_FieldJacket", "Synthweave"));
    results.push(check(
        "catalog_apparel_cost",
        jacket.map(|r| r.cost) == Some(120.0),
        format!("{:?} (want 80 × 1.5 = 120)", jacket.map(|r| r.cost)),
    ));

    let grazer = builder.lookup(&CatalogKey::with_sex("Grazer", Sex::Female));
    results.push(check(
        "catalog_animal_sexes",
        grazer.is_some()
            && builder.lookup(&CatalogKey::with_sex("Grazer", Sex::Male)).is_some()
            && builder.lookup(&CatalogKey::of("HiveDrone")).is_some(),
        "two grazer variants plus one sexless drone".into(),
    ));

    let apparel_sorted = builder
        .apparel()
        .windows(2)
        .all(|w| w[0].label <= w[1].label);
    results.push(check(
        "catalog_views_sorted",
        apparel_sorted,
        "apparel view sorted by label".into(),
    ));

    results
}

// ── 3. Preload ─────────────────────────────────────────────────────────

fn validate_preload(builder: &CatalogBuilder) -> Vec<TestResult> {
    println!("--- Preload ---");
    let mut results = Vec::new();

    // Preload on a fresh builder, before any build step.
    let data = builder.data().clone();
    let mut fresh = CatalogBuilder::new(data);
    fresh.preload("Ferrocrete");
    let first = fresh.store().len();
    fresh.preload("Ferrocrete");
    results.push(check(
        "preload_idempotent",
        first == 1 && fresh.store().len() == 1,
        format!("{} record after double preload", fresh.store().len()),
    ));

    while !fresh.is_loaded() {
        fresh.drive_one_step();
    }
    let dupes = fresh
        .store()
        .iter()
        .filter(|r| r.key.item == "Ferrocrete")
        .count();
    results.push(check(
        "preload_survives_full_build",
        dupes == 1,
        format!("{} Ferrocrete records after full build", dupes),
    ));

    results
}

// ── 4. Cost engine ─────────────────────────────────────────────────────

fn validate_costs(builder: &CatalogBuilder) -> Vec<TestResult> {
    println!("--- Cost Engine ---");
    let mut results = Vec::new();

    let ten_ferrocrete = EquipmentSelection::new(CatalogKey::of("Ferrocrete"), 10);
    let cost = calculate_equipment_cost(builder, &ten_ferrocrete);
    results.push(check(
        "cost_selection",
        (cost - 19.0).abs() < 1e-9,
        format!("10 × 1.9 = {}", cost),
    ));

    let vanished = EquipmentSelection::new(CatalogKey::of("VanishedDef"), 4);
    results.push(check(
        "cost_missing_key_is_zero",
        calculate_equipment_cost(builder, &vanished) == 0.0,
        "absent key prices as zero".into(),
    ));

    let colonist = ColonistSnapshot {
        id: 1,
        name: "Avery".to_string(),
        market_value: 1000.0,
        passions: vec![PassionLevel::Major, PassionLevel::Minor],
        trait_count: 4,
        apparel: vec![
            WornApparel {
                item: "Apparel_WorkPants".to_string(),
                material: Some("Synthweave".to_string()),
            },
            WornApparel {
                item: "Apparel_FieldJacket".to_string(),
                material: Some("Synthweave".to_string()),
            },
        ],
        implants: vec![Implant {
            recipe: "InstallOcularImplant".to_string(),
            body_part: Some("LeftEye".to_string()),
            ancestor_parts: vec!["Head".to_string(), "Torso".to_string()],
        }],
        bonded_animals: Vec::new(),
    };
    let details = calculate_pawn_cost(builder, &colonist);
    results.push(check(
        "cost_colonist_market_value",
        details.market_value == 1300.0,
        format!("{} (1000 + 300 overhead)", details.market_value),
    ));
    results.push(check(
        "cost_colonist_passions",
        details.passions == 80.0,
        format!("{} (weight 4 × 20)", details.passions),
    ));
    results.push(check(
        "cost_colonist_traits",
        details.traits == 100.0,
        format!("{} (1 trait over allotment)", details.traits),
    ));
    results.push(check(
        "cost_colonist_apparel_discounts",
        details.apparel == 18.0,
        format!("{} (free pants + 15% jacket)", details.apparel),
    ));
    results.push(check(
        "cost_colonist_bionics",
        details.bionics == 80.0,
        format!("{} (core ×2, medicine skipped)", details.bionics),
    ));
    results.push(check(
        "cost_colonist_total",
        details.total == 1578.0,
        format!("{}", details.total),
    ));

    let mut cost_details = CostDetails::default();
    let animals = vec![EquipmentSelection::new(
        CatalogKey::with_sex("Grazer", Sex::Male),
        1,
    )];
    calculate(
        &mut cost_details,
        builder,
        std::slice::from_ref(&colonist),
        &[ten_ferrocrete],
        &animals,
    );
    results.push(check(
        "cost_grand_total",
        cost_details.total == 1797.0,
        format!(
            "colonists {} + equipment {} + animals {}",
            cost_details.colonists, cost_details.equipment, cost_details.animals
        ),
    ));

    results
}
