//! Incremental catalog builder — a cooperative, caller-driven state
//! machine that turns the raw def universe into the catalog store.
//!
//! The host calls [`CatalogBuilder::drive_one_step`] once per tick. Each
//! call does at most one phase budget of work and returns, so a large def
//! universe never blocks a frame. Phases run in strict order:
//!
//! `NotStarted → CountingDefs → ProcessingStuff → ProcessingThings → Loaded`
//!
//! `CountingDefs` only totals eligible defs for progress displays.
//! `ProcessingStuff` collects every material definition; expansion needs
//! the complete material list, which is why no item is expanded before
//! this phase finishes. `ProcessingThings` classifies and expands each
//! def. `Loaded` is terminal; further calls are no-ops and the store is
//! read-only for the rest of the session.
//!
//! A failure expanding one item is logged and that item alone is
//! skipped; the build always completes.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, CatalogKey, CatalogRecord, CatalogStore};
use crate::classify::{classify, EquipmentType};
use crate::constants::budgets;
use crate::defs::{GameData, ItemDef};

/// Phase of the incremental catalog build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadingPhase {
    NotStarted,
    CountingDefs,
    ProcessingStuff,
    ProcessingThings,
    Loaded,
}

impl LoadingPhase {
    /// Work budget per `drive_one_step` call in this phase.
    fn step_budget(self) -> usize {
        match self {
            LoadingPhase::CountingDefs => budgets::COUNT_STEP,
            LoadingPhase::ProcessingStuff => budgets::STUFF_STEP,
            LoadingPhase::ProcessingThings => budgets::THING_STEP,
            LoadingPhase::NotStarted | LoadingPhase::Loaded => 0,
        }
    }
}

/// Owns the def snapshot, the discovered material list, the catalog
/// store, and the resumable cursor of the current phase.
#[derive(Debug)]
pub struct CatalogBuilder {
    data: GameData,
    store: CatalogStore,
    /// Material def names in discovery order. Append-only.
    materials: Vec<String>,
    phase: LoadingPhase,
    /// Indices into `data.items` eligible for the current phase.
    pending: Vec<usize>,
    cursor: usize,
    /// Total eligible defs, definitive once `CountingDefs` completes.
    pub counted_defs: usize,
    pub processed_stuff: usize,
    pub processed_things: usize,
    /// Items skipped by the isolate-one-failure policy.
    pub skipped: usize,
}

impl CatalogBuilder {
    /// New builder over an immutable def snapshot. No work happens until
    /// the first `drive_one_step` call.
    pub fn new(data: GameData) -> Self {
        Self {
            data,
            store: CatalogStore::new(),
            materials: Vec::new(),
            phase: LoadingPhase::NotStarted,
            pending: Vec::new(),
            cursor: 0,
            counted_defs: 0,
            processed_stuff: 0,
            processed_things: 0,
            skipped: 0,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadingPhase::Loaded
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Material def names discovered so far, in discovery order.
    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    pub fn lookup(&self, key: &CatalogKey) -> Option<&CatalogRecord> {
        self.store.get(key)
    }

    /// Advance the build by one bounded step and return the phase the
    /// builder is in afterward. A no-op once `Loaded`.
    pub fn drive_one_step(&mut self) -> LoadingPhase {
        match self.phase {
            LoadingPhase::NotStarted => {
                self.enter(LoadingPhase::CountingDefs);
            }
            LoadingPhase::CountingDefs => {
                let end = (self.cursor + self.phase.step_budget()).min(self.pending.len());
                self.counted_defs += end - self.cursor;
                self.cursor = end;
                if self.cursor >= self.pending.len() {
                    self.enter(LoadingPhase::ProcessingStuff);
                }
            }
            LoadingPhase::ProcessingStuff => {
                let end = (self.cursor + self.phase.step_budget()).min(self.pending.len());
                for i in self.cursor..end {
                    let item = &self.data.items[self.pending[i]];
                    if item.is_material() && !self.materials.contains(&item.def_name) {
                        self.materials.push(item.def_name.clone());
                    }
                    self.processed_stuff += 1;
                }
                self.cursor = end;
                if self.cursor >= self.pending.len() {
                    self.enter(LoadingPhase::ProcessingThings);
                }
            }
            LoadingPhase::ProcessingThings => {
                let end = (self.cursor + self.phase.step_budget()).min(self.pending.len());
                for i in self.cursor..end {
                    let item = &self.data.items[self.pending[i]];
                    let equipment_type = classify(&self.data, item);
                    if equipment_type != EquipmentType::Discard {
                        if let Err(e) = catalog::expand(
                            &self.data,
                            &self.materials,
                            item,
                            equipment_type,
                            &mut self.store,
                        ) {
                            log::warn!("skipping {}: {}", item.def_name, e);
                            self.skipped += 1;
                        }
                    }
                    self.processed_things += 1;
                }
                self.cursor = end;
                if self.cursor >= self.pending.len() {
                    self.enter(LoadingPhase::Loaded);
                }
            }
            LoadingPhase::Loaded => {}
        }
        self.phase
    }

    /// Synchronously classify and expand one def, bypassing the phase
    /// machine. For late-discovered defs referenced by a loader before
    /// the full pass reaches them. Idempotent: re-preloading a present
    /// key is a no-op (first-write-wins).
    pub fn preload(&mut self, def_name: &str) {
        let Some(index) = self.data.items.iter().position(|i| i.def_name == def_name) else {
            return;
        };
        let item = &self.data.items[index];
        let equipment_type = classify(&self.data, item);
        if equipment_type == EquipmentType::Discard {
            return;
        }
        if let Err(e) = catalog::expand(
            &self.data,
            &self.materials,
            item,
            equipment_type,
            &mut self.store,
        ) {
            log::warn!("preload of {} failed: {}", def_name, e);
        }
    }

    // ── Category-filtered, name-sorted listings ────────────────────────

    pub fn resources(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Resources)
    }

    pub fn food(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Food)
    }

    pub fn weapons(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Weapons)
    }

    pub fn apparel(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Apparel)
    }

    pub fn animals(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Animals)
    }

    /// Medical records — implants, prostheses, serums, medicine.
    pub fn implants(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Medical)
    }

    pub fn buildings(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Buildings)
    }

    /// Records added through explicit API with no classifier category.
    pub fn other(&self) -> Vec<&CatalogRecord> {
        self.store.of_type(EquipmentType::Uncategorized)
    }

    /// Enter a phase and rebuild the cursor over eligible defs.
    fn enter(&mut self, phase: LoadingPhase) {
        self.phase = phase;
        self.cursor = 0;
        if phase == LoadingPhase::Loaded {
            self.pending.clear();
        } else {
            self.pending = self
                .data
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| eligible(item))
                .map(|(i, _)| i)
                .collect();
        }
    }
}

/// Catalog eligibility: scatterable items not destroyed on pickup,
/// minifiable or scatterable buildings, and animal races.
fn eligible(item: &ItemDef) -> bool {
    if item.is_animal() {
        return true;
    }
    if item.is_building {
        return item.minifiable || item.scatterable;
    }
    item.scatterable && !item.destroy_on_drop
}
