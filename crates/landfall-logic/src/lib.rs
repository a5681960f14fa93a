//! Pure equipment catalog and cost logic for Landfall.
//!
//! This crate contains the catalog builder and point-cost engine,
//! independent of any database, engine, or runtime. Functions take plain
//! data and return results, making them unit-testable and portable
//! across the host integration, native CLI tools, and any future engine.
//!
//! Data flows one direction: raw item definitions → classifier → record
//! factory → catalog store → cost engine and UI consumers. The builder
//! is driven once per host tick until loaded; afterward the catalog is a
//! read-only lookup table for the rest of the session.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`builder`] | Incremental, caller-driven catalog build state machine |
//! | [`catalog`] | Catalog keys, records, keyed store, record factory |
//! | [`classify`] | Ordered rule cascade: item definition → purchasing category |
//! | [`constants`] | Food flags, category names, trade tags, step budgets |
//! | [`cost`] | Point costs for selections and customized colonists |
//! | [`defs`] | Read-only item/category/recipe definitions from the host |
//! | [`pricing`] | Cost-model primitives (rounding, stack, passion, trait) |

pub mod builder;
pub mod catalog;
pub mod classify;
pub mod constants;
pub mod cost;
pub mod defs;
pub mod pricing;
