//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Confirmer)
//! but are themselves concrete structs, not traits.

mod org_chart;

pub use org_chart::{starter_chart, DeleteOutcome, OrgChartService};
