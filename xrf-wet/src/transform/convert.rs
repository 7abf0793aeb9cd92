//! Dry-to-wet basis arithmetic.
//!
//! ```text
//! dry wt%  ──ratio──▶  dry wt% (converted)  ──moisture m──▶  wet wt% + H2O
//! ```
//!
//! The wet basis assumes 1 g of wet sample: `1 − m` grams of dry solid shared
//! out in proportion to the dry percentages, plus `m` grams of water.

use crate::models::{Composition, RatioTable, WATER};

/// Multiply every component by its conversion ratio (1.0 when absent).
///
/// Keys and their order are preserved. Ratios for names that are not in the
/// composition are ignored.
pub fn apply_ratios(composition: &Composition, ratios: &RatioTable) -> Composition {
    composition
        .iter()
        .map(|c| (c.name.clone(), c.wt_percent * ratios.factor(&c.name)))
        .collect()
}

/// Renormalise a dry-basis composition onto a wet basis.
///
/// Each dry value becomes `(value / 100) × (1 − m) × 100` and water is
/// appended as `m × 100`. Nothing is clamped: out-of-range moisture or
/// percentages produce meaningless but finite output.
pub fn to_wet_basis(moisture: f64, dry: &Composition) -> Composition {
    let dry_mass = 1.0 - moisture;

    let mut wet: Composition = dry
        .iter()
        .map(|c| (c.name.clone(), (c.wt_percent / 100.0) * dry_mass * 100.0))
        .collect();
    wet.insert(WATER, moisture * 100.0);
    wet
}
