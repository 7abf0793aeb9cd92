//! Domain models for the wet-basis conversion.
//!
//! - [`Component`] - one named entry (element symbol or oxide formula) with its wt%
//! - [`Composition`] - ordered set of components with unique names
//! - [`RatioTable`] - element-to-oxide (or oxide-to-element) factors

use serde::Serialize;
use std::collections::HashMap;

/// Name of the synthetic water component added on the wet basis.
pub const WATER: &str = "H2O";

// =============================================================================
// Component
// =============================================================================

/// A named mass fraction in weight percent.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Element symbol or oxide formula.
    pub name: String,
    /// Weight percent.
    pub wt_percent: f64,
}

impl Component {
    pub fn new(name: impl Into<String>, wt_percent: f64) -> Self {
        Self {
            name: name.into(),
            wt_percent,
        }
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Mapping name -> weight percent that remembers insertion order.
///
/// Names are unique. Inserting a name that already exists replaces its value
/// and keeps its original position, so the last row of a table wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    components: Vec<Component>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a component. Returns the previous value if the name
    /// was already present.
    pub fn insert(&mut self, name: impl Into<String>, wt_percent: f64) -> Option<f64> {
        let name = name.into();
        match self.components.iter_mut().find(|c| c.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.wt_percent, wt_percent)),
            None => {
                self.components.push(Component::new(name, wt_percent));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.wt_percent)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Sum of all weight percents.
    pub fn total(&self) -> f64 {
        self.components.iter().map(|c| c.wt_percent).sum()
    }

    /// Components sorted by descending weight percent.
    ///
    /// The sort is stable: equal values keep their insertion order. Uses the
    /// IEEE total order, so a NaN sorts first instead of scrambling the rest.
    pub fn sorted_descending(&self) -> Vec<Component> {
        let mut sorted = self.components.clone();
        sorted.sort_by(|a, b| b.wt_percent.total_cmp(&a.wt_percent));
        sorted
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Composition {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut composition = Composition::new();
        for (name, wt_percent) in iter {
            composition.insert(name, wt_percent);
        }
        composition
    }
}

impl<'a> IntoIterator for &'a Composition {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

// =============================================================================
// Ratio Table
// =============================================================================

/// Multiplicative conversion factors keyed by element symbol.
///
/// A missing entry means a factor of 1.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioTable {
    ratios: HashMap<String, f64>,
}

impl RatioTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ratio: f64) -> Option<f64> {
        self.ratios.insert(name.into(), ratio)
    }

    /// Factor for `name`, defaulting to 1.0.
    pub fn factor(&self, name: &str) -> f64 {
        self.ratios.get(name).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RatioTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            ratios: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<Composition> for RatioTable {
    fn from(table: Composition) -> Self {
        table
            .components
            .into_iter()
            .map(|c| (c.name, c.wt_percent))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut comp = Composition::new();
        assert_eq!(comp.insert("Fe", 10.0), None);
        comp.insert("Si", 5.0);
        assert_eq!(comp.insert("Fe", 12.0), Some(10.0));

        let names: Vec<_> = comp.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fe", "Si"]);
        assert_eq!(comp.get("Fe"), Some(12.0));
        assert_eq!(comp.len(), 2);
    }

    #[test]
    fn test_sorted_descending_is_stable() {
        let comp: Composition = vec![("Al", 5.0), ("Fe", 60.0), ("Mg", 5.0), ("Ca", 5.0)]
            .into_iter()
            .collect();

        let names: Vec<_> = comp
            .sorted_descending()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Fe", "Al", "Mg", "Ca"]);
    }

    #[test]
    fn test_ratio_defaults_to_one() {
        let ratios: RatioTable = vec![("Fe", 1.43)].into_iter().collect();
        assert_eq!(ratios.factor("Fe"), 1.43);
        assert_eq!(ratios.factor("Si"), 1.0);
    }

    #[test]
    fn test_sorted_descending_is_total_with_nan() {
        let comp: Composition = vec![("Fe", 73.0), ("X", f64::NAN), ("Si", 0.0), ("Ca", 89.0), ("Mg", 81.0)]
            .into_iter()
            .collect();

        let sorted = comp.sorted_descending();
        assert_eq!(sorted.len(), 5);
        assert!(sorted[0].wt_percent.is_nan());
        let rest: Vec<_> = sorted[1..].iter().map(|c| c.wt_percent).collect();
        assert_eq!(rest, vec![89.0, 81.0, 73.0, 0.0]);
    }
}
