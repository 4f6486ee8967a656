#![forbid(unsafe_code)]

use crate::facets::{Dimension, FacetIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Per-dimension "selected" flags, keyed by exactly the values present in the
/// facet index the state was seeded from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    flags: BTreeMap<Dimension, BTreeMap<String, bool>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("{dimension} has no facet value {value:?}")]
    UnknownValue { dimension: Dimension, value: String },
}

impl ToggleError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownValue { .. } => "UNKNOWN_FACET_VALUE",
        }
    }
}

impl FilterState {
    /// Every facet value present, all unselected.
    pub fn seeded(index: &FacetIndex) -> Self {
        let flags = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let values = index
                    .facet(dimension)
                    .values()
                    .iter()
                    .map(|value| (value.clone(), false))
                    .collect();
                (dimension, values)
            })
            .collect();
        Self { flags }
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.flags
            .get(&dimension)
            .is_some_and(|values| values.contains_key(value))
    }

    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.flags
            .get(&dimension)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the flag and returns its new value.
    pub fn try_toggle(&mut self, dimension: Dimension, value: &str) -> Result<bool, ToggleError> {
        let flag = self
            .flags
            .get_mut(&dimension)
            .and_then(|values| values.get_mut(value))
            .ok_or_else(|| ToggleError::UnknownValue {
                dimension,
                value: value.to_string(),
            })?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Lenient form of [`Self::try_toggle`]: an unknown value leaves the state
    /// untouched. Returns whether anything changed.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) -> bool {
        self.try_toggle(dimension, value).is_ok()
    }

    pub fn clear(&mut self) {
        for values in self.flags.values_mut() {
            for flag in values.values_mut() {
                *flag = false;
            }
        }
    }

    pub fn selected(&self, dimension: Dimension) -> BTreeSet<&str> {
        self.flags
            .get(&dimension)
            .map(|values| {
                values
                    .iter()
                    .filter(|(_, selected)| **selected)
                    .map(|(value, _)| value.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn active_count(&self) -> usize {
        self.flags
            .values()
            .flat_map(|values| values.values())
            .filter(|selected| **selected)
            .count()
    }

    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::record::ProjectRecord;

    fn index() -> FacetIndex {
        let mut acala = ProjectRecord::named("Acala");
        acala.category = vec!["DeFi".to_string()];
        acala.ecosystem = vec!["Polkadot".to_string(), "Ethereum".to_string()];
        FacetIndex::build(&[acala], &CatalogConfig::default())
    }

    #[test]
    fn seeded_state_mirrors_facets_unselected() {
        let state = FilterState::seeded(&index());
        assert!(state.contains(Dimension::Category, "DeFi"));
        assert!(state.contains(Dimension::Ecosystem, "Polkadot"));
        assert!(!state.contains(Dimension::Ecosystem, "Ethereum"));
        assert!(!state.is_selected(Dimension::Category, "DeFi"));
        assert!(!state.has_active());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let original = FilterState::seeded(&index());
        let mut state = original.clone();
        assert_eq!(state.try_toggle(Dimension::Category, "DeFi"), Ok(true));
        assert_eq!(state.active_count(), 1);
        assert_eq!(
            state.selected(Dimension::Category).into_iter().collect::<Vec<_>>(),
            vec!["DeFi"]
        );
        assert_eq!(state.try_toggle(Dimension::Category, "DeFi"), Ok(false));
        assert_eq!(state, original);
    }

    #[test]
    fn unknown_value_is_rejected_strictly_and_ignored_leniently() {
        let mut state = FilterState::seeded(&index());
        let err = state
            .try_toggle(Dimension::Ecosystem, "Ethereum")
            .unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_FACET_VALUE");
        assert!(!state.toggle(Dimension::Category, "NFT"));
        assert_eq!(state, FilterState::seeded(&index()));
    }

    #[test]
    fn clear_keeps_keys_and_drops_selections() {
        let mut state = FilterState::seeded(&index());
        state.toggle(Dimension::Category, "DeFi");
        state.toggle(Dimension::Ecosystem, "Polkadot");
        assert_eq!(state.active_count(), 2);
        state.clear();
        assert_eq!(state, FilterState::seeded(&index()));
    }
}
