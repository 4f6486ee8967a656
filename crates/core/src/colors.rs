#![forbid(unsafe_code)]

use crate::config::Rgb;
use crate::facets::{Dimension, FacetIndex};
use serde::Serialize;
use std::collections::BTreeMap;

/// Facet value to color, assigned once per dataset load.
///
/// Values are visited category, status, audience, ecosystem, each in facet
/// display order, and take palette slots in visit order. Once the palette is
/// exhausted slots wrap around, so later values share colors with earlier
/// ones. A string that appears in more than one dimension keeps the color of
/// its first visit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColorMap {
    colors: BTreeMap<String, Rgb>,
}

impl ColorMap {
    pub fn assign(index: &FacetIndex, palette: &[Rgb]) -> Self {
        let mut colors = BTreeMap::new();
        if palette.is_empty() {
            return Self { colors };
        }
        for value in color_traversal(index) {
            if colors.contains_key(value) {
                continue;
            }
            let slot = colors.len() % palette.len();
            colors.insert(value.to_string(), palette[slot]);
        }
        Self { colors }
    }

    pub fn get(&self, value: &str) -> Option<Rgb> {
        self.colors.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

pub fn color_traversal(index: &FacetIndex) -> impl Iterator<Item = &str> {
    Dimension::COLORED
        .into_iter()
        .flat_map(move |dimension| index.facet(dimension).values().iter().map(String::as_str))
}
