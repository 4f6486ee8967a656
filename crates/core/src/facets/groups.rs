#![forbid(unsafe_code)]

use super::Facet;
use crate::config::CategoryGroupSpec;
use serde::Serialize;
use std::collections::BTreeSet;

pub const OTHER_GROUP: &str = "Other";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub name: String,
    pub values: Vec<String>,
}

/// Buckets the category facet into the configured super-groups. Groups with
/// no present member are omitted; uncovered values land in a trailing
/// [`OTHER_GROUP`].
pub fn category_groups(facet: &Facet, groups: &[CategoryGroupSpec]) -> Vec<CategoryGroup> {
    let mut covered = BTreeSet::new();
    let mut out = Vec::new();

    for group in groups {
        let values = facet
            .values()
            .iter()
            .filter(|value| group.members.contains(value))
            .cloned()
            .collect::<Vec<_>>();
        if values.is_empty() {
            continue;
        }
        covered.extend(values.iter().cloned());
        out.push(CategoryGroup {
            name: group.name.clone(),
            values,
        });
    }

    let rest = facet
        .values()
        .iter()
        .filter(|value| !covered.contains(*value))
        .cloned()
        .collect::<Vec<_>>();
    if !rest.is_empty() {
        out.push(CategoryGroup {
            name: OTHER_GROUP.to_string(),
            values: rest,
        });
    }
    out
}
