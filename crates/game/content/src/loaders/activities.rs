//! Activity metadata loader.
//!
//! Loads [`ActivityInfo`] overrides from RON and serves them through
//! [`ActivityOracle`]. Kinds the document leaves out keep their built-in rows.

use std::collections::HashMap;
use std::path::Path;

use delve_core::{ActivityInfo, ActivityKind, ActivityOracle};
use strum::IntoEnumIterator;

use crate::loaders::{LoadResult, read_file};

/// Registry of activity metadata keyed by kind.
#[derive(Debug, Clone)]
pub struct ActivityTable {
    infos: HashMap<ActivityKind, ActivityInfo>,
}

impl ActivityTable {
    /// The built-in table for every kind.
    pub fn builtin() -> Self {
        let infos = ActivityKind::iter().map(|kind| (kind, kind.info())).collect();
        Self { infos }
    }

    /// Built-in rows overridden by the rows of a RON list.
    pub fn from_ron(content: &str) -> LoadResult<Self> {
        let rows: Vec<ActivityInfo> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse activity table RON: {}", e))?;

        let mut table = Self::builtin();
        for row in rows {
            table.infos.insert(row.kind, row);
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::from_ron(&content)
    }

    /// The table shipped with the crate.
    pub fn load_embedded() -> LoadResult<Self> {
        Self::from_ron(include_str!("../../data/activities.ron"))
    }

    pub fn get(&self, kind: ActivityKind) -> Option<&ActivityInfo> {
        self.infos.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

impl ActivityOracle for ActivityTable {
    fn info(&self, kind: ActivityKind) -> Option<ActivityInfo> {
        self.infos.get(&kind).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_kind() {
        let table = ActivityTable::builtin();
        assert_eq!(table.len(), ActivityKind::iter().count());
        assert_eq!(table.get(ActivityKind::Rest).unwrap().total_required_ap, 1000);
    }

    #[test]
    fn embedded_table_matches_builtin_rows() {
        let table = ActivityTable::load_embedded().unwrap();
        for kind in ActivityKind::iter() {
            assert_eq!(table.get(kind), Some(&kind.info()), "{kind}");
        }
    }

    #[test]
    fn overrides_replace_only_listed_kinds() {
        let table = ActivityTable::from_ron(
            r#"[
                (kind: Rest, name: "nap", interruptible: true, resumable: true,
                 ap_cost: 100, total_required_ap: 300,
                 requires_target: false, requires_position: false),
            ]"#,
        )
        .unwrap();

        let rest = table.info(ActivityKind::Rest).unwrap();
        assert_eq!(rest.name, "nap");
        assert_eq!(rest.total_required_ap, 300);
        assert_eq!(table.info(ActivityKind::Craft), Some(ActivityKind::Craft.info()));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        assert!(ActivityTable::from_ron("[(kind: Fly)]").is_err());
    }
}
