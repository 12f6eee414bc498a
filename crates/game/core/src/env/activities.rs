use crate::activity::{ActivityInfo, ActivityKind};

/// Source of per-kind activity metadata.
///
/// Content packs override the built-in table through this oracle; kinds the
/// oracle does not know fall back to [`ActivityKind::info`].
pub trait ActivityOracle: Send + Sync {
    fn info(&self, kind: ActivityKind) -> Option<ActivityInfo>;
}
