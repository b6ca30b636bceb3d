//! Which numbers get a delta, and the pair the banner shows.

use serde::Serialize;
use statbanner_core::CombinedStats;

use crate::delta::{compute_delta, DeltaResult};

/// Headline fields compared day over day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    /// `vim.totalSolutions`
    VimTotalSolutions,
    /// `news.totalUsers`
    NewsTotalUsers,
}

impl TrackedField {
    pub fn all() -> &'static [TrackedField] {
        &[Self::VimTotalSolutions, Self::NewsTotalUsers]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VimTotalSolutions => "VimGolf solves",
            Self::NewsTotalUsers => "AI Satire users",
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn value_of(&self, stats: &CombinedStats) -> f64 {
        match self {
            Self::VimTotalSolutions => stats.vim.total_solutions as f64,
            Self::NewsTotalUsers => stats.news.total_users as f64,
        }
    }

    /// Delta for this field between two captures.
    pub fn delta(&self, current: &CombinedStats, previous: Option<&CombinedStats>) -> DeltaResult {
        compute_delta(self.value_of(current), previous.map(|p| self.value_of(p)))
    }
}

/// Deltas for the two banner headlines (source A, source B).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerDeltas {
    pub vim: DeltaResult,
    pub news: DeltaResult,
}

impl BannerDeltas {
    pub fn between(current: &CombinedStats, previous: Option<&CombinedStats>) -> Self {
        Self {
            vim: TrackedField::VimTotalSolutions.delta(current, previous),
            news: TrackedField::NewsTotalUsers.delta(current, previous),
        }
    }

    pub fn get(&self, field: TrackedField) -> &DeltaResult {
        match field {
            TrackedField::VimTotalSolutions => &self.vim,
            TrackedField::NewsTotalUsers => &self.news,
        }
    }
}
