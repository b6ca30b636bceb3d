//! Runtime types.

use serde::Serialize;
use statbanner_core::Error;
use statbanner_delta::BannerDeltas;
use statbanner_store::{DateKey, PruneReport};

/// States of a single run, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    Start,
    Cleanup,
    Fetch,
    PersistToday,
    LookupYesterday,
    Render,
    Publish,
    Done,
    Failed,
}

impl RunStage {
    /// The happy path, start to finish.
    pub fn all() -> &'static [RunStage] {
        &[
            Self::Start,
            Self::Cleanup,
            Self::Fetch,
            Self::PersistToday,
            Self::LookupYesterday,
            Self::Render,
            Self::Publish,
            Self::Done,
        ]
    }
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Cleanup => "cleanup",
            Self::Fetch => "fetch",
            Self::PersistToday => "persist_today",
            Self::LookupYesterday => "lookup_yesterday",
            Self::Render => "render",
            Self::Publish => "publish",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// What a run did, step by step.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    #[serde(rename = "dateKey", serialize_with = "serialize_key")]
    pub date_key: DateKey,
    pub stages: Vec<RunStage>,
    /// `None` when the cleanup pass could not list the store.
    pub cleanup: Option<PruneReport>,
    /// Whether today's record reached the store.
    pub persisted: bool,
    /// Whether yesterday's record was available for comparison.
    #[serde(rename = "previousFound")]
    pub previous_found: bool,
    pub deltas: Option<BannerDeltas>,
    #[serde(rename = "bannerBytes")]
    pub banner_bytes: usize,
}

fn serialize_key<S: serde::Serializer>(key: &DateKey, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&key.storage_key())
}

impl RunReport {
    pub(crate) fn new(date_key: DateKey) -> Self {
        Self {
            date_key,
            stages: vec![RunStage::Start],
            cleanup: None,
            persisted: false,
            previous_found: false,
            deltas: None,
            banner_bytes: 0,
        }
    }

    pub fn completed(&self) -> bool {
        self.stages.last() == Some(&RunStage::Done)
    }
}

/// A failure that ends the run without a published banner.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("metrics fetch failed: {0}")]
    Fetch(#[source] Error),

    #[error("banner render failed: {0}")]
    Render(#[source] Error),

    #[error("banner publish failed: {0}")]
    Publish(#[source] Error),
}

impl RunError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Fetch(_) => 2,
            Self::Render(_) => 3,
            Self::Publish(_) => 4,
        }
    }

    pub fn stage(&self) -> RunStage {
        match self {
            Self::Fetch(_) => RunStage::Fetch,
            Self::Render(_) => RunStage::Render,
            Self::Publish(_) => RunStage::Publish,
        }
    }
}
