//! Run orchestrator — one pass of cleanup, fetch, persist, compare, render, publish.
//!
//! Only fetch, render and publish failures end the run. Storage problems
//! are logged and the run carries on with whatever it has in memory.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use statbanner_delta::BannerDeltas;
use statbanner_publish::{BannerPlacement, BannerPublisher};
use statbanner_render::BannerRenderer;
use statbanner_sources::MetricsSource;
use statbanner_store::{DateKey, SnapshotRecord, SnapshotStore};
use tracing::{debug, error, info, warn};

use crate::types::*;

/// Drives a single banner run against its collaborators.
pub struct Orchestrator {
    store: Arc<SnapshotStore>,
    source: Arc<dyn MetricsSource>,
    renderer: Arc<dyn BannerRenderer>,
    publisher: Arc<dyn BannerPublisher>,
    placement: BannerPlacement,
}

impl Orchestrator {
    pub fn new(
        store: Arc<SnapshotStore>,
        source: Arc<dyn MetricsSource>,
        renderer: Arc<dyn BannerRenderer>,
        publisher: Arc<dyn BannerPublisher>,
    ) -> Self {
        Self {
            store,
            source,
            renderer,
            publisher,
            placement: BannerPlacement::default(),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run now.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        self.run_at(Utc::now()).await
    }

    /// Run as if the current time were `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport, RunError> {
        let today = DateKey::for_timestamp(now);
        let yesterday = today.previous();
        let mut report = RunReport::new(today);

        info!("Starting banner run for {}", today.date());

        // Cleanup: advisory, never blocks the run.
        enter(&mut report, RunStage::Cleanup);
        match self.store.cleanup(today) {
            Ok(pruned) => report.cleanup = Some(pruned),
            Err(e) => warn!("Snapshot cleanup skipped: {}", e),
        }

        // Fetch: both sources concurrently, either failure is fatal.
        enter(&mut report, RunStage::Fetch);
        let stats = match tokio::try_join!(self.source.fetch_vim(), self.source.fetch_news()) {
            Ok((vim, news)) => statbanner_core::CombinedStats { vim, news },
            Err(e) => return Err(fail(&mut report, RunError::Fetch(e))),
        };
        info!("Fetched VimGolf stats: {:?}", stats.vim);
        info!("Fetched news stats: {:?}", stats.news);

        // Persist today: degraded on failure.
        enter(&mut report, RunStage::PersistToday);
        let record = SnapshotRecord::new(now, stats.clone());
        match self.store.write(today, &record) {
            Ok(()) => {
                report.persisted = true;
                info!("Saved snapshot {}", today);
            }
            Err(e) => warn!("Failed to save snapshot {}: {}", today, e),
        }

        // Lookup yesterday: missing or unreadable both mean "no comparison".
        enter(&mut report, RunStage::LookupYesterday);
        let previous = match self.store.read(yesterday) {
            Ok(Some(record)) => Some(record.stats),
            Ok(None) => {
                info!("No snapshot for {}; deltas will be blank", yesterday);
                None
            }
            Err(e) if e.is_not_found() => {
                info!("Snapshot {} vanished before it could be read: {}", yesterday, e);
                None
            }
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", yesterday, e);
                None
            }
        };
        report.previous_found = previous.is_some();

        let deltas = BannerDeltas::between(&stats, previous.as_ref());
        debug!(
            "Deltas: vim={:?} ({}), news={:?} ({})",
            deltas.vim.display_text,
            deltas.vim.classification,
            deltas.news.display_text,
            deltas.news.classification
        );

        enter(&mut report, RunStage::Render);
        let image = match self.renderer.render(&stats, &deltas) {
            Ok(image) => image,
            Err(e) => return Err(fail(&mut report, RunError::Render(e))),
        };
        report.banner_bytes = image.len();
        report.deltas = Some(deltas);

        enter(&mut report, RunStage::Publish);
        if let Err(e) = self.publisher.publish(&image, &self.placement).await {
            return Err(fail(&mut report, RunError::Publish(e)));
        }
        info!("Banner published via {}", self.publisher.name());

        enter(&mut report, RunStage::Done);
        Ok(report)
    }
}

fn enter(report: &mut RunReport, stage: RunStage) {
    debug!("Run stage: {}", stage);
    report.stages.push(stage);
}

fn fail(report: &mut RunReport, err: RunError) -> RunError {
    error!("Run failed during {}: {}", err.stage(), err);
    enter(report, RunStage::Failed);
    err
}
