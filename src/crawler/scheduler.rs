//! Page fan-out
//!
//! Runs one coordinator job per listing page on a bounded pool of tokio
//! tasks. Pages are independent: a failing or panicking page is logged and
//! never affects its siblings or the overall result.

use crate::crawler::coordinator::Coordinator;
use crate::ScrapeError;
use futures::{stream, StreamExt};

/// Outcome of one page job
#[derive(Debug)]
pub struct PageOutcome {
    /// Listing page number
    pub page: u32,

    /// Movies saved, or why the job stopped early
    pub result: Result<usize, ScrapeError>,
}

/// Totals across a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages whose job ran to completion
    pub pages_completed: usize,

    /// Pages whose job stopped on an error or panic
    pub pages_failed: usize,

    /// Movies saved across all pages
    pub movies_saved: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &PageOutcome) {
        match &outcome.result {
            Ok(saved) => {
                self.pages_completed += 1;
                self.movies_saved += saved;
            }
            Err(_) => self.pages_failed += 1,
        }
    }
}

/// Runs `process_page` for every page in `1..=total_pages`
///
/// At most `workers` pages are in flight at once; each page runs on its own
/// task. Returns once every page job has finished. Completion order between
/// pages is unspecified.
pub async fn run_pages(coordinator: &Coordinator, total_pages: u32, workers: usize) -> RunSummary {
    let workers = workers.max(1);
    tracing::info!(
        "Processing {} pages with {} workers",
        total_pages,
        workers
    );

    let outcomes: Vec<PageOutcome> = stream::iter(1..=total_pages)
        .map(|page| {
            let coordinator = coordinator.clone();
            async move {
                let handle = tokio::spawn(async move { coordinator.process_page(page).await });
                let result = match handle.await {
                    Ok(result) => result,
                    Err(source) => Err(ScrapeError::Join { page, source }),
                };
                PageOutcome { page, result }
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    let mut summary = RunSummary::default();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(saved) => tracing::info!("Page {} done: {} movies saved", outcome.page, saved),
            Err(e) => tracing::error!("Page {} failed: {}", outcome.page, e),
        }
        summary.record(outcome);
    }

    summary
}
