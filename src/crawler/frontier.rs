//! Crawl frontier: the found, crawled and pending URL sets
//!
//! The frontier is owned by the coordinating loop and never shared with
//! fetch tasks, so none of its state needs locking.

use crate::state::CrawlPhase;
use crate::ScoutError;
use std::collections::{HashSet, VecDeque};

/// URLs taken from the pending queue for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontierBatch {
    /// URLs to fetch; already marked as crawled
    pub urls: Vec<String>,

    /// URLs removed from the queue without fetching (robots.txt)
    pub skipped: Vec<String>,
}

/// Frontier state for one discovery run
///
/// # Invariants
///
/// - `crawled ⊆ found`
/// - `|crawled| ≤ max_pages`
/// - a URL enters the pending queue at most once, so it is never fetched
///   twice
#[derive(Debug)]
pub struct Frontier {
    phase: CrawlPhase,
    max_pages: usize,

    /// Every URL ever discovered, in discovery order
    found: Vec<String>,
    found_set: HashSet<String>,

    /// URLs handed out for fetching, in fetch order
    crawled: Vec<String>,
    crawled_set: HashSet<String>,

    pending: VecDeque<String>,
    /// Every URL ever pushed to `pending`
    enqueued: HashSet<String>,
}

impl Frontier {
    pub fn new(max_pages: usize) -> Self {
        Self {
            phase: CrawlPhase::Idle,
            max_pages,
            found: Vec::new(),
            found_set: HashSet::new(),
            crawled: Vec::new(),
            crawled_set: HashSet::new(),
            pending: VecDeque::new(),
            enqueued: HashSet::new(),
        }
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), ScoutError> {
        if !self.phase.can_transition_to(to) {
            return Err(ScoutError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!("Frontier phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    fn record_found(&mut self, url: &str) -> bool {
        if self.found_set.insert(url.to_string()) {
            self.found.push(url.to_string());
            true
        } else {
            false
        }
    }

    fn enqueue(&mut self, url: &str) -> bool {
        if self.enqueued.insert(url.to_string()) {
            self.pending.push_back(url.to_string());
            true
        } else {
            false
        }
    }

    /// Initializes the frontier: `Idle → Seeded`
    ///
    /// `discovered` URLs (sitemap entries, pre-seeded URLs) are recorded as
    /// found but not queued. `seeds` are recorded as found and queued for
    /// fetching even when already discovered.
    pub fn seed<D, S>(&mut self, discovered: D, seeds: S) -> Result<(), ScoutError>
    where
        D: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
    {
        self.transition(CrawlPhase::Seeded)?;

        for url in discovered {
            self.record_found(&url);
        }
        for url in seeds {
            self.record_found(&url);
            self.enqueue(&url);
        }

        tracing::info!(
            "Frontier seeded: {} found, {} queued, budget {}",
            self.found.len(),
            self.pending.len(),
            self.max_pages
        );
        Ok(())
    }

    /// Pages that may still be fetched
    pub fn remaining_budget(&self) -> usize {
        self.max_pages.saturating_sub(self.crawled.len())
    }

    /// True when nothing more will be fetched
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty() || self.remaining_budget() == 0
    }

    /// Takes the next batch for fetching
    ///
    /// At most `min(batch_size, remaining_budget)` URLs are returned, each
    /// marked as crawled before this returns. URLs rejected by `admit` are
    /// dropped from the queue without touching the budget. The first call
    /// moves `Seeded → Draining`.
    pub fn next_batch<F>(&mut self, batch_size: usize, mut admit: F) -> Result<FrontierBatch, ScoutError>
    where
        F: FnMut(&str) -> bool,
    {
        self.transition(CrawlPhase::Draining)?;

        let take = batch_size.min(self.remaining_budget());
        let mut batch = FrontierBatch::default();

        while batch.urls.len() < take {
            let Some(url) = self.pending.pop_front() else {
                break;
            };
            if self.crawled_set.contains(&url) {
                continue;
            }
            if !admit(&url) {
                tracing::debug!("Skipping {} (disallowed by robots.txt)", url);
                batch.skipped.push(url);
                continue;
            }
            self.crawled_set.insert(url.clone());
            self.crawled.push(url.clone());
            batch.urls.push(url);
        }

        Ok(batch)
    }

    /// Merges links extracted from a fetched page
    ///
    /// Only URLs never seen before are recorded and queued. Returns the
    /// number of new URLs.
    pub fn merge<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for url in links {
            if self.record_found(&url) {
                self.enqueue(&url);
                added += 1;
            }
        }
        added
    }

    /// Records a URL as discovered without queueing it
    pub fn add_found(&mut self, url: String) -> bool {
        self.record_found(&url)
    }

    /// Ends the run: `Seeded | Draining → Done`
    pub fn finish(&mut self) -> Result<(), ScoutError> {
        self.transition(CrawlPhase::Done)?;
        tracing::info!(
            "Frontier done: {} crawled, {} found, {} left pending",
            self.crawled.len(),
            self.found.len(),
            self.pending.len()
        );
        Ok(())
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn found(&self) -> &[String] {
        &self.found
    }

    pub fn crawled(&self) -> &[String] {
        &self.crawled
    }

    pub fn crawled_set(&self) -> &HashSet<String> {
        &self.crawled_set
    }

    pub fn is_found(&self, url: &str) -> bool {
        self.found_set.contains(url)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Consumes the frontier, returning `(found, crawled)`
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.found, self.crawled)
    }
}
