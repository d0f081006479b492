//! Sliding-window bookkeeping of search requests that found nothing.
//!
//! Time is counted in requests, not wall-clock: each recorded request is one
//! tick, and a window of [`MINUTES_IN_DAY`] ticks models one day of
//! one-per-minute traffic.

use crate::error::Result;
use crate::filter::DocumentFilter;
use crate::search_server::SearchServer;
use crate::{Document, DocumentStatus};
use std::collections::VecDeque;

pub const MINUTES_IN_DAY: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    tick: u64,
    results: usize,
}

#[derive(Debug, Default)]
pub struct RequestStats {
    requests: VecDeque<QueryResult>,
    current_tick: u64,
    no_result_requests: usize,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request that produced `results` documents, first evicting
    /// entries that have aged out of the window.
    pub fn record(&mut self, results: usize) {
        self.current_tick += 1;
        while let Some(front) = self.requests.front() {
            if self.current_tick - front.tick < MINUTES_IN_DAY {
                break;
            }
            if front.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult { tick: self.current_tick, results });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }

    /// Zero-result requests still inside the window.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Requests still inside the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Runs searches against a borrowed engine and records each outcome.
/// Failed searches are not recorded.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    stats: RequestStats,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, stats: RequestStats::new() }
    }

    pub fn add_find_request_by<F>(&mut self, raw_query: &str, filter: F) -> Result<Vec<Document>>
    where
        F: DocumentFilter,
    {
        let found = self.server.find_top_documents_by(raw_query, filter)?;
        self.stats.record(found.len());
        Ok(found)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request_by(raw_query, status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn no_result_requests(&self) -> usize {
        self.stats.no_result_requests()
    }

    pub fn stats(&self) -> &RequestStats {
        &self.stats
    }
}
