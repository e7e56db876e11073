use std::sync::Arc;

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use tracing::{error, info, warn};

use crate::{
    errors::CovError,
    report::{CoverageReport, normalize},
    source::CoverageSource,
};

type FetchOutcome = Result<CoverageReport, CovError>;

/// What the session can show right now.
#[derive(Debug)]
pub enum SessionState<'a> {
    Loading,
    Ready(&'a CoverageReport),
    /// A re-fetch failed; the last good report is still shown.
    Stale {
        report: &'a CoverageReport,
        error: &'a CovError,
    },
    Failed(&'a CovError),
}

/// One dashboard session: issues a fetch on a worker thread and settles
/// once per fetch. Only a successful fetch replaces the report; a failed
/// one is recorded next to whatever report is already loaded. Fetch errors
/// never leave the session.
pub struct Session {
    source: Arc<dyn CoverageSource>,
    report: Option<CoverageReport>,
    last_error: Option<CovError>,
    pending: Option<Receiver<FetchOutcome>>,
}

impl Session {
    pub fn start(source: Arc<dyn CoverageSource>) -> Self {
        let mut session = Self {
            source,
            report: None,
            last_error: None,
            pending: None,
        };
        session.spawn_fetch();
        session
    }

    pub fn state(&self) -> SessionState<'_> {
        if self.pending.is_some() {
            return SessionState::Loading;
        }
        match (&self.report, &self.last_error) {
            (Some(report), None) => SessionState::Ready(report),
            (Some(report), Some(error)) => SessionState::Stale { report, error },
            (None, Some(error)) => SessionState::Failed(error),
            (None, None) => SessionState::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Last successfully fetched report, kept across failed reloads.
    pub fn report(&self) -> Option<&CoverageReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&CovError> {
        self.last_error.as_ref()
    }

    pub fn source_name(&self) -> String {
        self.source.name()
    }

    /// Non-blocking. Returns true when this call settled the outstanding
    /// fetch.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = self.pending.as_ref() else {
            return false;
        };
        match receiver.try_recv() {
            Ok(outcome) => {
                self.settle(outcome);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.settle(Err(CovError::InternalError(
                    "coverage fetch worker exited without a result".to_string(),
                )));
                true
            }
        }
    }

    /// Blocks until the outstanding fetch settles.
    pub fn wait(&mut self) -> SessionState<'_> {
        if let Some(receiver) = self.pending.as_ref() {
            let outcome = receiver.recv().unwrap_or_else(|_| {
                Err(CovError::InternalError(
                    "coverage fetch worker exited without a result".to_string(),
                ))
            });
            self.settle(outcome);
        }
        self.state()
    }

    /// Issues a fresh fetch. The current report stays loaded until the new
    /// one arrives and is then replaced wholesale, never patched.
    pub fn reload(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.spawn_fetch();
    }

    fn spawn_fetch(&mut self) {
        let (tx, rx) = bounded(1);
        let source = Arc::clone(&self.source);
        std::thread::spawn(move || {
            let outcome = source.fetch().map(|raw| normalize(&raw));
            let _ = tx.send(outcome);
        });
        self.pending = Some(rx);
    }

    fn settle(&mut self, outcome: FetchOutcome) {
        self.pending = None;
        match outcome {
            Ok(report) => {
                info!(
                    source = %self.source.name(),
                    suggestions = report.suggestions.len(),
                    "coverage report loaded"
                );
                self.report = Some(report);
                self.last_error = None;
            }
            Err(err) => {
                if err.is_transport_failure() {
                    warn!(
                        source = %self.source.name(),
                        keeps_report = self.report.is_some(),
                        "coverage fetch failed: {}",
                        err
                    );
                } else {
                    error!(source = %self.source.name(), "coverage fetch aborted: {}", err);
                }
                self.last_error = Some(err);
            }
        }
    }
}
