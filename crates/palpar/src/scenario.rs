//! Scenario driver: ordered phases over one device session.
//!
//! A scenario is an ordered sequence of named phases (navigate, act,
//! verify, return). Phases run strictly sequentially; the first failure
//! aborts the remaining phases of the run, which are recorded as skipped,
//! but the run still produces a full report. Independent scenario runs are
//! unaffected by each other. Retrying a failed phase is the caller's
//! business; nothing here retries.

use crate::driver::DeviceDriver;
use crate::reporter::{PhaseResult, RunReport};
use crate::result::PalparResult;
use crate::toolkit::Toolkit;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info, warn};

/// One scenario run in progress
#[derive(Debug)]
pub struct ScenarioRun {
    report: RunReport,
    failed: bool,
}

impl ScenarioRun {
    /// Start a new run for the named scenario
    #[must_use]
    pub fn new(scenario: impl Into<String>) -> Self {
        let report = RunReport::new(scenario);
        info!(scenario = %report.scenario, run_id = %report.run_id, "scenario started");
        Self {
            report,
            failed: false,
        }
    }

    /// Whether an earlier phase has already failed
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed
    }

    /// Execute one phase and record its result.
    ///
    /// Once a phase has failed, later phases are recorded as skipped
    /// without being executed. Returns `true` when the phase passed.
    pub async fn phase<Fut>(&mut self, name: &str, fut: Fut) -> bool
    where
        Fut: Future<Output = PalparResult<()>>,
    {
        match self.run_phase(name, fut).await {
            Some(result) => {
                let passed = result.status.is_passed();
                self.report.record(result);
                passed
            }
            None => false,
        }
    }

    /// Execute one phase, capturing a diagnostic screenshot on failure.
    ///
    /// The capture is keyed to the phase name and is best-effort: a failed
    /// capture never masks the phase error.
    pub async fn phase_with_diagnostics<D, Fut>(
        &mut self,
        name: &str,
        fut: Fut,
        toolkit: &Toolkit<D>,
    ) -> bool
    where
        D: DeviceDriver,
        Fut: Future<Output = PalparResult<()>>,
    {
        match self.run_phase(name, fut).await {
            Some(mut result) => {
                let passed = result.status.is_passed();
                if !passed {
                    let label = name.replace(' ', "_");
                    match toolkit.take_screenshot(&label).await {
                        Ok(stem) => result = result.with_screenshot(stem),
                        Err(capture) => {
                            warn!(%capture, phase = name, "diagnostic screenshot failed");
                        }
                    }
                }
                self.report.record(result);
                passed
            }
            None => false,
        }
    }

    /// Runs the phase unless the scenario has already failed, in which case
    /// the phase is recorded as skipped and `None` is returned.
    async fn run_phase<Fut>(&mut self, name: &str, fut: Fut) -> Option<PhaseResult>
    where
        Fut: Future<Output = PalparResult<()>>,
    {
        if self.failed {
            info!(phase = name, "phase skipped after earlier failure");
            self.report.record(PhaseResult::skipped(name));
            return None;
        }

        info!(phase = name, "phase started");
        let start = Instant::now();
        match fut.await {
            Ok(()) => {
                let duration = start.elapsed();
                info!(phase = name, ?duration, "phase passed");
                Some(PhaseResult::passed(name, duration))
            }
            Err(err) => {
                self.failed = true;
                let duration = start.elapsed();
                error!(phase = name, %err, "phase failed; aborting remaining phases");
                Some(PhaseResult::failed(name, duration, err.to_string()))
            }
        }
    }

    /// Finish the run and yield its report
    #[must_use]
    pub fn finish(self) -> RunReport {
        info!("{}", self.report.summary());
        self.report
    }
}
