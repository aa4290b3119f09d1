//! Runs the packager over a whole manifest.
//!
//! Records are processed in input order, one at a time. A failing record is
//! recorded and the batch moves on; the report lists every outcome.

use crate::manifest::AppSpec;
use crate::packager::{PackagedArtifact, Packager, PackagingError};
use crate::runtime::LaunchRuntime;

/// Lifecycle of one record: `Pending → Packaging → Done | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Pending,
    Packaging,
    Done,
    Failed,
}

/// Final result for one manifest record.
#[derive(Debug)]
pub struct RecordOutcome {
    pub spec: AppSpec,
    pub result: Result<PackagedArtifact, PackagingError>,
}

impl RecordOutcome {
    pub fn state(&self) -> RecordState {
        match self.result {
            Ok(_) => RecordState::Done,
            Err(_) => RecordState::Failed,
        }
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Started(&'a AppSpec),
    Finished(&'a RecordOutcome),
}

#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn packaged(&self) -> usize {
        self.artifacts().count()
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &PackagedArtifact> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed records with their errors, in input order.
    pub fn failures(&self) -> impl Iterator<Item = (&AppSpec, &PackagingError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.spec, e)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// `packaged N of M`
    pub fn summary(&self) -> String {
        format!("packaged {} of {}", self.packaged(), self.total())
    }
}

/// Packages every record, calling `on_event` before and after each one.
pub fn run_batch<R, F>(
    packager: &mut Packager<R>,
    specs: Vec<AppSpec>,
    mut on_event: F,
) -> BatchReport
where
    R: LaunchRuntime,
    F: FnMut(BatchEvent<'_>),
{
    for spec in &specs {
        tracing::debug!(
            index = spec.index,
            name = %spec.app_name,
            state = ?RecordState::Pending,
            "queued"
        );
    }

    let mut report = BatchReport {
        outcomes: Vec::with_capacity(specs.len()),
    };
    for spec in specs {
        tracing::debug!(index = spec.index, state = ?RecordState::Packaging, "packaging");
        on_event(BatchEvent::Started(&spec));

        let result = packager.package(&spec);
        if let Err(e) = &result {
            tracing::warn!(
                index = spec.index,
                name = %spec.app_name,
                error = %e,
                "packaging failed"
            );
        }
        let outcome = RecordOutcome { spec, result };
        tracing::debug!(index = outcome.spec.index, state = ?outcome.state(), "record finished");
        on_event(BatchEvent::Finished(&outcome));
        report.outcomes.push(outcome);
    }

    tracing::info!(
        packaged = report.packaged(),
        total = report.total(),
        "batch finished"
    );
    report
}
