//! The preview pipeline: debounce → transform → execute → classify.
//!
//! The pipeline owns the debouncer, a monotonically increasing edit
//! generation, and the last committed report. Each frame the frontend
//! calls [`PreviewPipeline::notify_change`] for edits and
//! [`PreviewPipeline::tick`] to release due runs; stale results (from a
//! run started before a newer edit) are discarded at commit time, so the
//! displayed report always corresponds to the newest finished run.

use crate::preview::classify::classify;
use crate::preview::debounce::Debouncer;
use crate::preview::diagnostic::Diagnostic;
use crate::preview::sandbox::{LogLine, SandboxLoader};
use crate::preview::transform::Transformer;
use crate::preview::view::RenderableUnit;
use std::time::{Duration, Instant};

/// How a finished run classified
#[derive(Debug)]
pub enum RunOutcome {
    /// An export to render; the preview pane calls
    /// [`RenderableUnit::render`] on it
    Renderable(RenderableUnit),
    /// No export, but console output worth showing
    LogOnly,
    /// Compile failure, runtime failure, or silence
    Failed(Diagnostic),
}

impl RunOutcome {
    pub fn is_renderable(&self) -> bool {
        matches!(self, Self::Renderable(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Failed(diag) => Some(diag),
            _ => None,
        }
    }
}

/// Everything one pipeline run produced
#[derive(Debug)]
pub struct RunReport {
    /// The edit generation this run was started for
    pub generation: u64,
    /// The source text that was run
    pub source: String,
    /// Console lines captured during execution, in emission order
    pub logs: Vec<LogLine>,
    pub outcome: RunOutcome,
}

/// The live-preview pipeline
pub struct PreviewPipeline {
    transformer: Transformer,
    debouncer: Debouncer,
    generation: u64,
    committed: Option<RunReport>,
}

impl PreviewPipeline {
    pub fn new(debounce: Duration) -> Self {
        Self {
            transformer: Transformer::new(),
            debouncer: Debouncer::new(debounce),
            generation: 0,
            committed: None,
        }
    }

    /// Record an edit; bumps the generation and restarts the debounce timer
    pub fn notify_change(&mut self, text: &str) {
        self.notify_change_at(text, Instant::now());
    }

    pub fn notify_change_at(&mut self, text: &str, now: Instant) {
        self.generation += 1;
        self.debouncer.on_change_at(text, now);
    }

    /// Run any due edit and return the current committed report
    pub fn tick(&mut self) -> Option<&RunReport> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<&RunReport> {
        if let Some(text) = self.debouncer.poll_at(now) {
            let report = self.run(&text, self.generation);
            self.commit(report);
        }
        self.committed.as_ref()
    }

    /// Execute one full transform/execute/classify pass.
    ///
    /// Pure with respect to pipeline state; commit separately via
    /// [`commit`](Self::commit).
    pub fn run(&self, source: &str, generation: u64) -> RunReport {
        tracing::debug!(generation, bytes = source.len(), "pipeline run");
        match self.transformer.transform(source) {
            Err(diag) => RunReport {
                generation,
                source: source.to_string(),
                logs: Vec::new(),
                outcome: RunOutcome::Failed(diag),
            },
            Ok(module) => {
                let execution = SandboxLoader::execute(&module);
                let logs = execution.logs.snapshot();
                let outcome = classify(execution);
                RunReport {
                    generation,
                    source: source.to_string(),
                    logs,
                    outcome,
                }
            }
        }
    }

    /// Adopt a report unless it has been superseded by a newer edit or a
    /// newer committed report. Returns whether it was adopted.
    pub fn commit(&mut self, report: RunReport) -> bool {
        if report.generation < self.generation {
            tracing::debug!(
                stale = report.generation,
                current = self.generation,
                "discarding superseded run"
            );
            return false;
        }
        if let Some(current) = &self.committed {
            if report.generation < current.generation {
                return false;
            }
        }
        self.committed = Some(report);
        true
    }

    pub fn committed(&self) -> Option<&RunReport> {
        self.committed.as_ref()
    }

    /// Forget the committed report and any pending edit (exercise switch)
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.committed = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if an edit is waiting out its quiet interval
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending edit (if any) becomes due; the frontend uses this
    /// to schedule a repaint
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::diagnostic::DiagnosticKind;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_debounced_edit_runs_once() {
        let mut pipeline = PreviewPipeline::new(INTERVAL);
        let start = Instant::now();

        pipeline.notify_change_at("export default fn c() { <p>a</p> }", start);
        pipeline.notify_change_at("export default fn c() { <p>ab</p> }", start + INTERVAL / 2);

        // Quiet interval not yet elapsed since the last edit
        assert!(pipeline.tick_at(start + INTERVAL).is_none());

        let report = pipeline
            .tick_at(start + INTERVAL / 2 + INTERVAL)
            .expect("run should have committed");
        assert!(report.outcome.is_renderable());
        assert!(report.source.contains("ab"));
    }

    #[test]
    fn test_compile_error_report() {
        let pipeline = PreviewPipeline::new(INTERVAL);
        let report = pipeline.run("let x = ;", 1);
        let diag = report.outcome.diagnostic().expect("should fail");
        assert_eq!(diag.kind, DiagnosticKind::Compile);
    }

    #[test]
    fn test_stale_run_is_discarded() {
        let mut pipeline = PreviewPipeline::new(INTERVAL);
        let start = Instant::now();

        pipeline.notify_change_at("console.log(1);", start);
        let stale = pipeline.run("console.log(1);", pipeline.generation());

        // A newer edit arrives while the first run is in flight.
        pipeline.notify_change_at("console.log(2);", start + INTERVAL / 4);

        assert!(!pipeline.commit(stale));
        assert!(pipeline.committed().is_none());

        let report = pipeline.tick_at(start + INTERVAL * 2).expect("newer run");
        let report_generation = report.generation;
        assert_eq!(report.logs[0].text, "2");
        assert_eq!(report_generation, pipeline.generation());
    }

    #[test]
    fn test_reset_clears_committed_and_pending() {
        let mut pipeline = PreviewPipeline::new(INTERVAL);
        let start = Instant::now();

        pipeline.notify_change_at("console.log(1);", start);
        pipeline.tick_at(start + INTERVAL * 2);
        assert!(pipeline.committed().is_some());

        pipeline.notify_change_at("console.log(2);", start + INTERVAL * 3);
        pipeline.reset();
        assert!(pipeline.committed().is_none());
        assert!(!pipeline.is_pending());
        assert!(pipeline.tick_at(start + INTERVAL * 10).is_none());
    }

    #[test]
    fn test_recovery_after_failure() {
        let mut pipeline = PreviewPipeline::new(INTERVAL);
        let start = Instant::now();

        pipeline.notify_change_at("let x = ;", start);
        let report = pipeline.tick_at(start + INTERVAL * 2).expect("failed run");
        assert!(report.outcome.diagnostic().is_some());

        pipeline.notify_change_at("export default fn c() { <p>ok</p> }", start + INTERVAL * 3);
        let report = pipeline.tick_at(start + INTERVAL * 5).expect("recovered run");
        assert!(report.outcome.is_renderable());
    }
}
