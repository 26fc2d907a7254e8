//! Outcome classification for a finished sandbox run.
//!
//! Priority order:
//!
//! 1. a thrown error fails the run (logs already emitted are kept);
//! 2. any export makes the run renderable, regardless of log output;
//! 3. with no export, captured logs make the run log-only;
//! 4. otherwise the run produced nothing and gets the no-output
//!    diagnostic.

use crate::preview::diagnostic::Diagnostic;
use crate::preview::pipeline::RunOutcome;
use crate::preview::sandbox::Execution;
use crate::preview::view::RenderableUnit;
use rhai::FnPtr;

pub fn classify(execution: Execution) -> RunOutcome {
    let slots = match execution.slots {
        Ok(slots) => slots,
        Err(message) => return RunOutcome::Failed(Diagnostic::runtime(message)),
    };

    match slots.resolved() {
        Some(export) => {
            let unit = match export.clone().try_cast::<FnPtr>() {
                Some(fn_ptr) => {
                    RenderableUnit::component(execution.engine, execution.ast, fn_ptr)
                }
                None => RenderableUnit::value(execution.engine, execution.ast, export),
            };
            RunOutcome::Renderable(unit)
        }
        None if !execution.logs.is_empty() => RunOutcome::LogOnly,
        None => RunOutcome::Failed(Diagnostic::no_output()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::diagnostic::DiagnosticKind;
    use crate::preview::sandbox::SandboxLoader;
    use crate::preview::transform::Transformer;

    fn classify_source(source: &str) -> RunOutcome {
        let module = Transformer::new().transform(source).unwrap();
        classify(SandboxLoader::execute(&module))
    }

    #[test]
    fn test_callable_export_is_renderable() {
        let outcome = classify_source("export default fn c() { <div/> }");
        assert!(outcome.is_renderable());
    }

    #[test]
    fn test_export_wins_over_logs() {
        let outcome =
            classify_source("console.log(\"noise\");\nexport default fn c() { <div/> }");
        assert!(outcome.is_renderable());
    }

    #[test]
    fn test_logs_without_export_is_log_only() {
        let outcome = classify_source("console.log(\"observing a closure\");");
        assert!(matches!(outcome, RunOutcome::LogOnly));
    }

    #[test]
    fn test_silence_is_no_output() {
        let outcome = classify_source("let unused = 1;");
        match outcome {
            RunOutcome::Failed(diag) => assert_eq!(diag.kind, DiagnosticKind::NoOutput),
            other => panic!("expected no-output failure, got {other:?}"),
        }
    }

    #[test]
    fn test_throw_is_runtime_failure() {
        let outcome = classify_source("throw \"broken\";");
        match outcome {
            RunOutcome::Failed(diag) => {
                assert_eq!(diag.kind, DiagnosticKind::Runtime);
                assert!(diag.message.contains("broken"));
            }
            other => panic!("expected runtime failure, got {other:?}"),
        }
    }
}
