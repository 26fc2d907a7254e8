//! Per-run sandboxed execution.
//!
//! Every pipeline run builds a fresh engine, installs the closed binding
//! set (the `ui` runtime, `require`, the capturing console, and the export
//! slots), runs the compiled module, and harvests what it left behind. No
//! state survives from one run to the next; isolation comes from the
//! engine itself, which exposes nothing beyond what is registered here.
//!
//! Runtime errors never propagate as `Err` out of [`SandboxLoader::execute`];
//! they are carried in [`Execution::slots`] for the classifier, and logs
//! emitted before the failure point are preserved.
//!
//! A run that never terminates hangs its pipeline run. No operation budget
//! is imposed, matching the renderer this models; the next edit still gets
//! a fresh engine.

use crate::preview::runtime;
use crate::preview::transform::CompiledModule;
use rhai::{Array, Dynamic, Engine, EvalAltResult, Map, Position, Scope, AST};
use std::sync::{Arc, RwLock};

/// Severity of a captured console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Log,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// One captured console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

/// Shared append-only buffer the console bindings write into.
///
/// Cloning is shallow; all clones observe the same lines. Each run gets a
/// fresh buffer, so lines never leak across runs.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<RwLock<Vec<LogLine>>>,
}

impl LogBuffer {
    pub fn push(&self, level: LogLevel, text: String) {
        tracing::debug!(target: "uikata::console", level = level.label(), "{text}");
        if let Ok(mut lines) = self.lines.write() {
            lines.push(LogLine { level, text });
        }
    }

    pub fn snapshot(&self) -> Vec<LogLine> {
        self.lines.read().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Console-style rendering of a runtime value.
///
/// Top-level strings print raw; everything else uses the nested form where
/// strings are quoted, arrays bracketed, and maps keyed.
pub fn format_value(value: &Dynamic) -> String {
    if value.is_string() {
        return value.clone().into_string().unwrap_or_default();
    }
    format_nested(value)
}

fn format_nested(value: &Dynamic) -> String {
    if value.is_unit() {
        return "()".to_string();
    }
    if value.is_string() {
        let text = value.clone().into_string().unwrap_or_default();
        return format!("{text:?}");
    }
    if value.is_array() {
        let items: Vec<String> = value
            .clone()
            .try_cast::<Array>()
            .unwrap_or_default()
            .iter()
            .map(format_nested)
            .collect();
        return format!("[{}]", items.join(", "));
    }
    if value.is_map() {
        let entries: Vec<String> = value
            .clone()
            .try_cast::<Map>()
            .unwrap_or_default()
            .iter()
            .map(|(key, val)| format!("{key}: {}", format_nested(val)))
            .collect();
        return format!("#{{{}}}", entries.join(", "));
    }
    value.to_string()
}

/// What a finished run exported
#[derive(Debug, Clone)]
pub struct ExportSlots {
    /// Value of `exports["default"]` (the `export default` form)
    pub default_export: Option<Dynamic>,
    /// Value of `__module.exports` (the `module.exports` fallback)
    pub module_export: Option<Dynamic>,
}

impl ExportSlots {
    /// The export the classifier should consider, default form winning
    pub fn resolved(self) -> Option<Dynamic> {
        self.default_export.or(self.module_export)
    }
}

/// The observable result of one sandboxed run.
///
/// The engine and syntax tree are retained because a renderable export is
/// a function pointer that the render stage calls later.
pub struct Execution {
    pub logs: LogBuffer,
    pub engine: Arc<Engine>,
    pub ast: AST,
    /// Export slots on success, the thrown error message on failure
    pub slots: Result<ExportSlots, String>,
}

/// Builds per-run engines and executes compiled modules in them
pub struct SandboxLoader;

impl SandboxLoader {
    pub fn execute(module: &CompiledModule) -> Execution {
        let logs = LogBuffer::default();
        let mut engine = Engine::new();
        runtime::install(&mut engine);
        install_console(&mut engine, &logs);
        install_require(&mut engine);

        let mut scope = Scope::new();
        scope.push("exports", Map::new());
        let mut module_slot = Map::new();
        module_slot.insert("exports".into(), Dynamic::UNIT);
        scope.push("__module", module_slot);

        let slots = match engine.run_ast_with_scope(&mut scope, &module.ast) {
            Ok(()) => {
                let default_export = scope
                    .get_value::<Map>("exports")
                    .and_then(|exports| exports.get("default").cloned())
                    .filter(|value| !value.is_unit());
                let module_export = scope
                    .get_value::<Map>("__module")
                    .and_then(|slot| slot.get("exports").cloned())
                    .filter(|value| !value.is_unit());
                Ok(ExportSlots {
                    default_export,
                    module_export,
                })
            }
            Err(err) => Err(err.to_string()),
        };

        Execution {
            logs,
            engine: Arc::new(engine),
            ast: module.ast.clone(),
            slots,
        }
    }
}

/// Register `__console_log` / `__console_warn` / `__console_error`
/// (what `console.*` calls lower to), each accepting up to three values.
fn install_console(engine: &mut Engine, logs: &LogBuffer) {
    let bindings: [(&str, LogLevel); 3] = [
        ("__console_log", LogLevel::Log),
        ("__console_warn", LogLevel::Warn),
        ("__console_error", LogLevel::Error),
    ];
    for (name, level) in bindings {
        let buf = logs.clone();
        engine.register_fn(name, move || buf.push(level, String::new()));
        let buf = logs.clone();
        engine.register_fn(name, move |a: Dynamic| buf.push(level, format_value(&a)));
        let buf = logs.clone();
        engine.register_fn(name, move |a: Dynamic, b: Dynamic| {
            buf.push(level, format!("{} {}", format_value(&a), format_value(&b)));
        });
        let buf = logs.clone();
        engine.register_fn(name, move |a: Dynamic, b: Dynamic, c: Dynamic| {
            buf.push(
                level,
                format!(
                    "{} {} {}",
                    format_value(&a),
                    format_value(&b),
                    format_value(&c)
                ),
            );
        });
    }
}

/// Register the allow-list module resolver
fn install_require(engine: &mut Engine) {
    engine.register_fn(
        "require",
        |name: &str| -> Result<Map, Box<EvalAltResult>> {
            if name == runtime::MODULE_NAME {
                runtime::module_object()
            } else {
                Err(EvalAltResult::ErrorRuntime(
                    format!("module not found: '{name}' (only \"ui\" can be imported)").into(),
                    Position::NONE,
                )
                .into())
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::transform::Transformer;
    use rhai::FnPtr;

    fn execute(source: &str) -> Execution {
        let module = Transformer::new().transform(source).unwrap();
        SandboxLoader::execute(&module)
    }

    #[test]
    fn test_default_export_captured() {
        let execution = execute("export default fn c() { <div/> }");
        let slots = execution.slots.unwrap();
        assert!(slots.default_export.is_some());
        assert!(slots.module_export.is_none());
        let export = slots.resolved().unwrap();
        assert!(export.is::<FnPtr>());
    }

    #[test]
    fn test_module_exports_fallback() {
        let execution = execute("fn c() { <div/> }\nmodule.exports = Fn(\"c\");");
        let slots = execution.slots.unwrap();
        assert!(slots.default_export.is_none());
        assert!(slots.resolved().unwrap().is::<FnPtr>());
    }

    #[test]
    fn test_default_export_wins_over_module_exports() {
        let execution = execute(
            "module.exports = \"fallback\";\nexport default \"primary\";",
        );
        let resolved = execution.slots.unwrap().resolved().unwrap();
        assert_eq!(resolved.to_string(), "primary");
    }

    #[test]
    fn test_console_lines_captured_in_order() {
        let execution = execute(
            "console.log(\"one\");\nconsole.warn(2);\nconsole.error(\"x\", [1, 2]);",
        );
        let lines = execution.logs.snapshot();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], LogLine { level: LogLevel::Log, text: "one".to_string() });
        assert_eq!(lines[1], LogLine { level: LogLevel::Warn, text: "2".to_string() });
        assert_eq!(lines[2], LogLine { level: LogLevel::Error, text: "x [1, 2]".to_string() });
    }

    #[test]
    fn test_runtime_error_preserves_earlier_logs() {
        let execution = execute("console.log(\"before\");\nthrow \"boom\";");
        assert_eq!(execution.logs.len(), 1);
        let message = execution.slots.unwrap_err();
        assert!(message.contains("boom"), "{message}");
    }

    #[test]
    fn test_require_unknown_module() {
        let execution = execute("import \"fs\";");
        let message = execution.slots.unwrap_err();
        assert!(message.contains("module not found: 'fs'"), "{message}");
    }

    #[test]
    fn test_require_ui_succeeds() {
        let execution = execute("let m = require(\"ui\");\nconsole.log(m.version);");
        assert!(execution.slots.is_ok());
        assert_eq!(execution.logs.snapshot()[0].text, "0.1");
    }

    #[test]
    fn test_runs_are_isolated() {
        let first = execute("let secret = 42;\nconsole.log(secret);");
        assert!(first.slots.is_ok());

        // A later run cannot see the earlier run's bindings.
        let second = execute("console.log(secret);");
        assert!(second.slots.is_err());
        assert!(second.logs.is_empty());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Dynamic::from("plain")), "plain");
        assert_eq!(format_value(&Dynamic::from(3_i64)), "3");
        assert_eq!(format_value(&Dynamic::UNIT), "()");

        let mut map = Map::new();
        map.insert("a".into(), Dynamic::from(1_i64));
        map.insert("b".into(), Dynamic::from("two"));
        assert_eq!(format_value(&Dynamic::from(map)), "#{a: 1, b: \"two\"}");
    }
}
