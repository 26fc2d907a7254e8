//! The live preview pipeline.
//!
//! This is the core of the application: an incremental
//! debounce → transform → execute → classify → render loop with full
//! recovery on every edit.
//!
//! - [`debounce`]: coalesces keystrokes into runs after a quiet interval
//! - [`transform`]: lowers the exercise dialect to plain Rhai and compiles it
//! - [`sandbox`]: executes a compiled module in a fresh, closed engine
//! - [`runtime`]: the injected `ui` module (`el`/`text` node constructors)
//! - [`classify`]: maps a finished run onto a [`RunOutcome`]
//! - [`view`]: the owned node tree the frontend paints
//! - [`pipeline`]: ties the stages together with generation-based
//!   supersession
//!
//! Failures are data here, not errors: every stage folds its problems into
//! a [`Diagnostic`] carried by the [`RunReport`], and nothing a user types
//! can take the pipeline down.

pub mod classify;
pub mod debounce;
pub mod diagnostic;
pub mod pipeline;
pub mod runtime;
pub mod sandbox;
pub mod transform;
pub mod view;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use pipeline::{PreviewPipeline, RunOutcome, RunReport};
pub use sandbox::{LogBuffer, LogLevel, LogLine, SandboxLoader};
pub use transform::{CompiledModule, Transformer};
pub use view::{RenderError, RenderableUnit, ViewNode};
