//! # UI Kata: a coding-practice tool with a live preview
//!
//! A desktop application for practicing UI-component exercises. The user
//! picks an exercise from a catalog, edits its source in a small typed,
//! markup-flavored dialect, and watches a live preview pane recompile and
//! re-render the code on every pause in typing.
//!
//! ## Architecture
//!
//! - **Preview pipeline**: debounce → transform → sandboxed execution →
//!   classification → render, with full recovery on every edit. This is the
//!   core of the application and lives in [`preview`].
//! - **Scripting**: the dialect is lowered to plain [Rhai](https://rhai.rs)
//!   and executed in a per-run engine with a closed set of injected
//!   bindings (`require`, the `ui` runtime, a captured console, and export
//!   slots).
//! - **Frontend**: eframe/egui shell with a catalog sidebar, an editor pane,
//!   and the preview pane.
//! - **Catalog**: a compile-time-registered table of exercises and their
//!   starter sources.
//!
//! ## Configuration
//!
//! Application state (edited sources, last exercise, preferences) is stored
//! in the platform-appropriate data directory under `dev.uikata.uikata`:
//!
//! - **Linux**: `~/.local/share/dev.uikata.uikata/`
//! - **macOS**: `~/Library/Application Support/dev.uikata.uikata/`
//! - **Windows**: `%APPDATA%\dev.uikata.uikata\`
//!
//! ## Example
//!
//! ```
//! use uikata::preview::PreviewPipeline;
//! use std::time::Duration;
//!
//! let pipeline = PreviewPipeline::new(Duration::from_millis(500));
//! let report = pipeline.run("export default fn hello() { <h1>Hi</h1> }", 1);
//! assert!(report.outcome.is_renderable());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod frontend;
pub mod preview;

// Re-export commonly used types
pub use catalog::{Catalog, Exercise};
pub use config::{AppState, PreviewConfig};
pub use error::{KataError, Result};
pub use frontend::KataApp;
pub use preview::{Diagnostic, DiagnosticKind, PreviewPipeline, RunOutcome, RunReport};
