//! Report renderers for audit results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects
//!   `--verbose` / `--quiet`.
//!
//! JSON output is rendered directly from the pipeline structures in `main`.

pub mod terminal;
