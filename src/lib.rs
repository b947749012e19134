#![forbid(unsafe_code)]
//! defconst: compile `key=value` declarations into typed build-time constants
//!
//! A build pipeline hands defconst a list of declarations such as `DEBUG=true` (kind `Bool`) or `VERSION=1.2.3`.
//! defconst validates names, coerces each value to its kind, resolves duplicates (first definition wins) and, when
//! no error was found, writes one artifact exposing every constant with zero runtime cost:
//!
//! - Rust source (`pub const` items on a container type), or
//! - a binary module image holding the same names, kinds and values.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//! - **Declaration problems** are never errors in the Rust sense: they are recorded as diagnostics and processing
//!   continues.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: use `.expect("INVARIANT: reason")`.

pub mod backend;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod frontend;
pub mod table;
pub mod version;

pub use frontend::declaration;
pub use frontend::diagnostics;
pub use frontend::validator;

pub use backend::{EmitStrategy, Emitter, ModuleEmitter, SourceEmitter};
pub use compiler::{RunOutcome, RunStatus, collect, run};
pub use config::DefineConfig;
pub use table::{Constant, ConstantTable};
