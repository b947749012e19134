//! defconst Compiler Frontend
//!
//! This module contains all frontend components:
//! - `declaration`: raw `KEY[=VALUE]` declarations and where they come from
//! - `validator`: identifier rule, kind resolution and value coercion per declaration
//! - `diagnostics`: run-scoped error/warning collection and reporting

pub mod declaration;
pub mod diagnostics;
pub mod validator;
