//! Diagnostics raised while binding and type checking.
//!
//! This module defines:
//!
//! - Error structures carrying the source position they were raised at
//! - The error variants and the category each one belongs to
//! - The per-run diagnostics sink every bind call records into
//!
//! Diagnostics never abort a run. The only hard failure is reading the
//! type of an expression that was never computed, which panics.

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
