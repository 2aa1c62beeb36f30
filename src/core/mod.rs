/// Core module for the response migration
///
/// This module contains components for rewriting handler files, including the
/// substitution rules and the engine that applies them.

pub mod rewriter;
pub mod rules;
