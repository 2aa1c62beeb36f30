/// Utility modules for the response fixer
///
/// This module contains utility functions for locating handler files, reading
/// and writing sources, and reporting run results.

pub mod file_utils;
pub mod report;
