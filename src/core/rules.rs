/// Rewrite rule definitions for the response migration
///
/// This module contains the regex substitutions that migrate call sites of the
/// shared `response` package from the old signatures (inline status and message
/// arguments) to the new data-only signatures, plus the patterns used to insert
/// the shared errors import into a Go import block.

use lazy_static::lazy_static;
use regex::Regex;

/// Import path of the shared errors package the migrated calls depend on.
pub const ERRORS_IMPORT_PATH: &str = "github.com/erp-cosmetics/shared/pkg/errors";

/// Substring that marks a file as touching the response helper at all.
pub const RESPONSE_MARKER: &str = "response.";

/// Matches a Go parenthesized import block up to its first closing paren.
pub const IMPORT_BLOCK_PATTERN: &str = r"(?s)import \((.*?)\)";

/// A single call-site rewrite: a regex pattern and its replacement template.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    /// Short name used in logs, the summary, and the JSON report.
    pub name: &'static str,
    /// Regex applied to the whole file text.
    pub pattern: &'static str,
    /// Replacement template; `${n}` refers to capture group n.
    pub replacement: &'static str,
}

/// A rewrite rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: &'static str,
    pub regex: Regex,
    pub replacement: &'static str,
}

/// Get the call-site rewrite rules in application order.
///
/// The order is part of the migration contract: rules are applied to the file
/// text sequentially, each replacing every non-overlapping match.
pub fn get_rules() -> Vec<RewriteRule> {
    vec![
        // response.Error(c, status, msg, details)
        //   -> response.Error(c, errors.New("ERROR", msg, status))
        RewriteRule {
            name: "error",
            pattern: r"response\.Error\(c, (http\.[A-Za-z]+|\d+), ([^,]+), ([^,]+|err\.Error\(\))\)",
            replacement: r#"response.Error(c, errors.New("ERROR", ${2}, ${1}))"#,
        },
        // response.SuccessWithPagination(c, status, msg, data, total, page, pageSize)
        //   -> response.SuccessWithMeta(c, data, response.NewMeta(page, pageSize, total))
        RewriteRule {
            name: "success_with_pagination",
            pattern: r"response\.SuccessWithPagination\(c, [^,]+, [^,]+, ([^,]+), ([^,]+), ([^,]+), ([^)]+)\)",
            replacement: r"response.SuccessWithMeta(c, ${1}, response.NewMeta(${3}, ${4}, ${2}))",
        },
        // response.Success(c, status, "msg", data) -> response.Success(c, data)
        // The message must be a string literal for the rule to fire.
        RewriteRule {
            name: "success",
            pattern: r#"response\.Success\(c, (http\.[A-Za-z]+|\d+), "[^"]+", ([^)]+)\)"#,
            replacement: r"response.Success(c, ${2})",
        },
        // response.Created(c, "msg", data) -> response.Created(c, data)
        RewriteRule {
            name: "created",
            pattern: r#"response\.Created\(c, "[^"]+", ([^)]+)\)"#,
            replacement: r"response.Created(c, ${1})",
        },
    ]
}

/// Replacement template that appends the errors import to an import block.
pub fn import_replacement() -> String {
    format!("import (${{1}}\n\t\"{}\")", ERRORS_IMPORT_PATH)
}

/// Helper function to compile a pattern
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("Error compiling pattern: {}", e);
            None
        }
    }
}

/// Compile the full rule set, skipping any pattern that fails to compile.
pub fn compile_rules() -> Vec<CompiledRule> {
    let mut compiled = Vec::new();

    for rule in get_rules() {
        if let Some(regex) = compile_pattern(rule.pattern) {
            compiled.push(CompiledRule {
                name: rule.name,
                regex,
                replacement: rule.replacement,
            });
        }
    }

    compiled
}

lazy_static! {
    /// Precompiled rewrite rules, shared process-wide.
    pub static ref COMPILED_RULES: Vec<CompiledRule> = compile_rules();

    /// Precompiled import block matcher.
    pub static ref IMPORT_BLOCK_RE: Regex =
        Regex::new(IMPORT_BLOCK_PATTERN).expect("import block pattern is valid");
}
