//! Validation engine for configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`TextRankConfig`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so
//! users see all problems at once.
//!
//! ```rust,ignore
//! use phraserank::pipeline::validation::ValidationEngine;
//!
//! let report = ValidationEngine::with_defaults().validate(&cfg);
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use serde::Serialize;

use crate::config::TextRankConfig;

// ─── Error code ─────────────────────────────────────────────────────────────

/// Stable machine-readable code attached to each diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Numeric parameter outside its allowed range
    OutOfRange,
    /// Two settings that do not make sense together
    InvalidCombo,
    /// A setting that produces an empty result by construction
    Degenerate,
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    /// JSON pointer to the offending field (e.g. `/damping`)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn error(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn warning(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, path, message)
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ConfigDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`TextRankConfig`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"rank_params"`).
    fn name(&self) -> &str;

    /// Inspect `cfg` and return any findings.
    fn validate(&self, cfg: &TextRankConfig) -> Vec<ConfigDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s and collects all diagnostics.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(RankParamsRule));
        engine.add_rule(Box::new(WindowRule));
        engine.add_rule(Box::new(PhraseParamsRule));
        engine.add_rule(Box::new(SummaryParamsRule));
        engine.add_rule(Box::new(TeleportComboRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `cfg` and return the collected report.
    pub fn validate(&self, cfg: &TextRankConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(cfg));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. damping / epsilon / iterations ──────────────────────────────────────

struct RankParamsRule;

impl ValidationRule for RankParamsRule {
    fn name(&self) -> &str {
        "rank_params"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ConfigDiagnostic> {
        let mut out = Vec::new();

        if !(cfg.damping > 0.0 && cfg.damping < 1.0) {
            out.push(
                ConfigDiagnostic::error(
                    ErrorCode::OutOfRange,
                    "/damping",
                    format!("damping must be in (0, 1), got {}", cfg.damping),
                )
                .with_hint("0.85 is the usual choice"),
            );
        }

        if !(cfg.convergence_epsilon > 0.0 && cfg.convergence_epsilon.is_finite()) {
            out.push(ConfigDiagnostic::error(
                ErrorCode::OutOfRange,
                "/convergence_epsilon",
                format!(
                    "convergence_epsilon must be a positive finite number, got {}",
                    cfg.convergence_epsilon
                ),
            ));
        }

        if cfg.max_iterations == 0 {
            out.push(ConfigDiagnostic::error(
                ErrorCode::OutOfRange,
                "/max_iterations",
                "max_iterations must be greater than 0",
            ));
        }

        out
    }
}

// ─── 2. window ──────────────────────────────────────────────────────────────

struct WindowRule;

impl ValidationRule for WindowRule {
    fn name(&self) -> &str {
        "window"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ConfigDiagnostic> {
        let mut out = Vec::new();

        if cfg.window_size < 2 {
            out.push(
                ConfigDiagnostic::error(
                    ErrorCode::OutOfRange,
                    "/window_size",
                    format!("window_size must be >= 2, got {}", cfg.window_size),
                )
                .with_hint("a window of 2 links adjacent tokens only"),
            );
        }

        if cfg.included_pos_tags.is_empty() {
            out.push(
                ConfigDiagnostic::warning(
                    ErrorCode::Degenerate,
                    "/included_pos_tags",
                    "no POS tags are included; every output will be empty",
                )
                .with_hint("include at least NOUN and ADJ"),
            );
        }

        out
    }
}

// ─── 3. phrase aggregation ──────────────────────────────────────────────────

struct PhraseParamsRule;

impl ValidationRule for PhraseParamsRule {
    fn name(&self) -> &str {
        "phrase_params"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ConfigDiagnostic> {
        let mut out = Vec::new();

        if cfg.max_phrase_length == 0 {
            out.push(ConfigDiagnostic::error(
                ErrorCode::OutOfRange,
                "/max_phrase_length",
                "max_phrase_length must be greater than 0",
            ));
        }

        if cfg.min_occurrence == 0 {
            out.push(
                ConfigDiagnostic::error(
                    ErrorCode::OutOfRange,
                    "/min_occurrence",
                    "min_occurrence must be greater than 0",
                )
                .with_hint("use 1 to keep every phrase"),
            );
        }

        out
    }
}

// ─── 4. summary ─────────────────────────────────────────────────────────────

struct SummaryParamsRule;

impl ValidationRule for SummaryParamsRule {
    fn name(&self) -> &str {
        "summary_params"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ConfigDiagnostic> {
        let mut out = Vec::new();

        if !(cfg.diversity_penalty >= 0.0 && cfg.diversity_penalty.is_finite()) {
            out.push(ConfigDiagnostic::error(
                ErrorCode::OutOfRange,
                "/diversity_penalty",
                format!(
                    "diversity_penalty must be a non-negative finite number, got {}",
                    cfg.diversity_penalty
                ),
            ));
        }

        if cfg.summary_limit.is_zero() {
            out.push(ConfigDiagnostic::error(
                ErrorCode::OutOfRange,
                "/summary_limit",
                "summary_limit must be greater than 0",
            ));
        }

        if cfg.summary_phrase_limit == Some(0) {
            out.push(
                ConfigDiagnostic::error(
                    ErrorCode::OutOfRange,
                    "/summary_phrase_limit",
                    "summary_phrase_limit must be greater than 0",
                )
                .with_hint("remove summary_phrase_limit to use every phrase"),
            );
        }

        out
    }
}

// ─── 5. teleport options ────────────────────────────────────────────────────

struct TeleportComboRule;

impl ValidationRule for TeleportComboRule {
    fn name(&self) -> &str {
        "teleport_combo"
    }

    fn validate(&self, cfg: &TextRankConfig) -> Vec<ConfigDiagnostic> {
        let mut out = Vec::new();

        if !cfg.focus_terms.is_empty() && !(cfg.focus_bias > 0.0 && cfg.focus_bias.is_finite()) {
            out.push(ConfigDiagnostic::error(
                ErrorCode::OutOfRange,
                "/focus_bias",
                format!("focus_bias must be a positive finite number, got {}", cfg.focus_bias),
            ));
        }

        if cfg.position_bias && !cfg.focus_terms.is_empty() {
            out.push(
                ConfigDiagnostic::warning(
                    ErrorCode::InvalidCombo,
                    "/focus_terms",
                    "focus_terms are ignored when position_bias is enabled",
                )
                .with_hint("disable position_bias to rank towards focus terms"),
            );
        }

        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummaryLimit;

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    #[test]
    fn test_default_config_is_clean() {
        let report = engine().validate(&TextRankConfig::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_damping_bounds_are_exclusive() {
        for damping in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let cfg = TextRankConfig::default().with_damping(damping);
            let report = engine().validate(&cfg);
            let errs: Vec<_> = report.errors().collect();
            assert_eq!(errs.len(), 1, "damping {damping}");
            assert_eq!(errs[0].path, "/damping");
            assert_eq!(errs[0].code, ErrorCode::OutOfRange);
        }
    }

    #[test]
    fn test_window_size_one_fails() {
        let report = engine().validate(&TextRankConfig::default().with_window_size(1));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/window_size");
        assert!(errs[0].hint.is_some());
    }

    #[test]
    fn test_empty_pos_tags_is_warning_only() {
        let report =
            engine().validate(&TextRankConfig::default().with_included_pos_tags(Vec::new()));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::Degenerate);
    }

    #[test]
    fn test_zero_summary_limit_fails() {
        let cfg = TextRankConfig::default().with_summary_limit(SummaryLimit::Characters(0));
        let report = engine().validate(&cfg);
        assert!(report.has_errors());
        assert!(report.errors().any(|e| e.path == "/summary_limit"));
    }

    #[test]
    fn test_negative_diversity_penalty_fails() {
        let cfg = TextRankConfig::default().with_diversity_penalty(-0.1);
        assert!(engine().validate(&cfg).has_errors());
    }

    #[test]
    fn test_position_bias_with_focus_terms_warns() {
        let cfg = TextRankConfig::default()
            .with_position_bias(true)
            .with_focus_terms(["rust"]);
        let report = engine().validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_multiple_rules_fire_independently() {
        let cfg = TextRankConfig::default()
            .with_damping(2.0)
            .with_window_size(0)
            .with_max_phrase_length(0)
            .with_min_occurrence(0);
        let report = engine().validate(&cfg);
        assert_eq!(report.errors().count(), 4);
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _cfg: &TextRankConfig) -> Vec<ConfigDiagnostic> {
                vec![ConfigDiagnostic::warning(
                    ErrorCode::Degenerate,
                    "",
                    "custom warning",
                )]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        assert_eq!(eng.rule_names(), vec!["always_warn"]);
        let report = eng.validate(&TextRankConfig::default());
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&TextRankConfig::default().with_max_iterations(0));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "out_of_range");
        assert_eq!(diags[0]["path"], "/max_iterations");
    }
}
