//! Output comparison and verification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Tolerance;

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// Kernel exercised.
    pub function: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Expected output.
    pub expected: Value,
    /// Actual output from the kernel (`null` when execution failed).
    pub actual: Value,
    /// Largest absolute difference over all compared numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_abs_err: Option<f64>,
    /// Kernel wall time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ns: Option<u64>,
    /// Diff if the case failed.
    pub diff: Option<String>,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Total cases run.
    pub total: usize,
    /// Cases passed.
    pub passed: usize,
    /// Cases failed.
    pub failed: usize,
    /// Individual results.
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Outcome of a structural comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// JSON paths that differ, with a short reason each.
    pub mismatches: Vec<String>,
    /// Largest absolute difference seen between paired numbers.
    pub max_abs_err: f64,
}

impl Comparison {
    #[must_use]
    pub fn matches(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare two JSON values. Numbers are compared under `tol`, everything else
/// exactly. Objects must have the same key set, arrays the same length.
#[must_use]
pub fn compare(expected: &Value, actual: &Value, tol: Tolerance) -> Comparison {
    let mut out = Comparison::default();
    walk("$", expected, actual, tol, &mut out);
    out
}

fn walk(path: &str, expected: &Value, actual: &Value, tol: Tolerance, out: &mut Comparison) {
    match (expected, actual) {
        (Value::Number(e), Value::Number(a)) => {
            let (e, a) = (e.as_f64().unwrap_or(f64::NAN), a.as_f64().unwrap_or(f64::NAN));
            let err = (a - e).abs();
            if err.is_finite() && err > out.max_abs_err {
                out.max_abs_err = err;
            }
            if !tol.accepts(e, a) {
                out.mismatches.push(format!("{path}: expected {e:e}, got {a:e}"));
            }
        }
        (Value::Array(e), Value::Array(a)) => {
            if e.len() != a.len() {
                out.mismatches
                    .push(format!("{path}: length {} vs {}", e.len(), a.len()));
                return;
            }
            for (i, (ev, av)) in e.iter().zip(a).enumerate() {
                walk(&format!("{path}[{i}]"), ev, av, tol, out);
            }
        }
        (Value::Object(e), Value::Object(a)) => {
            for (key, ev) in e {
                match a.get(key) {
                    Some(av) => walk(&format!("{path}.{key}"), ev, av, tol, out),
                    None => out.mismatches.push(format!("{path}.{key}: missing")),
                }
            }
            for key in a.keys().filter(|k| !e.contains_key(*k)) {
                out.mismatches.push(format!("{path}.{key}: unexpected"));
            }
        }
        (e, a) if e == a => {}
        (e, a) => out.mismatches.push(format!("{path}: expected {e}, got {a}")),
    }
}
