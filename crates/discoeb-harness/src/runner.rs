//! Test execution engine.

use serde_json::Value;

use crate::config::ToleranceProfile;
use crate::diff;
use crate::exec::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::{VerificationResult, compare};

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign; the first segment of every trace id.
    pub campaign: String,
    /// Comparison profile.
    pub profile: ToleranceProfile,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>, profile: ToleranceProfile) -> Self {
        Self {
            campaign: campaign.into(),
            profile,
        }
    }

    /// Run all cases in a set and return results.
    #[must_use]
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| self.run_case(case))
            .collect()
    }

    /// A log emitter for this runner's campaign.
    pub fn log_to_file(
        &self,
        path: &std::path::Path,
        run_id: &str,
    ) -> std::io::Result<LogEmitter> {
        LogEmitter::to_file(path, &self.campaign, run_id)
    }

    /// [`TestRunner::run`], writing one `case_result` entry per case. Entries
    /// reference the fixture file when the set was loaded from disk.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let result = self.run_case(case);
            log.emit_entry(case_entry(fixture_set, self.profile, &result))?;
            results.push(result);
        }
        Ok(results)
    }

    fn run_case(&self, case: &FixtureCase) -> VerificationResult {
        let tol = self.profile.tolerance().with_min_abs(case.abs_tol);
        match execute_fixture_case(&case.function, &case.inputs) {
            Ok(run) => {
                let cmp = compare(&case.expected, &run.output, tol);
                let passed = cmp.matches();
                let diff = (!passed).then(|| {
                    let mut text = cmp.mismatches.join("\n");
                    text.push('\n');
                    text.push_str(&diff::render_diff(&case.expected, &run.output));
                    text
                });
                VerificationResult {
                    case_name: case.name.clone(),
                    function: case.function.clone(),
                    passed,
                    expected: case.expected.clone(),
                    actual: run.output,
                    max_abs_err: Some(cmp.max_abs_err),
                    latency_ns: Some(run.latency_ns),
                    diff,
                }
            }
            Err(err) => VerificationResult {
                case_name: case.name.clone(),
                function: case.function.clone(),
                passed: false,
                expected: case.expected.clone(),
                actual: Value::Null,
                max_abs_err: None,
                latency_ns: None,
                diff: Some(format!("execution failed: {err}")),
            },
        }
    }
}

fn case_entry(set: &FixtureSet, profile: ToleranceProfile, result: &VerificationResult) -> LogEntry {
    let (level, outcome) = match (result.passed, result.latency_ns) {
        (true, _) => (LogLevel::Info, Outcome::Pass),
        (false, Some(_)) => (LogLevel::Warn, Outcome::Fail),
        (false, None) => (LogLevel::Error, Outcome::Error),
    };
    let mut entry = LogEntry::new("", level, "case_result")
        .with_family(&set.family)
        .with_case(&result.function, &result.case_name)
        .with_profile(profile.as_str())
        .with_outcome(outcome);
    if let Some(ns) = result.latency_ns {
        entry = entry.with_latency_ns(ns);
    }
    if let Some(err) = result.max_abs_err {
        entry = entry.with_max_abs_err(err);
    }
    if let Some(source) = &set.source {
        entry = entry.with_artifacts(vec![source.display().to_string()]);
    }
    if let Some(diff) = &result.diff {
        entry = entry.with_details(serde_json::json!({ "diff": diff }));
    }
    entry
}
