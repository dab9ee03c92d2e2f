//! Fixture execution: map a case's JSON inputs onto a core kernel call.

use std::time::Instant;

use discoeb_core::{Complex64, bisect, bisect_checked, lngamma, savgol, softclip_slice};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("unsupported function '{0}'")]
    UnknownFunction(String),
    #[error("unknown objective '{0}'")]
    UnknownObjective(String),
    #[error("missing input field '{0}'")]
    MissingField(&'static str),
    #[error("input field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Output of one kernel call.
#[derive(Debug, Clone)]
pub struct Execution {
    pub output: Value,
    pub latency_ns: u64,
}

/// Named objective for the bisection fixtures. The variant payload is the
/// parameter handed through [`bisect`] to [`Objective::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// `sum_k c_k x^k`, coefficients in ascending order.
    Polynomial(Vec<f64>),
    /// `re(lngamma(x)) - level`.
    LngammaLevel(f64),
    /// `cos(omega x)`.
    Cosine(f64),
}

impl Objective {
    pub fn from_json(name: &str, param: &Value) -> Result<Self, ExecError> {
        match name {
            "polynomial" => Ok(Self::Polynomial(f64_array(param, "param")?)),
            "lngamma_level" => Ok(Self::LngammaLevel(as_f64(param, "param")?)),
            "cosine" => Ok(Self::Cosine(as_f64(param, "param")?)),
            other => Err(ExecError::UnknownObjective(other.to_string())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Polynomial(_) => "polynomial",
            Self::LngammaLevel(_) => "lngamma_level",
            Self::Cosine(_) => "cosine",
        }
    }

    /// Objective value at `x`, in the `(x, param)` shape the root finder expects.
    #[must_use]
    pub fn evaluate(x: f64, objective: &Self) -> f64 {
        match objective {
            Self::Polynomial(c) => c.iter().rev().fold(0.0, |acc, &k| acc * x + k),
            Self::LngammaLevel(level) => lngamma(Complex64::new(x, 0.0)).re - level,
            Self::Cosine(omega) => (omega * x).cos(),
        }
    }
}

/// Run `function` on `inputs`.
///
/// Argument errors raised by the kernels themselves (savgol validation,
/// checked bisection) are part of the output as `{"error": <code>}`; only
/// malformed fixtures produce an [`ExecError`].
pub fn execute_fixture_case(function: &str, inputs: &Value) -> Result<Execution, ExecError> {
    match function {
        "lngamma" => {
            let z = Complex64::new(f64_field(inputs, "re")?, f64_field(inputs, "im")?);
            timed(|| {
                let w = lngamma(z);
                json!({"re": w.re, "im": w.im})
            })
        }
        "bisect" => {
            let name = inputs
                .get("objective")
                .ok_or(ExecError::MissingField("objective"))?
                .as_str()
                .ok_or(ExecError::InvalidField {
                    field: "objective",
                    expected: "a string",
                })?;
            let param = inputs.get("param").ok_or(ExecError::MissingField("param"))?;
            let objective = Objective::from_json(name, param)?;
            let xleft = f64_field(inputs, "xleft")?;
            let xright = f64_field(inputs, "xright")?;
            let numit = usize_field(inputs, "numit")?;
            let checked = inputs.get("checked").and_then(Value::as_bool).unwrap_or(false);
            timed(|| {
                if checked {
                    match bisect_checked(Objective::evaluate, xleft, xright, numit, &objective) {
                        Ok(x) => json!({"x": x}),
                        Err(err) => json!({"error": err.code()}),
                    }
                } else {
                    json!({"x": bisect(Objective::evaluate, xleft, xright, numit, &objective)})
                }
            })
        }
        "softclip" => {
            let xs = f64_array_field(inputs, "x")?;
            let a_min = f64_field(inputs, "a_min")?;
            let a_max = f64_field(inputs, "a_max")?;
            timed(|| json!({"y": softclip_slice(&xs, a_min, a_max)}))
        }
        "savgol" => {
            let y = f64_array_field(inputs, "y")?;
            let window_length = usize_field(inputs, "window_length")?;
            let polyorder = usize_field(inputs, "polyorder")?;
            timed(|| match savgol(&y, window_length, polyorder) {
                Ok(out) => json!({"y": out}),
                Err(err) => json!({"error": err.code()}),
            })
        }
        other => Err(ExecError::UnknownFunction(other.to_string())),
    }
}

fn timed(f: impl FnOnce() -> Value) -> Result<Execution, ExecError> {
    let start = Instant::now();
    let output = f();
    let latency_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    Ok(Execution { output, latency_ns })
}

fn f64_field(inputs: &Value, field: &'static str) -> Result<f64, ExecError> {
    as_f64(inputs.get(field).ok_or(ExecError::MissingField(field))?, field)
}

fn usize_field(inputs: &Value, field: &'static str) -> Result<usize, ExecError> {
    inputs
        .get(field)
        .ok_or(ExecError::MissingField(field))?
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(ExecError::InvalidField {
            field,
            expected: "a non-negative integer",
        })
}

fn f64_array_field(inputs: &Value, field: &'static str) -> Result<Vec<f64>, ExecError> {
    f64_array(inputs.get(field).ok_or(ExecError::MissingField(field))?, field)
}

fn as_f64(value: &Value, field: &'static str) -> Result<f64, ExecError> {
    value.as_f64().ok_or(ExecError::InvalidField {
        field,
        expected: "a number",
    })
}

fn f64_array(value: &Value, field: &'static str) -> Result<Vec<f64>, ExecError> {
    let invalid = ExecError::InvalidField {
        field,
        expected: "an array of numbers",
    };
    value
        .as_array()
        .ok_or_else(|| invalid.clone())?
        .iter()
        .map(|v| v.as_f64().ok_or_else(|| invalid.clone()))
        .collect()
}
