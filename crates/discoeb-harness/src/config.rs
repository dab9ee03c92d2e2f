//! Comparison tolerance configuration.
//!
//! The profile is read from the `DISCOEB_TOLERANCE` environment variable:
//! - `strict` (default): `rel = 1e-10`, `abs = 1e-12`. Fixture suites must pass here.
//! - `loose`: `rel = 1e-6`, `abs = 1e-8`. For exploratory fixtures built from
//!   lower-precision references.
//!
//! The CLI `--profile` flag takes precedence over the environment.

/// Environment variable consulted by [`ToleranceProfile::from_env`].
pub const TOLERANCE_ENV: &str = "DISCOEB_TOLERANCE";

/// Named comparison profile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToleranceProfile {
    #[default]
    Strict,
    Loose,
}

/// Mixed absolute/relative bound: `|a - e| <= abs + rel * |e|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rel: f64,
    pub abs: f64,
}

impl ToleranceProfile {
    /// Parse from string (case-insensitive). Unknown values fall back to strict.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" | "relaxed" | "lenient" => Self::Loose,
            _ => Self::Strict,
        }
    }

    /// Profile from `DISCOEB_TOLERANCE`, strict when unset.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(TOLERANCE_ENV)
            .map(|v| Self::from_str_loose(&v))
            .unwrap_or_default()
    }

    /// CLI override first, then the environment.
    #[must_use]
    pub fn resolve(cli: Option<&str>) -> Self {
        cli.map_or_else(Self::from_env, Self::from_str_loose)
    }

    #[must_use]
    pub const fn tolerance(self) -> Tolerance {
        match self {
            Self::Strict => Tolerance {
                rel: 1e-10,
                abs: 1e-12,
            },
            Self::Loose => Tolerance {
                rel: 1e-6,
                abs: 1e-8,
            },
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Loose => "loose",
        }
    }
}

impl Tolerance {
    /// Widen the absolute bound to at least `abs`.
    #[must_use]
    pub fn with_min_abs(self, abs: Option<f64>) -> Self {
        match abs {
            Some(a) if a > self.abs => Self { abs: a, ..self },
            _ => self,
        }
    }

    #[must_use]
    pub fn accepts(&self, expected: f64, actual: f64) -> bool {
        if expected.is_nan() || actual.is_nan() {
            return expected.is_nan() && actual.is_nan();
        }
        if expected.is_infinite() || actual.is_infinite() {
            return expected == actual;
        }
        (actual - expected).abs() <= self.abs + self.rel * expected.abs()
    }
}
