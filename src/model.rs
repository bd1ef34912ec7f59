//! Complexity model catalogue
//!
//! A closed set of regression model shapes used to approximate runtime as a
//! function of input size `x`, together with their canonical display names
//! and defining equations.
//!
//! Display names are user-facing and must stay byte-for-byte stable:
//!
//! | Model | Name |
//! | --- | --- |
//! | `Poly(0..=9)` | constant, linear, quadratic, ..., nonic |
//! | `Poly(12)` | `n¹²` |
//! | `Log(2, 2)` | `log₂²n` |
//! | `PolyLog(2, 1)` | `n¹log₂¹n` |
//! | `Exp(3)` | `3ⁿ` |

use serde::{Deserialize, Serialize};
use std::fmt;

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

const POLY_NAMES: [&str; 10] = [
    "constant",
    "linear",
    "quadratic",
    "cubic",
    "quartic",
    "quintic",
    "sextic",
    "septic",
    "octic",
    "nonic",
];

/// Regression model shape used to approximate time complexity
///
/// Equality is structural: the variant plus its integer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum LinearType {
    /// `a₀ + a₁x¹ + … + aₙxⁿ`, n ≥ 0
    Poly(u32),
    /// `a₀ + a₁log_b(x) + … + aₙlog_b(x)ⁿ`, b ≥ 2, n ≥ 1
    Log(u32, u32),
    /// `a₀ + a₁x·log_b(x) + … + aₙxⁿ·log_b(x)ⁿ`, b ≥ 2, n ≥ 1
    PolyLog(u32, u32),
    /// `a₀ + nˣ`, n ≥ 2
    Exp(u32),
}

impl LinearType {
    /// Canonical human-readable name (e.g. "quadratic", "log₂²n", "2ⁿ")
    pub fn name(&self) -> String {
        match *self {
            LinearType::Poly(n) => match POLY_NAMES.get(n as usize) {
                Some(name) => (*name).to_string(),
                None => format!("n{}", superscript(n)),
            },
            LinearType::Log(base, n) => {
                format!("log{}{}n", subscript(base), superscript(n))
            }
            LinearType::PolyLog(base, n) => format!(
                "n{}log{}{}n",
                superscript(n),
                subscript(base),
                superscript(n)
            ),
            LinearType::Exp(n) => format!("{}ⁿ", n),
        }
    }

    /// Defining equation, for reports and documentation
    ///
    /// ```
    /// use perfverdict::model::LinearType;
    ///
    /// assert_eq!(LinearType::Poly(2).equation(), "y = a₀ + a₁x + a₂x²");
    /// assert_eq!(LinearType::Exp(2).equation(), "y = a₀ + 2ˣ");
    /// ```
    pub fn equation(&self) -> String {
        let mut terms = vec!["a₀".to_string()];

        match *self {
            LinearType::Poly(n) => {
                terms.extend((1..=n).map(|k| format!("a{}x{}", subscript(k), power(k))));
            }
            LinearType::Log(base, n) => {
                terms.extend(
                    (1..=n).map(|k| format!("a{}log{}(x){}", subscript(k), subscript(base), power(k))),
                );
            }
            LinearType::PolyLog(base, n) => {
                terms.extend((1..=n).map(|k| {
                    format!(
                        "a{}x{}log{}(x){}",
                        subscript(k),
                        power(k),
                        subscript(base),
                        power(k)
                    )
                }));
            }
            LinearType::Exp(n) => terms.push(format!("{}ˣ", n)),
        }

        format!("y = {}", terms.join(" + "))
    }

    /// Number of fitted coefficients (`a₀ … aₙ`) the model carries
    pub fn num_coefficients(&self) -> usize {
        match *self {
            LinearType::Poly(n) | LinearType::Log(_, n) | LinearType::PolyLog(_, n) => {
                n as usize + 1
            }
            LinearType::Exp(_) => 1,
        }
    }

    /// Evaluate the model at input size `x` with fitted `coefficients`
    ///
    /// Returns `None` when the coefficient count does not match
    /// [`num_coefficients`](Self::num_coefficients).
    pub fn predict(&self, coefficients: &[f64], x: f64) -> Option<f64> {
        if coefficients.len() != self.num_coefficients() {
            return None;
        }

        let value = match *self {
            LinearType::Poly(_) => horner(coefficients, x),
            LinearType::Log(base, _) => horner(coefficients, x.log(base as f64)),
            LinearType::PolyLog(base, _) => horner(coefficients, x * x.log(base as f64)),
            LinearType::Exp(n) => coefficients[0] + (n as f64).powf(x),
        };

        Some(value)
    }

    /// Check the parameter ranges of this model
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            LinearType::Poly(_) => Ok(()),
            LinearType::Log(base, n) | LinearType::PolyLog(base, n) => {
                if base < 2 {
                    return Err(format!("logarithm base must be >= 2, got {}", base));
                }
                if n < 1 {
                    return Err(format!("power must be >= 1, got {}", n));
                }
                Ok(())
            }
            LinearType::Exp(n) => {
                if n < 2 {
                    return Err(format!("exponential base must be >= 2, got {}", n));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for LinearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Candidate models tried when a test suite does not list its own
pub fn default_models() -> Vec<LinearType> {
    vec![
        LinearType::Poly(0),
        LinearType::Poly(1),
        LinearType::Poly(2),
        LinearType::Poly(3),
        LinearType::Log(2, 1),
        LinearType::Log(2, 2),
        LinearType::PolyLog(2, 1),
        LinearType::Exp(2),
    ]
}

/// Render `n` with Unicode superscript digits
pub fn superscript(n: u32) -> String {
    map_digits(n, &SUPERSCRIPT_DIGITS)
}

/// Render `n` with Unicode subscript digits
pub fn subscript(n: u32) -> String {
    map_digits(n, &SUBSCRIPT_DIGITS)
}

fn map_digits(n: u32, table: &[char; 10]) -> String {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| table[d as usize])
        .collect()
}

// Exponent shown in equations: omitted for the first power
fn power(k: u32) -> String {
    if k == 1 {
        String::new()
    } else {
        superscript(k)
    }
}

// Σ cₖ·tᵏ, lowest order first
fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}
