use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("A problem needs at least one product")]
    NoProducts,
    #[error("Expected {expected} product names, found {found}")]
    NameCount { expected: usize, found: usize },
    #[error("Constraint {constraint} has {found} coefficients but there are {expected} products")]
    CoefficientLength {
        constraint: usize,
        expected: usize,
        found: usize,
    },
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown constraint operator: {0:?} (expected one of ≤, ≥, =)")]
pub struct ParseOpError(pub String);

/// A product-mix problem: maximize `objective · x` subject to `constraints`, `x >= 0`.
///
/// Built through [`Problem::new`], which checks that every coefficient
/// vector has one entry per product.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    products: Vec<String>,
    objective: Objective,
    constraints: Vec<Constraint>,
}

/// Profit per unit of each product
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub coefficients: Vec<f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficients for each product
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub op: ConstraintOp,
    /// Right-hand side value
    pub bound: f64,
}

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintOp {
    /// Less than or equal (≤)
    #[default]
    Le,
    /// Greater than or equal (≥)
    Ge,
    /// Equal (=)
    Eq,
}

impl ConstraintOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintOp::Le => "≤",
            ConstraintOp::Ge => "≥",
            ConstraintOp::Eq => "=",
        }
    }

    /// Whether `lhs op bound` holds, allowing `tolerance` of slack.
    pub fn holds(self, lhs: f64, bound: f64, tolerance: f64) -> bool {
        match self {
            ConstraintOp::Le => lhs <= bound + tolerance,
            ConstraintOp::Ge => lhs >= bound - tolerance,
            ConstraintOp::Eq => (lhs - bound).abs() <= tolerance,
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ConstraintOp {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "≤" | "<=" | "=<" => Ok(ConstraintOp::Le),
            "≥" | ">=" | "=>" => Ok(ConstraintOp::Ge),
            "=" | "==" => Ok(ConstraintOp::Eq),
            other => Err(ParseOpError(other.to_string())),
        }
    }
}

impl TryFrom<String> for ConstraintOp {
    type Error = ParseOpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConstraintOp> for String {
    fn from(op: ConstraintOp) -> Self {
        op.symbol().to_string()
    }
}

impl Objective {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Objective value at `values`
    pub fn value(&self, values: &[f64]) -> f64 {
        dot(&self.coefficients, values)
    }
}

impl Constraint {
    pub fn new(coefficients: Vec<f64>, op: ConstraintOp, bound: f64) -> Self {
        Self {
            coefficients,
            op,
            bound,
        }
    }

    pub fn le(coefficients: Vec<f64>, bound: f64) -> Self {
        Self::new(coefficients, ConstraintOp::Le, bound)
    }

    pub fn ge(coefficients: Vec<f64>, bound: f64) -> Self {
        Self::new(coefficients, ConstraintOp::Ge, bound)
    }

    pub fn equal(coefficients: Vec<f64>, bound: f64) -> Self {
        Self::new(coefficients, ConstraintOp::Eq, bound)
    }

    /// Left-hand side evaluated at `values`
    pub fn lhs(&self, values: &[f64]) -> f64 {
        dot(&self.coefficients, values)
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        self.op.holds(self.lhs(values), self.bound, tolerance)
    }
}

impl Problem {
    pub fn new(
        products: Vec<String>,
        objective: Objective,
        constraints: Vec<Constraint>,
    ) -> Result<Self, ProblemError> {
        let n = objective.coefficients.len();
        if n == 0 {
            return Err(ProblemError::NoProducts);
        }
        if products.len() != n {
            return Err(ProblemError::NameCount {
                expected: n,
                found: products.len(),
            });
        }
        if objective.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ProblemError::NonFinite("objective".to_string()));
        }

        for (i, c) in constraints.iter().enumerate() {
            if c.coefficients.len() != n {
                return Err(ProblemError::CoefficientLength {
                    constraint: i + 1,
                    expected: n,
                    found: c.coefficients.len(),
                });
            }
            if !c.bound.is_finite() || c.coefficients.iter().any(|x| !x.is_finite()) {
                return Err(ProblemError::NonFinite(format!("constraint {}", i + 1)));
            }
        }

        Ok(Self {
            products,
            objective,
            constraints,
        })
    }

    /// Problem with default product names (`Product 1`, `Product 2`, ...)
    pub fn unnamed(objective: Objective, constraints: Vec<Constraint>) -> Result<Self, ProblemError> {
        let products = (1..=objective.coefficients.len())
            .map(|i| format!("Product {}", i))
            .collect();
        Self::new(products, objective, constraints)
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}

fn dot(coefficients: &[f64], values: &[f64]) -> f64 {
    coefficients.iter().zip(values).map(|(c, x)| c * x).sum()
}
