use std::str::FromStr;

use crate::problem::{Constraint, ConstraintOp};

/// A constraint in canonical form: `coefficients · x <= bound`
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub coefficients: Vec<f64>,
    pub bound: f64,
}

/// How `=` constraints are turned into `≤` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqualityMode {
    /// Emit `a·x <= b` and `-a·x <= -b`, enforcing equality.
    #[default]
    Both,
    /// Emit only `a·x <= b`. Equality is then an upper bound, nothing more.
    UpperOnly,
}

impl FromStr for EqualityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(EqualityMode::Both),
            "upper-only" => Ok(EqualityMode::UpperOnly),
            other => Err(format!("unknown equality mode: {}", other)),
        }
    }
}

impl Row {
    pub fn new(coefficients: Vec<f64>, bound: f64) -> Self {
        Self { coefficients, bound }
    }

    fn negated(&self) -> Self {
        Self {
            coefficients: self.coefficients.iter().map(|c| -c).collect(),
            bound: -self.bound,
        }
    }
}

impl From<Row> for Constraint {
    fn from(row: Row) -> Self {
        Constraint::le(row.coefficients, row.bound)
    }
}

/// Rewrite one constraint as `≤` rows.
///
/// `≤` passes through, `≥` is negated on both sides, and `=` yields one or
/// two rows depending on `mode`.
pub fn normalize(constraint: &Constraint, mode: EqualityMode) -> Vec<Row> {
    let row = Row::new(constraint.coefficients.clone(), constraint.bound);
    match constraint.op {
        ConstraintOp::Le => vec![row],
        ConstraintOp::Ge => vec![row.negated()],
        ConstraintOp::Eq => match mode {
            EqualityMode::UpperOnly => vec![row],
            EqualityMode::Both => {
                let lower = row.negated();
                vec![row, lower]
            }
        },
    }
}

pub fn normalize_all(constraints: &[Constraint], mode: EqualityMode) -> Vec<Row> {
    constraints.iter().flat_map(|c| normalize(c, mode)).collect()
}
