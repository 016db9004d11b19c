use log::trace;
use microlp::{ComparisonOp, OptimizationDirection};
use thiserror::Error;

use crate::normalize::Row;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("problem is infeasible")]
    Infeasible,
    #[error("problem is unbounded")]
    Unbounded,
    #[error("solver failure: {0}")]
    Internal(String),
}

/// Optimum reported by a [`LinearSolver`]
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub values: Vec<f64>,
    pub objective_value: f64,
}

/// An LP routine that minimizes `objective · x` subject to `row · x <= bound`
/// for every row and `x >= 0`.
pub trait LinearSolver {
    fn minimize(&self, objective: &[f64], rows: &[Row]) -> Result<Minimum, BackendError>;
}

/// [`LinearSolver`] backed by the `microlp` simplex implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl MicrolpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl LinearSolver for MicrolpSolver {
    fn minimize(&self, objective: &[f64], rows: &[Row]) -> Result<Minimum, BackendError> {
        let mut problem = microlp::Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<microlp::Variable> = objective
            .iter()
            .map(|&c| problem.add_var(c, (0.0, f64::INFINITY)))
            .collect();

        for row in rows {
            let expr: Vec<(microlp::Variable, f64)> =
                vars.iter().copied().zip(row.coefficients.iter().copied()).collect();
            problem.add_constraint(expr, ComparisonOp::Le, row.bound);
        }

        trace!("microlp: {} variables, {} rows", vars.len(), rows.len());

        let solution = problem.solve().map_err(|e| match e {
            microlp::Error::Infeasible => BackendError::Infeasible,
            microlp::Error::Unbounded => BackendError::Unbounded,
            #[allow(unreachable_patterns)]
            other => BackendError::Internal(other.to_string()),
        })?;

        Ok(Minimum {
            values: solution.iter().map(|(_, v)| *v).collect(),
            objective_value: solution.objective(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_with_lower_bound() {
        // min x + 2y s.t. -x - y <= -3
        let min = MicrolpSolver::new()
            .minimize(&[1.0, 2.0], &[Row::new(vec![-1.0, -1.0], -3.0)])
            .unwrap();

        assert!((min.objective_value - 3.0).abs() < 1e-6);
        assert!((min.values[0] - 3.0).abs() < 1e-6);
        assert!(min.values[1].abs() < 1e-6);
    }

    #[test]
    fn test_reports_infeasible() {
        // x <= 1 and -x <= -2
        let err = MicrolpSolver::new()
            .minimize(
                &[1.0],
                &[Row::new(vec![1.0], 1.0), Row::new(vec![-1.0], -2.0)],
            )
            .unwrap_err();
        assert_eq!(err, BackendError::Infeasible);
    }

    #[test]
    fn test_reports_unbounded() {
        let err = MicrolpSolver::new()
            .minimize(&[-1.0], &[Row::new(vec![-1.0], -10.0)])
            .unwrap_err();
        assert_eq!(err, BackendError::Unbounded);
    }
}
