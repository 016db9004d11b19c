use log::{debug, info, warn};

use crate::backend::{BackendError, LinearSolver, MicrolpSolver};
use crate::normalize::{normalize_all, EqualityMode};
use crate::problem::Problem;
use crate::solution::Solution;

/// Quantities closer to zero than this are reported as exactly zero
const ZERO_SNAP: f64 = 1e-9;

/// Maximizes profit by handing the normalized problem to a [`LinearSolver`].
pub struct Solver<B = MicrolpSolver> {
    backend: B,
    equality: EqualityMode,
}

impl Default for Solver {
    fn default() -> Self {
        Self::with_backend(MicrolpSolver::new())
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: LinearSolver> Solver<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            equality: EqualityMode::default(),
        }
    }

    pub fn with_equality_mode(mut self, mode: EqualityMode) -> Self {
        self.equality = mode;
        self
    }

    pub fn equality_mode(&self) -> EqualityMode {
        self.equality
    }

    /// Solve `problem` as a maximization.
    ///
    /// The backend minimizes, so the objective is negated on the way in and
    /// the optimal value negated on the way out.
    pub fn solve(&self, problem: &Problem) -> Solution {
        let rows = normalize_all(problem.constraints(), self.equality);
        let costs: Vec<f64> = problem.objective().coefficients.iter().map(|c| -c).collect();
        debug!(
            "solving {} products, {} constraints as {} rows ({:?} equality)",
            problem.num_products(),
            problem.num_constraints(),
            rows.len(),
            self.equality
        );

        match self.backend.minimize(&costs, &rows) {
            Ok(min) => {
                let values: Vec<f64> = min
                    .values
                    .into_iter()
                    .map(|v| if v.abs() < ZERO_SNAP { 0.0 } else { v })
                    .collect();
                let profit = -min.objective_value;
                info!("optimal profit {:.4} at {:?}", profit, values);
                Solution::optimal(values, profit)
            }
            Err(BackendError::Infeasible) => {
                warn!("problem is infeasible");
                Solution::infeasible()
            }
            Err(BackendError::Unbounded) => {
                warn!("problem is unbounded");
                Solution::unbounded()
            }
            Err(e) => {
                warn!("{}", e);
                Solution::error()
            }
        }
    }
}
