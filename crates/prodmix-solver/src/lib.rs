mod backend;
mod normalize;
mod problem;
mod solution;
mod solver;

pub use backend::{BackendError, LinearSolver, MicrolpSolver, Minimum};
pub use normalize::{normalize, normalize_all, EqualityMode, Row};
pub use problem::{Constraint, ConstraintOp, Objective, ParseOpError, Problem, ProblemError};
pub use solution::{Solution, SolutionStatus};
pub use solver::Solver;
