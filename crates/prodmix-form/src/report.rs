use std::fmt;

use prodmix_solver::{ConstraintOp, Problem, Solution};
use serde::Serialize;

/// Tolerance used when judging whether a constraint holds at the optimum
const TOLERANCE: f64 = 1e-6;

pub const NO_FEASIBLE_SOLUTION: &str = "The problem has no feasible solution.";

/// What gets shown to the user once a solve finishes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub num_products: usize,
    pub num_constraints: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Optimal {
        max_profit: f64,
        quantities: Vec<ProductLine>,
        constraints: Vec<ConstraintLine>,
    },
    NoFeasibleSolution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    pub name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintLine {
    /// 1-based position in the form
    pub index: usize,
    /// Left-hand side recomputed at the optimum
    pub calculated: f64,
    pub op: ConstraintOp,
    pub bound: f64,
    /// Distance from the bound on the allowed side; negative when violated
    pub slack: f64,
    pub satisfied: bool,
}

impl Report {
    pub fn new(problem: &Problem, solution: &Solution) -> Self {
        let outcome = if solution.is_optimal() {
            let quantities = problem
                .products()
                .iter()
                .zip(&solution.values)
                .map(|(name, &quantity)| ProductLine {
                    name: name.clone(),
                    quantity,
                })
                .collect();
            let constraints = problem
                .constraints()
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let calculated = c.lhs(&solution.values);
                    let slack = match c.op {
                        ConstraintOp::Le => c.bound - calculated,
                        ConstraintOp::Ge => calculated - c.bound,
                        ConstraintOp::Eq => -(calculated - c.bound).abs(),
                    };
                    ConstraintLine {
                        index: i + 1,
                        calculated,
                        op: c.op,
                        bound: c.bound,
                        slack,
                        satisfied: c.op.holds(calculated, c.bound, TOLERANCE),
                    }
                })
                .collect();
            Outcome::Optimal {
                max_profit: solution.objective_value,
                quantities,
                constraints,
            }
        } else {
            Outcome::NoFeasibleSolution
        };

        Self {
            num_products: problem.num_products(),
            num_constraints: problem.num_constraints(),
            outcome,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self.outcome, Outcome::Optimal { .. })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Outcome::Optimal {
            max_profit,
            quantities,
            constraints,
        } = &self.outcome
        else {
            return writeln!(f, "{}", NO_FEASIBLE_SOLUTION);
        };

        writeln!(f, "Here is your result:")?;
        writeln!(f)?;
        writeln!(f, "Maximum profit: {}", fmt_amount(*max_profit))?;
        writeln!(f)?;
        writeln!(f, "Quantity of products to produce:")?;
        writeln!(f)?;
        for line in quantities {
            writeln!(f, "Quantity of {}: {}", line.name, fmt_amount(line.quantity))?;
        }
        writeln!(f)?;
        writeln!(f, "Constraints:")?;
        writeln!(f)?;
        for line in constraints {
            write!(
                f,
                "Constraint {} calculated: {} (Limit: {} {})",
                line.index,
                fmt_amount(line.calculated),
                line.op,
                fmt_bound(line.bound)
            )?;
            if !line.satisfied {
                write!(f, " [not satisfied]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Two decimals, never `-0.00`
pub fn fmt_amount(value: f64) -> String {
    let s = format!("{:.2}", value);
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// Whole bounds print as integers, others with two decimals.
pub fn fmt_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        let s = format!("{:.0}", value);
        if s == "-0" { "0".to_string() } else { s }
    } else {
        fmt_amount(value)
    }
}
