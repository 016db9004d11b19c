use std::path::{Path, PathBuf};

use log::debug;
use prodmix_solver::{Constraint, ConstraintOp, Objective, Problem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{check_profit, Dimensions, ValidationError, CONSTRAINTS_FIELD, PRODUCTS_FIELD};
use crate::layout::default_product_name;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid problem file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// On-disk description of a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub constraints: Vec<ConstraintEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintEntry {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub op: ConstraintOp,
    pub bound: f64,
}

impl ProblemFile {
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let source = std::fs::read_to_string(path).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes from {}", source.len(), path.display());
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self, FileError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Blank file with default names, zero values and `≤` rows
    pub fn template(dims: Dimensions) -> Self {
        Self {
            products: (0..dims.products)
                .map(|i| ProductEntry {
                    name: Some(default_product_name(i)),
                    profit: 0.0,
                })
                .collect(),
            constraints: (0..dims.constraints)
                .map(|_| ConstraintEntry {
                    coefficients: vec![0.0; dims.products],
                    op: ConstraintOp::Le,
                    bound: 0.0,
                })
                .collect(),
        }
    }

    /// Apply the same checks as the interactive form and build the problem.
    pub fn to_problem(&self) -> Result<Problem, ValidationError> {
        if self.products.is_empty() {
            return Err(ValidationError::NonPositiveCount {
                field: PRODUCTS_FIELD,
                value: 0,
            });
        }
        if self.constraints.is_empty() {
            return Err(ValidationError::NonPositiveCount {
                field: CONSTRAINTS_FIELD,
                value: 0,
            });
        }

        let names: Vec<String> = self
            .products
            .iter()
            .enumerate()
            .map(|(i, p)| match &p.name {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => default_product_name(i),
            })
            .collect();
        let profits = self
            .products
            .iter()
            .zip(&names)
            .map(|(p, name)| check_profit(name, p.profit))
            .collect::<Result<Vec<_>, _>>()?;
        let constraints = self
            .constraints
            .iter()
            .map(|c| Constraint::new(c.coefficients.clone(), c.op, c.bound))
            .collect();

        Ok(Problem::new(names, Objective::new(profits), constraints)?)
    }
}
