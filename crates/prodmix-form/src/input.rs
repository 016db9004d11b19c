use prodmix_solver::{ParseOpError, ProblemError};
use thiserror::Error;

pub const PRODUCTS_FIELD: &str = "number of products";
pub const CONSTRAINTS_FIELD: &str = "number of constraints";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a whole number for the {field}, got {value:?}")]
    InvalidCount { field: &'static str, value: String },
    #[error("The {field} must be greater than zero, got {value}")]
    NonPositiveCount { field: &'static str, value: i64 },
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
    #[error("Expected {expected} values for {field}, found {found}")]
    WrongValueCount {
        field: String,
        expected: usize,
        found: usize,
    },
    #[error("The price of {product} must be greater than zero, got {value}")]
    NonPositiveProfit { product: String, value: f64 },
    #[error("Constraint {constraint}: {source}")]
    InvalidOperator {
        constraint: usize,
        #[source]
        source: ParseOpError,
    },
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

/// Product and constraint counts, both known to be at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub products: usize,
    pub constraints: usize,
}

impl Dimensions {
    pub fn new(products: usize, constraints: usize) -> Result<Self, ValidationError> {
        Ok(Self {
            products: check_count(PRODUCTS_FIELD, products as i64)?,
            constraints: check_count(CONSTRAINTS_FIELD, constraints as i64)?,
        })
    }
}

/// Validate both raw count entries before any field is laid out.
pub fn parse_dimensions(products: &str, constraints: &str) -> Result<Dimensions, ValidationError> {
    Ok(Dimensions {
        products: parse_count(PRODUCTS_FIELD, products)?,
        constraints: parse_count(CONSTRAINTS_FIELD, constraints)?,
    })
}

/// Parse a strictly positive whole number.
pub fn parse_count(field: &'static str, raw: &str) -> Result<usize, ValidationError> {
    let value: i64 = raw.trim().parse().map_err(|_| ValidationError::InvalidCount {
        field,
        value: raw.trim().to_string(),
    })?;
    check_count(field, value)
}

fn check_count(field: &'static str, value: i64) -> Result<usize, ValidationError> {
    match usize::try_from(value) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::NonPositiveCount { field, value }),
    }
}

/// Parse a finite real number.
pub fn parse_number(field: &str, raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: raw.trim().to_string(),
        }),
    }
}

/// Parse a unit profit, which must be greater than zero.
pub fn parse_profit(product: &str, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_number(&format!("price of {}", product), raw)?;
    check_profit(product, value)
}

pub fn check_profit(product: &str, value: f64) -> Result<f64, ValidationError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveProfit {
            product: product.to_string(),
            value,
        })
    }
}

/// Parse a whitespace-separated row of exactly `expected` numbers.
pub fn parse_row(field: &str, raw: &str, expected: usize) -> Result<Vec<f64>, ValidationError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(ValidationError::WrongValueCount {
            field: field.to_string(),
            expected,
            found: tokens.len(),
        });
    }
    tokens.into_iter().map(|t| parse_number(field, t)).collect()
}
