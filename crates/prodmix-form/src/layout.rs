use log::debug;
use prodmix_solver::{Constraint, ConstraintOp, Objective, Problem};

use crate::input::{parse_number, parse_profit, Dimensions, ValidationError};

/// Raw entries for one product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub profit: String,
}

/// Raw entries for one constraint row
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintFields {
    pub coefficients: Vec<String>,
    pub op: String,
    pub bound: String,
}

/// The input fields for one problem, sized from validated [`Dimensions`].
///
/// A layout is never resized: going back to the counts step builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    products: Vec<ProductFields>,
    constraints: Vec<ConstraintFields>,
}

pub fn default_product_name(index: usize) -> String {
    format!("Product {}", index + 1)
}

impl FormLayout {
    pub fn new(dims: Dimensions) -> Self {
        let products = (0..dims.products)
            .map(|i| ProductFields {
                name: default_product_name(i),
                profit: "0".to_string(),
            })
            .collect();
        let constraints = (0..dims.constraints)
            .map(|_| ConstraintFields {
                coefficients: vec!["0".to_string(); dims.products],
                op: ConstraintOp::Le.to_string(),
                bound: "0".to_string(),
            })
            .collect();
        Self {
            products,
            constraints,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            products: self.products.len(),
            constraints: self.constraints.len(),
        }
    }

    pub fn products(&self) -> &[ProductFields] {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut [ProductFields] {
        &mut self.products
    }

    pub fn constraints(&self) -> &[ConstraintFields] {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut [ConstraintFields] {
        &mut self.constraints
    }

    /// Name shown for product `index`; blank entries fall back to the default.
    pub fn product_name(&self, index: usize) -> String {
        match self.products.get(index) {
            Some(p) if !p.name.trim().is_empty() => p.name.trim().to_string(),
            _ => default_product_name(index),
        }
    }

    /// Validate every field and assemble the problem.
    pub fn build(&self) -> Result<Problem, ValidationError> {
        let names: Vec<String> = (0..self.products.len()).map(|i| self.product_name(i)).collect();

        let profits = self
            .products
            .iter()
            .zip(&names)
            .map(|(p, name)| parse_profit(name, &p.profit))
            .collect::<Result<Vec<_>, _>>()?;

        let mut constraints = Vec::with_capacity(self.constraints.len());
        for (i, row) in self.constraints.iter().enumerate() {
            let coefficients = row
                .coefficients
                .iter()
                .zip(&names)
                .map(|(raw, name)| {
                    parse_number(&format!("constraint {} coefficient of {}", i + 1, name), raw)
                })
                .collect::<Result<Vec<_>, _>>()?;
            let op = row
                .op
                .parse::<ConstraintOp>()
                .map_err(|source| ValidationError::InvalidOperator {
                    constraint: i + 1,
                    source,
                })?;
            let bound = parse_number(&format!("constraint {} limit", i + 1), &row.bound)?;
            constraints.push(Constraint::new(coefficients, op, bound));
        }

        debug!(
            "built problem with {} products and {} constraints",
            names.len(),
            constraints.len()
        );
        Ok(Problem::new(names, Objective::new(profits), constraints)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(products: usize, constraints: usize) -> Dimensions {
        Dimensions::new(products, constraints).unwrap()
    }

    #[test]
    fn test_new_layout_is_sized_from_dimensions() {
        let layout = FormLayout::new(dims(3, 2));

        assert_eq!(layout.dimensions(), dims(3, 2));
        assert_eq!(layout.products().len(), 3);
        assert_eq!(layout.products()[2].name, "Product 3");
        assert_eq!(layout.constraints().len(), 2);
        assert!(layout.constraints().iter().all(|c| c.coefficients.len() == 3));
        assert!(layout.constraints().iter().all(|c| c.op == "≤"));
    }

    #[test]
    fn test_build_problem() {
        let mut layout = FormLayout::new(dims(2, 2));
        layout.products_mut()[0] = ProductFields {
            name: "Table".into(),
            profit: "2".into(),
        };
        layout.products_mut()[1].profit = "3".into();
        layout.products_mut()[1].name = "  ".into();
        layout.constraints_mut()[0] = ConstraintFields {
            coefficients: vec!["1".into(), "1".into()],
            op: "<=".into(),
            bound: "4".into(),
        };
        layout.constraints_mut()[1] = ConstraintFields {
            coefficients: vec!["1".into(), "2".into()],
            op: "≥".into(),
            bound: "5".into(),
        };

        let problem = layout.build().unwrap();

        assert_eq!(problem.products(), &["Table".to_string(), "Product 2".to_string()]);
        assert_eq!(problem.objective().coefficients, vec![2.0, 3.0]);
        assert_eq!(problem.constraints()[1], Constraint::ge(vec![1.0, 2.0], 5.0));
    }

    #[test]
    fn test_default_profit_is_rejected() {
        let layout = FormLayout::new(dims(1, 1));
        assert_eq!(
            layout.build(),
            Err(ValidationError::NonPositiveProfit {
                product: "Product 1".into(),
                value: 0.0
            })
        );
    }

    #[test]
    fn test_bad_fields_are_reported() {
        let mut layout = FormLayout::new(dims(1, 1));
        layout.products_mut()[0].profit = "5".into();

        layout.constraints_mut()[0].op = "<".into();
        assert!(matches!(
            layout.build(),
            Err(ValidationError::InvalidOperator { constraint: 1, .. })
        ));

        layout.constraints_mut()[0].op = "=".into();
        layout.constraints_mut()[0].bound = "ten".into();
        assert_eq!(
            layout.build(),
            Err(ValidationError::InvalidNumber {
                field: "constraint 1 limit".into(),
                value: "ten".into()
            })
        );
    }
}
