use std::io::{self, BufRead, Write};

use log::info;
use prodmix_solver::{ConstraintOp, EqualityMode, Solver};

use crate::input::{
    parse_count, parse_number, parse_profit, parse_row, Dimensions, CONSTRAINTS_FIELD,
    PRODUCTS_FIELD,
};
use crate::layout::FormLayout;
use crate::report::Report;

/// Line-oriented rendition of the product-mix form.
///
/// Asks for the counts first, then for every field of a freshly built
/// [`FormLayout`], solves, prints the report and offers to start over.
/// Invalid entries are reported and asked again. End of input ends the session.
pub struct Session<R, W> {
    input: R,
    output: W,
    equality: EqualityMode,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            equality: EqualityMode::default(),
        }
    }

    pub fn with_equality_mode(mut self, mode: EqualityMode) -> Self {
        self.equality = mode;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user declines another round or input runs out.
    /// Returns the reports of every completed solve.
    pub fn run(&mut self) -> io::Result<Vec<Report>> {
        let mut reports = Vec::new();
        loop {
            let Some(dims) = self.ask_dimensions()? else {
                break;
            };
            let Some(layout) = self.fill_layout(dims)? else {
                break;
            };

            match layout.build() {
                Ok(problem) => {
                    let solution = Solver::new().with_equality_mode(self.equality).solve(&problem);
                    let report = Report::new(&problem, &solution);
                    writeln!(self.output)?;
                    write!(self.output, "{}", report)?;
                    reports.push(report);
                }
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }

            writeln!(self.output)?;
            match self.prompt("Clear inputs and start over? [y/N]", None)? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
                _ => break,
            }
        }
        info!("session finished after {} solves", reports.len());
        Ok(reports)
    }

    fn ask_dimensions(&mut self) -> io::Result<Option<Dimensions>> {
        let Some(products) = self.ask(|raw| parse_count(PRODUCTS_FIELD, raw), "Number of products", None)? else {
            return Ok(None);
        };
        let Some(constraints) = self.ask(|raw| parse_count(CONSTRAINTS_FIELD, raw), "Number of constraints", None)?
        else {
            return Ok(None);
        };
        Ok(Some(Dimensions {
            products,
            constraints,
        }))
    }

    fn fill_layout(&mut self, dims: Dimensions) -> io::Result<Option<FormLayout>> {
        let mut layout = FormLayout::new(dims);

        for i in 0..dims.products {
            let default = layout.products()[i].name.clone();
            let Some(name) = self.prompt(&format!("Name of product {}", i + 1), Some(default.as_str()))? else {
                return Ok(None);
            };
            layout.products_mut()[i].name = name;
        }

        for i in 0..dims.products {
            let name = layout.product_name(i);
            let Some(profit) = self.ask_raw(|raw| parse_profit(&name, raw), &format!("Price of {}", name), None)?
            else {
                return Ok(None);
            };
            layout.products_mut()[i].profit = profit;
        }

        for i in 0..dims.constraints {
            let field = format!("constraint {} coefficients", i + 1);
            let label = format!("Constraint {} coefficients ({} values)", i + 1, dims.products);
            let Some(row) = self.ask_raw(|raw| parse_row(&field, raw, dims.products), &label, None)? else {
                return Ok(None);
            };
            let default_op = ConstraintOp::default().to_string();
            let Some(op) = self.ask_raw(
                |raw| raw.parse::<ConstraintOp>(),
                &format!("Constraint {} operator (≤, ≥, =)", i + 1),
                Some(default_op.as_str()),
            )?
            else {
                return Ok(None);
            };
            let limit = format!("constraint {} limit", i + 1);
            let Some(bound) = self.ask_raw(|raw| parse_number(&limit, raw), &format!("Constraint {} limit", i + 1), None)?
            else {
                return Ok(None);
            };

            let fields = &mut layout.constraints_mut()[i];
            fields.coefficients = row.split_whitespace().map(str::to_string).collect();
            fields.op = op;
            fields.bound = bound;
        }

        Ok(Some(layout))
    }

    /// Prompt until `parse` accepts the entry and return the parsed value.
    fn ask<T, E: std::fmt::Display>(
        &mut self,
        parse: impl Fn(&str) -> Result<T, E>,
        label: &str,
        default: Option<&str>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(label, default)? else {
                return Ok(None);
            };
            match parse(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
    }

    /// Like [`Session::ask`], but keeps the raw text for the layout.
    fn ask_raw<T, E: std::fmt::Display>(
        &mut self,
        parse: impl Fn(&str) -> Result<T, E>,
        label: &str,
        default: Option<&str>,
    ) -> io::Result<Option<String>> {
        self.ask(|raw| parse(raw).map(|_| raw.to_string()), label, default)
    }

    /// Show `label`, read one line. Blank lines take `default` when given.
    fn prompt(&mut self, label: &str, default: Option<&str>) -> io::Result<Option<String>> {
        match default {
            Some(d) => write!(self.output, "{} [{}]: ", label, d)?,
            None => write!(self.output, "{}: ", label)?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        Ok(Some(match default {
            Some(d) if line.is_empty() => d.to_string(),
            _ => line.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(script: &str) -> (Vec<Report>, String) {
        let mut session = Session::new(Cursor::new(script.to_string()), Vec::new());
        let reports = session.run().unwrap();
        let output = String::from_utf8(session.into_output()).unwrap();
        (reports, output)
    }

    #[test]
    fn test_single_product_session() {
        let (reports, output) = run("1\n1\nChair\n3\n1\n\n4\nn\n");

        assert_eq!(reports.len(), 1);
        assert!(reports[0].is_optimal());
        assert!(output.contains("Name of product 1 [Product 1]: "));
        assert!(output.contains("Maximum profit: 12.00"), "{}", output);
        assert!(output.contains("Quantity of Chair: 4.00"), "{}", output);
        assert!(output.contains("Constraint 1 calculated: 4.00 (Limit: ≤ 4)"), "{}", output);
    }

    #[test]
    fn test_invalid_counts_are_asked_again() {
        let (reports, output) = run("0\n-1\n2.5\n1\n1\n\n3\n1\n<=\n4\n");

        assert_eq!(reports.len(), 1);
        assert!(output.contains("Error: The number of products must be greater than zero, got 0"));
        assert!(output.contains("got -1"));
        assert!(output.contains("Please enter a whole number for the number of products, got \"2.5\""));
        assert!(output.contains("Quantity of Product 1: 4.00"), "{}", output);
    }

    #[test]
    fn test_invalid_fields_are_asked_again() {
        let script = "1\n1\n\n0\nabc\n2\n1 2\n1\n<\n>=\nten\n10\n";
        let (reports, output) = run(script);

        assert!(output.contains("The price of Product 1 must be greater than zero"));
        assert!(output.contains("Invalid number for price of Product 1"));
        assert!(output.contains("Expected 1 values for constraint 1 coefficients, found 2"));
        assert!(output.contains("Unknown constraint operator"));
        assert!(output.contains("Invalid number for constraint 1 limit"));
        assert_eq!(reports.len(), 1);
        assert!(!reports[0].is_optimal());
        assert!(output.contains("The problem has no feasible solution."));
    }

    #[test]
    fn test_start_over_builds_a_new_form() {
        let script = "1\n1\n\n3\n1\n\n4\ny\n2\n2\nA\nB\n2\n3\n1 1\n\n4\n1 2\n≤\n5\n";
        let (reports, output) = run(script);

        assert_eq!(reports.len(), 2);
        assert!(output.contains("Quantity of A: 3.00"), "{}", output);
        assert!(output.contains("Quantity of B: 1.00"), "{}", output);
        assert!(output.contains("Maximum profit: 9.00"), "{}", output);
    }

    #[test]
    fn test_end_of_input_stops_quietly() {
        let (reports, output) = run("2\n");
        assert!(reports.is_empty());
        assert!(output.ends_with("Number of constraints: "));
    }
}
