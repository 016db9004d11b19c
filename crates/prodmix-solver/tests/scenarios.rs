use prodmix_solver::*;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{} = {} (expected {})",
        what,
        actual,
        expected
    );
}

#[test]
fn single_product_single_upper_bound() {
    let problem = Problem::unnamed(
        Objective::new(vec![3.0]),
        vec![Constraint::le(vec![1.0], 4.0)],
    )
    .unwrap();

    let solution = Solver::new().solve(&problem);

    assert_eq!(solution.status, SolutionStatus::Optimal);
    assert_close(solution.objective_value, 12.0, "profit");
    assert_close(solution.values[0], 4.0, "x");
}

#[test]
fn two_products_two_resources() {
    // max 2x + 3y s.t. x + y <= 4, x + 2y <= 5
    let problem = Problem::unnamed(
        Objective::new(vec![2.0, 3.0]),
        vec![
            Constraint::le(vec![1.0, 1.0], 4.0),
            Constraint::le(vec![1.0, 2.0], 5.0),
        ],
    )
    .unwrap();

    let solution = Solver::new().solve(&problem);

    assert!(solution.is_optimal());
    // The reported optimum must be consistent with its own assignment
    assert_close(
        solution.objective_value,
        problem.objective().value(&solution.values),
        "profit",
    );
    assert_close(solution.objective_value, 9.0, "profit");
    assert_close(solution.values[0], 3.0, "x");
    assert_close(solution.values[1], 1.0, "y");
    for c in problem.constraints() {
        assert!(c.is_satisfied(&solution.values, 1e-6));
    }
}

#[test]
fn lower_bound_only_is_not_solvable() {
    let problem = Problem::unnamed(
        Objective::new(vec![5.0]),
        vec![Constraint::ge(vec![1.0], 10.0)],
    )
    .unwrap();

    let solution = Solver::new().solve(&problem);

    assert_eq!(solution.status, SolutionStatus::Unbounded);
    assert!(!solution.is_optimal());
    assert!(solution.values.is_empty());
}

#[test]
fn conflicting_bounds_are_infeasible() {
    let problem = Problem::unnamed(
        Objective::new(vec![1.0]),
        vec![
            Constraint::ge(vec![1.0], 5.0),
            Constraint::le(vec![1.0], 3.0),
        ],
    )
    .unwrap();

    let solution = Solver::new().solve(&problem);

    assert_eq!(solution.status, SolutionStatus::Infeasible);
}

#[test]
fn equality_mode_changes_the_optimum() {
    // max x + 10y s.t. x + y <= 10, y = 2
    let problem = Problem::unnamed(
        Objective::new(vec![1.0, 10.0]),
        vec![
            Constraint::le(vec![1.0, 1.0], 10.0),
            Constraint::equal(vec![0.0, 1.0], 2.0),
        ],
    )
    .unwrap();

    let both = Solver::new().solve(&problem);
    assert_close(both.values[1], 2.0, "y");
    assert_close(both.objective_value, 28.0, "profit");

    // Upper-only keeps y <= 2, which happens to bind here as well
    let upper = Solver::new()
        .with_equality_mode(EqualityMode::UpperOnly)
        .solve(&problem);
    assert_close(upper.objective_value, 28.0, "profit");

    // max x s.t. x + y <= 10, y = 2: only the two-row form forces y up
    let problem = Problem::unnamed(
        Objective::new(vec![1.0, 0.5]),
        vec![
            Constraint::le(vec![1.0, 1.0], 10.0),
            Constraint::equal(vec![0.0, 1.0], 2.0),
        ],
    )
    .unwrap();

    let both = Solver::new().solve(&problem);
    assert_close(both.values[1], 2.0, "y");
    assert_close(both.values[0], 8.0, "x");

    let upper = Solver::new()
        .with_equality_mode(EqualityMode::UpperOnly)
        .solve(&problem);
    assert_close(upper.values[0], 10.0, "x");
    assert_close(upper.values[1], 0.0, "y");
    assert!(!problem.constraints()[1].is_satisfied(&upper.values, 1e-6));
}

#[test]
fn greater_or_equal_constraints_are_honoured() {
    // max 3x + 2y s.t. x + y <= 4, y >= 3
    let problem = Problem::unnamed(
        Objective::new(vec![3.0, 2.0]),
        vec![
            Constraint::le(vec![1.0, 1.0], 4.0),
            Constraint::ge(vec![0.0, 1.0], 3.0),
        ],
    )
    .unwrap();

    let solution = Solver::new().solve(&problem);

    assert!(solution.is_optimal());
    assert_close(solution.values[0], 1.0, "x");
    assert_close(solution.values[1], 3.0, "y");
    assert_close(solution.objective_value, 9.0, "profit");
}
