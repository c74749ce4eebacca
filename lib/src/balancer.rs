use crate::direction::{guess_reaction_direction, Direction};
use crate::equation::{ChemicalEquation, Operator};
use crate::error::{BalanceError, BalanceResult, EliminatedSide, Feature};
use crate::matrix::Matrix;
use crate::options::BalancerOptions;
use crate::solver::{check_answer, solve_equations};
use crate::synthesis::generate_balanced_coefficients;
use crate::value::ExactValue;
use std::collections::HashMap;
use tracing::debug;


/// Builds the atom-count matrix of an equation
/// Each atom gets one row (in order of first appearance, left side first) and each molecule one column (left side
/// first). Right-side molecules and molecules written with `-` count negatively, so a solution of the matrix conserves
/// every atom. The last column is the zero right-hand side.
/// # Example
/// ```
/// use eqbalance::{build_model_equations, ChemicalEquation, EquationItem, ExactValue};
///
/// let equation = ChemicalEquation::new(
///     vec![EquationItem::from_counts("H2", &[("H", 2)]), EquationItem::from_counts("O2", &[("O", 2)])],
///     vec![EquationItem::from_counts("H2O", &[("H", 2), ("O", 1)])],
/// );
///
/// let matrix = build_model_equations(&equation);
///
/// assert_eq!((matrix.row_count(), matrix.col_count()), (2, 4));
/// assert_eq!(matrix.get(0, 2), &ExactValue::from(-2));
/// assert_eq!(matrix.get(1, 2), &ExactValue::from(-1));
/// ```
pub fn build_model_equations(equation: &ChemicalEquation) -> Matrix {
    let mut atom_rows: HashMap<&str, usize> = HashMap::new();
    for item in equation.items() {
        for atom in item.atoms().keys() {
            let next = atom_rows.len();
            atom_rows.entry(atom.as_str()).or_insert(next);
        }
    }

    let mut matrix = Matrix::new(atom_rows.len(), equation.len() + 1, ExactValue::zero());
    let left_count = equation.left().len();
    for (col, item) in equation.items().enumerate() {
        let on_right = col >= left_count;
        let negate = on_right != (item.operator() == Operator::Minus);
        for (atom, count) in item.atoms() {
            let value = if negate { -count } else { count.clone() };
            matrix.set(atom_rows[atom.as_str()], col, value);
        }
    }

    matrix
}

/// Balances a chemical equation in place
/// # Arguments
/// * `equation` - equation to balance, an empty right side means auto-arranging form
/// * `options` - enabled features
/// * `unknown_header` - prefix of free parameters if the equation has more than one answer (usually
///   [`DEFAULT_UNKNOWN_HEADER`](crate::DEFAULT_UNKNOWN_HEADER))
/// # Returns
/// * `Ok` - the equation now holds the balanced coefficients, molecules may have changed sides
/// * `Err` - the equation can't be balanced, it may be left partially modified
/// # Example
/// ```
/// use eqbalance::{balance_chemical_equation, BalancerOptions, ChemicalEquation, EquationItem, ExactValue};
///
/// let mut equation = ChemicalEquation::new(
///     vec![EquationItem::from_counts("H2", &[("H", 2)]), EquationItem::from_counts("O2", &[("O", 2)])],
///     vec![EquationItem::from_counts("H2O", &[("H", 2), ("O", 1)])],
/// );
///
/// balance_chemical_equation(&mut equation, &BalancerOptions::default(), "X").unwrap();
///
/// assert_eq!(equation.coefficients(), vec![ExactValue::from(2), ExactValue::from(1), ExactValue::from(2)]);
/// ```
pub fn balance_chemical_equation(
    equation: &mut ChemicalEquation,
    options: &BalancerOptions,
    unknown_header: &str,
) -> BalanceResult<()> {
    let auto_arranging_form = equation.is_auto_arranging_form();
    if auto_arranging_form && !options.auto_side_arranging {
        return Err(BalanceError::FeatureDisabled(Feature::AutoArranging));
    }

    let mut matrix = build_model_equations(equation);
    debug!(rows = matrix.row_count(), cols = matrix.col_count(), auto_arranging_form, "model equations built");

    let solution = solve_equations(&mut matrix)?;
    debug!(free = solution.free_count(), "model equations solved");

    let coefficients = generate_balanced_coefficients(&solution, unknown_header)?;
    equation.merge_coefficients(coefficients)?;

    if options.error_correction {
        equation.remove_items_with_coefficient_zero();
        debug!(left = equation.left().len(), right = equation.right().len(), "zero coefficients removed");
    }
    if auto_arranging_form || options.error_correction {
        equation.move_items_with_negative_coefficient_to_another_side();
        debug!(left = equation.left().len(), right = equation.right().len(), "negative coefficients moved");
    }

    for item in equation.items() {
        let coefficient = item.coefficient().simplify();
        if coefficient.is_negative() || coefficient.is_zero() {
            debug!(item = item.name(), %coefficient, "uncorrected coefficient");
            return Err(BalanceError::FeatureDisabled(Feature::ErrorCorrection));
        }
    }

    equation.coefficients_integerize();
    let coefficients: Vec<String> = equation.coefficients().iter().map(ToString::to_string).collect();
    debug!(?coefficients, "coefficients integerized");

    if equation.is_empty() {
        return Err(BalanceError::SideEliminated(EliminatedSide::All));
    }
    if auto_arranging_form && (equation.left().is_empty() || equation.right().is_empty()) {
        return Err(BalanceError::AutoArrangeMultipleAnswers);
    }
    if equation.left().is_empty() {
        return Err(BalanceError::SideEliminated(EliminatedSide::Left));
    }
    if equation.right().is_empty() {
        return Err(BalanceError::SideEliminated(EliminatedSide::Right));
    }

    if auto_arranging_form {
        let direction = guess_reaction_direction(equation);
        debug!(?direction, "guessed direction");
        if direction == Direction::RightToLeft {
            equation.flip();
        }
    }

    Ok(())
}

/// Checks whether the current coefficients of an equation conserve every atom
/// # Example
/// ```
/// use eqbalance::{check_chemical_equation, ChemicalEquation, EquationItem, ExactValue};
///
/// let mut equation = ChemicalEquation::new(
///     vec![EquationItem::from_counts("Mg", &[("Mg", 1)]), EquationItem::from_counts("O2", &[("O", 2)])],
///     vec![EquationItem::from_counts("MgO", &[("Mg", 1), ("O", 1)])],
/// );
/// assert!(!check_chemical_equation(&equation));
///
/// equation.merge_coefficients(vec![ExactValue::from(2), ExactValue::from(1), ExactValue::from(2)]).unwrap();
/// assert!(check_chemical_equation(&equation));
/// ```
pub fn check_chemical_equation(equation: &ChemicalEquation) -> bool {
    let matrix = build_model_equations(equation);
    check_answer(&matrix, &equation.coefficients())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::EquationItem;

    #[test]
    fn atom_rows_follow_first_appearance() {
        let equation = ChemicalEquation::new(
            vec![EquationItem::from_counts("NaOH", &[("Na", 1), ("O", 1), ("H", 1)])],
            vec![EquationItem::from_counts("Cl2", &[("Cl", 2)])],
        );

        let matrix = build_model_equations(&equation);

        assert_eq!(matrix.row_count(), 4);
        assert_eq!(matrix.col_count(), 3);
        // "Cl" appears last
        assert_eq!(matrix.get(3, 1), &ExactValue::from(-2));
        assert!((0..4).all(|r| matrix.get(r, 2).is_zero()));
    }

    #[test]
    fn minus_operator_flips_sign() {
        let equation = ChemicalEquation::new(
            vec![EquationItem::from_counts("H2", &[("H", 2)]).with_operator(Operator::Minus)],
            vec![EquationItem::from_counts("H", &[("H", 1)]).with_operator(Operator::Minus)],
        );

        let matrix = build_model_equations(&equation);

        assert_eq!(matrix.get(0, 0), &ExactValue::from(-2));
        assert_eq!(matrix.get(0, 1), &ExactValue::from(1));
    }

    #[test]
    fn empty_equation_builds_empty_matrix() {
        let matrix = build_model_equations(&ChemicalEquation::default());
        assert_eq!((matrix.row_count(), matrix.col_count()), (0, 1));
    }
}
