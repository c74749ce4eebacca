use crate::error::ArithmeticError;
use crate::matrix::Matrix;
use crate::value::ExactValue;
use tracing::{trace, warn};


/// Every solution of a linear system, written as `constant_vector + basis * t`
/// `basis` has one row per unknown and one column per free parameter `t_j`.
#[derive(Clone, Debug)]
pub struct SolutionSystem {
    /// Particular solution (every free parameter set to zero)
    constant_vector: Vec<ExactValue>,
    /// Basis of the homogeneous part, one column per free column of the reduced matrix
    basis: Matrix,
}
impl SolutionSystem {
    /// Creates new solution system
    /// # Returns
    /// * `Ok` - the solution system
    /// * `Err` - the length of `constant_vector` differs from the row count of `basis`
    pub fn new(constant_vector: Vec<ExactValue>, basis: Matrix) -> Result<Self, ArithmeticError> {
        if constant_vector.len() != basis.row_count() {
            return Err(ArithmeticError::WrongDimensions { expected: basis.row_count(), found: constant_vector.len() });
        }
        Ok(Self { constant_vector, basis })
    }

    /// Returns the particular solution
    pub fn constant_vector(&self) -> &[ExactValue] {
        &self.constant_vector
    }

    /// Returns the basis of the homogeneous part
    pub fn basis(&self) -> &Matrix {
        &self.basis
    }

    /// Returns number of unknowns
    pub fn len(&self) -> usize {
        self.constant_vector.len()
    }

    /// Returns `true` if the system has no unknowns
    pub fn is_empty(&self) -> bool {
        self.constant_vector.is_empty()
    }

    /// Returns number of free parameters
    pub fn free_count(&self) -> usize {
        self.basis.col_count()
    }
}



/// Solves system of linear equations by Gauss-Jordan elimination
/// The matrix is reduced in place, clone it first if the unreduced matrix is needed later (e.g. for [`check_answer`]).
/// # Arguments
/// * `matrix` - augmented matrix, the last column stores the right-hand side
/// # Returns
/// * `Ok` - particular solution and basis of the solution space
/// * `Err` - a pivot couldn't be divided exactly (zero or symbolic pivot)
/// # Example
/// ```
/// use eqbalance::{solve_equations, ExactValue, Matrix};
///
/// // 2x + y - z = 8
/// // -3x - y + 2z = -11
/// // -2x + y + 2z = -3
/// let mut matrix = Matrix::from_rows(&[
///     vec![2, 1, -1, 8],
///     vec![-3, -1, 2, -11],
///     vec![-2, 1, 2, -3],
/// ]);
///
/// let solution = solve_equations(&mut matrix).unwrap();
///
/// assert_eq!(solution.free_count(), 0);
/// assert_eq!(solution.constant_vector(), &[ExactValue::from(2), ExactValue::from(3), ExactValue::from(-1)]);
/// ```
pub fn solve_equations(matrix: &mut Matrix) -> Result<SolutionSystem, ArithmeticError> {
    let rows = matrix.row_count();
    let unknowns = matrix.col_count().saturating_sub(1);  // last column is used only to store the right-hand side

    let mut free_columns = Vec::new();
    let mut pivots: Vec<(usize, usize)> = Vec::new();  // (row, column)

    // forward phase, leaves the matrix in row echelon form with unit pivots
    let mut row = 0;
    for col in 0..unknowns {
        let non_zero = (row..rows).find(|&r| !matrix.get(r, col).simplify().is_zero());
        let Some(non_zero) = non_zero else {
            trace!(col, "free column");
            free_columns.push(col);
            continue;
        };
        matrix.exchange_row(non_zero, row);

        let pivot = matrix.get(row, col).clone();
        for c in col..matrix.col_count() {
            let value = matrix.get(row, c).checked_div(&pivot)?.simplify();
            matrix.set(row, c, value);
        }

        for r in (row + 1)..rows {
            eliminate(matrix, r, row, col)?;
        }

        trace!(row, col, "pivot");
        pivots.push((row, col));
        row += 1;
    }

    // backward phase, clears everything above the pivots
    for &(pivot_row, pivot_col) in pivots.iter().rev() {
        for r in 0..pivot_row {
            eliminate(matrix, r, pivot_row, pivot_col)?;
        }
    }

    let mut basis = Matrix::new(unknowns, free_columns.len(), ExactValue::zero());
    for (j, &free_col) in free_columns.iter().enumerate() {
        basis.set(free_col, j, ExactValue::one());
        for &(pivot_row, pivot_col) in &pivots {
            basis.set(pivot_col, j, (-matrix.get(pivot_row, free_col)).simplify());
        }
    }

    let mut constant_vector = vec![ExactValue::zero(); unknowns];
    for &(pivot_row, pivot_col) in &pivots {
        constant_vector[pivot_col] = matrix.get(pivot_row, unknowns).simplify();
    }

    SolutionSystem::new(constant_vector, basis)
}

/// Subtracts `factor * pivot_row` from `target` so that `target` becomes zero in column `col`
/// Columns before `col` are already zero in the pivot row.
fn eliminate(matrix: &mut Matrix, target: usize, pivot_row: usize, col: usize) -> Result<(), ArithmeticError> {
    let factor = matrix.get(target, col).simplify();
    if factor.is_zero() { return Ok(()); }

    for c in col..matrix.col_count() {
        let value = matrix.get(target, c) - &factor.checked_mul(matrix.get(pivot_row, c))?;
        matrix.set(target, c, value.simplify());
    }
    Ok(())
}

/// Checks whether given values satisfy every equation of the system
/// # Arguments
/// * `matrix` - augmented matrix as it was before solving
/// * `answers` - one value for each unknown
/// # Returns
/// * `true` - every row sums to its right-hand side
/// * `false` - some row doesn't, a product couldn't be evaluated exactly, or the number of answers is wrong
/// # Example
/// ```
/// use eqbalance::{check_answer, ExactValue, Matrix};
///
/// // H2 + O2 = H2O
/// let matrix = Matrix::from_rows(&[
///     vec![2, 0, -2, 0],
///     vec![0, 2, -1, 0],
/// ]);
///
/// let good = [2, 1, 2].map(ExactValue::from);
/// let bad = [1, 1, 1].map(ExactValue::from);
///
/// assert!(check_answer(&matrix, &good));
/// assert!(!check_answer(&matrix, &bad));
/// ```
pub fn check_answer(matrix: &Matrix, answers: &[ExactValue]) -> bool {
    let unknowns = matrix.col_count().saturating_sub(1);
    if answers.len() != unknowns {
        warn!(expected = unknowns, found = answers.len(), "can't verify answer");
        return false;
    }

    for row in 0..matrix.row_count() {
        let mut sum = ExactValue::zero();
        for (col, answer) in answers.iter().enumerate() {
            match matrix.get(row, col).checked_mul(answer) {
                Ok(product) => sum = &sum + &product,
                Err(err) => {
                    warn!(row, col, %err, "can't verify answer");
                    return false;
                },
            }
        }

        if sum.simplify() != *matrix.get(row, unknowns) {
            return false;
        }
    }

    true
}


#[cfg(test)]
mod tests {
    use super::*;
    use malachite::Rational;

    fn frac(n: i64, d: i64) -> ExactValue {
        ExactValue::from(Rational::from_signeds(n, d))
    }

    fn column(matrix: &Matrix, col: usize) -> Vec<ExactValue> {
        (0..matrix.row_count()).map(|r| matrix.get(r, col).clone()).collect()
    }

    #[test]
    fn single_free_column() {
        // H2 + O2 = H2O
        let model = Matrix::from_rows(&[
            vec![2, 0, -2, 0],
            vec![0, 2, -1, 0],
        ]);
        let mut matrix = model.clone();

        let solution = solve_equations(&mut matrix).unwrap();

        assert_eq!(solution.len(), 3);
        assert_eq!(solution.free_count(), 1);
        assert!(solution.constant_vector().iter().all(ExactValue::is_zero));
        assert_eq!(column(solution.basis(), 0), vec![ExactValue::one(), frac(1, 2), ExactValue::one()]);
        assert!(check_answer(&model, &column(solution.basis(), 0)));
    }

    #[test]
    fn pivot_search_skips_zero_rows() {
        let mut matrix = Matrix::from_rows(&[
            vec![0, 1, 3],
            vec![2, 0, 4],
        ]);

        let solution = solve_equations(&mut matrix).unwrap();

        assert_eq!(solution.free_count(), 0);
        assert_eq!(solution.constant_vector(), &[ExactValue::from(2), ExactValue::from(3)]);
    }

    #[test]
    fn free_column_in_the_middle() {
        // x + 2y - z = 0, z = 0
        let mut matrix = Matrix::from_rows(&[
            vec![1, 2, -1, 0],
            vec![0, 0, 1, 0],
        ]);

        let solution = solve_equations(&mut matrix).unwrap();

        assert_eq!(solution.free_count(), 1);
        assert_eq!(column(solution.basis(), 0), vec![ExactValue::from(-2), ExactValue::one(), ExactValue::zero()]);
    }

    #[test]
    fn more_unknowns_than_rows() {
        // H2 + O2 = H2O + H2O2
        let model = Matrix::from_rows(&[
            vec![2, 0, -2, -2, 0],
            vec![0, 2, -1, -2, 0],
        ]);
        let mut matrix = model.clone();

        let solution = solve_equations(&mut matrix).unwrap();

        assert_eq!(solution.free_count(), 2);
        assert_eq!(column(solution.basis(), 0), vec![ExactValue::one(), frac(1, 2), ExactValue::one(), ExactValue::zero()]);
        assert_eq!(column(solution.basis(), 1), vec![ExactValue::one(), ExactValue::one(), ExactValue::zero(), ExactValue::one()]);
        assert!(check_answer(&model, &column(solution.basis(), 1)));
    }

    #[test]
    fn redundant_rows_are_ignored() {
        let mut matrix = Matrix::from_rows(&[
            vec![1, -1, 0],
            vec![2, -2, 0],
            vec![3, -3, 0],
        ]);

        let solution = solve_equations(&mut matrix).unwrap();

        assert_eq!(solution.free_count(), 1);
        assert_eq!(column(solution.basis(), 0), vec![ExactValue::one(), ExactValue::one()]);
    }

    #[test]
    fn full_rank_homogeneous_system_has_only_zero_solution() {
        // H2 = O2
        let mut matrix = Matrix::from_rows(&[
            vec![2, 0, 0],
            vec![0, -2, 0],
        ]);

        let solution = solve_equations(&mut matrix).unwrap();

        assert_eq!(solution.free_count(), 0);
        assert!(solution.constant_vector().iter().all(ExactValue::is_zero));
    }

    #[test]
    fn symbolic_pivot_is_reported() {
        let mut matrix = Matrix::new(1, 2, ExactValue::symbol("n"));
        assert_eq!(solve_equations(&mut matrix).unwrap_err(), ArithmeticError::NonConstantDivisor);
    }

    #[test]
    fn check_answer_rejects_non_linear_products() {
        let matrix = Matrix::new(1, 2, ExactValue::symbol("n"));
        assert!(!check_answer(&matrix, &[ExactValue::symbol("Xa")]));
        assert!(check_answer(&Matrix::new(1, 2, ExactValue::zero()), &[ExactValue::symbol("Xa")]));
    }

    #[test]
    fn check_answer_rejects_wrong_answer_count() {
        let matrix = Matrix::from_rows(&[vec![1, -1, 0]]);
        assert!(!check_answer(&matrix, &[ExactValue::one()]));
        assert!(!check_answer(&matrix, &[ExactValue::one(), ExactValue::one(), ExactValue::one()]));
    }

    #[test]
    fn solution_system_checks_dimensions() {
        let err = SolutionSystem::new(vec![ExactValue::zero(); 2], Matrix::new(3, 1, ExactValue::one())).unwrap_err();
        assert_eq!(err, ArithmeticError::WrongDimensions { expected: 3, found: 2 });
    }

    #[test]
    fn check_answer_with_symbolic_answers() {
        let matrix = Matrix::from_rows(&[vec![1, -1, 0]]);
        let x = ExactValue::symbol("Xa");
        assert!(check_answer(&matrix, &[x.clone(), x.clone()]));
        assert!(!check_answer(&matrix, &[x.clone(), ExactValue::one()]));
    }
}
