use crate::error::ArithmeticError;
use crate::solver::SolutionSystem;
use crate::value::ExactValue;


/// Returns the letters of the free parameter with given index
/// Parameters are named like spreadsheet columns: `a`, `b`, ..., `z`, `aa`, `ab`, ...
/// # Example
/// ```
/// use eqbalance::unknown_symbol;
///
/// assert_eq!(unknown_symbol(0), "a");
/// assert_eq!(unknown_symbol(25), "z");
/// assert_eq!(unknown_symbol(26), "aa");
/// assert_eq!(unknown_symbol(701), "zz");
/// ```
pub fn unknown_symbol(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Turns a solution system into one coefficient for each unknown
/// If the system is spanned by a single basis vector and the particular solution is zero, that basis vector is the answer.
/// Otherwise every free parameter `j` becomes a symbol named `header + unknown_symbol(j)` and each coefficient is the
/// particular solution plus the basis combination of those symbols.
/// # Arguments
/// * `solution` - solution of the model equations
/// * `header` - prefix of the free parameter names
/// # Returns
/// * `Ok` - coefficients in the order of the unknowns
/// * `Err` - a basis entry is itself symbolic, so the combination isn't affine
pub fn generate_balanced_coefficients(solution: &SolutionSystem, header: &str) -> Result<Vec<ExactValue>, ArithmeticError> {
    let constants = solution.constant_vector();
    let basis = solution.basis();

    if solution.free_count() == 1 && constants.iter().all(|c| c.simplify().is_zero()) {
        return Ok((0..solution.len()).map(|i| basis.get(i, 0).simplify()).collect());
    }

    let symbols = (0..solution.free_count())
        .map(|j| ExactValue::symbol(format!("{}{}", header, unknown_symbol(j))))
        .collect::<Vec<_>>();

    constants
        .iter()
        .enumerate()
        .map(|(i, constant)| -> Result<ExactValue, ArithmeticError> {
            let mut sum = constant.clone();
            for (j, symbol) in symbols.iter().enumerate() {
                sum = &sum + &basis.get(i, j).checked_mul(symbol)?;
            }
            Ok(sum.simplify())
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use malachite::Rational;

    #[test]
    fn symbols_follow_spreadsheet_columns() {
        let expected = [(0, "a"), (1, "b"), (25, "z"), (26, "aa"), (27, "ab"), (51, "az"), (52, "ba"), (701, "zz"), (702, "aaa")];
        for (index, symbol) in expected {
            assert_eq!(unknown_symbol(index), symbol);
        }
    }

    #[test]
    fn single_basis_vector_is_the_answer() {
        let mut basis = Matrix::new(3, 1, ExactValue::one());
        basis.set(1, 0, ExactValue::from(Rational::from_signeds(1, 2)));
        let solution = SolutionSystem::new(vec![ExactValue::zero(); 3], basis).unwrap();

        let coefficients = generate_balanced_coefficients(&solution, "X").unwrap();

        assert_eq!(coefficients, vec![ExactValue::one(), ExactValue::from(Rational::from_signeds(1, 2)), ExactValue::one()]);
        assert!(coefficients.iter().all(ExactValue::is_constant));
    }

    #[test]
    fn several_basis_vectors_become_symbols() {
        let basis = Matrix::from_rows(&[
            vec![1, 1],
            vec![0, 1],
        ]);
        let solution = SolutionSystem::new(vec![ExactValue::zero(); 2], basis).unwrap();

        let coefficients = generate_balanced_coefficients(&solution, "U").unwrap();

        assert_eq!(coefficients[0], &ExactValue::symbol("Ua") + &ExactValue::symbol("Ub"));
        assert_eq!(coefficients[1], ExactValue::symbol("Ub"));
    }

    #[test]
    fn nonzero_particular_solution_keeps_constant_term() {
        let basis = Matrix::from_rows(&[vec![2], vec![0]]);
        let solution = SolutionSystem::new(vec![ExactValue::one(), ExactValue::from(3)], basis).unwrap();

        let coefficients = generate_balanced_coefficients(&solution, "X").unwrap();

        assert_eq!(coefficients[0].to_string(), "2*Xa + 1");
        assert_eq!(coefficients[1], ExactValue::from(3));
    }

    #[test]
    fn no_basis_vector_leaves_the_particular_solution() {
        let solution = SolutionSystem::new(vec![ExactValue::zero(); 2], Matrix::new(2, 0, ExactValue::zero())).unwrap();

        let coefficients = generate_balanced_coefficients(&solution, "X").unwrap();

        assert!(coefficients.iter().all(ExactValue::is_zero));
    }
}
