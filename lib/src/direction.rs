use crate::equation::{ChemicalEquation, EquationItem};
use crate::value::ExactValue;
use std::cmp::Ordering;
use tracing::debug;


/// Direction of a reaction relative to the current order of the sides
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Can't tell which side reacts
    Undetermined,
    /// Left side reacts to the right side
    LeftToRight,
    /// Right side reacts to the left side
    RightToLeft,
}

/// Guesses the direction of a reaction from the amount of gas on each side
/// The side that holds less gas is taken as the reactant side.
/// If a gas amount is still symbolic the direction is [`Direction::Undetermined`].
/// # Example
/// ```
/// use eqbalance::{guess_reaction_direction, ChemicalEquation, Direction, EquationItem, ExactValue, MatterState};
///
/// // 2H2O = 2H2(g) + O2(g)
/// let mut equation = ChemicalEquation::new(
///     vec![EquationItem::from_counts("H2O", &[("H", 2), ("O", 1)])],
///     vec![
///         EquationItem::from_counts("H2", &[("H", 2)]).with_state(MatterState::Gas),
///         EquationItem::from_counts("O2", &[("O", 2)]).with_state(MatterState::Gas),
///     ],
/// );
/// equation.merge_coefficients(vec![ExactValue::from(2), ExactValue::from(2), ExactValue::from(1)]).unwrap();
///
/// assert_eq!(guess_reaction_direction(&equation), Direction::LeftToRight);
///
/// equation.flip();
/// assert_eq!(guess_reaction_direction(&equation), Direction::RightToLeft);
/// ```
pub fn guess_reaction_direction(equation: &ChemicalEquation) -> Direction {
    let (Some(gas_left), Some(gas_right)) = (gas_amount(equation.left()), gas_amount(equation.right())) else {
        return Direction::Undetermined;
    };
    debug!(%gas_left, %gas_right, "gas amounts");

    let gas_left = gas_left.constant_value().cloned();
    let gas_right = gas_right.constant_value().cloned();
    match gas_left.zip(gas_right).map(|(l, r)| l.cmp(&r)) {
        Some(Ordering::Less) => Direction::LeftToRight,
        Some(Ordering::Greater) => Direction::RightToLeft,
        Some(Ordering::Equal) | None => Direction::Undetermined,
    }
}

/// Sum of `coefficient * prefix` over the gaseous molecules of one side
fn gas_amount(items: &[EquationItem]) -> Option<ExactValue> {
    let mut sum = ExactValue::zero();
    for item in items.iter().filter(|item| item.is_gas()) {
        sum = &sum + &item.coefficient().checked_mul(item.prefix()).ok()?;
    }
    Some(sum.simplify())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::MatterState;

    fn gas(name: &str, coefficient: ExactValue) -> EquationItem {
        let mut item = EquationItem::from_counts(name, &[]).with_state(MatterState::Gas);
        item.set_coefficient(coefficient);
        item
    }

    fn solid(name: &str, coefficient: ExactValue) -> EquationItem {
        let mut item = EquationItem::from_counts(name, &[]).with_state(MatterState::Solid);
        item.set_coefficient(coefficient);
        item
    }

    #[test]
    fn equal_gas_amounts_are_undetermined() {
        let equation = ChemicalEquation::new(
            vec![gas("A", ExactValue::from(2)), solid("B", ExactValue::from(7))],
            vec![gas("C", ExactValue::one()), gas("D", ExactValue::one())],
        );
        assert_eq!(guess_reaction_direction(&equation), Direction::Undetermined);
    }

    #[test]
    fn no_gas_is_undetermined() {
        let equation = ChemicalEquation::new(vec![solid("A", ExactValue::one())], vec![solid("B", ExactValue::from(3))]);
        assert_eq!(guess_reaction_direction(&equation), Direction::Undetermined);
    }

    #[test]
    fn more_gas_on_the_left_reverses() {
        let equation = ChemicalEquation::new(vec![gas("A", ExactValue::from(3))], vec![solid("B", ExactValue::one())]);
        assert_eq!(guess_reaction_direction(&equation), Direction::RightToLeft);
    }

    #[test]
    fn prefix_scales_the_amount() {
        let equation = ChemicalEquation::new(
            vec![gas("A", ExactValue::one()).with_prefix(ExactValue::from(4))],
            vec![gas("B", ExactValue::from(3))],
        );
        assert_eq!(guess_reaction_direction(&equation), Direction::RightToLeft);
    }

    #[test]
    fn symbolic_amount_is_undetermined() {
        let equation = ChemicalEquation::new(vec![gas("A", ExactValue::symbol("Xa"))], vec![gas("B", ExactValue::one())]);
        assert_eq!(guess_reaction_direction(&equation), Direction::Undetermined);
    }
}
