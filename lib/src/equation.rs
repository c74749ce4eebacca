use crate::error::ArithmeticError;
use crate::value::ExactValue;
use malachite::num::arithmetic::traits::{Gcd, Lcm};
use malachite::num::basic::traits::{One, Zero};
use malachite::{Natural, Rational};
use std::collections::BTreeMap;
use std::mem;


/// Sign written in front of a molecule
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Operator {
    /// `+` (or the first molecule of a side)
    #[default]
    Plus,
    /// `-`
    Minus,
}

/// Physical state of a molecule, e.g. `(g)` for gas
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum MatterState {
    /// No state was written
    #[default]
    Unspecified,
    /// Gas
    Gas,
    /// Liquid
    Liquid,
    /// Solid
    Solid,
    /// Aqueous solution
    Aqueous,
}

/// One molecule of a chemical equation
/// # Example
/// ```
/// use eqbalance::{EquationItem, ExactValue, MatterState};
///
/// let item = EquationItem::from_counts("H2O", &[("H", 2), ("O", 1)]).with_state(MatterState::Liquid);
///
/// assert_eq!(item.name(), "H2O");
/// assert_eq!(item.atoms().get("H"), Some(&ExactValue::from(2)));
/// assert_eq!(item.coefficient(), &ExactValue::one());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EquationItem {
    /// Molecule as it was written, opaque to the balancer
    name: String,
    /// Sign in front of the molecule
    operator: Operator,
    /// Stoichiometric coefficient
    coefficient: ExactValue,
    /// Number of each atom (or electron) in one molecule
    atoms: BTreeMap<String, ExactValue>,
    /// Physical state
    state: MatterState,
    /// Prefix multiplier of the molecule
    prefix: ExactValue,
}
impl EquationItem {
    /// Creates new item
    /// # Arguments
    /// * `name` - molecule as it was written
    /// * `operator` - sign in front of the molecule
    /// * `coefficient` - literal coefficient in front of the molecule
    /// * `atoms` - atom counts of one molecule (without the coefficient)
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        operator: Operator,
        coefficient: ExactValue,
        atoms: impl IntoIterator<Item = (S, ExactValue)>,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            coefficient,
            atoms: atoms.into_iter().map(|(atom, count)| (atom.into(), count)).collect(),
            state: MatterState::Unspecified,
            prefix: ExactValue::one(),
        }
    }

    /// Creates new `+` item with coefficient one from integer atom counts
    pub fn from_counts(name: impl Into<String>, counts: &[(&str, i64)]) -> Self {
        Self::new(
            name,
            Operator::Plus,
            ExactValue::one(),
            counts.iter().map(|&(atom, count)| (atom, ExactValue::from(count))),
        )
    }

    /// Sets the sign written in front of the molecule
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Sets the physical state
    pub fn with_state(mut self, state: MatterState) -> Self {
        self.state = state;
        self
    }

    /// Sets the prefix multiplier
    pub fn with_prefix(mut self, prefix: ExactValue) -> Self {
        self.prefix = prefix;
        self
    }

    /// Returns the molecule as it was written
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sign in front of the molecule
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the stoichiometric coefficient
    pub fn coefficient(&self) -> &ExactValue {
        &self.coefficient
    }

    /// Overwrites the stoichiometric coefficient
    pub fn set_coefficient(&mut self, coefficient: ExactValue) {
        self.coefficient = coefficient;
    }

    /// Returns atom counts of one molecule
    pub fn atoms(&self) -> &BTreeMap<String, ExactValue> {
        &self.atoms
    }

    /// Returns the physical state
    pub fn state(&self) -> MatterState {
        self.state
    }

    /// Returns `true` if the molecule is marked as gas
    pub fn is_gas(&self) -> bool {
        self.state == MatterState::Gas
    }

    /// Returns the prefix multiplier
    pub fn prefix(&self) -> &ExactValue {
        &self.prefix
    }
}



/// A chemical equation as two ordered lists of molecules
/// An equation with an empty right side is in auto-arranging form: its molecules were separated with `;` and the
/// balancer decides which side each of them belongs to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChemicalEquation {
    /// Molecules left of the equal sign
    left: Vec<EquationItem>,
    /// Molecules right of the equal sign
    right: Vec<EquationItem>,
}
impl ChemicalEquation {
    /// Creates new equation
    /// # Example
    /// ```
    /// use eqbalance::{ChemicalEquation, EquationItem};
    ///
    /// let equation = ChemicalEquation::new(
    ///     vec![EquationItem::from_counts("Mg", &[("Mg", 1)]), EquationItem::from_counts("O2", &[("O", 2)])],
    ///     vec![EquationItem::from_counts("MgO", &[("Mg", 1), ("O", 1)])],
    /// );
    ///
    /// assert_eq!(equation.len(), 3);
    /// assert!(!equation.is_auto_arranging_form());
    /// ```
    pub fn new(left: Vec<EquationItem>, right: Vec<EquationItem>) -> Self {
        Self { left, right }
    }

    /// Returns molecules of the left side
    pub fn left(&self) -> &[EquationItem] {
        &self.left
    }

    /// Returns molecules of the right side
    pub fn right(&self) -> &[EquationItem] {
        &self.right
    }

    /// Appends a molecule to the left side
    pub fn push_left(&mut self, item: EquationItem) {
        self.left.push(item);
    }

    /// Appends a molecule to the right side
    pub fn push_right(&mut self, item: EquationItem) {
        self.right.push(item);
    }

    /// Returns number of molecules on both sides
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// Returns `true` if there are no molecules at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the right side is empty
    pub fn is_auto_arranging_form(&self) -> bool {
        self.right.is_empty()
    }

    /// Returns all molecules, left side first
    pub fn items(&self) -> impl Iterator<Item = &EquationItem> {
        self.left.iter().chain(self.right.iter())
    }

    fn items_mut(&mut self) -> impl Iterator<Item = &mut EquationItem> {
        self.left.iter_mut().chain(self.right.iter_mut())
    }

    /// Returns all coefficients, left side first
    pub fn coefficients(&self) -> Vec<ExactValue> {
        self.items().map(|item| item.coefficient.clone()).collect()
    }

    /// Overwrites all coefficients, left side first
    /// # Returns
    /// * `Ok` - every molecule got its coefficient
    /// * `Err` - the number of coefficients differs from the number of molecules, nothing was changed
    pub fn merge_coefficients(&mut self, coefficients: Vec<ExactValue>) -> Result<(), ArithmeticError> {
        if coefficients.len() != self.len() {
            return Err(ArithmeticError::WrongDimensions { expected: self.len(), found: coefficients.len() });
        }
        for (item, coefficient) in self.items_mut().zip(coefficients) {
            item.coefficient = coefficient;
        }
        Ok(())
    }

    /// Removes molecules whose coefficient is zero
    pub fn remove_items_with_coefficient_zero(&mut self) {
        self.left.retain(|item| !item.coefficient.simplify().is_zero());
        self.right.retain(|item| !item.coefficient.simplify().is_zero());
    }

    /// Moves molecules with negative coefficient to the other side and negates the coefficient
    /// Molecules keep their relative order. Molecules moved from the right are appended to the left side, molecules
    /// moved from the left are put in front of the right side.
    /// # Example
    /// ```
    /// use eqbalance::{ChemicalEquation, EquationItem, ExactValue};
    ///
    /// let mut equation = ChemicalEquation::new(
    ///     vec![EquationItem::from_counts("H2", &[("H", 2)]), EquationItem::from_counts("H2O", &[("H", 2), ("O", 1)])],
    ///     vec![EquationItem::from_counts("O2", &[("O", 2)])],
    /// );
    /// equation.merge_coefficients(vec![ExactValue::from(2), ExactValue::from(-2), ExactValue::from(-1)]).unwrap();
    ///
    /// equation.move_items_with_negative_coefficient_to_another_side();
    ///
    /// assert_eq!(equation.left()[1].name(), "O2");
    /// assert_eq!(equation.right()[0].name(), "H2O");
    /// assert_eq!(equation.coefficients(), vec![ExactValue::from(2), ExactValue::from(1), ExactValue::from(2)]);
    /// ```
    pub fn move_items_with_negative_coefficient_to_another_side(&mut self) {
        let mut new_left = Vec::with_capacity(self.left.len());
        let mut new_right = Vec::with_capacity(self.right.len());

        for mut item in mem::take(&mut self.left) {
            let coefficient = item.coefficient.simplify();
            if coefficient.is_negative() {
                item.coefficient = -coefficient;
                new_right.push(item);
            } else {
                new_left.push(item);
            }
        }
        for mut item in mem::take(&mut self.right) {
            let coefficient = item.coefficient.simplify();
            if coefficient.is_negative() {
                item.coefficient = -coefficient;
                new_left.push(item);
            } else {
                new_right.push(item);
            }
        }

        self.left = new_left;
        self.right = new_right;
    }

    /// Makes the coefficients coprime integers where possible
    /// All coefficients are multiplied by the least common multiple of the denominators of the constant ones, then divided
    /// by the greatest common divisor of the numerators. The division is skipped if any coefficient is symbolic or zero.
    /// # Example
    /// ```
    /// use eqbalance::{ChemicalEquation, EquationItem, ExactValue};
    /// use malachite::Rational;
    ///
    /// let mut equation = ChemicalEquation::new(
    ///     vec![EquationItem::from_counts("H2", &[("H", 2)]), EquationItem::from_counts("O2", &[("O", 2)])],
    ///     vec![EquationItem::from_counts("H2O", &[("H", 2), ("O", 1)])],
    /// );
    /// equation.merge_coefficients(vec![
    ///     ExactValue::from(1),
    ///     ExactValue::from(Rational::from_signeds(1, 2)),
    ///     ExactValue::from(1),
    /// ]).unwrap();
    ///
    /// equation.coefficients_integerize();
    ///
    /// assert_eq!(equation.coefficients(), vec![ExactValue::from(2), ExactValue::from(1), ExactValue::from(2)]);
    /// ```
    pub fn coefficients_integerize(&mut self) {
        let mut denominator_lcm = Natural::ONE;
        for item in self.items() {
            if let Some(c) = item.coefficient.constant_value() {
                denominator_lcm = denominator_lcm.lcm(c.denominator_ref());
            }
        }

        let factor = Rational::from(&denominator_lcm);
        for item in self.items_mut() {
            item.coefficient = item.coefficient.scale(&factor).simplify();
        }

        let mut numerator_gcd: Option<Natural> = None;
        for item in self.items() {
            match item.coefficient.constant_value() {
                Some(c) if *c.denominator_ref() == Natural::ONE && *c != Rational::ZERO => {
                    let numerator = c.numerator_ref().clone();
                    numerator_gcd = Some(match numerator_gcd {
                        Some(gcd) => gcd.gcd(numerator),
                        None => numerator,
                    });
                },
                _ => return,
            }
        }

        if let Some(gcd) = numerator_gcd {
            let factor = Rational::ONE / Rational::from(&gcd);
            for item in self.items_mut() {
                item.coefficient = item.coefficient.scale(&factor).simplify();
            }
        }
    }

    /// Swaps the left and the right side
    pub fn flip(&mut self) {
        mem::swap(&mut self.left, &mut self.right);
    }
}
