use crate::error::ArithmeticError;
use malachite::num::basic::traits::{One, Zero};
use malachite::{Integer, Natural, Rational};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Neg, Sub};


/// An exact number: either a rational constant or an affine combination of named free parameters
///
/// Arithmetic never rounds. Results of `+`, `-` and [`checked_mul`](ExactValue::checked_mul) may keep
/// terms whose coefficient cancelled to zero, [`simplify`](ExactValue::simplify) drops them and collapses
/// an affine value without terms back into a constant.
/// Equality compares values, not representations.
/// # Example
/// ```
/// use eqbalance::ExactValue;
///
/// let x = ExactValue::symbol("Xa");
/// let value = &(&x + &ExactValue::from(2)) - &x;
///
/// assert!(value.is_constant());
/// assert_eq!(value.simplify(), ExactValue::from(2));
/// ```
#[derive(Clone, Debug)]
pub enum ExactValue {
    /// Plain rational number
    Constant(Rational),
    /// `constant + sum(coefficient * parameter)`
    Affine {
        /// Constant term
        constant: Rational,
        /// Coefficient of each free parameter, keyed by parameter name
        terms: BTreeMap<String, Rational>,
    },
}
impl ExactValue {
    /// Returns constant zero
    pub fn zero() -> Self {
        ExactValue::Constant(Rational::ZERO)
    }

    /// Returns constant one
    pub fn one() -> Self {
        ExactValue::Constant(Rational::ONE)
    }

    /// Creates a free parameter with coefficient one
    /// # Arguments
    /// * `name` - name of the parameter (e.g. `Xa`)
    pub fn symbol(name: impl Into<String>) -> Self {
        ExactValue::Affine {
            constant: Rational::ZERO,
            terms: BTreeMap::from([(name.into(), Rational::ONE)]),
        }
    }

    /// Returns the constant term of the value
    pub fn constant_term(&self) -> &Rational {
        match self {
            ExactValue::Constant(c) => c,
            ExactValue::Affine { constant, .. } => constant,
        }
    }

    /// Returns an iterator over free parameters with non-zero coefficients
    pub fn terms(&self) -> impl Iterator<Item = (&str, &Rational)> {
        let terms = match self {
            ExactValue::Constant(_) => None,
            ExactValue::Affine { terms, .. } => Some(terms),
        };
        terms
            .into_iter()
            .flat_map(|t| t.iter())
            .filter(|(_, c)| **c != Rational::ZERO)
            .map(|(name, c)| (name.as_str(), c))
    }

    /// Returns `true` if the value has no free-parameter term with a non-zero coefficient
    pub fn is_constant(&self) -> bool {
        self.terms().next().is_none()
    }

    /// Returns the rational value if the value is constant
    pub fn constant_value(&self) -> Option<&Rational> {
        if self.is_constant() { Some(self.constant_term()) } else { None }
    }

    /// Returns the value in simplified form
    /// Zero-coefficient terms are dropped and a value without terms becomes [`ExactValue::Constant`].
    /// Calling it on a simplified value returns an identical value.
    pub fn simplify(&self) -> Self {
        match self {
            ExactValue::Constant(c) => ExactValue::Constant(c.clone()),
            ExactValue::Affine { constant, terms } => {
                let terms: BTreeMap<String, Rational> = terms
                    .iter()
                    .filter(|(_, c)| **c != Rational::ZERO)
                    .map(|(name, c)| (name.clone(), c.clone()))
                    .collect();
                if terms.is_empty() {
                    ExactValue::Constant(constant.clone())
                } else {
                    ExactValue::Affine { constant: constant.clone(), terms }
                }
            },
        }
    }

    /// Returns `true` if the value is the constant zero
    /// A value that still carries free parameters is never zero.
    pub fn is_zero(&self) -> bool {
        self.constant_value().is_some_and(|c| *c == Rational::ZERO)
    }

    /// Returns `true` if the value is a negative constant
    /// A value that still carries free parameters is never negative.
    pub fn is_negative(&self) -> bool {
        self.constant_value().is_some_and(|c| *c < Rational::ZERO)
    }

    /// Returns `true` if the value is a positive constant
    pub fn is_positive(&self) -> bool {
        self.constant_value().is_some_and(|c| *c > Rational::ZERO)
    }

    /// Returns the signed numerator and the denominator of a constant value
    /// # Returns
    /// * `Some((numerator, denominator))` - if the value is constant, the fraction is in lowest terms
    /// * `None` - if the value carries free parameters
    /// # Example
    /// ```
    /// use eqbalance::ExactValue;
    /// use malachite::{Integer, Natural, Rational};
    ///
    /// let value = ExactValue::from(Rational::from_signeds(-6, 4));
    /// assert_eq!(value.as_constant_fraction(), Some((Integer::from(-3), Natural::from(2u32))));
    /// assert_eq!(ExactValue::symbol("Xa").as_constant_fraction(), None);
    /// ```
    pub fn as_constant_fraction(&self) -> Option<(Integer, Natural)> {
        let c = self.constant_value()?;
        let numerator = Integer::from_sign_and_abs(*c >= Rational::ZERO, c.numerator_ref().clone());
        Some((numerator, c.denominator_ref().clone()))
    }

    /// Multiplies every part of the value by a rational factor
    pub fn scale(&self, factor: &Rational) -> Self {
        match self {
            ExactValue::Constant(c) => ExactValue::Constant(c * factor),
            ExactValue::Affine { constant, terms } => ExactValue::Affine {
                constant: constant * factor,
                terms: terms.iter().map(|(name, c)| (name.clone(), c * factor)).collect(),
            },
        }
    }

    /// Multiplies two values
    /// At least one of the factors has to be constant, the product of two parameters is not affine.
    /// # Returns
    /// * `Ok` - product
    /// * `Err(ArithmeticError::NonLinear)` - both factors carry free parameters
    pub fn checked_mul(&self, other: &ExactValue) -> Result<Self, ArithmeticError> {
        if let Some(factor) = other.constant_value() {
            Ok(self.scale(factor))
        } else if let Some(factor) = self.constant_value() {
            Ok(other.scale(factor))
        } else {
            Err(ArithmeticError::NonLinear)
        }
    }

    /// Divides the value by a constant
    /// # Returns
    /// * `Ok` - quotient
    /// * `Err(ArithmeticError::DivisionByZero)` - divisor is zero
    /// * `Err(ArithmeticError::NonConstantDivisor)` - divisor carries free parameters
    pub fn checked_div(&self, divisor: &ExactValue) -> Result<Self, ArithmeticError> {
        let divisor = divisor.constant_value().ok_or(ArithmeticError::NonConstantDivisor)?;
        if *divisor == Rational::ZERO {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(self.scale(&(Rational::ONE / divisor)))
    }

    // merges the terms of both operands, negating `other` first when asked to
    fn combine(&self, other: &ExactValue, negate_other: bool) -> Self {
        let signed = |c: &Rational| if negate_other { -c } else { c.clone() };
        let constant = self.constant_term() + signed(other.constant_term());
        match (self, other) {
            (ExactValue::Constant(_), ExactValue::Constant(_)) => ExactValue::Constant(constant),
            _ => {
                let mut terms = match self {
                    ExactValue::Affine { terms, .. } => terms.clone(),
                    ExactValue::Constant(_) => BTreeMap::new(),
                };
                if let ExactValue::Affine { terms: other_terms, .. } = other {
                    for (name, c) in other_terms {
                        *terms.entry(name.clone()).or_insert(Rational::ZERO) += signed(c);
                    }
                }
                ExactValue::Affine { constant, terms }
            },
        }
    }
}

impl Default for ExactValue {
    fn default() -> Self {
        ExactValue::zero()
    }
}

impl From<Rational> for ExactValue {
    fn from(value: Rational) -> Self {
        ExactValue::Constant(value)
    }
}

impl From<i64> for ExactValue {
    fn from(value: i64) -> Self {
        ExactValue::Constant(Rational::from(value))
    }
}

impl From<i32> for ExactValue {
    fn from(value: i32) -> Self {
        ExactValue::Constant(Rational::from(value))
    }
}

impl PartialEq for ExactValue {
    fn eq(&self, other: &Self) -> bool {
        self.constant_term() == other.constant_term() && self.terms().eq(other.terms())
    }
}
impl Eq for ExactValue {}

impl Add<&ExactValue> for &ExactValue {
    type Output = ExactValue;

    fn add(self, rhs: &ExactValue) -> ExactValue {
        self.combine(rhs, false)
    }
}

impl Add for ExactValue {
    type Output = ExactValue;

    fn add(self, rhs: ExactValue) -> ExactValue {
        &self + &rhs
    }
}

impl Sub<&ExactValue> for &ExactValue {
    type Output = ExactValue;

    fn sub(self, rhs: &ExactValue) -> ExactValue {
        self.combine(rhs, true)
    }
}

impl Sub for ExactValue {
    type Output = ExactValue;

    fn sub(self, rhs: ExactValue) -> ExactValue {
        &self - &rhs
    }
}

impl Neg for &ExactValue {
    type Output = ExactValue;

    fn neg(self) -> ExactValue {
        self.scale(&-Rational::ONE)
    }
}

impl Neg for ExactValue {
    type Output = ExactValue;

    fn neg(self) -> ExactValue {
        -&self
    }
}

impl Display for ExactValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, c) in self.terms() {
            let negative = *c < Rational::ZERO;
            let magnitude = if negative { -c } else { c.clone() };
            match (first, negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => {},
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            if magnitude != Rational::ONE {
                write!(f, "{}*", magnitude)?;
            }
            write!(f, "{}", name)?;
            first = false;
        }

        let constant = self.constant_term();
        if first {
            write!(f, "{}", constant)
        } else if *constant < Rational::ZERO {
            write!(f, " - {}", -constant)
        } else if *constant > Rational::ZERO {
            write!(f, " + {}", constant)
        } else {
            Ok(())
        }
    }
}
