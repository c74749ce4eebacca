use std::fmt::{Display, Formatter};
use thiserror::Error;


/// Errors raised by exact arithmetic on [`ExactValue`](crate::ExactValue)
///
/// None of these is expected for well-formed input, they signal that the engine was asked to do
/// something it can't do exactly.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum ArithmeticError {
    /// Divisor simplified to zero
    #[error("division by zero")]
    DivisionByZero,
    /// Divisor still contains free parameters
    #[error("division by a non-constant value")]
    NonConstantDivisor,
    /// Both factors of a product contain free parameters
    #[error("product of two non-constant values")]
    NonLinear,
    /// Vector length doesn't match the matrix or equation it belongs to
    #[error("wrong dimensions: expected {expected} values, found {found}")]
    WrongDimensions { expected: usize, found: usize },
}

/// Feature that has to be enabled for a given equation to be balanced
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Feature {
    /// Equations written without a left/right separator
    AutoArranging,
    /// Removing zero coefficients and moving negative ones to the other side
    ErrorCorrection,
}
impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::AutoArranging => write!(f, "auto_arranging"),
            Feature::ErrorCorrection => write!(f, "error_correction"),
        }
    }
}

/// Part of the equation that was emptied by error correction
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum EliminatedSide {
    /// Both sides
    All,
    /// Left side only
    Left,
    /// Right side only
    Right,
}
impl Display for EliminatedSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EliminatedSide::All => write!(f, "all"),
            EliminatedSide::Left => write!(f, "left"),
            EliminatedSide::Right => write!(f, "right"),
        }
    }
}

/// Errors that can occur while balancing a chemical equation
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BalanceError {
    /// Auto-arranging form used while the feature is off, or a coefficient is zero/negative and could not be corrected
    #[error("{}", feature_disabled_description(.0))]
    FeatureDisabled(Feature),
    /// Error correction removed every molecule from one or both sides
    #[error("{}", side_eliminated_description(.0))]
    SideEliminated(EliminatedSide),
    /// Auto-arranging form resolved to a family of answers instead of a single one
    #[error("can't balance chemical equations (with auto-arranging form) that have multiple answers")]
    AutoArrangeMultipleAnswers,
    /// Internal arithmetic consistency violation
    #[error("internal arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}
impl BalanceError {
    /// Returns the machine-readable error code
    /// # Example
    /// ```
    /// use eqbalance::{BalanceError, EliminatedSide};
    ///
    /// let err = BalanceError::SideEliminated(EliminatedSide::Left);
    /// assert_eq!(err.code(), "BALANCER_SIDE_ELIMINATED");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            BalanceError::FeatureDisabled(_) => "BALANCER_FEATURE_DISABLED",
            BalanceError::SideEliminated(_) | BalanceError::AutoArrangeMultipleAnswers => "BALANCER_SIDE_ELIMINATED",
            BalanceError::Arithmetic(_) => "BALANCER_INTERNAL",
        }
    }

    /// Returns the key under which a message catalog stores the localized description of this error
    /// # Example
    /// ```
    /// use eqbalance::{BalanceError, Feature};
    ///
    /// let err = BalanceError::FeatureDisabled(Feature::AutoArranging);
    /// assert_eq!(err.message_key(), "logic.balancer.error.feature_disabled.auto_arranging");
    /// ```
    pub fn message_key(&self) -> String {
        match self {
            BalanceError::FeatureDisabled(feature) => format!("logic.balancer.error.feature_disabled.{}", feature),
            BalanceError::SideEliminated(side) => format!("logic.balancer.error.side_eliminated.{}", side),
            BalanceError::AutoArrangeMultipleAnswers => String::from("logic.balancer.error.auto_arrange_with_multiple_answers.description"),
            BalanceError::Arithmetic(_) => String::from("logic.balancer.error.internal"),
        }
    }
}

fn feature_disabled_description(feature: &Feature) -> &'static str {
    match feature {
        Feature::AutoArranging => "auto-arranging feature has been disabled",
        Feature::ErrorCorrection => "a correctable balancing error was found, but the error-correction feature has been disabled",
    }
}

fn side_eliminated_description(side: &EliminatedSide) -> &'static str {
    match side {
        EliminatedSide::All => "all molecules in the chemical equation were eliminated",
        EliminatedSide::Left => "all molecules on the left side of the chemical equation were eliminated",
        EliminatedSide::Right => "all molecules on the right side of the chemical equation were eliminated",
    }
}

/// Result type used by the balancer
pub type BalanceResult<T> = Result<T, BalanceError>;

/// Errors that can occur while loading [`BalancerOptions`](crate::BalancerOptions)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options text is not valid TOML or has wrongly typed values
    #[error("invalid balancer options: {0}")]
    Toml(#[from] toml::de::Error),
}
