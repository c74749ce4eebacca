//! Exact balancing of chemical equations.
//!
//! A parsed equation ([`ChemicalEquation`]) is turned into an atom-count [`Matrix`], solved by Gauss-Jordan elimination
//! over the rationals ([`solve_equations`]) and the solution is written back as stoichiometric coefficients
//! ([`balance_chemical_equation`]). No floating point is involved, so the result always conserves every atom exactly.
//!
//! Equations with more than one independent answer are balanced with free parameters (`Xa`, `Xb`, ...) in the
//! coefficients instead of failing.
//!
//! # Example
//! ```
//! use eqbalance::{balance_chemical_equation, check_chemical_equation, BalancerOptions, ChemicalEquation, EquationItem,
//!     ExactValue, DEFAULT_UNKNOWN_HEADER};
//!
//! // Mg + O2 = MgO
//! let mut equation = ChemicalEquation::new(
//!     vec![EquationItem::from_counts("Mg", &[("Mg", 1)]), EquationItem::from_counts("O2", &[("O", 2)])],
//!     vec![EquationItem::from_counts("MgO", &[("Mg", 1), ("O", 1)])],
//! );
//!
//! balance_chemical_equation(&mut equation, &BalancerOptions::default(), DEFAULT_UNKNOWN_HEADER).unwrap();
//!
//! assert_eq!(equation.coefficients(), vec![ExactValue::from(2), ExactValue::from(1), ExactValue::from(2)]);
//! assert!(check_chemical_equation(&equation));
//! ```

mod balancer;
mod direction;
mod equation;
mod error;
mod matrix;
mod options;
mod solver;
mod synthesis;
mod value;

pub use balancer::{balance_chemical_equation, build_model_equations, check_chemical_equation};
pub use direction::{guess_reaction_direction, Direction};
pub use equation::{ChemicalEquation, EquationItem, MatterState, Operator};
pub use error::{ArithmeticError, BalanceError, BalanceResult, ConfigError, EliminatedSide, Feature};
pub use matrix::Matrix;
pub use options::{BalancerOptions, DEFAULT_UNKNOWN_HEADER};
pub use solver::{check_answer, solve_equations, SolutionSystem};
pub use synthesis::{generate_balanced_coefficients, unknown_symbol};
pub use value::ExactValue;
