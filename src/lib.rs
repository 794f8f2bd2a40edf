//! # Quine-McCluskey Logic Minimizer
//!
//! This crate finds the cheapest sum-of-products expression for a boolean
//! function given by the input combinations where it is 1 ("ones") and the
//! combinations where its value does not matter ("don't-cares").
//!
//! ## Overview
//!
//! Minimization is exact and runs in four steps:
//!
//! 1. Every index is encoded as a fixed-width bit pattern ([`codec`]).
//! 2. Patterns that differ in one bit are merged repeatedly until only prime
//!    implicants are left ([`primes`]).
//! 3. A chart records which primes cover which ones, and Petrick's method
//!    enumerates every inclusion-minimal cover ([`chart`]).
//! 4. The cover with the lowest gate [`cost`] is rendered as text ([`format`]).
//!
//! Both generation steps are exponential in the worst case; the crate is
//! meant for functions of up to a dozen or so inputs.
//!
//! ## Minimizing Indices
//!
//! ```
//! use qm_logic::minimize;
//!
//! # fn main() -> Result<(), qm_logic::MinimizationError> {
//! // 1 whenever A or B is set
//! let result = minimize(&[2, 3, 4, 5, 6, 7], &[], &["A", "B", "C"])?;
//! assert_eq!(result.expression(), "A+B");
//!
//! // with don't-cares
//! let result = minimize(&[4, 8, 10, 11, 12, 15], &[9, 14], &["A", "B", "C", "D"])?;
//! println!("{} (cost {})", result, result.cost());
//! # Ok(())
//! # }
//! ```
//!
//! ## Minimizing Bit Patterns
//!
//! ```
//! use qm_logic::minimize_patterns;
//!
//! # fn main() -> Result<(), qm_logic::MinimizationError> {
//! let result = minimize_patterns(&["010", "011", "1--"], &[], &["A", "B", "C"])?;
//! assert_eq!(result.expression(), "A+B");
//! # Ok(())
//! # }
//! ```
//!
//! ## Textual Notation
//!
//! ```
//! use qm_logic::FunctionSpec;
//!
//! # fn main() -> Result<(), qm_logic::QmError> {
//! let spec: FunctionSpec = "f(A, B, C) = m(0, 1, 2, 3, 4, 5)".parse()?;
//! assert_eq!(spec.minimize()?.expression(), "A'+B'");
//! # Ok(())
//! # }
//! ```
//!
//! ## Conventions
//!
//! - `variables[0]` names the most-significant bit.
//! - A function that is 1 everywhere renders as [`Notation::one`], one that
//!   is 1 nowhere as [`Notation::zero`].
//! - Among equally cheap covers the one with the lexicographically smallest
//!   list of prime implicant indices wins, primes being indexed in ascending
//!   `(value, mask)` order. Results are therefore reproducible.
//!
//! ## Thread Safety
//!
//! All state lives in the call that creates it. Independent calls can run on
//! as many threads as you like without synchronization.

// Public modules
pub mod chart;
pub mod codec;
pub mod cost;
pub mod error;
pub mod format;
pub mod implicant;
pub mod minimize;
pub mod primes;
pub mod shared;
pub mod terms;

// Re-export high-level public API
pub use chart::{build_coverage_chart, enumerate_covers, CoverIndices, CoverageChart};
pub use cost::cost;
pub use error::{MinimizationError, ParseTermsError, QmError};
pub use format::{format_cover, format_cover_with};
pub use implicant::Implicant;
pub use minimize::{
    minimize, minimize_patterns, minimize_patterns_with_config, minimize_with_config,
    FunctionTerms, Minimization,
};
pub use primes::generate_prime_implicants;
pub use shared::{minimize_shared, minimize_shared_with_config, SharedMinimization};
pub use terms::{parse_functions, read_functions, shared_variables, FunctionSpec};

/// Operator symbols used when rendering an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notation {
    /// Placed between the literals of a product
    pub and: String,
    /// Placed between products
    pub or: String,
    /// Written before a negated variable
    pub not_prefix: String,
    /// Written after a negated variable
    pub not_suffix: String,
    /// Rendering of the constant-1 function
    pub one: String,
    /// Rendering of the constant-0 function
    pub zero: String,
}

impl Notation {
    /// Textbook notation: `A.B'+C`
    pub fn textbook() -> Self {
        Notation {
            and: ".".to_string(),
            or: "+".to_string(),
            not_prefix: String::new(),
            not_suffix: "'".to_string(),
            one: "1".to_string(),
            zero: "0".to_string(),
        }
    }

    /// Operator notation: `A * ~B + C`
    pub fn programming() -> Self {
        Notation {
            and: " * ".to_string(),
            or: " + ".to_string(),
            not_prefix: "~".to_string(),
            not_suffix: String::new(),
            one: "1".to_string(),
            zero: "0".to_string(),
        }
    }
}

impl Default for Notation {
    fn default() -> Self {
        Notation::textbook()
    }
}

/// Configuration for a minimization run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QmConfig {
    /// Fix essential prime implicants before running Petrick's method
    ///
    /// Gives the same covers as full enumeration with a smaller chart.
    pub remove_essential: bool,
    /// How expressions are rendered
    pub notation: Notation,
}

impl QmConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}
