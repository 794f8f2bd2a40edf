//! Textual notation for functions given by minterms
//!
//! A function is written as its minterm list with an optional don't-care
//! list and an optional header naming the function and its variables:
//!
//! ```text
//! f(A, B, C) = m(2, 3, 4, 5, 6, 7) + d(1)
//! m(0, 2, 8, 10)
//! ```
//!
//! Without a header the variables are named `A`, `B`, ... with as many as
//! the largest index needs. The bare words `m` and `d` are keywords and
//! cannot be used as names.

use crate::codec::bit_width;
use crate::error::{MinimizationError, ParseTermsError};
use crate::minimize::{minimize_with_config, FunctionTerms, Minimization};
use crate::QmConfig;
use lalrpop_util::ParseError;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

// Lalrpop-generated parser module (generated in OUT_DIR at build time)
#[allow(clippy::all)]
mod parser_impl {
    #![allow(clippy::all)]
    #![allow(dead_code)]
    #![allow(unused_variables)]
    #![allow(unused_imports)]
    #![allow(non_snake_case)]
    #![allow(non_camel_case_types)]
    #![allow(non_upper_case_globals)]
    include!(concat!(env!("OUT_DIR"), "/terms/function.rs"));
}

/// `name(vars...) =` prefix as produced by the parser
#[derive(Debug)]
pub(crate) struct Header {
    pub(crate) name: String,
    pub(crate) variables: Vec<String>,
}

/// Raw parse result before defaults are applied
#[derive(Debug)]
pub(crate) struct ParsedFunction {
    pub(crate) header: Option<Header>,
    pub(crate) ones: Vec<u64>,
    pub(crate) dont_cares: Vec<u64>,
}

/// A function definition read from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Function name from the header, if any
    pub name: Option<String>,
    /// Variable names from the header, most-significant bit first
    ///
    /// Empty when the definition had no header.
    pub variables: Vec<String>,
    /// Ones and don't-cares
    pub terms: FunctionTerms,
}

/// Default variable names: `A` to `Z`, or `x0`, `x1`, ... beyond 26
fn default_names(width: usize) -> Vec<String> {
    if width <= 26 {
        (b'A'..).take(width).map(|c| (c as char).to_string()).collect()
    } else {
        (0..width).map(|i| format!("x{}", i)).collect()
    }
}

impl FunctionSpec {
    /// Parse a single definition
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_logic::FunctionSpec;
    ///
    /// let spec = FunctionSpec::parse("carry(a, b, c) = m(3, 5, 6, 7)").unwrap();
    /// assert_eq!(spec.name.as_deref(), Some("carry"));
    /// assert_eq!(spec.terms.ones, vec![3, 5, 6, 7]);
    /// assert!(spec.terms.dont_cares.is_empty());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseTermsError> {
        let parsed = parser_impl::FunctionParser::new()
            .parse(input)
            .map_err(|e| {
                let position = match &e {
                    ParseError::InvalidToken { location } => Some(*location),
                    ParseError::UnrecognizedEof { location, .. } => Some(*location),
                    ParseError::UnrecognizedToken { token, .. } => Some(token.0),
                    ParseError::ExtraToken { token } => Some(token.0),
                    ParseError::User { .. } => None,
                };
                ParseTermsError::InvalidSyntax {
                    message: Arc::from(e.to_string().as_str()),
                    input: Arc::from(input),
                    position,
                    line: None,
                }
            })?;

        let (name, variables) = match parsed.header {
            Some(Header { name, variables }) => (Some(name), variables),
            None => (None, Vec::new()),
        };
        Ok(FunctionSpec {
            name,
            variables,
            terms: FunctionTerms::new(parsed.ones, parsed.dont_cares),
        })
    }

    /// Variable names to minimize over
    ///
    /// The header's names when present, otherwise `A`, `B`, ... as many as
    /// the largest index needs.
    pub fn resolved_variables(&self) -> Result<Vec<String>, MinimizationError> {
        if !self.variables.is_empty() {
            return Ok(self.variables.clone());
        }
        let width = bit_width(&self.terms.ones, &self.terms.dont_cares)?;
        Ok(default_names(width))
    }

    /// Minimize with the default configuration
    pub fn minimize(&self) -> Result<Minimization, MinimizationError> {
        self.minimize_with_config(&QmConfig::default())
    }

    /// Minimize with a custom configuration
    pub fn minimize_with_config(
        &self,
        config: &QmConfig,
    ) -> Result<Minimization, MinimizationError> {
        let variables = self.resolved_variables()?;
        minimize_with_config(
            &self.terms.ones,
            &self.terms.dont_cares,
            &variables,
            config,
        )
    }
}

impl FromStr for FunctionSpec {
    type Err = ParseTermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionSpec::parse(s)
    }
}

fn join(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for FunctionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}({}) = ", name, self.variables.join(", "))?;
        }
        write!(f, "m({})", join(&self.terms.ones))?;
        if !self.terms.dont_cares.is_empty() {
            write!(f, " + d({})", join(&self.terms.dont_cares))?;
        }
        Ok(())
    }
}

/// Variable names for minimizing `functions` together
///
/// Every function with a header must declare the same list, which is then
/// used for all of them. Without any header the names are `A`, `B`, ... as
/// many as the widest function needs.
///
/// # Examples
///
/// ```
/// use qm_logic::{shared_variables, FunctionSpec};
///
/// let functions = [
///     FunctionSpec::parse("m(1)").unwrap(),
///     FunctionSpec::parse("m(5)").unwrap(),
/// ];
/// assert_eq!(shared_variables(&functions).unwrap(), vec!["A", "B", "C"]);
/// ```
pub fn shared_variables(functions: &[FunctionSpec]) -> Result<Vec<String>, MinimizationError> {
    let mut headers = functions.iter().filter(|f| !f.variables.is_empty());
    if let Some(first) = headers.next() {
        for other in headers {
            if other.variables != first.variables {
                return Err(MinimizationError::MismatchedVariables {
                    expected: first.variables.join(", ").into(),
                    found: other.variables.join(", ").into(),
                });
            }
        }
        return Ok(first.variables.clone());
    }

    let ones: Vec<u64> = functions
        .iter()
        .flat_map(|f| f.terms.ones.iter().copied())
        .collect();
    let dont_cares: Vec<u64> = functions
        .iter()
        .flat_map(|f| f.terms.dont_cares.iter().copied())
        .collect();
    Ok(default_names(bit_width(&ones, &dont_cares)?))
}

/// Parse a document with one definition per line
///
/// Text after `#` is a comment; blank lines are skipped. Errors carry the
/// 1-based line number.
pub fn parse_functions(text: &str) -> Result<Vec<FunctionSpec>, ParseTermsError> {
    let mut functions = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        functions.push(FunctionSpec::parse(content).map_err(|e| e.at_line(i + 1))?);
    }
    Ok(functions)
}

/// Read and parse a definitions file
pub fn read_functions<P: AsRef<Path>>(path: P) -> Result<Vec<FunctionSpec>, ParseTermsError> {
    let text = fs::read_to_string(path)?;
    parse_functions(&text)
}
