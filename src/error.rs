//! Error types for the Quine-McCluskey minimizer
//!
//! Every failure is detected locally and returned to the caller as a
//! distinguishable variant; no partial results are ever produced.

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur while minimizing a boolean function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimizationError {
    /// Both the ones and the don't-care sets are empty
    EmptyInput,

    /// An index cannot be represented with the available bit width
    OutOfRange {
        /// The offending minterm index
        index: u64,
        /// The number of bits available to encode it
        width: usize,
    },

    /// Bit patterns of different lengths were supplied to the same run
    InconsistentWidth {
        /// Width established by the first pattern
        expected: usize,
        /// Width of the offending pattern
        found: usize,
        /// The offending pattern
        pattern: Arc<str>,
    },

    /// A required minterm is not covered by any prime implicant
    ///
    /// This can only happen when the prime implicants handed to the chart
    /// builder were not generated from the same ones set.
    UncoverableTerm {
        /// The uncovered minterm
        minterm: u64,
        /// Its bit pattern, most-significant bit first
        pattern: Arc<str>,
    },

    /// A pattern contains a character other than `0`, `1` or `-`
    InvalidPattern {
        /// The offending pattern
        pattern: Arc<str>,
        /// The unexpected character
        character: char,
        /// Its position in the pattern
        position: usize,
    },

    /// The same variable name appears twice in one variable list
    DuplicateVariable {
        /// The repeated name
        name: Arc<str>,
        /// Positions of its first and second occurrence
        positions: (usize, usize),
    },

    /// Functions minimized together declare different variable lists
    MismatchedVariables {
        /// Variables of the first function with a header
        expected: Arc<str>,
        /// Variables of the offending function
        found: Arc<str>,
    },

    /// More variables than fit in the implicant representation
    TooManyVariables {
        /// The requested number of variables
        count: usize,
        /// The supported maximum
        max: usize,
    },
}

impl fmt::Display for MinimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizationError::EmptyInput => {
                write!(f, "Nothing to minimize: both ones and don't-cares are empty")
            }
            MinimizationError::OutOfRange { index, width } => write!(
                f,
                "Index {} cannot be represented with {} bit(s)",
                index, width
            ),
            MinimizationError::InconsistentWidth {
                expected,
                found,
                pattern,
            } => write!(
                f,
                "Pattern {:?} has width {}, expected {}",
                pattern, found, expected
            ),
            MinimizationError::UncoverableTerm { minterm, pattern } => write!(
                f,
                "Minterm {} ({}) is not covered by any prime implicant",
                minterm, pattern
            ),
            MinimizationError::InvalidPattern {
                pattern,
                character,
                position,
            } => write!(
                f,
                "Invalid character {:?} at position {} in pattern {:?}. Expected '0', '1' or '-'.",
                character, position, pattern
            ),
            MinimizationError::DuplicateVariable { name, positions } => write!(
                f,
                "Variable {:?} is listed twice (positions {} and {})",
                name, positions.0, positions.1
            ),
            MinimizationError::MismatchedVariables { expected, found } => write!(
                f,
                "Functions disagree on their variables: expected ({}), found ({})",
                expected, found
            ),
            MinimizationError::TooManyVariables { count, max } => write!(
                f,
                "Cannot minimize over {} variables (at most {} are supported)",
                count, max
            ),
        }
    }
}

impl std::error::Error for MinimizationError {}

impl From<MinimizationError> for io::Error {
    fn from(err: MinimizationError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

/// Errors that can occur when parsing the textual function notation
#[derive(Debug)]
pub enum ParseTermsError {
    /// The input does not follow the `f(A, B) = m(...) + d(...)` grammar
    InvalidSyntax {
        /// The error message from the parser
        message: Arc<str>,
        /// The input string that failed to parse
        input: Arc<str>,
        /// Optional position in the input where the error occurred
        position: Option<usize>,
        /// Line number (1-based) when parsing a multi-line document
        line: Option<usize>,
    },

    /// IO error while reading a definitions file
    Io(io::Error),
}

impl ParseTermsError {
    pub(crate) fn at_line(self, line_no: usize) -> Self {
        match self {
            ParseTermsError::InvalidSyntax {
                message,
                input,
                position,
                ..
            } => ParseTermsError::InvalidSyntax {
                message,
                input,
                position,
                line: Some(line_no),
            },
            other => other,
        }
    }
}

impl fmt::Display for ParseTermsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTermsError::InvalidSyntax {
                message,
                input,
                position,
                line,
            } => {
                if let Some(line) = line {
                    write!(f, "Line {}: ", line)?;
                }
                if let Some(pos) = position {
                    write!(
                        f,
                        "Failed to parse function at position {}: {}. Input: {:?}",
                        pos, message, input
                    )
                } else {
                    write!(f, "Failed to parse function: {}. Input: {:?}", message, input)
                }
            }
            ParseTermsError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseTermsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseTermsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseTermsError {
    fn from(err: io::Error) -> Self {
        ParseTermsError::Io(err)
    }
}

impl From<ParseTermsError> for io::Error {
    fn from(err: ParseTermsError) -> Self {
        match err {
            ParseTermsError::Io(io_err) => io_err,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Top-level error combining parsing and minimization failures
///
/// Returned by helpers that go from text straight to a minimized result.
#[derive(Debug)]
pub enum QmError {
    /// Minimization failed
    Minimization(MinimizationError),
    /// Parsing the function notation failed
    Parse(ParseTermsError),
}

impl fmt::Display for QmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QmError::Minimization(e) => write!(f, "{}", e),
            QmError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QmError::Minimization(e) => Some(e),
            QmError::Parse(e) => Some(e),
        }
    }
}

impl From<MinimizationError> for QmError {
    fn from(err: MinimizationError) -> Self {
        QmError::Minimization(err)
    }
}

impl From<ParseTermsError> for QmError {
    fn from(err: ParseTermsError) -> Self {
        QmError::Parse(err)
    }
}

impl From<QmError> for io::Error {
    fn from(err: QmError) -> Self {
        match err {
            QmError::Minimization(e) => e.into(),
            QmError::Parse(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use test_log::test;

    #[test]
    fn test_out_of_range_display() {
        let err = MinimizationError::OutOfRange { index: 9, width: 3 };
        let msg = err.to_string();
        assert!(msg.contains("Index 9"));
        assert!(msg.contains("3 bit"));
    }

    #[test]
    fn test_inconsistent_width_display() {
        let err = MinimizationError::InconsistentWidth {
            expected: 3,
            found: 4,
            pattern: Arc::from("0101"),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"0101\""));
        assert!(msg.contains("width 4"));
        assert!(msg.contains("expected 3"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = MinimizationError::InvalidPattern {
            pattern: Arc::from("01x"),
            character: 'x',
            position: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("position 2"));
    }

    #[test]
    fn test_variable_list_errors_display() {
        let err = MinimizationError::DuplicateVariable {
            name: Arc::from("A"),
            positions: (0, 2),
        };
        assert!(err.to_string().contains("positions 0 and 2"));

        let err = MinimizationError::MismatchedVariables {
            expected: Arc::from("A, B"),
            found: Arc::from("x, y"),
        };
        assert!(err.to_string().contains("expected (A, B), found (x, y)"));
    }

    #[test]
    fn test_parse_error_with_line() {
        let err = ParseTermsError::InvalidSyntax {
            message: Arc::from("unexpected token"),
            input: Arc::from("m(1,"),
            position: Some(4),
            line: None,
        }
        .at_line(3);
        let msg = err.to_string();
        assert!(msg.starts_with("Line 3: "));
        assert!(msg.contains("position 4"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err: io::Error = MinimizationError::EmptyInput.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let parse_err: ParseTermsError = io_err.into();
        assert!(parse_err.source().is_some());
        let back: io::Error = parse_err.into();
        assert_eq!(back.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_qm_error_source() {
        let err: QmError = MinimizationError::EmptyInput.into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("Nothing to minimize"));
    }
}
