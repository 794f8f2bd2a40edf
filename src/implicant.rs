//! Implicants as `(value, mask)` pairs and their ternary pattern form
//!
//! A ternary pattern such as `"1-0"` is stored as a pair where `mask` has a
//! bit set for every `-` and `value` holds the fixed bits with the masked
//! positions cleared. Bit `width - 1` corresponds to the first character.

use crate::codec::{check_width, width_mask};
use crate::error::MinimizationError;
use std::collections::BTreeSet;
use std::fmt;

/// A product term over fixed-width inputs
///
/// Two implicants compare equal exactly when their ternary patterns are
/// equal. The derived ordering sorts by `value`, then by `mask`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Implicant {
    value: u64,
    mask: u64,
}

impl Implicant {
    /// Create an implicant, clearing any value bits under the mask
    pub fn new(value: u64, mask: u64) -> Self {
        Implicant {
            value: value & !mask,
            mask,
        }
    }

    /// The implicant covering exactly one minterm
    pub fn minterm(index: u64) -> Self {
        Implicant {
            value: index,
            mask: 0,
        }
    }

    /// Fixed bits (zero under the mask)
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Don't-care bits
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Whether this implicant contains the given minterm
    pub fn covers(&self, minterm: u64) -> bool {
        minterm & !self.mask == self.value
    }

    /// Whether every minterm of `other` is also a minterm of `self`
    pub fn contains(&self, other: &Implicant) -> bool {
        other.mask & !self.mask == 0 && self.covers(other.value)
    }

    /// Positions (within `width`) that appear as literals
    pub fn literals(&self, width: usize) -> u64 {
        !self.mask & width_mask(width)
    }

    /// Number of literals in the product term
    pub fn num_literals(&self, width: usize) -> u32 {
        self.literals(width).count_ones()
    }

    /// Parse a ternary pattern over `{0, 1, -}`
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_logic::Implicant;
    ///
    /// let imp = Implicant::from_pattern("--10").unwrap();
    /// assert_eq!((imp.value(), imp.mask()), (0b0010, 0b1100));
    /// ```
    pub fn from_pattern(pattern: &str) -> Result<Self, MinimizationError> {
        check_width(pattern.len())?;
        let mut value = 0u64;
        let mut mask = 0u64;
        for (position, c) in pattern.chars().enumerate() {
            value <<= 1;
            mask <<= 1;
            match c {
                '0' => {}
                '1' => value |= 1,
                '-' => mask |= 1,
                character => {
                    return Err(MinimizationError::InvalidPattern {
                        pattern: pattern.into(),
                        character,
                        position,
                    })
                }
            }
        }
        Ok(Implicant { value, mask })
    }

    /// Render as a ternary pattern of `width` characters
    pub fn to_pattern(&self, width: usize) -> String {
        (0..width)
            .rev()
            .map(|bit| {
                if (self.mask >> bit) & 1 == 1 {
                    '-'
                } else if (self.value >> bit) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }

    /// Every concrete bit pattern this implicant stands for
    pub fn permutations(&self, width: usize) -> Permutations {
        Permutations::from_bytes(self.to_pattern(width).into_bytes())
    }

    /// Every minterm index this implicant stands for
    pub fn minterms(&self, width: usize) -> impl Iterator<Item = u64> {
        self.permutations(width).map(|p| index_of(p.as_bytes()))
    }
}

impl fmt::Debug for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:#b}, {:#b})", self.value, self.mask)
    }
}

fn index_of(bits: &[u8]) -> u64 {
    bits.iter()
        .fold(0u64, |acc, &b| (acc << 1) | u64::from(b == b'1'))
}

/// Width shared by all `patterns`
///
/// Fails with [`MinimizationError::InconsistentWidth`] on the first pattern
/// whose length differs from the first one, or with
/// [`MinimizationError::EmptyInput`] when there are no patterns at all.
pub fn pattern_width<S: AsRef<str>>(patterns: &[S]) -> Result<usize, MinimizationError> {
    let mut iter = patterns.iter().map(AsRef::as_ref);
    let expected = iter.next().ok_or(MinimizationError::EmptyInput)?.len();
    for pattern in iter {
        if pattern.len() != expected {
            return Err(MinimizationError::InconsistentWidth {
                expected,
                found: pattern.len(),
                pattern: pattern.into(),
            });
        }
    }
    Ok(expected)
}

/// Convert ternary patterns into a deduplicated set of implicants
pub fn encode_patterns<S: AsRef<str>>(
    patterns: &[S],
) -> Result<BTreeSet<Implicant>, MinimizationError> {
    patterns
        .iter()
        .map(|p| Implicant::from_pattern(p.as_ref()))
        .collect()
}

/// Expand a ternary pattern into all concrete bit patterns it represents
///
/// # Examples
///
/// ```
/// use qm_logic::implicant::permutations;
///
/// let all: Vec<String> = permutations("1-0-").unwrap().collect();
/// assert_eq!(all.len(), 4);
/// assert!(all.contains(&"1101".to_string()));
/// ```
pub fn permutations(pattern: &str) -> Result<Permutations, MinimizationError> {
    // validates the alphabet
    Implicant::from_pattern(pattern)?;
    Ok(Permutations::from_bytes(pattern.as_bytes().to_vec()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Iterator over the concrete patterns of one ternary term
///
/// A cursor walks forward copying fixed positions and setting each `-` to
/// `0`. At the end of the term the buffer is emitted, then the cursor walks
/// back to the nearest `-` still at `0`, flips it to `1` and walks forward
/// again. The walk ends once no such `-` remains, after exactly
/// `2^k` patterns for `k` don't-care positions.
#[derive(Debug, Clone)]
pub struct Permutations {
    term: Vec<u8>,
    buffer: Vec<u8>,
    cursor: Option<usize>,
    direction: Direction,
    emitted_empty: bool,
}

impl Permutations {
    fn from_bytes(term: Vec<u8>) -> Self {
        let buffer = vec![b'0'; term.len()];
        let cursor = if term.is_empty() { None } else { Some(0) };
        Permutations {
            term,
            buffer,
            cursor,
            direction: Direction::Forward,
            emitted_empty: false,
        }
    }

    fn emit(&self) -> String {
        // buffer only ever holds b'0' and b'1'
        self.buffer.iter().map(|&b| b as char).collect()
    }
}

impl Iterator for Permutations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let n = self.term.len();
        if n == 0 {
            if self.emitted_empty {
                return None;
            }
            self.emitted_empty = true;
            return Some(String::new());
        }

        loop {
            let i = self.cursor?;
            match self.term[i] {
                b'-' => match self.direction {
                    Direction::Forward => self.buffer[i] = b'0',
                    Direction::Backward => {
                        if self.buffer[i] == b'0' {
                            self.buffer[i] = b'1';
                            self.direction = Direction::Forward;
                        }
                    }
                },
                fixed => self.buffer[i] = fixed,
            }

            match self.direction {
                Direction::Forward if i + 1 == n => {
                    self.direction = Direction::Backward;
                    self.cursor = Some(n - 1);
                    return Some(self.emit());
                }
                Direction::Forward => self.cursor = Some(i + 1),
                Direction::Backward => self.cursor = i.checked_sub(1),
            }
        }
    }
}
