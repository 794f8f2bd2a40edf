//! End-to-end minimization of a single boolean function
//!
//! Indices go through [`codec`](crate::codec) into single-minterm
//! implicants, [`primes`](crate::primes) merges them into prime implicants,
//! [`chart`](crate::chart) enumerates the inclusion-minimal covers and the
//! cheapest one is rendered by [`format`](crate::format).

use crate::chart::{
    build_coverage_chart, cheapest_cover, enumerate_covers, enumerate_covers_with_essentials,
    CoverIndices,
};
use crate::codec::{bit_width, check_index, check_width, decode};
use crate::cost::cost;
use crate::error::MinimizationError;
use crate::format::{format_cover_with, sort_for_display};
use crate::implicant::{pattern_width, permutations, Implicant};
use crate::primes::prime_implicants;
use crate::QmConfig;
use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// The ones and don't-cares of one boolean function
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionTerms {
    /// Minterm indices where the function is 1
    pub ones: Vec<u64>,
    /// Minterm indices where the value does not matter
    pub dont_cares: Vec<u64>,
}

impl FunctionTerms {
    /// Create from ones and don't-cares
    pub fn new(ones: Vec<u64>, dont_cares: Vec<u64>) -> Self {
        FunctionTerms { ones, dont_cares }
    }
}

/// The result of minimizing one function
#[derive(Debug, Clone)]
pub struct Minimization {
    variables: Vec<Arc<str>>,
    prime_implicants: Vec<Implicant>,
    candidate_covers: Vec<CoverIndices>,
    selected: usize,
    selected_cover: Vec<Implicant>,
    cost: u32,
    expression: String,
}

impl Minimization {
    pub(crate) fn from_parts(
        variables: Vec<Arc<str>>,
        prime_implicants: Vec<Implicant>,
        candidate_covers: Vec<CoverIndices>,
        selected: usize,
        config: &QmConfig,
    ) -> Self {
        let width = variables.len();
        let mut selected_cover: Vec<Implicant> = candidate_covers[selected]
            .iter()
            .map(|&i| prime_implicants[i])
            .collect();
        sort_for_display(&mut selected_cover, width);
        let cost = cost(&selected_cover, width);
        let expression = format_cover_with(&selected_cover, variables.as_slice(), &config.notation);
        Minimization {
            variables,
            prime_implicants,
            candidate_covers,
            selected,
            selected_cover,
            cost,
            expression,
        }
    }

    /// Number of variables (the bit width of every implicant)
    pub fn width(&self) -> usize {
        self.variables.len()
    }

    /// Variable names, most-significant bit first
    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    /// All prime implicants, in ascending `(value, mask)` order
    pub fn prime_implicants(&self) -> &[Implicant] {
        &self.prime_implicants
    }

    /// Every inclusion-minimal cover, as indices into [`prime_implicants`](Self::prime_implicants)
    pub fn candidate_covers(&self) -> &[CoverIndices] {
        &self.candidate_covers
    }

    /// Position of the selected cover in [`candidate_covers`](Self::candidate_covers)
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Cost of any candidate cover
    pub fn candidate_cost(&self, index: usize) -> Option<u32> {
        self.candidate_covers.get(index).map(|cover| {
            cost(
                cover.iter().map(|&i| &self.prime_implicants[i]),
                self.width(),
            )
        })
    }

    /// The chosen implicants, in printing order
    pub fn selected_cover(&self) -> &[Implicant] {
        &self.selected_cover
    }

    /// Cost of the chosen cover
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// The chosen cover as a sum-of-products expression
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Every minterm on which the minimized function is 1
    pub fn covered_minterms(&self) -> BTreeSet<u64> {
        self.selected_cover
            .iter()
            .flat_map(|imp| imp.minterms(self.width()))
            .collect()
    }

    /// Check the result against the function it was computed from
    ///
    /// Every one must be covered, and every covered minterm must be a one or
    /// a don't-care.
    pub fn verify(&self, ones: &[u64], dont_cares: &[u64]) -> bool {
        let covered = self.covered_minterms();
        let allowed: BTreeSet<u64> = ones.iter().chain(dont_cares).copied().collect();
        ones.iter().all(|m| covered.contains(m)) && covered.is_subset(&allowed)
    }
}

impl fmt::Display for Minimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Validate variable names: at most 64 of them, all distinct
pub(crate) fn to_names<S: AsRef<str>>(variables: &[S]) -> Result<Vec<Arc<str>>, MinimizationError> {
    check_width(variables.len())?;
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(variables.len());
    for (position, name) in variables.iter().enumerate() {
        if let Some(first) = seen.insert(name.as_ref(), position) {
            return Err(MinimizationError::DuplicateVariable {
                name: name.as_ref().into(),
                positions: (first, position),
            });
        }
    }
    Ok(variables.iter().map(|v| Arc::from(v.as_ref())).collect())
}

/// Validate the terms of one function and split them into disjoint sets
///
/// A minterm listed as both one and don't-care counts as a one.
pub(crate) fn prepare_terms(
    ones: &[u64],
    dont_cares: &[u64],
    width: usize,
) -> Result<(BTreeSet<u64>, BTreeSet<u64>), MinimizationError> {
    let needed = bit_width(ones, dont_cares)?;
    debug!("terms need {} bit(s), minimizing over {}", needed, width);
    for &index in ones.iter().chain(dont_cares) {
        check_index(index, width)?;
    }
    let ones: BTreeSet<u64> = ones.iter().copied().collect();
    let dont_cares = dont_cares
        .iter()
        .copied()
        .filter(|m| !ones.contains(m))
        .collect();
    Ok((ones, dont_cares))
}

/// Prime implicants and inclusion-minimal covers of one function
pub(crate) fn solve(
    ones: &BTreeSet<u64>,
    dont_cares: &BTreeSet<u64>,
    width: usize,
    config: &QmConfig,
) -> Result<(Vec<Implicant>, Vec<CoverIndices>), MinimizationError> {
    let terms: BTreeSet<Implicant> = ones
        .iter()
        .chain(dont_cares)
        .copied()
        .map(Implicant::minterm)
        .collect();
    let primes: Vec<Implicant> = prime_implicants(&terms, width).into_iter().collect();

    let required: Vec<u64> = ones.iter().copied().collect();
    let chart = build_coverage_chart(&primes, &required, width)?;
    let covers = if config.remove_essential {
        enumerate_covers_with_essentials(&chart)
    } else {
        enumerate_covers(&chart)
    };
    Ok((primes, covers))
}

fn select(
    ones: &BTreeSet<u64>,
    dont_cares: &BTreeSet<u64>,
    variables: Vec<Arc<str>>,
    config: &QmConfig,
) -> Result<Minimization, MinimizationError> {
    let width = variables.len();
    let (primes, covers) = solve(ones, dont_cares, width, config)?;
    let (selected, selected_cost) = cheapest_cover(&covers, &primes, width)
        .ok_or(MinimizationError::EmptyInput)?;
    debug!(
        "selected cover {} of {} with cost {}",
        selected,
        covers.len(),
        selected_cost
    );
    Ok(Minimization::from_parts(
        variables, primes, covers, selected, config,
    ))
}

/// Minimize a function given by minterm indices
///
/// `variables[0]` names the most-significant bit; the number of variables is
/// the bit width of the run. Uses [`QmConfig::default`].
///
/// # Examples
///
/// ```
/// use qm_logic::minimize;
///
/// let result = minimize(&[2, 3, 4, 5, 6, 7], &[], &["A", "B", "C"]).unwrap();
/// assert_eq!(result.expression(), "A+B");
/// assert_eq!(result.cost(), 2);
/// ```
pub fn minimize<S: AsRef<str>>(
    ones: &[u64],
    dont_cares: &[u64],
    variables: &[S],
) -> Result<Minimization, MinimizationError> {
    minimize_with_config(ones, dont_cares, variables, &QmConfig::default())
}

/// Minimize a function given by minterm indices with a custom configuration
pub fn minimize_with_config<S: AsRef<str>>(
    ones: &[u64],
    dont_cares: &[u64],
    variables: &[S],
    config: &QmConfig,
) -> Result<Minimization, MinimizationError> {
    let variables = to_names(variables)?;
    let (ones, dont_cares) = prepare_terms(ones, dont_cares, variables.len())?;
    select(&ones, &dont_cares, variables, config)
}

/// Minimize a function given by bit patterns
///
/// Patterns are written most-significant bit first and may contain `-`,
/// which stands for both values of that bit. Every pattern must be as long
/// as `variables`.
///
/// # Examples
///
/// ```
/// use qm_logic::minimize_patterns;
///
/// let result = minimize_patterns(&["0010", "0110", "1-10"], &[], &["w", "x", "y", "z"]).unwrap();
/// assert_eq!(result.expression(), "y.z'");
/// ```
pub fn minimize_patterns<S: AsRef<str>, V: AsRef<str>>(
    ones: &[S],
    dont_cares: &[S],
    variables: &[V],
) -> Result<Minimization, MinimizationError> {
    minimize_patterns_with_config(ones, dont_cares, variables, &QmConfig::default())
}

/// Minimize a function given by bit patterns with a custom configuration
pub fn minimize_patterns_with_config<S: AsRef<str>, V: AsRef<str>>(
    ones: &[S],
    dont_cares: &[S],
    variables: &[V],
    config: &QmConfig,
) -> Result<Minimization, MinimizationError> {
    let variables = to_names(variables)?;
    let all: Vec<&str> = ones
        .iter()
        .chain(dont_cares)
        .map(AsRef::as_ref)
        .collect();
    let width = pattern_width(&all)?;
    if width != variables.len() {
        return Err(MinimizationError::InconsistentWidth {
            expected: variables.len(),
            found: width,
            pattern: all[0].into(),
        });
    }

    let expand = |patterns: &[S]| -> Result<BTreeSet<u64>, MinimizationError> {
        let mut minterms = BTreeSet::new();
        for pattern in patterns {
            for concrete in permutations(pattern.as_ref())? {
                minterms.insert(decode(&concrete)?);
            }
        }
        Ok(minterms)
    };
    let ones = expand(ones)?;
    let dont_cares: BTreeSet<u64> = expand(dont_cares)?.difference(&ones).copied().collect();
    select(&ones, &dont_cares, variables, config)
}
