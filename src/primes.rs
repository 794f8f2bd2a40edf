//! Prime implicant generation by iterative pairwise merging
//!
//! Each pass groups the live implicants by the number of `1` bits in their
//! value. An implicant in group `k` merges with the implicant in group
//! `k + 1` that differs only by one fixed `0` turned into `1`; the merged
//! term replaces that bit with a don't-care. Implicants that never merge
//! during their pass are prime. Passes repeat until nothing merges.

use crate::codec::{check_width, width_mask};
use crate::error::MinimizationError;
use crate::implicant::{encode_patterns, pattern_width, Implicant};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Compute all prime implicants of the given implicants over `width` bits
///
/// `terms` is normally the union of the ones and the don't-cares, each as a
/// single-minterm implicant. Terms that already contain don't-care bits are
/// expanded into their minterms first, since merging only pairs terms with
/// equal masks.
pub fn prime_implicants(terms: &BTreeSet<Implicant>, width: usize) -> BTreeSet<Implicant> {
    let limit = width_mask(width);
    let mut primes = BTreeSet::new();
    let mut current: BTreeSet<Implicant> = terms
        .iter()
        .flat_map(|term| term.minterms(width))
        .map(Implicant::minterm)
        .collect();
    let mut pass = 0usize;

    loop {
        let mut groups: BTreeMap<u32, BTreeSet<Implicant>> = BTreeMap::new();
        for term in &current {
            groups
                .entry(term.value().count_ones())
                .or_default()
                .insert(*term);
        }

        let mut merged = BTreeSet::new();
        let mut used = HashSet::new();
        for (ones, group) in &groups {
            let Some(next) = groups.get(&(ones + 1)) else {
                continue;
            };
            for term in group {
                let mut zeros = !term.value() & !term.mask() & limit;
                while zeros != 0 {
                    let bit = zeros & zeros.wrapping_neg();
                    zeros &= zeros - 1;

                    let partner = Implicant::new(term.value() | bit, term.mask());
                    if next.contains(&partner) {
                        used.insert(*term);
                        used.insert(partner);
                        merged.insert(Implicant::new(term.value(), term.mask() | bit));
                    }
                }
            }
        }

        trace!(
            "pass {}: {} terms, {} merged into {}",
            pass,
            current.len(),
            used.len(),
            merged.len()
        );

        primes.extend(current.iter().filter(|t| !used.contains(*t)).copied());
        if used.is_empty() {
            break;
        }
        current = merged;
        pass += 1;
    }

    debug!(
        "{} prime implicant(s) from {} term(s) over {} bit(s) in {} pass(es)",
        primes.len(),
        terms.len(),
        width,
        pass + 1
    );
    primes
}

/// Compute prime implicants from bit patterns given as strings
///
/// Patterns may already contain `-`. All must share one width.
///
/// # Examples
///
/// ```
/// use qm_logic::primes::generate_prime_implicants;
/// use qm_logic::Implicant;
///
/// let primes = generate_prime_implicants(&["0010", "0110", "1010", "1110"]).unwrap();
/// assert_eq!(primes.len(), 1);
/// assert!(primes.contains(&Implicant::from_pattern("--10").unwrap()));
/// ```
pub fn generate_prime_implicants<S: AsRef<str>>(
    patterns: &[S],
) -> Result<BTreeSet<Implicant>, MinimizationError> {
    let width = pattern_width(patterns)?;
    check_width(width)?;
    let terms = encode_patterns(patterns)?;
    Ok(prime_implicants(&terms, width))
}
