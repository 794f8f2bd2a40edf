//! Prime implicant chart and Petrick's method
//!
//! The chart has one row per required minterm listing the prime implicants
//! that cover it. Read as a product of sums over implicant indices, it is
//! multiplied out clause by clause into a sum of products whose terms are
//! the inclusion-minimal covers.

use crate::codec::encode;
use crate::cost::cost;
use crate::error::MinimizationError;
use crate::implicant::Implicant;
use log::{debug, trace};
use std::collections::BTreeSet;

/// A set of implicant indices
pub type CoverIndices = BTreeSet<usize>;

/// One row of the coverage chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    minterm: u64,
    implicants: Vec<usize>,
}

impl ChartRow {
    /// The required minterm
    pub fn minterm(&self) -> u64 {
        self.minterm
    }

    /// Indices of the implicants covering it, ascending
    pub fn implicants(&self) -> &[usize] {
        &self.implicants
    }
}

/// Which implicants cover which required minterms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageChart {
    rows: Vec<ChartRow>,
}

impl CoverageChart {
    /// Build the chart for `ones` against `implicants`
    ///
    /// Rows are ordered by ascending minterm; duplicate minterms collapse
    /// into one row. Fails with [`MinimizationError::UncoverableTerm`] if a
    /// minterm has no covering implicant.
    pub fn build(
        implicants: &[Implicant],
        ones: &[u64],
        width: usize,
    ) -> Result<Self, MinimizationError> {
        let ones: BTreeSet<u64> = ones.iter().copied().collect();
        let mut rows = Vec::with_capacity(ones.len());
        for minterm in ones {
            let covering: Vec<usize> = implicants
                .iter()
                .enumerate()
                .filter(|(_, imp)| imp.covers(minterm))
                .map(|(i, _)| i)
                .collect();
            if covering.is_empty() {
                let pattern = encode(minterm, width).unwrap_or_else(|_| minterm.to_string());
                return Err(MinimizationError::UncoverableTerm {
                    minterm,
                    pattern: pattern.into(),
                });
            }
            rows.push(ChartRow {
                minterm,
                implicants: covering,
            });
        }
        debug!(
            "coverage chart: {} row(s) over {} implicant(s)",
            rows.len(),
            implicants.len()
        );
        Ok(CoverageChart { rows })
    }

    /// Chart rows, one per required minterm
    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no required minterms
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Implicants that are the only cover of some row
    pub fn essentials(&self) -> CoverIndices {
        self.rows
            .iter()
            .filter_map(|row| match row.implicants.as_slice() {
                [only] => Some(*only),
                _ => None,
            })
            .collect()
    }

    /// The chart restricted to rows not covered by any of `chosen`
    pub fn without_covered(&self, chosen: &CoverIndices) -> CoverageChart {
        CoverageChart {
            rows: self
                .rows
                .iter()
                .filter(|row| !row.implicants.iter().any(|i| chosen.contains(i)))
                .cloned()
                .collect(),
        }
    }
}

/// Build the coverage chart of `ones` against `implicants`
pub fn build_coverage_chart(
    implicants: &[Implicant],
    ones: &[u64],
    width: usize,
) -> Result<CoverageChart, MinimizationError> {
    CoverageChart::build(implicants, ones, width)
}

/// All inclusion-minimal covers of the chart (Petrick's method)
///
/// An empty chart has exactly one cover, the empty one.
///
/// # Examples
///
/// ```
/// use qm_logic::chart::{build_coverage_chart, enumerate_covers};
/// use qm_logic::Implicant;
///
/// let implicants = [
///     Implicant::from_pattern("0-").unwrap(),
///     Implicant::from_pattern("-1").unwrap(),
/// ];
/// let chart = build_coverage_chart(&implicants, &[0, 1, 3], 2).unwrap();
/// let covers = enumerate_covers(&chart);
/// assert_eq!(covers.len(), 1);
/// assert_eq!(covers[0].iter().copied().collect::<Vec<_>>(), vec![0, 1]);
/// ```
pub fn enumerate_covers(chart: &CoverageChart) -> Vec<CoverIndices> {
    let mut rows = chart.rows.iter();
    let Some(first) = rows.next() else {
        return vec![CoverIndices::new()];
    };

    let mut covers: Vec<CoverIndices> = first
        .implicants
        .iter()
        .map(|&i| CoverIndices::from([i]))
        .collect();

    for row in rows {
        let mut next: Vec<CoverIndices> = Vec::new();
        for cover in &covers {
            for &index in &row.implicants {
                let mut candidate = cover.clone();
                candidate.insert(index);

                // absorption: keep only inclusion-minimal sets
                let mut keep = true;
                let mut j = next.len();
                while j > 0 {
                    j -= 1;
                    if candidate.is_subset(&next[j]) {
                        next.remove(j);
                    } else if candidate.is_superset(&next[j]) {
                        keep = false;
                    }
                }
                if keep {
                    next.push(candidate);
                }
            }
        }
        trace!(
            "row {}: {} candidate cover(s)",
            row.minterm,
            next.len()
        );
        covers = next;
    }

    debug!("{} inclusion-minimal cover(s)", covers.len());
    covers
}

/// Like [`enumerate_covers`] but fixes essential implicants first
///
/// Essential implicants belong to every cover, so only the rows they leave
/// uncovered go through Petrick's method. The resulting set of covers is the
/// same as with full enumeration.
pub fn enumerate_covers_with_essentials(chart: &CoverageChart) -> Vec<CoverIndices> {
    let essentials = chart.essentials();
    let rest = chart.without_covered(&essentials);
    debug!(
        "{} essential implicant(s), {} row(s) left for Petrick's method",
        essentials.len(),
        rest.len()
    );
    enumerate_covers(&rest)
        .into_iter()
        .map(|mut cover| {
            cover.extend(essentials.iter().copied());
            cover
        })
        .collect()
}

/// Pick the cheapest cover
///
/// Ties go to the cover whose ascending index list is lexicographically
/// smallest. Returns the position in `covers` and the cost, or `None` if
/// `covers` is empty.
pub fn cheapest_cover(
    covers: &[CoverIndices],
    implicants: &[Implicant],
    num_vars: usize,
) -> Option<(usize, u32)> {
    covers
        .iter()
        .enumerate()
        .map(|(pos, cover)| {
            let c = cost(cover.iter().map(|&i| &implicants[i]), num_vars);
            (pos, c)
        })
        .min_by(|(a_pos, a_cost), (b_pos, b_cost)| {
            a_cost
                .cmp(b_cost)
                .then_with(|| covers[*a_pos].cmp(&covers[*b_pos]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::prime_implicants;
    use test_log::test;

    fn primes_of(ones: &[u64], dont_cares: &[u64], width: usize) -> Vec<Implicant> {
        let terms = ones
            .iter()
            .chain(dont_cares)
            .copied()
            .map(Implicant::minterm)
            .collect();
        prime_implicants(&terms, width).into_iter().collect()
    }

    #[test]
    fn test_chart_rows() {
        let primes = primes_of(&[2, 3, 4, 5, 6, 7], &[], 3);
        let chart = build_coverage_chart(&primes, &[2, 3, 4, 5, 6, 7], 3).unwrap();
        assert_eq!(chart.len(), 6);
        let row6 = chart.rows().iter().find(|r| r.minterm() == 6).unwrap();
        assert_eq!(row6.implicants().len(), 2);
    }

    #[test]
    fn test_chart_dedups_minterms() {
        let primes = primes_of(&[1, 3], &[], 2);
        let chart = build_coverage_chart(&primes, &[3, 1, 3], 2).unwrap();
        assert_eq!(
            chart.rows().iter().map(|r| r.minterm()).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_uncoverable_term() {
        let primes = primes_of(&[1], &[], 2);
        let err = build_coverage_chart(&primes, &[1, 2], 2).unwrap_err();
        assert_eq!(
            err,
            MinimizationError::UncoverableTerm {
                minterm: 2,
                pattern: "10".into(),
            }
        );
    }

    #[test]
    fn test_cyclic_chart_has_two_minimal_covers() {
        // f = m(0, 1, 2, 5, 6, 7): the classic cyclic core
        let ones = [0, 1, 2, 5, 6, 7];
        let primes = primes_of(&ones, &[], 3);
        assert_eq!(primes.len(), 6);
        let chart = build_coverage_chart(&primes, &ones, 3).unwrap();
        assert!(chart.essentials().is_empty());

        let covers = enumerate_covers(&chart);
        let smallest = covers.iter().map(|c| c.len()).min().unwrap();
        assert_eq!(smallest, 3);
        assert_eq!(covers.iter().filter(|c| c.len() == 3).count(), 2);
        for cover in &covers {
            for row in chart.rows() {
                assert!(row.implicants().iter().any(|i| cover.contains(i)));
            }
        }
    }

    #[test]
    fn test_covers_are_inclusion_minimal() {
        let ones = [0, 1, 2, 5, 6, 7, 8, 9, 10, 14];
        let primes = primes_of(&ones, &[], 4);
        let chart = build_coverage_chart(&primes, &ones, 4).unwrap();
        let covers = enumerate_covers(&chart);
        for (i, a) in covers.iter().enumerate() {
            for (j, b) in covers.iter().enumerate() {
                if i != j {
                    assert!(!a.is_subset(b), "{:?} absorbed by {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_essentials_give_same_covers() {
        let ones = [4, 8, 10, 11, 12, 15];
        let primes = primes_of(&ones, &[9, 14], 4);
        let chart = build_coverage_chart(&primes, &ones, 4).unwrap();

        let full: BTreeSet<CoverIndices> = enumerate_covers(&chart).into_iter().collect();
        let pruned: BTreeSet<CoverIndices> =
            enumerate_covers_with_essentials(&chart).into_iter().collect();
        assert_eq!(full, pruned);
        assert_eq!(chart.essentials().len(), 2);
    }

    #[test]
    fn test_empty_chart() {
        let chart = build_coverage_chart(&[], &[], 3).unwrap();
        assert!(chart.is_empty());
        assert_eq!(enumerate_covers(&chart), vec![CoverIndices::new()]);
    }

    #[test]
    fn test_cheapest_cover_tie_break() {
        let implicants = [
            Implicant::from_pattern("1-").unwrap(),
            Implicant::from_pattern("-1").unwrap(),
        ];
        let covers = vec![CoverIndices::from([1]), CoverIndices::from([0])];
        assert_eq!(cheapest_cover(&covers, &implicants, 2), Some((1, 0)));
        assert_eq!(cheapest_cover(&[], &implicants, 2), None);
    }
}
