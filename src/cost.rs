//! Gate-count cost of a sum-of-products cover
//!
//! An `n`-input AND or OR gate costs `n`, a NOT gate costs 1. A single
//! literal needs no AND gate and a single product needs no OR gate, so both
//! cost nothing.

use crate::codec::width_mask;
use crate::implicant::Implicant;

/// Cost of a cover over `num_vars` variables (lower is better)
///
/// # Examples
///
/// ```
/// use qm_logic::{cost, Implicant};
///
/// // A + B over three variables: a 2-input OR gate
/// let cover = [Implicant::new(0b100, 0b011), Implicant::new(0b010, 0b101)];
/// assert_eq!(cost(&cover, 3), 2);
/// ```
pub fn cost<'a, I>(cover: I, num_vars: usize) -> u32
where
    I: IntoIterator<Item = &'a Implicant>,
{
    let all = width_mask(num_vars);
    let mut terms = 0u32;
    let mut total = 0u32;
    for implicant in cover {
        terms += 1;
        let literals = !implicant.mask() & all;
        let mut term_cost = literals.count_ones();
        if term_cost == 1 {
            term_cost = 0;
        }
        total += term_cost;
        total += (!implicant.value() & literals).count_ones();
    }
    if terms > 1 {
        total += terms;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn cover(pairs: &[(u64, u64)]) -> Vec<Implicant> {
        pairs.iter().map(|&(v, m)| Implicant::new(v, m)).collect()
    }

    #[test]
    fn test_single_terms() {
        assert_eq!(cost(&cover(&[(1, 6)]), 3), 0);
        assert_eq!(cost(&cover(&[(0, 6)]), 3), 1);
        assert_eq!(cost(&cover(&[(3, 4)]), 3), 2);
        assert_eq!(cost(&cover(&[(7, 0)]), 3), 3);
    }

    #[test]
    fn test_single_literal_sums() {
        assert_eq!(cost(&cover(&[(1, 6), (2, 5), (4, 3)]), 3), 3);
        assert_eq!(cost(&cover(&[(0, 6), (2, 5), (4, 3)]), 3), 4);
        assert_eq!(cost(&cover(&[(0, 6), (0, 5), (4, 3)]), 3), 5);
        assert_eq!(cost(&cover(&[(0, 6), (0, 5), (0, 3)]), 3), 6);
    }

    #[test]
    fn test_products_of_sums() {
        assert_eq!(cost(&cover(&[(3, 4), (7, 0), (5, 2)]), 3), 10);
        assert_eq!(cost(&cover(&[(1, 4), (7, 0), (5, 2)]), 3), 11);
        assert_eq!(cost(&cover(&[(2, 4), (7, 0), (5, 2)]), 3), 11);
        assert_eq!(cost(&cover(&[(0, 4), (7, 0), (5, 2)]), 3), 12);
        assert_eq!(cost(&cover(&[(0, 4), (0, 0), (5, 2)]), 3), 15);
        assert_eq!(cost(&cover(&[(0, 4), (0, 0), (0, 2)]), 3), 17);
    }

    #[test]
    fn test_tautology_and_empty() {
        assert_eq!(cost(&cover(&[(0, 0b11)]), 2), 0);
        assert_eq!(cost(&cover(&[]), 2), 0);
    }
}
