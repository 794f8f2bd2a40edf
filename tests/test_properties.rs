//! Property checks over whole families of small functions
//!
//! Every function of three variables is minimized (with and without
//! don't-cares), plus a deterministic sample of four-variable functions,
//! and the results are checked for soundness, safety, primality and cost
//! minimality against brute force.

use qm_logic::*;
use std::collections::BTreeSet;

const ABC: [&str; 3] = ["A", "B", "C"];
const ABCD: [&str; 4] = ["A", "B", "C", "D"];

/// Split a truth table bitmap into ones and don't-cares
fn split(width: usize, on: u32, dc: u32) -> (Vec<u64>, Vec<u64>) {
    let mut ones = Vec::new();
    let mut dont_cares = Vec::new();
    for m in 0..(1u64 << width) {
        if on >> m & 1 == 1 {
            ones.push(m);
        } else if dc >> m & 1 == 1 {
            dont_cares.push(m);
        }
    }
    (ones, dont_cares)
}

/// Small deterministic generator for sampling
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}

fn check_sound_and_safe(result: &Minimization, ones: &[u64], dont_cares: &[u64]) {
    let covered = result.covered_minterms();
    for one in ones {
        assert!(
            covered.contains(one),
            "minterm {} not covered by {}",
            one,
            result
        );
    }
    let allowed: BTreeSet<u64> = ones.iter().chain(dont_cares).copied().collect();
    for m in &covered {
        assert!(allowed.contains(m), "{} covers off-set minterm {}", result, m);
    }
    assert!(result.verify(ones, dont_cares));
}

fn check_primality(result: &Minimization, ones: &[u64], dont_cares: &[u64]) {
    let width = result.width();
    let allowed: BTreeSet<u64> = ones.iter().chain(dont_cares).copied().collect();
    for prime in result.prime_implicants() {
        assert!(prime.minterms(width).all(|m| allowed.contains(&m)));
        for bit in 0..width {
            let bit = 1u64 << bit;
            if prime.mask() & bit != 0 {
                continue;
            }
            let grown = Implicant::new(prime.value(), prime.mask() | bit);
            assert!(
                grown.minterms(width).any(|m| !allowed.contains(&m)),
                "{} is not prime",
                prime.to_pattern(width)
            );
        }
    }
}

/// Cheapest cover over all subsets of the prime implicants
fn brute_force_cost(result: &Minimization, ones: &[u64]) -> u32 {
    let primes = result.prime_implicants();
    let width = result.width();
    assert!(primes.len() <= 16, "too many primes for brute force");
    let mut best = u32::MAX;
    for subset in 0u32..(1 << primes.len()) {
        let chosen: Vec<Implicant> = (0..primes.len())
            .filter(|&i| subset >> i & 1 == 1)
            .map(|i| primes[i])
            .collect();
        if ones.iter().all(|&m| chosen.iter().any(|p| p.covers(m))) {
            best = best.min(cost(&chosen, width));
        }
    }
    best
}

#[test]
fn test_all_three_variable_functions() {
    for on in 1u32..256 {
        let (ones, dont_cares) = split(3, on, 0);
        let result = minimize(&ones, &dont_cares, &ABC).unwrap();
        check_sound_and_safe(&result, &ones, &dont_cares);
        check_primality(&result, &ones, &dont_cares);
        assert_eq!(result.cost(), brute_force_cost(&result, &ones), "f = {:08b}", on);
    }
}

#[test]
fn test_three_variable_functions_with_dont_cares() {
    for on in 0u32..256 {
        for salt in [0x5au32, 0xa5, 0x3c] {
            let dc = !on & (on.rotate_left(3) ^ salt) & 0xff;
            if on == 0 && dc == 0 {
                continue;
            }
            let (ones, dont_cares) = split(3, on, dc);
            let result = minimize(&ones, &dont_cares, &ABC).unwrap();
            check_sound_and_safe(&result, &ones, &dont_cares);
            check_primality(&result, &ones, &dont_cares);
            assert_eq!(result.cost(), brute_force_cost(&result, &ones));
        }
    }
}

#[test]
fn test_sampled_four_variable_functions() {
    let mut rng = Lcg(0x2545_f491_4f6c_dd1d);
    for _ in 0..150 {
        let on = rng.next() & 0xffff;
        let dc = !on & rng.next() & rng.next() & 0xffff;
        if on == 0 {
            continue;
        }
        let (ones, dont_cares) = split(4, on, dc);
        let result = minimize(&ones, &dont_cares, &ABCD).unwrap();
        check_sound_and_safe(&result, &ones, &dont_cares);
        check_primality(&result, &ones, &dont_cares);
        if result.prime_implicants().len() <= 16 {
            assert_eq!(result.cost(), brute_force_cost(&result, &ones));
        }
    }
}

#[test]
fn test_essential_pruning_is_equivalent() {
    let config = QmConfig {
        remove_essential: true,
        ..QmConfig::default()
    };
    let mut rng = Lcg(7);
    for _ in 0..100 {
        let on = rng.next() & 0xffff;
        if on == 0 {
            continue;
        }
        let dc = !on & rng.next() & rng.next() & 0xffff;
        let (ones, dont_cares) = split(4, on, dc);
        let full = minimize(&ones, &dont_cares, &ABCD).unwrap();
        let pruned = minimize_with_config(&ones, &dont_cares, &ABCD, &config).unwrap();
        assert_eq!(full.expression(), pruned.expression());

        let a: BTreeSet<CoverIndices> = full.candidate_covers().iter().cloned().collect();
        let b: BTreeSet<CoverIndices> = pruned.candidate_covers().iter().cloned().collect();
        assert_eq!(a, b);
    }
}

#[test]
fn test_idempotence() {
    let mut rng = Lcg(42);
    for _ in 0..50 {
        let on = rng.next() & 0xffff;
        if on == 0 {
            continue;
        }
        let (ones, dont_cares) = split(4, on, 0);
        let a = minimize(&ones, &dont_cares, &ABCD).unwrap();
        let mut reversed = ones.clone();
        reversed.reverse();
        let b = minimize(&reversed, &dont_cares, &ABCD).unwrap();
        assert_eq!(a.expression(), b.expression());
    }
}

#[test]
fn test_codec_round_trip() {
    for width in 1..=8 {
        for index in 0..(1u64 << width) {
            let pattern = codec::encode(index, width).unwrap();
            assert_eq!(pattern.len(), width);
            assert_eq!(codec::decode(&pattern).unwrap(), index);
            assert_eq!(Implicant::from_pattern(&pattern).unwrap(), Implicant::minterm(index));
        }
    }
}
