//! Joint minimization of several functions over the same inputs
//!
//! When functions are realised together, a product term used by two
//! outputs is built only once. Each function is solved on its own first;
//! then every combination of their inclusion-minimal covers is scored by the
//! cost of the *union* of the chosen implicants, and the cheapest
//! combination wins.

use crate::cost::cost;
use crate::error::MinimizationError;
use crate::implicant::Implicant;
use crate::minimize::{prepare_terms, solve, to_names, FunctionTerms, Minimization};
use crate::QmConfig;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of a joint minimization
#[derive(Debug, Clone)]
pub struct SharedMinimization {
    outputs: Vec<Minimization>,
    shared_cover: Vec<Implicant>,
    cost: u32,
}

impl SharedMinimization {
    /// Per-function results, in input order
    ///
    /// Each output's selected cover is the one chosen for the joint optimum,
    /// which need not be that function's individually cheapest cover.
    pub fn outputs(&self) -> &[Minimization] {
        &self.outputs
    }

    /// Distinct implicants used by any output, ascending
    pub fn shared_cover(&self) -> &[Implicant] {
        &self.shared_cover
    }

    /// Cost of the shared implicant set
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

/// Odometer over the cartesian product of cover choices
struct Choices {
    sizes: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl Choices {
    fn new(sizes: Vec<usize>) -> Self {
        let done = sizes.iter().any(|&n| n == 0);
        Choices {
            current: vec![0; sizes.len()],
            sizes,
            done,
        }
    }
}

impl Iterator for Choices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        // rightmost position varies fastest
        let mut pos = self.sizes.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.current[pos] += 1;
            if self.current[pos] < self.sizes[pos] {
                break;
            }
            self.current[pos] = 0;
        }
        Some(item)
    }
}

/// Minimize several functions jointly, sharing product terms
///
/// The number of combinations is the product of every function's number of
/// minimal covers, so this is meant for a handful of small functions.
///
/// # Examples
///
/// ```
/// use qm_logic::{minimize_shared, FunctionTerms};
///
/// let functions = [
///     FunctionTerms::new(vec![2, 3, 4, 5, 6, 7], vec![]),
///     FunctionTerms::new(vec![0, 1, 2, 3, 4, 5], vec![]),
/// ];
/// let result = minimize_shared(&functions, &["A", "B", "C"]).unwrap();
/// assert_eq!(result.outputs()[0].expression(), "A+B");
/// assert_eq!(result.outputs()[1].expression(), "A'+B'");
/// ```
pub fn minimize_shared<S: AsRef<str>>(
    functions: &[FunctionTerms],
    variables: &[S],
) -> Result<SharedMinimization, MinimizationError> {
    minimize_shared_with_config(functions, variables, &QmConfig::default())
}

/// Joint minimization with a custom configuration
pub fn minimize_shared_with_config<S: AsRef<str>>(
    functions: &[FunctionTerms],
    variables: &[S],
    config: &QmConfig,
) -> Result<SharedMinimization, MinimizationError> {
    if functions.is_empty() {
        return Err(MinimizationError::EmptyInput);
    }
    let names: Vec<Arc<str>> = to_names(variables)?;
    let width = names.len();

    let mut solved = Vec::with_capacity(functions.len());
    for function in functions {
        let (ones, dont_cares) = prepare_terms(&function.ones, &function.dont_cares, width)?;
        solved.push(solve(&ones, &dont_cares, width, config)?);
    }

    let sizes: Vec<usize> = solved.iter().map(|(_, covers)| covers.len()).collect();
    debug!(
        "joint minimization of {} function(s), cover choices {:?}",
        functions.len(),
        sizes
    );

    let mut best: Option<(Vec<usize>, u32, BTreeSet<Implicant>)> = None;
    for choice in Choices::new(sizes) {
        let union: BTreeSet<Implicant> = choice
            .iter()
            .zip(&solved)
            .flat_map(|(&c, (primes, covers))| covers[c].iter().map(move |&i| primes[i]))
            .collect();
        let union_cost = cost(&union, width);
        if best
            .as_ref()
            .map_or(true, |(_, best_cost, _)| union_cost < *best_cost)
        {
            best = Some((choice, union_cost, union));
        }
    }
    let (choice, total, union) = best.ok_or(MinimizationError::EmptyInput)?;
    debug!("joint optimum {:?} with cost {}", choice, total);

    let outputs = solved
        .into_iter()
        .zip(choice)
        .map(|((primes, covers), selected)| {
            Minimization::from_parts(names.clone(), primes, covers, selected, config)
        })
        .collect();

    Ok(SharedMinimization {
        outputs,
        shared_cover: union.into_iter().collect(),
        cost: total,
    })
}
