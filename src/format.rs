//! Rendering covers as sum-of-products text

use crate::implicant::Implicant;
use crate::Notation;

/// Sort key putting, bit by bit from the most significant, a positive
/// literal before a negative one before an absent one
fn literal_order(implicant: &Implicant, width: usize) -> Vec<u8> {
    (0..width)
        .rev()
        .map(|bit| {
            if (implicant.mask() >> bit) & 1 == 1 {
                2
            } else if (implicant.value() >> bit) & 1 == 1 {
                0
            } else {
                1
            }
        })
        .collect()
}

/// Order implicants the way they are printed
pub(crate) fn sort_for_display(cover: &mut [Implicant], width: usize) {
    cover.sort_by_cached_key(|imp| literal_order(imp, width));
}

fn format_product<S: AsRef<str>>(
    implicant: &Implicant,
    variables: &[S],
    notation: &Notation,
) -> String {
    let width = variables.len();
    let mut literals = Vec::new();
    for (j, name) in variables.iter().enumerate() {
        let bit = width - 1 - j;
        if (implicant.mask() >> bit) & 1 == 1 {
            continue;
        }
        if (implicant.value() >> bit) & 1 == 1 {
            literals.push(name.as_ref().to_string());
        } else {
            literals.push(format!(
                "{}{}{}",
                notation.not_prefix,
                name.as_ref(),
                notation.not_suffix
            ));
        }
    }
    literals.join(&notation.and)
}

/// Render `cover` with the given notation
///
/// `variables[0]` names the most-significant bit. An empty cover renders as
/// [`Notation::zero`], a cover containing an implicant without literals as
/// [`Notation::one`].
pub fn format_cover_with<S: AsRef<str>>(
    cover: &[Implicant],
    variables: &[S],
    notation: &Notation,
) -> String {
    let width = variables.len();
    if cover.is_empty() {
        return notation.zero.clone();
    }
    if cover.iter().any(|imp| imp.num_literals(width) == 0) {
        return notation.one.clone();
    }

    let mut sorted = cover.to_vec();
    sort_for_display(&mut sorted, width);
    sorted
        .iter()
        .map(|imp| format_product(imp, variables, notation))
        .collect::<Vec<_>>()
        .join(&notation.or)
}

/// Render `cover` with the default `A.B' + C` notation
///
/// # Examples
///
/// ```
/// use qm_logic::{format_cover, Implicant};
///
/// let cover = [Implicant::from_pattern("--10").unwrap()];
/// assert_eq!(format_cover(&cover, &["A", "B", "C", "D"]), "C.D'");
/// ```
pub fn format_cover<S: AsRef<str>>(cover: &[Implicant], variables: &[S]) -> String {
    format_cover_with(cover, variables, &Notation::default())
}
