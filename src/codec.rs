//! Conversion between minterm indices and fixed-width bit patterns
//!
//! Patterns are written most-significant bit first, so with three variables
//! the index `6` becomes `"110"`.

use crate::error::MinimizationError;

/// Largest supported bit width (implicants are stored in `u64`)
pub const MAX_WIDTH: usize = u64::BITS as usize;

/// Mask with the lowest `width` bits set
pub(crate) fn width_mask(width: usize) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

pub(crate) fn check_width(width: usize) -> Result<(), MinimizationError> {
    if width > MAX_WIDTH {
        return Err(MinimizationError::TooManyVariables {
            count: width,
            max: MAX_WIDTH,
        });
    }
    Ok(())
}

/// Check that `index` fits in `width` bits
pub(crate) fn check_index(index: u64, width: usize) -> Result<(), MinimizationError> {
    if index & !width_mask(width) != 0 {
        return Err(MinimizationError::OutOfRange { index, width });
    }
    Ok(())
}

/// Encode `index` as a bit pattern of exactly `width` characters
///
/// # Examples
///
/// ```
/// use qm_logic::codec::encode;
///
/// assert_eq!(encode(6, 4).unwrap(), "0110");
/// assert!(encode(8, 3).is_err());
/// ```
pub fn encode(index: u64, width: usize) -> Result<String, MinimizationError> {
    check_width(width)?;
    check_index(index, width)?;
    Ok((0..width)
        .rev()
        .map(|bit| if (index >> bit) & 1 == 1 { '1' } else { '0' })
        .collect())
}

/// Decode a concrete bit pattern (only `0` and `1`) back into its index
pub fn decode(pattern: &str) -> Result<u64, MinimizationError> {
    check_width(pattern.len())?;
    pattern
        .chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, c)| match c {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            character => Err(MinimizationError::InvalidPattern {
                pattern: pattern.into(),
                character,
                position,
            }),
        })
}

/// Number of bits needed to represent every index in `ones` and `dont_cares`
///
/// This is `ceil(log2(max + 1))`, except that a lone `0` still needs one bit.
pub fn bit_width(ones: &[u64], dont_cares: &[u64]) -> Result<usize, MinimizationError> {
    let max = ones
        .iter()
        .chain(dont_cares)
        .copied()
        .max()
        .ok_or(MinimizationError::EmptyInput)?;
    Ok((MAX_WIDTH - max.leading_zeros() as usize).max(1))
}
