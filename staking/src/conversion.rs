//! Conversion between shares and pooled value.
//!
//! Both directions take one [`PoolTotals`] snapshot so the two totals can
//! never come from different points in time.

use serde::{Deserialize, Serialize};

use crate::error::StakingError;

/// A consistent snapshot of the pool's totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTotals {
    pub total_shares: u128,
    pub total_pooled_value: u128,
}

impl PoolTotals {
    pub fn new(total_shares: u128, total_pooled_value: u128) -> Self {
        Self {
            total_shares,
            total_pooled_value,
        }
    }

    /// `pooled_amount × total_shares / total_pooled_value`, truncated.
    pub fn shares_for(&self, pooled_amount: u128) -> Result<u128, StakingError> {
        self.ensure_nonzero()?;
        mul_div(pooled_amount, self.total_shares, self.total_pooled_value)
    }

    /// `shares_amount × total_pooled_value / total_shares`, truncated.
    pub fn pooled_value_for(&self, shares_amount: u128) -> Result<u128, StakingError> {
        self.ensure_nonzero()?;
        mul_div(shares_amount, self.total_pooled_value, self.total_shares)
    }

    fn ensure_nonzero(&self) -> Result<(), StakingError> {
        if self.total_shares == 0 || self.total_pooled_value == 0 {
            return Err(StakingError::DivisionByZero);
        }
        Ok(())
    }
}

/// `a × b / d` with a 256-bit intermediate product.
///
/// Fails with `Overflow` only when the quotient itself does not fit in `u128`.
fn mul_div(a: u128, b: u128, d: u128) -> Result<u128, StakingError> {
    if d == 0 {
        return Err(StakingError::DivisionByZero);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / d);
    }
    let (hi, lo) = widening_mul(a, b);
    if hi >= d {
        return Err(StakingError::Overflow);
    }
    // Restoring long division of hi:lo by d. `rem < d` holds on entry to
    // every step, so the shifted remainder is below 2d.
    let mut rem = hi;
    let mut quotient = 0u128;
    for bit in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> bit) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quotient |= 1;
        }
    }
    Ok(quotient)
}

/// Full 256-bit product of two `u128`s as `(high, low)`.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a1, a0) = (a >> 64, a & MASK);
    let (b1, b0) = (b >> 64, b & MASK);

    let ll = a0 * b0;
    let lh = a0 * b1;
    let hl = a1 * b0;
    let hh = a1 * b1;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (ll & MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_to_one_rate() {
        let totals = PoolTotals::new(1000, 1000);
        assert_eq!(totals.shares_for(500).unwrap(), 500);
        assert_eq!(totals.pooled_value_for(500).unwrap(), 500);
    }

    #[test]
    fn truncates_toward_zero() {
        let totals = PoolTotals::new(1000, 1500);
        // 100 * 1000 / 1500 = 66.6
        assert_eq!(totals.shares_for(100).unwrap(), 66);
        // 1 * 1500 / 1000 = 1.5
        assert_eq!(totals.pooled_value_for(1).unwrap(), 1);
    }

    #[test]
    fn zero_totals_fail() {
        assert_eq!(
            PoolTotals::new(0, 1000).shares_for(1),
            Err(StakingError::DivisionByZero)
        );
        assert_eq!(
            PoolTotals::new(1000, 0).pooled_value_for(1),
            Err(StakingError::DivisionByZero)
        );
    }

    #[test]
    fn zero_amount_converts_to_zero() {
        let totals = PoolTotals::new(7, 11);
        assert_eq!(totals.shares_for(0).unwrap(), 0);
        assert_eq!(totals.pooled_value_for(0).unwrap(), 0);
    }

    #[test]
    fn large_values_use_wide_intermediate() {
        // 18-decimal amounts: 21M units, product far beyond u128.
        let supply = 21_000_000u128 * 10u128.pow(18);
        let totals = PoolTotals::new(supply, supply * 2);
        assert_eq!(totals.pooled_value_for(supply).unwrap(), supply * 2);
        assert_eq!(totals.shares_for(supply * 2).unwrap(), supply);
    }

    #[test]
    fn mul_div_matches_narrow_path() {
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX).unwrap(), u128::MAX);
        let p = 1u128 << 100;
        assert_eq!(mul_div(p, p, p).unwrap(), p);
        assert_eq!(mul_div(u128::MAX, 2, 4).unwrap(), u128::MAX / 2);
    }

    #[test]
    fn quotient_overflow_is_reported() {
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(StakingError::Overflow));
    }

    #[test]
    fn widening_mul_small() {
        assert_eq!(widening_mul(3, 4), (0, 12));
        assert_eq!(widening_mul(1 << 64, 1 << 64), (1, 0));
    }
}
