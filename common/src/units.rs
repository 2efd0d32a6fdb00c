//! Helpers for expressing token amounts in their fixed-point representation

use alloy::primitives::U256;

use crate::constants::BASE_TEN;

/// Scales `amount` by `10^decimals`, e.g. `bn(505, 16)` is 5.05 tokens of an
/// 18-decimal token
pub fn bn(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::from(BASE_TEN).pow(U256::from(decimals))
}
