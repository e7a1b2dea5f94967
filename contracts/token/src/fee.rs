use soroban_sdk::{Address, Env};

use crate::{errors::TokenError, ledger, storage::get_flash_config};

pub const BPS_DENOMINATOR: i128 = 10_000;

/// Upper bound for the configurable flash fee rate (100%).
pub const MAX_FEE_BPS: u32 = 10_000;

/// Pure bps fee math: `amount * fee_bps / 10_000`, truncating. `None` on
/// multiplication overflow.
pub fn fee_for(amount: i128, fee_bps: u32) -> Option<i128> {
    amount
        .checked_mul(fee_bps as i128)
        .map(|v| v / BPS_DENOMINATOR)
}

/// Computes the flash-loan fee for borrowing `amount` of `unit`.
///
/// Validates its own preconditions rather than relying on the eligibility
/// check, since callers may query the fee without ever borrowing:
/// * `unit` must be this contract's address, else `UnsupportedUnit`;
/// * `amount` must be positive and within current total supply, else
///   `InvalidAmount`.
///
/// Read-only. The reference deployment configures `fee_bps = 0`, so the fee
/// is zero; the rate is admin-adjustable via `set_flash_fee`.
pub fn compute_flash_fee(env: &Env, unit: &Address, amount: i128) -> Result<i128, TokenError> {
    if *unit != env.current_contract_address() {
        return Err(TokenError::UnsupportedUnit);
    }
    let supply = ledger::total_supply(env)?;
    if amount <= 0 || amount > supply {
        return Err(TokenError::InvalidAmount);
    }

    let fee_bps = get_flash_config(env).map(|c| c.fee_bps).unwrap_or(0);
    fee_for(amount, fee_bps).ok_or(TokenError::Overflow)
}
