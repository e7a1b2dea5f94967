use soroban_sdk::{Address, Env};

use crate::{errors::TokenError, ledger};

/// Validates a loan request before any state mutation.
///
/// Loans are only issuable in this contract's own unit, and only for
/// `0 < amount <= total_supply`. Deliberately re-checks the same
/// preconditions as the fee policy: the two are reachable through separate
/// entry points and neither may assume the other ran.
pub fn check_eligible(env: &Env, unit: &Address, amount: i128) -> Result<(), TokenError> {
    if *unit != env.current_contract_address() {
        return Err(TokenError::UnsupportedUnit);
    }
    let supply = ledger::total_supply(env)?;
    if amount <= 0 || amount > supply {
        return Err(TokenError::InvalidAmount);
    }
    Ok(())
}

/// Largest loan currently issuable: the entire circulating supply.
pub fn max_flash_loan(env: &Env, unit: &Address) -> Result<i128, TokenError> {
    if *unit != env.current_contract_address() {
        return Err(TokenError::UnsupportedUnit);
    }
    ledger::total_supply(env)
}
