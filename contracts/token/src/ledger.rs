use soroban_sdk::{Address, Env};

use crate::{
    errors::TokenError,
    storage::{
        get_allowance, get_gon_balance, get_supply_state, set_allowance, set_gon_balance,
        set_supply_state, AllowanceEntry, SupplyState,
    },
};

pub const DECIMALS: u32 = 9;

/// Genesis supply: 50 million whole units at 9 decimal places.
pub const INITIAL_SUPPLY: i128 = 50_000_000 * 1_000_000_000;

/// Gons are the internal sub-unit balances are stored in. The total gon pool
/// is fixed at genesis; `rebase` rescales the gon/unit conversion rate, which
/// scales every balance proportionally without touching per-account storage.
const GONS_PER_UNIT_AT_GENESIS: i128 = 1_000_000_000_000_000_000;
pub const TOTAL_GONS: i128 = INITIAL_SUPPLY * GONS_PER_UNIT_AT_GENESIS;

/// Supply ceiling for rebase. At this supply `gons_per_unit` reaches 1, the
/// finest granularity the gon pool can represent.
pub const MAX_SUPPLY: i128 = TOTAL_GONS;

pub fn supply_state(env: &Env) -> Result<SupplyState, TokenError> {
    get_supply_state(env).ok_or(TokenError::NotInitialized)
}

pub fn total_supply(env: &Env) -> Result<i128, TokenError> {
    Ok(supply_state(env)?.total_supply)
}

/// External-unit balance of `id`. Zero for unknown accounts and before
/// initialization.
pub fn balance_of(env: &Env, id: &Address) -> i128 {
    match get_supply_state(env) {
        Some(state) => get_gon_balance(env, id) / state.gons_per_unit,
        None => 0,
    }
}

/// Writes the genesis supply state and assigns the entire gon pool to
/// `holder`. Called exactly once, from `initialize`.
pub fn genesis(env: &Env, holder: &Address) {
    set_supply_state(
        env,
        &SupplyState {
            total_supply: INITIAL_SUPPLY,
            gons_per_unit: GONS_PER_UNIT_AT_GENESIS,
        },
    );
    set_gon_balance(env, holder, TOTAL_GONS);
}

fn to_gons(state: &SupplyState, amount: i128) -> Result<i128, TokenError> {
    amount
        .checked_mul(state.gons_per_unit)
        .ok_or(TokenError::Overflow)
}

/// Moves `amount` units from `from` to `to`. Fails with `InvalidAmount` for
/// non-positive amounts and `InsufficientBalance` when `from` cannot cover it.
pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    let state = supply_state(env)?;
    let gons = to_gons(&state, amount)?;

    let from_gons = get_gon_balance(env, from);
    if from_gons < gons {
        return Err(TokenError::InsufficientBalance);
    }
    set_gon_balance(env, from, from_gons - gons);

    let to_gons_balance = get_gon_balance(env, to)
        .checked_add(gons)
        .ok_or(TokenError::Overflow)?;
    set_gon_balance(env, to, to_gons_balance);
    Ok(())
}

/// Credits `amount` freshly minted units to `to`, growing total supply.
///
/// `gons_per_unit` is left untouched: mint and burn adjust the gon pool and
/// the supply scalar by exactly matching amounts, so a mint followed by an
/// equal burn within one invocation restores both sides bit-for-bit. Only
/// `rebase` rescales the conversion rate.
pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    let mut state = supply_state(env)?;
    let gons = to_gons(&state, amount)?;

    state.total_supply = state
        .total_supply
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    set_supply_state(env, &state);

    let to_gons_balance = get_gon_balance(env, to)
        .checked_add(gons)
        .ok_or(TokenError::Overflow)?;
    set_gon_balance(env, to, to_gons_balance);
    Ok(())
}

/// Destroys `amount` units held by `from`, shrinking total supply. Exact
/// inverse of [`mint`] with respect to both the supply scalar and the gon
/// pool.
pub fn burn(env: &Env, from: &Address, amount: i128) -> Result<(), TokenError> {
    if amount <= 0 {
        return Err(TokenError::InvalidAmount);
    }
    let mut state = supply_state(env)?;
    let gons = to_gons(&state, amount)?;

    let from_gons = get_gon_balance(env, from);
    if from_gons < gons {
        return Err(TokenError::InsufficientBalance);
    }
    set_gon_balance(env, from, from_gons - gons);

    state.total_supply = state
        .total_supply
        .checked_sub(amount)
        .ok_or(TokenError::Overflow)?;
    set_supply_state(env, &state);
    Ok(())
}

/// Current allowance from `from` to `spender`, zero once expired.
pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    match get_allowance(env, from, spender) {
        Some(entry) if entry.expiration_ledger >= env.ledger().sequence() => entry.amount,
        _ => 0,
    }
}

/// Consumes `amount` of the allowance `from` granted `spender`.
pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), TokenError> {
    let entry = get_allowance(env, from, spender).ok_or(TokenError::InsufficientAllowance)?;
    if entry.expiration_ledger < env.ledger().sequence() || entry.amount < amount {
        return Err(TokenError::InsufficientAllowance);
    }
    set_allowance(
        env,
        from,
        spender,
        &AllowanceEntry {
            amount: entry.amount - amount,
            expiration_ledger: entry.expiration_ledger,
        },
    );
    Ok(())
}

/// Authorized transfer-out used for flash loan reconciliation: spends the
/// allowance `from` granted this contract, then pulls `amount` into the
/// contract's own balance. Fails cleanly, with no partial movement, when the
/// allowance or the balance is short.
pub fn debit(env: &Env, from: &Address, amount: i128) -> Result<(), TokenError> {
    let contract = env.current_contract_address();
    spend_allowance(env, from, &contract, amount)?;
    transfer(env, from, &contract, amount)
}

/// Adjusts total supply by `supply_delta` and rescales `gons_per_unit`,
/// which scales every holder's balance proportionally. Clamps at
/// [`MAX_SUPPLY`]; contracting below one unit is rejected. Returns the new
/// supply.
///
/// Derived balances may round down by up to one unit per holder after a
/// rebase; the supply scalar stays exact.
pub fn rebase(env: &Env, supply_delta: i128) -> Result<i128, TokenError> {
    let mut state = supply_state(env)?;
    if supply_delta == 0 {
        return Ok(state.total_supply);
    }

    let mut new_supply = state
        .total_supply
        .checked_add(supply_delta)
        .ok_or(TokenError::Overflow)?;
    if new_supply < 1 {
        return Err(TokenError::InvalidAmount);
    }
    if new_supply > MAX_SUPPLY {
        new_supply = MAX_SUPPLY;
    }

    state.total_supply = new_supply;
    state.gons_per_unit = TOTAL_GONS / new_supply;
    set_supply_state(env, &state);
    Ok(new_supply)
}
