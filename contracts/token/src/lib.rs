#![no_std]

mod eligibility;
mod errors;
mod events;
mod fee;
mod flash_loan;
mod ledger;
mod storage;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; token is no_std so we must opt-in explicitly.

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

use errors::TokenError;
use events::TokenEvents;
use storage::{AllowanceEntry, FlashConfig};

fn require_admin(env: &Env) -> Result<Address, TokenError> {
    let admin = storage::get_admin(env).ok_or(TokenError::NotInitialized)?;
    admin.require_auth();
    Ok(admin)
}

/// Elastic-supply token with a flash loan facility.
///
/// Balances are held in gons (a fixed internal sub-unit pool); `rebase`
/// rescales the gon/unit rate so supply adjustments reach every holder
/// proportionally. Flash loans mint up to the full circulating supply to a
/// receiver contract for the duration of one invocation, then reclaim
/// principal plus fee through the allowance path and burn the principal,
/// leaving total supply unchanged.
#[contract]
pub struct TidalToken;

#[contractimpl]
impl TidalToken {
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if storage::has_admin(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: ledger::DECIMALS,
            name,
            symbol,
        });
        ledger::genesis(&env, &admin);
        // Reference fee policy: zero-rate, fee (if reconfigured) accrues to
        // the admin until a dedicated sink is set.
        storage::set_flash_config(
            &env,
            &FlashConfig {
                fee_bps: 0,
                fee_sink: admin,
            },
        );
        Ok(())
    }

    // -- SEP-41 token surface ------------------------------------------------

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        ledger::allowance(&env, &from, &spender)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), TokenError> {
        from.require_auth();
        storage::extend_instance_ttl(&env);

        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(TokenError::InvalidExpiration);
        }
        storage::set_allowance(
            &env,
            &from,
            &spender,
            &AllowanceEntry {
                amount,
                expiration_ledger,
            },
        );
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::extend_instance_ttl(&env);
        ledger::balance_of(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        storage::extend_instance_ttl(&env);

        ledger::transfer(&env, &from, &to, amount)?;
        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        storage::extend_instance_ttl(&env);

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }
        ledger::spend_allowance(&env, &from, &spender, amount)?;
        ledger::transfer(&env, &from, &to, amount)?;
        TokenUtils::new(&env).events().transfer(from, to, amount);
        Ok(())
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }

    pub fn total_supply(env: Env) -> Result<i128, TokenError> {
        ledger::total_supply(&env)
    }

    // -- Supply adjustment ---------------------------------------------------

    /// Adjusts total supply by `supply_delta` units (negative contracts),
    /// scaling every balance proportionally. Admin-only. Returns the new
    /// total supply.
    pub fn rebase(env: Env, supply_delta: i128) -> Result<i128, TokenError> {
        require_admin(&env)?;
        storage::extend_instance_ttl(&env);

        let new_supply = ledger::rebase(&env, supply_delta)?;
        TokenEvents::rebase(&env, supply_delta, new_supply);
        Ok(new_supply)
    }

    // -- Flash loan facility -------------------------------------------------

    /// Largest loan currently issuable in `unit`: the entire circulating
    /// supply. Fails with `UnsupportedUnit` for any unit but this contract.
    pub fn max_flash_loan(env: Env, unit: Address) -> Result<i128, TokenError> {
        eligibility::max_flash_loan(&env, &unit)
    }

    /// Fee owed for a hypothetical loan of `amount` of `unit`.
    pub fn flash_fee(env: Env, unit: Address, amount: i128) -> Result<i128, TokenError> {
        fee::compute_flash_fee(&env, &unit, amount)
    }

    /// Lends `amount` of this token to `receiver` for the duration of this
    /// invocation. See [`flash_loan::execute_flash_loan`] for the protocol.
    pub fn flash_loan(
        env: Env,
        receiver: Address,
        unit: Address,
        amount: i128,
        data: Bytes,
    ) -> Result<(), TokenError> {
        storage::extend_instance_ttl(&env);
        flash_loan::execute_flash_loan(&env, &receiver, &unit, amount, &data)
    }

    // -- Fee policy administration -------------------------------------------

    pub fn set_flash_fee(env: Env, fee_bps: u32) -> Result<(), TokenError> {
        require_admin(&env)?;
        storage::extend_instance_ttl(&env);

        if fee_bps > fee::MAX_FEE_BPS {
            return Err(TokenError::InvalidAmount);
        }
        let mut config = storage::get_flash_config(&env).ok_or(TokenError::NotInitialized)?;
        config.fee_bps = fee_bps;
        storage::set_flash_config(&env, &config);
        TokenEvents::flash_fee_updated(&env, fee_bps);
        Ok(())
    }

    pub fn set_fee_sink(env: Env, sink: Address) -> Result<(), TokenError> {
        require_admin(&env)?;
        storage::extend_instance_ttl(&env);

        let mut config = storage::get_flash_config(&env).ok_or(TokenError::NotInitialized)?;
        config.fee_sink = sink.clone();
        storage::set_flash_config(&env, &config);
        TokenEvents::fee_sink_updated(&env, &sink);
        Ok(())
    }
}
