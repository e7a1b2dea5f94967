use soroban_sdk::{Address, Bytes, Env};

use tidal_flash_receiver_interface::{FlashReceiverClient, FLASH_LOAN_OK};

use crate::{
    eligibility,
    errors::TokenError,
    events::TokenEvents,
    fee,
    ledger,
    storage::get_flash_config,
};

/// Maximum allowed byte length for the `data` payload passed to the receiver.
const MAX_PAYLOAD_SIZE: u32 = 256;

/// Executes an uncollateralized single-invocation loan of the token's own
/// unit.
///
/// # Flow
/// 1. **Pre-flight checks** — payload size, unit match, amount within supply.
/// 2. **Fee** — `compute_flash_fee`; zero is a valid fee.
/// 3. **Issue** — snapshot total supply, mint `amount` to `receiver`. Supply
///    now exceeds the snapshot by `amount`; steps 5–6 restore it.
/// 4. **Callback** — invoke `receiver.on_flash_loan(...)`. The receiver must
///    grant this contract an allowance of `amount + fee` before returning,
///    and return [`FLASH_LOAN_OK`]. The return value alone settles nothing:
///    repayment is verified by the debit in step 5, not taken on trust.
/// 5. **Reconcile** — debit `amount + fee` from `receiver` through the
///    allowance path. Any shortfall of balance or allowance aborts the loan.
/// 6. **Burn + route fee** — burn the reclaimed principal; credit the fee, if
///    any, to the configured fee sink.
/// 7. **Invariant** — total supply must equal the step-3 snapshot. Steps 3
///    and 6 guarantee this arithmetically; the re-check catches fee-policy or
///    ledger defects before commit.
/// 8. **Emit event.**
///
/// Soroban rolls back all storage writes and sub-invocations when the
/// invocation returns `Err`, so a failed loan never visibly happened — the
/// transient mint included.
///
/// A reentrant borrow from inside the callback is not locked out: it must
/// independently pass eligibility and repayment within the same invocation,
/// and unwinds together with the outer loan on any failure.
///
/// # Errors
/// | Error                   | Condition                                        |
/// |-------------------------|--------------------------------------------------|
/// | `FlashPayloadTooLarge`  | `data.len() > MAX_PAYLOAD_SIZE` (256 bytes)      |
/// | `UnsupportedUnit`       | `unit` is not this contract's address            |
/// | `InvalidAmount`         | `amount <= 0` or `amount > total_supply`         |
/// | `CallbackRejected`      | Receiver returned something other than the marker|
/// | `RepaymentInsufficient` | Post-callback debit of `amount + fee` failed     |
/// | `InvariantViolation`    | Post-loan supply differs from the snapshot       |
/// | `Overflow`              | Arithmetic overflow sizing the repayment         |
pub fn execute_flash_loan(
    env: &Env,
    receiver: &Address,
    unit: &Address,
    amount: i128,
    data: &Bytes,
) -> Result<(), TokenError> {
    // -----------------------------------------------------------------------
    // 1. Pre-flight checks (no state mutation)
    // -----------------------------------------------------------------------

    if data.len() > MAX_PAYLOAD_SIZE {
        return Err(TokenError::FlashPayloadTooLarge);
    }

    eligibility::check_eligible(env, unit, amount)?;

    // -----------------------------------------------------------------------
    // 2. Fee calculation
    // -----------------------------------------------------------------------

    let fee = fee::compute_flash_fee(env, unit, amount)?;

    // -----------------------------------------------------------------------
    // 3. Issue: snapshot supply, mint principal to the receiver
    // -----------------------------------------------------------------------

    let supply_before = ledger::total_supply(env)?;
    ledger::mint(env, receiver, amount)?;

    // -----------------------------------------------------------------------
    // 4. Invoke receiver callback
    // -----------------------------------------------------------------------

    // `initiator` is this contract's address: the spender the receiver must
    // approve for repayment. A receiver that does not export `on_flash_loan`
    // traps the host, failing the whole invocation.
    let contract = env.current_contract_address();
    let marker = FlashReceiverClient::new(env, receiver)
        .on_flash_loan(&contract, unit, &amount, &fee, data);

    if marker != FLASH_LOAN_OK {
        return Err(TokenError::CallbackRejected);
    }

    // -----------------------------------------------------------------------
    // 5. Reconcile: pull principal + fee back through the allowance path
    // -----------------------------------------------------------------------

    let repayment = amount.checked_add(fee).ok_or(TokenError::Overflow)?;
    ledger::debit(env, receiver, repayment).map_err(|_| TokenError::RepaymentInsufficient)?;

    // -----------------------------------------------------------------------
    // 6. Burn reclaimed principal; route the fee to its sink
    // -----------------------------------------------------------------------

    ledger::burn(env, &contract, amount)?;

    if fee > 0 {
        let sink = get_flash_config(env)
            .map(|c| c.fee_sink)
            .ok_or(TokenError::NotInitialized)?;
        ledger::transfer(env, &contract, &sink, fee)?;
    }

    // -----------------------------------------------------------------------
    // 7. Supply invariant re-check
    // -----------------------------------------------------------------------

    if ledger::total_supply(env)? != supply_before {
        return Err(TokenError::InvariantViolation);
    }

    // -----------------------------------------------------------------------
    // 8. Emit event
    // -----------------------------------------------------------------------

    TokenEvents::flash_loan(env, receiver, amount, fee);

    Ok(())
}
