#![no_std]

use soroban_sdk::{
    contract, contractimpl, symbol_short, token::TokenClient, Address, Bytes, Env, Symbol,
};
use tidal_flash_receiver_interface::{FlashReceiver, FLASH_LOAN_OK};

#[contract]
pub struct MockFlashReceiver;

#[contractimpl]
impl FlashReceiver for MockFlashReceiver {
    /// Behavior is selected by the opaque `data` payload:
    /// * `"repay"`  — approve `initiator` for `amount + fee`, return the marker.
    /// * `"reject"` — approve repayment but return the wrong marker.
    /// * anything else ("steal") — keep the funds and claim success; the
    ///   reconciliation debit fails without an allowance.
    fn on_flash_loan(
        env: Env,
        initiator: Address,
        unit: Address,
        amount: i128,
        fee: i128,
        data: Bytes,
    ) -> Symbol {
        let repay = Bytes::from_slice(&env, b"repay");
        let reject = Bytes::from_slice(&env, b"reject");

        if data == repay || data == reject {
            let me = env.current_contract_address();
            let expiration = env.ledger().sequence() + 1;
            TokenClient::new(&env, &unit).approve(&me, &initiator, &(amount + fee), &expiration);
        }

        if data == reject {
            symbol_short!("no_loan")
        } else {
            FLASH_LOAN_OK
        }
    }
}
