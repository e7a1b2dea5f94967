#![no_std]

use soroban_sdk::{contractclient, symbol_short, Address, Bytes, Env, Symbol};

/// Marker a receiver must return from `on_flash_loan` for the loan to settle.
/// Any other value aborts the loan even if repayment was arranged.
pub const FLASH_LOAN_OK: Symbol = symbol_short!("loan_ok");

/// Flash Loan Receiver Interface.
/// Contracts borrowing via `flash_loan` must implement this trait.
/// The token contract invokes `on_flash_loan` after minting `amount` to the
/// receiver. Before returning, the receiver MUST grant `initiator` (the token
/// contract) an allowance covering `amount + fee`, and return [`FLASH_LOAN_OK`].
#[contractclient(name = "FlashReceiverClient")]
pub trait FlashReceiver {
    fn on_flash_loan(
        env: Env,
        initiator: Address,
        unit: Address,
        amount: i128,
        fee: i128,
        data: Bytes,
    ) -> Symbol;
}
