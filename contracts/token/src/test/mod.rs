#![cfg(test)]

// ---------------------------------------------------------------------------
// tidal-token test suite
//
// Structure
// ─────────
// 1. mod.rs      — shared Setup plus the mock receiver contracts used by the
//                  flash loan and rebase suites. Each receiver lives in its
//                  own submodule to avoid collisions between the free items
//                  `contractimpl` generates.
// 2. flash_loan  — fee math unit tests, query/pre-flight validation, and the
//                  full loan lifecycle (cooperative, thieving, rejecting,
//                  nested, and invariant-breaking receivers).
// 3. token       — SEP-41 surface: transfers, allowances, ledger primitives.
// 4. rebase      — proportional supply adjustment and its interplay with the
//                  loan facility.
// 5. events      — TokenEvents emission.
// ---------------------------------------------------------------------------


use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::{TidalToken, TidalTokenClient};

pub struct Setup<'a> {
    pub env: Env,
    pub admin: Address,
    pub token_id: Address,
    pub token: TidalTokenClient<'a>,
}

impl<'a> Setup<'a> {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let token_id = env.register_contract(None, TidalToken);
        let token = TidalTokenClient::new(&env, &token_id);
        token.initialize(
            &admin,
            &String::from_str(&env, "Tidal"),
            &String::from_str(&env, "TDL"),
        );

        Setup {
            env,
            admin,
            token_id,
            token,
        }
    }
}

// ---------------------------------------------------------------------------
// Mock receiver that grants the repayment allowance and returns the marker.
// ---------------------------------------------------------------------------
pub mod good_receiver_mod {
    use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env, Symbol};
    use tidal_flash_receiver_interface::FLASH_LOAN_OK;

    #[contract]
    pub struct GoodReceiver;

    #[contractimpl]
    impl GoodReceiver {
        /// Approves `initiator` (the token contract) for principal + fee.
        pub fn on_flash_loan(
            env: Env,
            initiator: Address,
            unit: Address,
            amount: i128,
            fee: i128,
            _data: Bytes,
        ) -> Symbol {
            let me = env.current_contract_address();
            let expiration = env.ledger().sequence() + 100;
            TokenClient::new(&env, &unit).approve(&me, &initiator, &(amount + fee), &expiration);
            FLASH_LOAN_OK
        }
    }
}

// ---------------------------------------------------------------------------
// Mock receiver that claims success but never arranges repayment.
// ---------------------------------------------------------------------------
pub mod bad_receiver_mod {
    use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, Symbol};
    use tidal_flash_receiver_interface::FLASH_LOAN_OK;

    #[contract]
    pub struct BadReceiver;

    #[contractimpl]
    impl BadReceiver {
        /// Returns the marker without granting any allowance. The marker is
        /// advisory only, so the reconciliation debit must still fail.
        pub fn on_flash_loan(
            _env: Env,
            _initiator: Address,
            _unit: Address,
            _amount: i128,
            _fee: i128,
            _data: Bytes,
        ) -> Symbol {
            FLASH_LOAN_OK
        }
    }
}

// ---------------------------------------------------------------------------
// Mock receiver that repays faithfully but returns the wrong marker.
// ---------------------------------------------------------------------------
pub mod reject_receiver_mod {
    use soroban_sdk::{
        contract, contractimpl, symbol_short, token::TokenClient, Address, Bytes, Env, Symbol,
    };

    #[contract]
    pub struct RejectReceiver;

    #[contractimpl]
    impl RejectReceiver {
        pub fn on_flash_loan(
            env: Env,
            initiator: Address,
            unit: Address,
            amount: i128,
            fee: i128,
            _data: Bytes,
        ) -> Symbol {
            let me = env.current_contract_address();
            let expiration = env.ledger().sequence() + 100;
            TokenClient::new(&env, &unit).approve(&me, &initiator, &(amount + fee), &expiration);
            symbol_short!("no_loan")
        }
    }
}

// ---------------------------------------------------------------------------
// Contract that does not export `on_flash_loan` at all.
// ---------------------------------------------------------------------------
pub mod deaf_receiver_mod {
    use soroban_sdk::{contract, contractimpl};

    #[contract]
    pub struct DeafReceiver;

    #[contractimpl]
    impl DeafReceiver {}
}

// ---------------------------------------------------------------------------
// Mock receiver that rebases the token mid-callback (it must be installed as
// the token admin). Repays faithfully, so the failure it provokes is the
// final supply invariant re-check, not the debit.
// ---------------------------------------------------------------------------
pub mod rebasing_receiver_mod {
    use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env, Symbol};
    use tidal_flash_receiver_interface::FLASH_LOAN_OK;

    use crate::TidalTokenClient;

    #[contract]
    pub struct RebasingReceiver;

    #[contractimpl]
    impl RebasingReceiver {
        pub fn on_flash_loan(
            env: Env,
            initiator: Address,
            unit: Address,
            amount: i128,
            fee: i128,
            _data: Bytes,
        ) -> Symbol {
            TidalTokenClient::new(&env, &unit).rebase(&1_000_000_000_i128);

            let me = env.current_contract_address();
            let expiration = env.ledger().sequence() + 100;
            TokenClient::new(&env, &unit).approve(&me, &initiator, &(amount + fee), &expiration);
            FLASH_LOAN_OK
        }
    }
}

// ---------------------------------------------------------------------------
// Mock receiver that takes a second loan from inside the callback. The inner
// borrow passes eligibility and repayment on its own; both loans settle.
// ---------------------------------------------------------------------------
pub mod nested_receiver_mod {
    use soroban_sdk::{contract, contractimpl, token::TokenClient, Address, Bytes, Env, Symbol};
    use tidal_flash_receiver_interface::FLASH_LOAN_OK;

    use crate::TidalTokenClient;

    #[contract]
    pub struct NestedReceiver;

    #[contractimpl]
    impl NestedReceiver {
        pub fn on_flash_loan(
            env: Env,
            initiator: Address,
            unit: Address,
            amount: i128,
            fee: i128,
            data: Bytes,
        ) -> Symbol {
            let me = env.current_contract_address();
            let outer = Bytes::from_slice(&env, b"outer");

            if data == outer {
                let inner_data = Bytes::from_slice(&env, b"inner");
                TidalTokenClient::new(&env, &unit).flash_loan(
                    &me,
                    &unit,
                    &(amount / 2),
                    &inner_data,
                );
            }

            let expiration = env.ledger().sequence() + 100;
            TokenClient::new(&env, &unit).approve(&me, &initiator, &(amount + fee), &expiration);
            FLASH_LOAN_OK
        }
    }
}
