use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub struct TokenEvents;

impl TokenEvents {
    /// Emits a `rebase` event after a supply adjustment.
    ///
    /// Topics: `("rebase",)`
    /// Data:   `(supply_delta, total_supply)`
    pub fn rebase(env: &Env, supply_delta: i128, total_supply: i128) {
        env.events()
            .publish((symbol_short!("rebase"),), (supply_delta, total_supply));
    }

    /// Emits a `flash_loan` event after a settled loan.
    ///
    /// Topics: `("flash_loan", receiver)`
    /// Data:   `(amount, fee)`
    ///
    /// "flash_loan" = 10 chars → exceeds the 9-char symbol_short! limit,
    /// so we use Symbol::new for a runtime allocation.
    pub fn flash_loan(env: &Env, receiver: &Address, amount: i128, fee: i128) {
        env.events().publish(
            (Symbol::new(env, "flash_loan"), receiver.clone()),
            (amount, fee),
        );
    }

    pub fn flash_fee_updated(env: &Env, fee_bps: u32) {
        env.events().publish((symbol_short!("fee_bps"),), fee_bps);
    }

    pub fn fee_sink_updated(env: &Env, sink: &Address) {
        env.events()
            .publish((symbol_short!("fee_sink"),), sink.clone());
    }
}
