use soroban_sdk::{contracttype, Address, Env};

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Supply accounting scalars. `total_supply` is authoritative; account
/// balances are derived as `gon_balance / gons_per_unit`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct SupplyState {
    pub total_supply: i128,
    pub gons_per_unit: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FlashConfig {
    pub fee_bps: u32,
    pub fee_sink: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllowanceEntry {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Supply,
    FlashConfig,
    GonBalance(Address),
    Allowance(Address, Address),
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_supply_state(env: &Env) -> Option<SupplyState> {
    env.storage().instance().get(&DataKey::Supply)
}

pub fn set_supply_state(env: &Env, state: &SupplyState) {
    env.storage().instance().set(&DataKey::Supply, state);
}

pub fn get_flash_config(env: &Env) -> Option<FlashConfig> {
    env.storage().instance().get(&DataKey::FlashConfig)
}

pub fn set_flash_config(env: &Env, config: &FlashConfig) {
    env.storage().instance().set(&DataKey::FlashConfig, config);
}

/// Reads an account's gon balance, extending the entry's TTL on touch.
/// Accounts with no entry hold zero gons.
pub fn get_gon_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::GonBalance(id.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(gons) => {
            env.storage().persistent().extend_ttl(
                &key,
                BALANCE_LIFETIME_THRESHOLD,
                BALANCE_BUMP_AMOUNT,
            );
            gons
        }
        None => 0,
    }
}

pub fn set_gon_balance(env: &Env, id: &Address, gons: i128) {
    let key = DataKey::GonBalance(id.clone());
    env.storage().persistent().set(&key, &gons);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

/// Allowances live in temporary storage: the entry's TTL is tied to its
/// expiration ledger, so expired grants simply vanish.
pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> Option<AllowanceEntry> {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    env.storage().temporary().get(&key)
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, entry: &AllowanceEntry) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    env.storage().temporary().set(&key, entry);

    if entry.amount > 0 {
        let live_for = entry
            .expiration_ledger
            .saturating_sub(env.ledger().sequence());
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}
