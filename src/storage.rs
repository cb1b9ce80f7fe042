use crate::types::{Pool, RegisteredUser, Round, Sale};
use soroban_sdk::{symbol_short, Address, Env, Vec};

// ============================================================================
// CONSTANTES
// ============================================================================

/// Quantidade fixa de rounds: whitelist, buffer, round1, round2, distribution
pub const ROUNDS_COUNT: u32 = 5;

/// Quantidade fixa de belts/pools
pub const POOLS_COUNT: u32 = 8;

/// Sentinela de classificação: stake abaixo do menor belt
pub const BELT_NOT_ASSIGNED: u32 = POOLS_COUNT;

/// Intervalo mínimo entre o fim do buffer e o início do round1 (1 hora),
/// tempo reservado para o cálculo das alocações máximas
pub const MIN_BUFFER_TO_ROUND1_GAP: u64 = 3_600;

/// Soma exata exigida dos pesos dos pools
pub const WEIGHTS_SUM: u32 = 100;

/// TTL para storage crítico (1 ano em ledgers ~= 6.3M ledgers)
const CRITICAL_STORAGE_TTL: u32 = 6_307_200;

/// TTL threshold para bump (30 dias ~= 518K ledgers)
const CRITICAL_STORAGE_THRESHOLD: u32 = 518_400;

// ============================================================================
// FUNÇÕES DE BUMP (TTL)
// ============================================================================

/// Faz bump do TTL do storage de instância (admin, sale, rounds, pools)
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(CRITICAL_STORAGE_THRESHOLD, CRITICAL_STORAGE_TTL);
}

/// Faz bump do TTL do registro de um usuário
pub fn bump_user(env: &Env, addr: &Address) {
    let key = (symbol_short!("user"), addr.clone());
    env.storage()
        .persistent()
        .extend_ttl(&key, CRITICAL_STORAGE_THRESHOLD, CRITICAL_STORAGE_TTL);
}

// ============================================================================
// ADMIN (contrato de access control)
// ============================================================================

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&symbol_short!("admin"))
}

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&symbol_short!("admin")).unwrap()
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&symbol_short!("admin"), admin);
}

// ============================================================================
// ZAM STAKING (ledger externo de stake)
// ============================================================================

pub fn get_staking(env: &Env) -> Option<Address> {
    env.storage().instance().get(&symbol_short!("staking"))
}

pub fn set_staking(env: &Env, staking: &Address) {
    env.storage().instance().set(&symbol_short!("staking"), staking);
}

// ============================================================================
// PAUSED
// ============================================================================

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&symbol_short!("paused"))
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&symbol_short!("paused"), &paused);
}

// ============================================================================
// SALE
// ============================================================================

pub fn get_sale(env: &Env) -> Option<Sale> {
    env.storage().instance().get(&symbol_short!("sale"))
}

pub fn set_sale(env: &Env, sale: &Sale) {
    env.storage().instance().set(&symbol_short!("sale"), sale);
}

// ============================================================================
// ROUNDS
// ============================================================================

pub fn has_rounds(env: &Env) -> bool {
    env.storage().instance().has(&symbol_short!("rounds"))
}

pub fn get_rounds(env: &Env) -> Option<Vec<Round>> {
    env.storage().instance().get(&symbol_short!("rounds"))
}

pub fn set_rounds(env: &Env, rounds: &Vec<Round>) {
    env.storage().instance().set(&symbol_short!("rounds"), rounds);
}

// ============================================================================
// POOLS
// ============================================================================

pub fn has_pools(env: &Env) -> bool {
    env.storage().instance().has(&symbol_short!("pools"))
}

pub fn get_pools(env: &Env) -> Option<Vec<Pool>> {
    env.storage().instance().get(&symbol_short!("pools"))
}

pub fn set_pools(env: &Env, pools: &Vec<Pool>) {
    env.storage().instance().set(&symbol_short!("pools"), pools);
}

// ============================================================================
// USUÁRIOS REGISTRADOS
// ============================================================================

pub fn get_user(env: &Env, addr: &Address) -> Option<RegisteredUser> {
    let key = (symbol_short!("user"), addr.clone());
    env.storage().persistent().get(&key)
}

pub fn set_user(env: &Env, addr: &Address, user: &RegisteredUser) {
    let key = (symbol_short!("user"), addr.clone());
    env.storage().persistent().set(&key, user);
}

pub fn get_users_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&symbol_short!("usercnt"))
        .unwrap_or(0)
}

fn set_users_count(env: &Env, count: u32) {
    env.storage().instance().set(&symbol_short!("usercnt"), &count);
}

/// Índice de paginação: posição de join -> endereço
pub fn get_user_by_index(env: &Env, index: u32) -> Option<Address> {
    let key = (symbol_short!("useridx"), index);
    env.storage().persistent().get(&key)
}

/// Anexa o endereço ao índice de join e devolve a nova contagem
pub fn push_user_index(env: &Env, addr: &Address) -> u32 {
    let count = get_users_count(env);
    let key = (symbol_short!("useridx"), count);
    env.storage().persistent().set(&key, addr);
    set_users_count(env, count + 1);
    count + 1
}
