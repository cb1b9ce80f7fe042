use crate::interfaces::AdminClient;
use crate::storage;
use crate::types::{Pool, RegisteredUser, Round, Sale, SaleError};
use soroban_sdk::{Address, Env, Vec};

// ============================================================================
// VALIDAÇÕES
// ============================================================================

/// Valida o privilégio do caller junto ao contrato de access control
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), SaleError> {
    let admin = storage::get_admin(env);
    let client = AdminClient::new(env, &admin);
    if !client.is_admin(caller) {
        return Err(SaleError::Unauthorized);
    }
    Ok(())
}

/// Valida se o contrato não está pausado
pub fn require_not_paused(env: &Env) -> Result<(), SaleError> {
    if storage::is_paused(env) {
        return Err(SaleError::Paused);
    }
    Ok(())
}

/// Valida se o amount é válido (> 0)
pub fn require_positive_amount(amount: i128) -> Result<(), SaleError> {
    if amount <= 0 {
        return Err(SaleError::WrongAmount);
    }
    Ok(())
}

/// Valida se a venda foi inicializada e a devolve
pub fn require_sale(env: &Env) -> Result<Sale, SaleError> {
    storage::get_sale(env).ok_or(SaleError::SaleNotInitialized)
}

/// Valida se o ledger de staking foi configurado e devolve seu endereço
pub fn require_staking(env: &Env) -> Result<Address, SaleError> {
    storage::get_staking(env).ok_or(SaleError::StakingNotSet)
}

/// Valida se os rounds foram configurados e os devolve
pub fn require_rounds(env: &Env) -> Result<Vec<Round>, SaleError> {
    storage::get_rounds(env).ok_or(SaleError::RoundsNotSet)
}

/// Valida se os pools foram configurados e os devolve
pub fn require_pools(env: &Env) -> Result<Vec<Pool>, SaleError> {
    storage::get_pools(env).ok_or(SaleError::PoolsNotSet)
}

/// Valida se o endereço está registrado no whitelist e devolve o registro
pub fn require_registered(env: &Env, addr: &Address) -> Result<RegisteredUser, SaleError> {
    storage::get_user(env, addr).ok_or(SaleError::NotInWhitelist)
}
