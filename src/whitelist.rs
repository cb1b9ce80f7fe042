use crate::belts;
use crate::events;
use crate::interfaces::ZamStakingClient;
use crate::schedule;
use crate::storage::{self, BELT_NOT_ASSIGNED};
use crate::types::{Phase, RegisteredUser, SaleError};
use soroban_sdk::{Address, Env, Vec};

// ============================================================================
// WHITELIST REGISTRY
// ============================================================================

/// Registra o caller no whitelist com o belt que seu stake corrente
/// sustenta. O caller precisa informar exatamente o índice que corresponde
/// ao próprio stake: isso impede tanto reivindicar um tier acima quanto
/// esconder-se num tier abaixo.
pub fn join(env: &Env, caller: &Address, requested_belt: u32) -> Result<(), SaleError> {
    let rounds = storage::get_rounds(env).ok_or(SaleError::RoundsNotSet)?;
    let mut pools = storage::get_pools(env).ok_or(SaleError::PoolsNotSet)?;

    if schedule::phase_at(&rounds, env.ledger().timestamp()) != Phase::Whitelist {
        return Err(SaleError::OnlyWhitelistTime);
    }
    if storage::get_user(env, caller).is_some() {
        return Err(SaleError::JoinedTwice);
    }

    // Snapshot do stake no momento do join: não é relido depois
    let staking = storage::get_staking(env).ok_or(SaleError::StakingNotSet)?;
    let stake = ZamStakingClient::new(env, &staking).staked_balance_of(caller);

    let belt = belts::classify(&pools, stake);
    if belt == BELT_NOT_ASSIGNED {
        return Err(SaleError::StakeNotEnough);
    }
    if belt != requested_belt {
        return Err(SaleError::BeltMismatch);
    }

    let user = RegisteredUser {
        belt,
        staked_zam: stake,
        has_nft: false,
        bought_round1: 0,
        bought_round2: 0,
    };
    storage::set_user(env, caller, &user);
    storage::push_user_index(env, caller);
    storage::bump_user(env, caller);

    // Todo mundo entra sem bônus; set_nfts migra os contadores depois
    let mut pool = pools.get_unchecked(belt);
    pool.users_without_nft += 1;
    pools.set(belt, pool);
    storage::set_pools(env, &pools);

    events::emit_join(env, caller, belt, stake);
    Ok(())
}

/// Atualiza as flags de NFT de usuários já registrados. Permitido somente
/// depois dos rounds configurados e estritamente antes do round1 abrir.
/// Regravável: a última escrita vence. Tudo-ou-nada: o lote inteiro é
/// validado antes de qualquer escrita.
pub fn set_nfts(
    env: &Env,
    addresses: &Vec<Address>,
    flags: &Vec<bool>,
) -> Result<(), SaleError> {
    let rounds = storage::get_rounds(env).ok_or(SaleError::RoundsNotSet)?;

    let round1 = rounds.get_unchecked(2);
    if env.ledger().timestamp() >= round1.start_time {
        return Err(SaleError::OnlyBeforeSaleTime);
    }
    if addresses.is_empty() || addresses.len() != flags.len() {
        return Err(SaleError::WrongData);
    }

    for addr in addresses.iter() {
        if storage::get_user(env, &addr).is_none() {
            return Err(SaleError::UserNotRegistered);
        }
    }

    // Migra os contadores por pool junto com a flag: o cálculo de tetos
    // na fase Buffer lê essas contagens. Releitura por endereço para que
    // duplicatas no lote migrem no máximo uma vez.
    let mut pools = storage::get_pools(env).ok_or(SaleError::PoolsNotSet)?;
    for (i, addr) in addresses.iter().enumerate() {
        let mut user = storage::get_user(env, &addr).ok_or(SaleError::UserNotRegistered)?;
        let flag = flags.get_unchecked(i as u32);
        if user.has_nft != flag {
            let mut pool = pools.get_unchecked(user.belt);
            if flag {
                pool.users_without_nft -= 1;
                pool.users_with_nft += 1;
            } else {
                pool.users_with_nft -= 1;
                pool.users_without_nft += 1;
            }
            pools.set(user.belt, pool);
        }
        user.has_nft = flag;
        storage::set_user(env, &addr, &user);
        storage::bump_user(env, &addr);
    }
    storage::set_pools(env, &pools);

    events::emit_nfts_set(env, addresses.len());
    Ok(())
}

/// Página de usuários registrados em ordem de join
pub fn registered_users(env: &Env, offset: u32, limit: u32) -> Vec<RegisteredUser> {
    let count = storage::get_users_count(env);
    let mut out = Vec::new(env);

    let end = offset.saturating_add(limit).min(count);
    let mut i = offset;
    while i < end {
        if let Some(addr) = storage::get_user_by_index(env, i) {
            if let Some(user) = storage::get_user(env, &addr) {
                out.push_back(user);
            }
        }
        i += 1;
    }
    out
}
