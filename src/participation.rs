use crate::events;
use crate::schedule;
use crate::storage::{self, POOLS_COUNT};
use crate::types::{Phase, Pool, RegisteredUser, SaleError};
use crate::validation;
use soroban_sdk::{token, Address, Env};

// ============================================================================
// PARTICIPATION ENGINE
// ============================================================================
// Único componente que altera os três ledgers aninhados (venda, pools,
// usuário). Cada compra valida tudo antes de escrever qualquer coisa.

/// Teto garantido do usuário no round1, conforme sua flag de NFT
fn guaranteed_cap(pool: &Pool, user: &RegisteredUser) -> i128 {
    if user.has_nft {
        pool.max_guaranteed_with_nft
    } else {
        pool.max_guaranteed_without_nft
    }
}

/// Compra gateada pela fase corrente. `buyer` paga e recebe a alocação;
/// nas chamadas privilegiadas (`participate_from`) ele difere do caller.
pub fn participate(env: &Env, buyer: &Address, amount: i128) -> Result<(), SaleError> {
    validation::require_not_paused(env)?;
    let rounds = validation::require_rounds(env)?;

    match schedule::phase_at(&rounds, env.ledger().timestamp()) {
        Phase::Round1 => buy_round1(env, buyer, amount),
        Phase::Round2 => buy_round2(env, buyer, amount),
        Phase::InterRoundGap => Err(SaleError::RoundNotStarted),
        _ => Err(SaleError::OnlySaleTime),
    }
}

/// Round 1: compra dentro do teto garantido do belt do comprador
fn buy_round1(env: &Env, buyer: &Address, amount: i128) -> Result<(), SaleError> {
    let mut pools = validation::require_pools(env)?;
    validation::require_positive_amount(amount)?;
    let mut sale = validation::require_sale(env)?;
    let mut user = validation::require_registered(env, buyer)?;

    let mut pool = pools.get_unchecked(user.belt);
    let cap = guaranteed_cap(&pool, &user);

    let bought = user
        .bought_round1
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;
    if bought > cap {
        return Err(SaleError::MaxAmountReached);
    }

    pull_payment(env, &sale.token, buyer, amount)?;

    user.bought_round1 = bought;
    pool.allocation_sold = pool
        .allocation_sold
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;
    sale.allocation_sold = sale
        .allocation_sold
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;

    pools.set(user.belt, pool);
    storage::set_user(env, buyer, &user);
    storage::set_pools(env, &pools);
    storage::set_sale(env, &sale);
    storage::bump_user(env, buyer);

    events::emit_participate(env, buyer, 1, amount);
    Ok(())
}

/// Round 2: sobra compartilhada entre pools, primeiro-a-chegar.
///
/// Elegível apenas quem esgotou exatamente o teto garantido no round1.
/// A compra drena capacidade garantida não vendida pool a pool (primeiro
/// o pool do próprio belt, depois em ordem crescente de índice) de modo
/// determinístico e preservando `pool.allocation_sold <= allocation_total`
/// em cada pool e a conservação no agregado.
fn buy_round2(env: &Env, buyer: &Address, amount: i128) -> Result<(), SaleError> {
    let mut pools = validation::require_pools(env)?;
    validation::require_positive_amount(amount)?;
    let mut sale = validation::require_sale(env)?;
    let mut user = validation::require_registered(env, buyer)?;

    let own_pool = pools.get_unchecked(user.belt);
    if user.bought_round1 != guaranteed_cap(&own_pool, &user) {
        return Err(SaleError::CantParticipateAtRound);
    }

    // Sobra medida nos próprios pools: com pesos que não dividem o total
    // exatamente, a soma das capacidades fica abaixo de
    // `sale.allocation_total` e é ela que limita a drenagem
    let available = unsold_capacity(&pools);
    if amount > available {
        return Err(SaleError::NotEnoughAllocation);
    }

    pull_payment(env, &sale.token, buyer, amount)?;

    let mut left = amount;
    let mut i = 0u32;
    while left > 0 && i <= POOLS_COUNT {
        // passo 0 drena o pool do próprio belt; depois varre 0..8
        let idx = if i == 0 {
            user.belt
        } else {
            let idx = i - 1;
            if idx == user.belt {
                i += 1;
                continue;
            }
            idx
        };

        let mut pool = pools.get_unchecked(idx);
        let free = pool.allocation_total - pool.allocation_sold;
        let take = free.min(left);
        if take > 0 {
            pool.allocation_sold += take;
            pools.set(idx, pool);
            left -= take;
        }
        i += 1;
    }
    // `amount <= available` garante a drenagem completa
    debug_assert_eq!(left, 0);

    user.bought_round2 = user
        .bought_round2
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;
    sale.allocation_sold = sale
        .allocation_sold
        .checked_add(amount)
        .ok_or(SaleError::Overflow)?;

    storage::set_user(env, buyer, &user);
    storage::set_pools(env, &pools);
    storage::set_sale(env, &sale);
    storage::bump_user(env, buyer);

    events::emit_participate(env, buyer, 2, amount);
    Ok(())
}

/// Capacidade garantida ainda não vendida, somada sobre todos os pools
fn unsold_capacity(pools: &soroban_sdk::Vec<Pool>) -> i128 {
    let mut total = 0i128;
    for pool in pools.iter() {
        total += pool.allocation_total - pool.allocation_sold;
    }
    total
}

/// Quanto resta da reserva compartilhada para um endereço no round2.
/// Zero para não registrados, não elegíveis ou venda não configurada.
pub fn available_allocation_at_round2(env: &Env, addr: &Address) -> i128 {
    let (pools, user) = match (storage::get_pools(env), storage::get_user(env, addr)) {
        (Some(p), Some(u)) => (p, u),
        _ => return 0,
    };

    let pool = pools.get_unchecked(user.belt);
    if user.bought_round1 != guaranteed_cap(&pool, &user) {
        return 0;
    }
    unsold_capacity(&pools)
}

/// Puxa o pagamento do comprador via allowance concedida ao contrato
fn pull_payment(
    env: &Env,
    payment_token: &Address,
    buyer: &Address,
    amount: i128,
) -> Result<(), SaleError> {
    let client = token::Client::new(env, payment_token);
    let contract = env.current_contract_address();

    if client.allowance(buyer, &contract) < amount {
        return Err(SaleError::WrongAllowance);
    }
    client.transfer_from(&contract, buyer, &contract, &amount);
    Ok(())
}
