use crate::storage::POOLS_COUNT;
use crate::types::{Pool, SaleError};
use soroban_sdk::{Env, Vec};

// ============================================================================
// ALLOCATION CALCULATOR
// ============================================================================
// Fixa os tetos garantidos por belt a partir dos tetos solicitados pelo
// operador e da contagem de membros registrada durante o whitelist. O
// recálculo é idempotente: roda de novo sobre as contagens correntes e
// sobrescreve os tetos anteriores.

/// Encolhe um teto pela razão `pool_total / requested_total`, truncando
/// para baixo. O truncamento garante que a soma dos tetos escalados vezes
/// as contagens nunca excede a capacidade do pool.
fn scale_cap(cap: i128, pool_total: i128, requested_total: i128) -> Result<i128, SaleError> {
    cap.checked_mul(pool_total)
        .ok_or(SaleError::Overflow)?
        .checked_div(requested_total)
        .ok_or(SaleError::Overflow)
}

/// Tetos garantidos de um pool para os valores solicitados.
///
/// O compromisso solicitado é `n0 × without_nft + n1 × with_nft`. Se ele
/// cabe na capacidade do pool, os tetos são exatamente os solicitados; se
/// excede, ambos são reduzidos pela mesma razão, preservando o prêmio
/// relativo dos detentores de NFT.
pub fn guaranteed_caps(
    pool: &Pool,
    without_nft: i128,
    with_nft: i128,
) -> Result<(i128, i128), SaleError> {
    let n0 = pool.users_without_nft as i128;
    let n1 = pool.users_with_nft as i128;

    let requested = n0
        .checked_mul(without_nft)
        .ok_or(SaleError::Overflow)?
        .checked_add(n1.checked_mul(with_nft).ok_or(SaleError::Overflow)?)
        .ok_or(SaleError::Overflow)?;

    if requested <= pool.allocation_total {
        return Ok((without_nft, with_nft));
    }

    Ok((
        scale_cap(without_nft, pool.allocation_total, requested)?,
        scale_cap(with_nft, pool.allocation_total, requested)?,
    ))
}

/// Aplica o cálculo a todos os pools, devolvendo o vetor atualizado.
/// Ambos os vetores de tetos precisam ter exatamente um valor por belt,
/// todos não negativos.
pub fn calculate_max_allocations(
    env: &Env,
    pools: &Vec<Pool>,
    without_nft: &Vec<i128>,
    with_nft: &Vec<i128>,
) -> Result<Vec<Pool>, SaleError> {
    if without_nft.len() != with_nft.len() {
        return Err(SaleError::WrongData);
    }
    if without_nft.len() != POOLS_COUNT {
        return Err(SaleError::WrongLength);
    }
    for cap in without_nft.iter().chain(with_nft.iter()) {
        if cap < 0 {
            return Err(SaleError::WrongData);
        }
    }

    let mut out = Vec::new(env);
    for (i, pool) in pools.iter().enumerate() {
        let (cap0, cap1) = guaranteed_caps(
            &pool,
            without_nft.get_unchecked(i as u32),
            with_nft.get_unchecked(i as u32),
        )?;
        let mut updated = pool;
        updated.max_guaranteed_without_nft = cap0;
        updated.max_guaranteed_with_nft = cap1;
        out.push_back(updated);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDT: i128 = 10_000_000; // 7 decimais

    fn pool(total: i128, n0: u32, n1: u32) -> Pool {
        Pool {
            min_stake: 2_000,
            weight: 10,
            allocation_total: total,
            allocation_sold: 0,
            users_without_nft: n0,
            users_with_nft: n1,
            max_guaranteed_without_nft: 0,
            max_guaranteed_with_nft: 0,
        }
    }

    #[test]
    fn test_caps_kept_when_capacity_enough() {
        // 1 sem NFT + 1 com NFT: 40 + 80 = 120 <= 500
        let p = pool(500 * USDT, 1, 1);
        let (c0, c1) = guaranteed_caps(&p, 40 * USDT, 80 * USDT).unwrap();
        assert_eq!(c0, 40 * USDT);
        assert_eq!(c1, 80 * USDT);
    }

    #[test]
    fn test_caps_shrunk_proportionally() {
        // Pool de 500 USDT, 10 sem NFT e 3 com NFT.
        // Solicitado 10×40 + 3×80 = 640 > 500; razão 500/640 = 0.78125.
        let p = pool(500 * USDT, 10, 3);
        let (c0, c1) = guaranteed_caps(&p, 40 * USDT, 80 * USDT).unwrap();
        assert_eq!(c0, 312_500_000); // 31.25 USDT
        assert_eq!(c1, 625_000_000); // 62.50 USDT
    }

    #[test]
    fn test_shrunk_commitment_never_exceeds_capacity() {
        // Divisão não exata: 13×40 = 520 > 500, razão dá dízima
        let p = pool(500 * USDT, 13, 0);
        let (c0, _) = guaranteed_caps(&p, 40 * USDT, 80 * USDT).unwrap();
        assert_eq!(c0, 384_615_384); // floor(40 × 500/520)
        assert!(13 * c0 <= p.allocation_total);
    }

    #[test]
    fn test_empty_pool_keeps_requested() {
        let p = pool(500 * USDT, 0, 0);
        let (c0, c1) = guaranteed_caps(&p, 40 * USDT, 80 * USDT).unwrap();
        assert_eq!(c0, 40 * USDT);
        assert_eq!(c1, 80 * USDT);
    }

    #[test]
    fn test_nft_premium_preserved() {
        let p = pool(500 * USDT, 10, 3);
        let (c0, c1) = guaranteed_caps(&p, 40 * USDT, 80 * USDT).unwrap();
        // a razão 2:1 entre com/sem NFT sobrevive ao encolhimento
        assert_eq!(c1, c0 * 2);
    }
}
