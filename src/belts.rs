use crate::storage::BELT_NOT_ASSIGNED;
use crate::types::Pool;
use soroban_sdk::Vec;

// ============================================================================
// BELT CLASSIFIER
// ============================================================================

/// Classifica um stake no belt mais alto cujo `min_stake` ele alcança.
/// Pools estão ordenados por `min_stake` crescente; devolve o maior índice
/// `i` com `stake >= pools[i].min_stake`, ou `BELT_NOT_ASSIGNED` quando o
/// stake fica abaixo do menor belt.
///
/// Função pura: é reavaliada ao vivo sempre que "belt atual" é necessário,
/// distinta do `belt` congelado no registro do usuário.
pub fn classify(pools: &Vec<Pool>, stake: i128) -> u32 {
    let mut belt = BELT_NOT_ASSIGNED;
    for (i, pool) in pools.iter().enumerate() {
        if stake >= pool.min_stake {
            belt = i as u32;
        } else {
            break;
        }
    }
    belt
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    fn pool(min_stake: i128) -> Pool {
        Pool {
            min_stake,
            weight: 0,
            allocation_total: 0,
            allocation_sold: 0,
            users_without_nft: 0,
            users_with_nft: 0,
            max_guaranteed_without_nft: 0,
            max_guaranteed_with_nft: 0,
        }
    }

    fn pools(env: &Env) -> Vec<Pool> {
        let mins: [i128; 8] = [
            2_000, 10_000, 30_000, 80_000, 160_000, 320_000, 500_000, 800_000,
        ];
        let mut out = vec![env];
        for m in mins {
            out.push_back(pool(m));
        }
        out
    }

    #[test]
    fn test_classify_boundaries() {
        let env = Env::default();
        let p = pools(&env);

        assert_eq!(classify(&p, 0), BELT_NOT_ASSIGNED);
        assert_eq!(classify(&p, 1_999), BELT_NOT_ASSIGNED);
        assert_eq!(classify(&p, 2_000), 0);
        assert_eq!(classify(&p, 9_999), 0);
        assert_eq!(classify(&p, 10_000), 1);
        assert_eq!(classify(&p, 160_000), 4);
        assert_eq!(classify(&p, 800_000), 7);
        assert_eq!(classify(&p, i128::MAX), 7);
    }

    #[test]
    fn test_classify_monotone() {
        let env = Env::default();
        let p = pools(&env);

        let mut last = 0u32;
        let mut first = true;
        for stake in [1_999i128, 2_000, 5_000, 30_000, 79_999, 80_000, 999_999] {
            let belt = classify(&p, stake);
            // o sentinela (8) é o "menor" belt possível na prática
            let rank = if belt == BELT_NOT_ASSIGNED { 0 } else { belt + 1 };
            if !first {
                assert!(rank >= last);
            }
            last = rank;
            first = false;
        }
    }
}
