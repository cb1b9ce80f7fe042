#![allow(dead_code)]
use soroban_sdk::{contracterror, contracttype, Address, String};

// ============================================================================
// ERROS DO CONTRATO
// ============================================================================
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum SaleError {
    Unauthorized = 1,
    Paused = 2,
    AlreadyInitialized = 3,
    SaleNotInitialized = 4,
    StakingNotSet = 5,
    NameEmpty = 6,
    WrongAllocation = 7,
    RoundsNotSet = 8,
    PoolsNotSet = 9,
    RoundsAlreadySet = 10,
    PoolsAlreadySet = 11,
    WrongRoundsCount = 12,
    WrongBeltsCount = 13,
    WrongParams = 14,
    StartTimeInPast = 15,
    StartAfterEnd = 16,
    StartBeforePrevEnd = 17,
    BufferTooShort = 18,
    WrongWeights = 19,
    MinStakesNotAscending = 20,
    OnlyPreparationTime = 21,
    OnlyWhitelistTime = 22,
    OnlyBufferTime = 23,
    OnlyBeforeSaleTime = 24,
    OnlySaleTime = 25,
    RoundNotStarted = 26,
    OnlyDistributionTime = 27,
    JoinedTwice = 28,
    StakeNotEnough = 29,
    BeltMismatch = 30,
    NotInWhitelist = 31,
    UserNotRegistered = 32,
    WrongData = 33,
    WrongLength = 34,
    WrongAmount = 35,
    MaxAmountReached = 36,
    WrongAllowance = 37,
    CantParticipateAtRound = 38,
    NotEnoughAllocation = 39,
    Overflow = 40,
}

// ============================================================================
// FASES DA VENDA
// ============================================================================

/// Fase ativa, derivada exclusivamente das janelas de rounds e do timestamp
/// do ledger. `Distribution` é terminal (não possui borda de fechamento).
/// `Indeterminate` cobre qualquer intervalo entre janelas configuradas que
/// não tenha papel próprio: nenhuma operação gateada por fase é permitida
/// em tempo indefinido.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Phase {
    Preparation = 0,
    Whitelist = 1,
    Buffer = 2,
    Round1 = 3,
    InterRoundGap = 4,
    Round2 = 5,
    Distribution = 6,
    Indeterminate = 7,
}

// ============================================================================
// DADOS DA VENDA
// ============================================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sale {
    pub name: String,
    pub token: Address,
    pub allocation_total: i128,
    pub allocation_sold: i128,
    pub is_initialized: bool,
}

/// Janela semiaberta [start_time, end_time).
/// Papéis por índice: 0=Whitelist, 1=Buffer, 2=Round1, 3=Round2, 4=Distribution.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Round {
    pub start_time: u64,
    pub end_time: u64,
}

/// Belt/pool de stake. `allocation_total` é derivado do peso sobre o total
/// da venda; os tetos garantidos são fixados pelo cálculo de alocações
/// durante a fase Buffer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub min_stake: i128,
    pub weight: u32,
    pub allocation_total: i128,
    pub allocation_sold: i128,
    pub users_without_nft: u32,
    pub users_with_nft: u32,
    pub max_guaranteed_without_nft: i128,
    pub max_guaranteed_with_nft: i128,
}

/// Registro criado no máximo uma vez por endereço durante o whitelist.
/// `belt` e `staked_zam` são congelados no momento do join.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisteredUser {
    pub belt: u32,
    pub staked_zam: i128,
    pub has_nft: bool,
    pub bought_round1: i128,
    pub bought_round2: i128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{Address, Env, String};

    #[test]
    fn test_error_ordering() {
        assert!(SaleError::Unauthorized < SaleError::Paused);
        assert!(SaleError::RoundsNotSet < SaleError::PoolsNotSet);
        assert!(SaleError::MaxAmountReached < SaleError::NotEnoughAllocation);
    }

    #[test]
    fn test_error_values() {
        assert_eq!(SaleError::Unauthorized as u32, 1);
        assert_eq!(SaleError::RoundsNotSet as u32, 8);
        assert_eq!(SaleError::NotEnoughAllocation as u32, 39);
    }

    #[test]
    fn test_phase_equality() {
        assert_eq!(Phase::Round1, Phase::Round1);
        assert_ne!(Phase::Round1, Phase::Round2);
    }

    #[test]
    fn test_round_copy() {
        let r = Round { start_time: 100, end_time: 200 };
        let s = r;
        assert_eq!(r, s);
    }

    #[test]
    fn test_registered_user_clone() {
        let u = RegisteredUser {
            belt: 3,
            staked_zam: 80_000,
            has_nft: true,
            bought_round1: 0,
            bought_round2: 0,
        };
        assert_eq!(u.clone(), u);
    }

    #[test]
    fn test_sale_clone() {
        let env = Env::default();
        let addr = Address::from_string(&String::from_str(
            &env,
            "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
        ));

        let s = Sale {
            name: String::from_str(&env, "Troy"),
            token: addr,
            allocation_total: 500_000,
            allocation_sold: 0,
            is_initialized: true,
        };
        assert_eq!(s.clone(), s);
    }
}
