use crate::allocation;
use crate::belts;
use crate::events;
use crate::interfaces::ZamStakingClient;
use crate::participation;
use crate::schedule;
use crate::storage::{self, BELT_NOT_ASSIGNED, MIN_BUFFER_TO_ROUND1_GAP, POOLS_COUNT, ROUNDS_COUNT, WEIGHTS_SUM};
use crate::types::{Phase, Pool, RegisteredUser, Round, Sale, SaleError};
use crate::validation;
use crate::whitelist;
use soroban_sdk::{contract, contractimpl, token, Address, Env, String, Vec};

//
// CONTRATO PRINCIPAL - ZAMPAD SALE
//

#[contract]
pub struct ZamPadSale;

#[contractimpl]
impl ZamPadSale {
    //
    // INICIALIZAÇÃO
    //

    /// Vincula o contrato de access control que gateia as chamadas
    /// privilegiadas. Chamada uma única vez, na implantação (pela factory).
    ///
    /// # Erros
    /// - `AlreadyInitialized`: se o contrato já foi vinculado
    pub fn initialize(env: Env, admin: Address) -> Result<(), SaleError> {
        if storage::has_admin(&env) {
            return Err(SaleError::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_paused(&env, false);
        Ok(())
    }

    /// Configura o ledger externo de staking de ZAM (apenas admin)
    pub fn set_zam_staking(env: Env, caller: Address, staking: Address) -> Result<(), SaleError> {
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        storage::set_staking(&env, &staking);
        events::emit_staking_set(&env, &staking);
        Ok(())
    }

    /// Cria a venda: nome, token de pagamento e alocação total à venda.
    /// One-shot: uma segunda chamada sempre falha.
    ///
    /// # Erros
    /// - `StakingNotSet`: ledger de staking ainda não configurado
    /// - `AlreadyInitialized`: venda já criada
    /// - `NameEmpty` / `WrongAllocation`: argumentos inválidos
    pub fn init_sale(
        env: Env,
        caller: Address,
        name: String,
        payment_token: Address,
        allocation_total: i128,
    ) -> Result<(), SaleError> {
        // === CHECKS ===
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        validation::require_staking(&env)?;
        if storage::get_sale(&env).is_some() {
            return Err(SaleError::AlreadyInitialized);
        }
        if name.len() == 0 {
            return Err(SaleError::NameEmpty);
        }
        if allocation_total <= 0 {
            return Err(SaleError::WrongAllocation);
        }

        // === EFFECTS ===
        let sale = Sale {
            name,
            token: payment_token.clone(),
            allocation_total,
            allocation_sold: 0,
            is_initialized: true,
        };
        storage::set_sale(&env, &sale);

        // === INTERACTIONS ===
        events::emit_init(&env, &payment_token, allocation_total);
        Ok(())
    }

    //
    // CONFIGURAÇÃO DE ROUNDS E POOLS (fase Preparation, one-shot)
    //

    /// Configura as 5 janelas de round. Papéis por índice: 0=Whitelist,
    /// 1=Buffer, 2=Round1, 3=Round2, 4=Distribution. Exige pelo menos
    /// 1 hora entre o fim do buffer e o início do round1.
    pub fn set_rounds(
        env: Env,
        caller: Address,
        start_times: Vec<u64>,
        end_times: Vec<u64>,
    ) -> Result<(), SaleError> {
        // === CHECKS ===
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        validation::require_sale(&env)?;
        if storage::has_rounds(&env) {
            return Err(SaleError::RoundsAlreadySet);
        }
        if start_times.len() != end_times.len() {
            return Err(SaleError::WrongParams);
        }
        if start_times.len() != ROUNDS_COUNT {
            return Err(SaleError::WrongRoundsCount);
        }

        let now = env.ledger().timestamp();
        let mut rounds: Vec<Round> = Vec::new(&env);
        let mut prev_end = 0u64;
        for i in 0..ROUNDS_COUNT {
            let start = start_times.get_unchecked(i);
            let end = end_times.get_unchecked(i);

            if start < now {
                return Err(SaleError::StartTimeInPast);
            }
            if start >= end {
                return Err(SaleError::StartAfterEnd);
            }
            if i > 0 && start < prev_end {
                return Err(SaleError::StartBeforePrevEnd);
            }
            // tempo mínimo entre buffer e round1 para calcular alocações
            if i == 2 && start < prev_end + MIN_BUFFER_TO_ROUND1_GAP {
                return Err(SaleError::BufferTooShort);
            }
            prev_end = end;
            rounds.push_back(Round { start_time: start, end_time: end });
        }

        // === EFFECTS ===
        storage::set_rounds(&env, &rounds);

        // === INTERACTIONS ===
        events::emit_rounds_set(&env, ROUNDS_COUNT);
        Ok(())
    }

    /// Configura os 8 belts: stake mínimo estritamente crescente e pesos
    /// somando exatamente 100. A alocação de cada pool é derivada do peso
    /// sobre o total da venda.
    pub fn set_pools(
        env: Env,
        caller: Address,
        min_stakes: Vec<i128>,
        weights: Vec<u32>,
    ) -> Result<(), SaleError> {
        // === CHECKS ===
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        let sale = validation::require_sale(&env)?;
        if storage::has_pools(&env) {
            return Err(SaleError::PoolsAlreadySet);
        }
        if schedule::current_phase(&env) != Phase::Preparation {
            return Err(SaleError::OnlyPreparationTime);
        }
        if min_stakes.len() != POOLS_COUNT {
            return Err(SaleError::WrongBeltsCount);
        }
        if weights.len() != min_stakes.len() {
            return Err(SaleError::WrongParams);
        }

        let mut sum = 0u32;
        let mut prev_stake = 0i128;
        let mut pools: Vec<Pool> = Vec::new(&env);
        for i in 0..POOLS_COUNT {
            let min_stake = min_stakes.get_unchecked(i);
            let weight = weights.get_unchecked(i);

            if weight == 0 {
                return Err(SaleError::WrongWeights);
            }
            if min_stake <= prev_stake {
                return Err(SaleError::MinStakesNotAscending);
            }
            prev_stake = min_stake;
            sum += weight;

            let allocation_total = sale
                .allocation_total
                .checked_mul(weight as i128)
                .ok_or(SaleError::Overflow)?
                .checked_div(WEIGHTS_SUM as i128)
                .ok_or(SaleError::Overflow)?;

            pools.push_back(Pool {
                min_stake,
                weight,
                allocation_total,
                allocation_sold: 0,
                users_without_nft: 0,
                users_with_nft: 0,
                max_guaranteed_without_nft: 0,
                max_guaranteed_with_nft: 0,
            });
        }
        if sum != WEIGHTS_SUM {
            return Err(SaleError::WrongWeights);
        }

        // === EFFECTS ===
        storage::set_pools(&env, &pools);

        // === INTERACTIONS ===
        events::emit_pools_set(&env, POOLS_COUNT);
        Ok(())
    }

    //
    // WHITELIST
    //

    /// Entra no whitelist reivindicando o belt que o stake corrente do
    /// caller sustenta. Permitido apenas durante a fase Whitelist, uma
    /// única vez por endereço.
    pub fn join_whitelist(env: Env, caller: Address, belt_index: u32) -> Result<(), SaleError> {
        caller.require_auth();
        storage::bump_instance(&env);
        whitelist::join(&env, &caller, belt_index)
    }

    /// Atualiza flags de NFT de usuários registrados (apenas admin,
    /// somente antes do round1 abrir)
    pub fn set_nfts(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
        flags: Vec<bool>,
    ) -> Result<(), SaleError> {
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);
        whitelist::set_nfts(&env, &addresses, &flags)
    }

    //
    // CÁLCULO DE ALOCAÇÕES (fase Buffer)
    //

    /// Fixa os tetos garantidos por belt (apenas admin, somente na fase
    /// Buffer). Idempotente: recalcula sobre as contagens correntes.
    pub fn calculate_max_allocations(
        env: Env,
        caller: Address,
        without_nft: Vec<i128>,
        with_nft: Vec<i128>,
    ) -> Result<(), SaleError> {
        // === CHECKS ===
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        let rounds = validation::require_rounds(&env)?;
        let pools = validation::require_pools(&env)?;
        if schedule::phase_at(&rounds, env.ledger().timestamp()) != Phase::Buffer {
            return Err(SaleError::OnlyBufferTime);
        }

        // === EFFECTS ===
        let updated = allocation::calculate_max_allocations(&env, &pools, &without_nft, &with_nft)?;
        storage::set_pools(&env, &updated);

        // === INTERACTIONS ===
        events::emit_allocations(&env);
        Ok(())
    }

    //
    // PARTICIPAÇÃO (Round1 / Round2)
    //

    /// Compra de alocação pelo próprio participante
    pub fn participate(env: Env, caller: Address, amount: i128) -> Result<(), SaleError> {
        caller.require_auth();
        storage::bump_instance(&env);
        participation::participate(&env, &caller, amount)
    }

    /// Compra aplicada a um endereço específico (apenas admin), com as
    /// mesmas regras do participante, p.ex. compras intermediadas fora da cadeia
    pub fn participate_from(
        env: Env,
        caller: Address,
        buyer: Address,
        amount: i128,
    ) -> Result<(), SaleError> {
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);
        participation::participate(&env, &buyer, amount)
    }

    //
    // PAUSA
    //

    /// Pausa/despausa as compras (apenas admin). Não afeta leituras nem
    /// chamadas de configuração.
    pub fn set_pause(env: Env, caller: Address, paused: bool) -> Result<(), SaleError> {
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        storage::set_paused(&env, paused);
        events::emit_pause(&env, paused);
        Ok(())
    }

    //
    // RETIRADA (fase Distribution, terminal)
    //

    /// Transfere todo o saldo corrente do token de pagamento para o
    /// destino (apenas admin). Pode ser repetida: cada chamada drena o
    /// saldo que houver no momento.
    pub fn withdraw(env: Env, caller: Address, destination: Address) -> Result<(), SaleError> {
        // === CHECKS ===
        caller.require_auth();
        validation::require_admin(&env, &caller)?;
        storage::bump_instance(&env);

        let sale = validation::require_sale(&env)?;
        let rounds = validation::require_rounds(&env)?;
        if schedule::phase_at(&rounds, env.ledger().timestamp()) != Phase::Distribution {
            return Err(SaleError::OnlyDistributionTime);
        }

        // === INTERACTIONS ===
        let client = token::Client::new(&env, &sale.token);
        let contract = env.current_contract_address();
        let balance = client.balance(&contract);
        if balance > 0 {
            client.transfer(&contract, &destination, &balance);
        }

        events::emit_withdraw(&env, &destination, balance);
        Ok(())
    }

    //
    // LEITURAS
    //

    /// Endereço do contrato de access control
    pub fn get_admin(env: Env) -> Address {
        storage::get_admin(&env)
    }

    /// Endereço do ledger de staking, se configurado
    pub fn get_zam_staking(env: Env) -> Option<Address> {
        storage::get_staking(&env)
    }

    /// Dados da venda, se inicializada
    pub fn get_sale(env: Env) -> Option<Sale> {
        storage::get_sale(&env)
    }

    /// Fase corrente segundo o timestamp do ledger
    pub fn get_current_phase(env: Env) -> Phase {
        schedule::current_phase(&env)
    }

    pub fn get_rounds(env: Env) -> Vec<Round> {
        storage::get_rounds(&env).unwrap_or(Vec::new(&env))
    }

    pub fn get_rounds_count(env: Env) -> u32 {
        storage::get_rounds(&env).map_or(0, |r| r.len())
    }

    pub fn get_pools(env: Env) -> Vec<Pool> {
        storage::get_pools(&env).unwrap_or(Vec::new(&env))
    }

    pub fn get_pools_count(env: Env) -> u32 {
        storage::get_pools(&env).map_or(0, |p| p.len())
    }

    pub fn get_registered_user(env: Env, addr: Address) -> Option<RegisteredUser> {
        storage::get_user(&env, &addr)
    }

    pub fn get_registered_users_count(env: Env) -> u32 {
        storage::get_users_count(&env)
    }

    /// Página de usuários registrados em ordem de join
    pub fn get_registered_users(env: Env, offset: u32, limit: u32) -> Vec<RegisteredUser> {
        whitelist::registered_users(&env, offset, limit)
    }

    /// Belt que o stake corrente do endereço sustenta, reavaliado ao vivo
    /// contra o ledger de staking (distinto do belt congelado no registro).
    /// Devolve o sentinela (8) quando o stake não alcança o menor belt.
    pub fn get_belt(env: Env, addr: Address) -> u32 {
        let (staking, pools) = match (storage::get_staking(&env), storage::get_pools(&env)) {
            (Some(s), Some(p)) => (s, p),
            _ => return BELT_NOT_ASSIGNED,
        };
        let stake = ZamStakingClient::new(&env, &staking).staked_balance_of(&addr);
        belts::classify(&pools, stake)
    }

    /// Sobra da reserva compartilhada disponível ao endereço no round2
    pub fn get_round2_allocation(env: Env, addr: Address) -> i128 {
        participation::available_allocation_at_round2(&env, &addr)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }
}

//
// TESTES UNITÁRIOS
//
