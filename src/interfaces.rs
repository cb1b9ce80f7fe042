use soroban_sdk::{contractclient, Address, Env};

// ============================================================================
// COLABORADORES EXTERNOS (somente interfaces)
// ============================================================================

/// Contrato de access control que gateia as chamadas privilegiadas.
/// A gestão da lista (adicionar/remover, no máximo 2 membros) é
/// responsabilidade do próprio colaborador.
#[contractclient(name = "AdminClient")]
pub trait AdminInterface {
    fn is_admin(env: Env, account: Address) -> bool;
}

/// Ledger externo de staking de ZAM. Lido no momento do join do whitelist
/// (snapshot congelado) e sob demanda pela consulta de belt ao vivo.
#[contractclient(name = "ZamStakingClient")]
pub trait ZamStakingInterface {
    fn staked_balance_of(env: Env, account: Address) -> i128;
}
