use soroban_sdk::{symbol_short, Address, Env};

//
// EVENTOS DA VENDA
//

// Venda inicializada
pub fn emit_init(env: &Env, token: &Address, allocation_total: i128) {
    env.events().publish(
        (symbol_short!("init"), token),
        allocation_total,
    );
}

// Ledger de staking configurado
pub fn emit_staking_set(env: &Env, staking: &Address) {
    env.events().publish(
        (symbol_short!("staking"),),
        staking.clone(),
    );
}

// Rounds configurados
pub fn emit_rounds_set(env: &Env, count: u32) {
    env.events().publish(
        (symbol_short!("rounds"),),
        count,
    );
}

// Pools configurados
pub fn emit_pools_set(env: &Env, count: u32) {
    env.events().publish(
        (symbol_short!("pools"),),
        count,
    );
}

// Usuário entrou no whitelist
pub fn emit_join(env: &Env, user: &Address, belt: u32, staked: i128) {
    env.events().publish(
        (symbol_short!("join"), user, belt),
        staked,
    );
}

// Flags de NFT atualizadas
pub fn emit_nfts_set(env: &Env, count: u32) {
    env.events().publish(
        (symbol_short!("nfts"),),
        count,
    );
}

// Tetos garantidos calculados
pub fn emit_allocations(env: &Env) {
    env.events().publish(
        (symbol_short!("maxalloc"),),
        true,
    );
}

// Compra em round1 ou round2
pub fn emit_participate(env: &Env, user: &Address, round: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("buy"), user, round),
        amount,
    );
}

// Pausa / despausa
pub fn emit_pause(env: &Env, paused: bool) {
    env.events().publish(
        (symbol_short!("pause"),),
        paused,
    );
}

// Retirada dos fundos arrecadados
pub fn emit_withdraw(env: &Env, destination: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdraw"), destination),
        amount,
    );
}

//
// TESTES
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sale::ZamPadSale;
    use soroban_sdk::testutils::{Address as _, Events as _};
    use soroban_sdk::Env;

    // Eventos só são gravados dentro de uma invocação de contrato
    fn host(env: &Env) -> Address {
        env.register_contract(None, ZamPadSale)
    }

    #[test]
    fn test_emit_join() {
        let env = Env::default();
        let c = host(&env);
        let a = Address::generate(&env);
        env.as_contract(&c, || emit_join(&env, &a, 0, 2_000));
        assert_eq!(env.events().all().len(), 1);
    }

    #[test]
    fn test_emit_participate() {
        let env = Env::default();
        let c = host(&env);
        let a = Address::generate(&env);
        env.as_contract(&c, || {
            emit_participate(&env, &a, 1, 40);
            emit_participate(&env, &a, 2, 100);
        });
        assert_eq!(env.events().all().len(), 2);
    }

    #[test]
    fn test_pause_events() {
        let env = Env::default();
        let c = host(&env);
        env.as_contract(&c, || {
            emit_pause(&env, true);
            emit_pause(&env, false);
        });
        assert_eq!(env.events().all().len(), 2);
    }

    #[test]
    fn test_config_events() {
        let env = Env::default();
        let c = host(&env);
        let token = Address::generate(&env);
        env.as_contract(&c, || {
            emit_init(&env, &token, 500_000);
            emit_rounds_set(&env, 5);
            emit_pools_set(&env, 8);
            emit_allocations(&env);
        });
        assert_eq!(env.events().all().len(), 4);
    }

    #[test]
    fn test_withdraw_event() {
        let env = Env::default();
        let c = host(&env);
        let dest = Address::generate(&env);
        env.as_contract(&c, || emit_withdraw(&env, &dest, 190_000));
        assert_eq!(env.events().all().len(), 1);
    }
}
