use crate::storage;
use crate::types::{Phase, Round};
use soroban_sdk::{Env, Vec};

// ============================================================================
// PHASE SCHEDULER
// ============================================================================
// Todo o gating temporal do contrato passa por aqui: o timestamp do ledger
// é lido uma única vez por operação lógica, de modo que uma mesma chamada
// nunca observa dois "agora" diferentes entre suas sub-checagens.

/// Mapeia um instante para a fase ativa. Janelas semiabertas [start, end).
/// Distribution começa em rounds[4].start_time e nunca termina.
pub fn phase_at(rounds: &Vec<Round>, now: u64) -> Phase {
    let whitelist = rounds.get_unchecked(0);
    let buffer = rounds.get_unchecked(1);
    let round1 = rounds.get_unchecked(2);
    let round2 = rounds.get_unchecked(3);
    let distribution = rounds.get_unchecked(4);

    if now < whitelist.start_time {
        return Phase::Preparation;
    }
    if now >= distribution.start_time {
        return Phase::Distribution;
    }
    if now < whitelist.end_time {
        return Phase::Whitelist;
    }
    if now >= buffer.start_time && now < buffer.end_time {
        return Phase::Buffer;
    }
    if now >= round1.start_time && now < round1.end_time {
        return Phase::Round1;
    }
    // Intervalo configurável entre round1 e round2 tem papel próprio
    if now >= round1.end_time && now < round2.start_time {
        return Phase::InterRoundGap;
    }
    if now >= round2.start_time && now < round2.end_time {
        return Phase::Round2;
    }

    Phase::Indeterminate
}

/// Fase corrente segundo o ledger. Sem rounds configurados tudo é Preparation.
pub fn current_phase(env: &Env) -> Phase {
    match storage::get_rounds(env) {
        Some(rounds) => phase_at(&rounds, env.ledger().timestamp()),
        None => Phase::Preparation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{vec, Env};

    const DAY: u64 = 86_400;

    /// Rounds no formato típico de uma venda: whitelist e buffer
    /// contíguos, 1 dia de intervalo antes do round1, e round2/distribution
    /// contíguos ao round1.
    fn rounds(env: &Env, base: u64) -> Vec<Round> {
        let mut out = vec![env];
        for i in 0..5u64 {
            let gap = if i >= 2 { DAY } else { 0 };
            out.push_back(Round {
                start_time: base + gap + i * DAY,
                end_time: base + gap + (i + 1) * DAY,
            });
        }
        out
    }

    #[test]
    fn test_phase_windows() {
        let env = Env::default();
        let r = rounds(&env, 1_000);

        assert_eq!(phase_at(&r, 0), Phase::Preparation);
        assert_eq!(phase_at(&r, 999), Phase::Preparation);
        assert_eq!(phase_at(&r, 1_000), Phase::Whitelist);
        assert_eq!(phase_at(&r, 1_000 + DAY - 1), Phase::Whitelist);
        assert_eq!(phase_at(&r, 1_000 + DAY), Phase::Buffer);
        // o dia entre buffer e round1 não tem papel definido
        assert_eq!(phase_at(&r, 1_000 + 2 * DAY), Phase::Indeterminate);
        assert_eq!(phase_at(&r, 1_000 + 3 * DAY), Phase::Round1);
        assert_eq!(phase_at(&r, 1_000 + 4 * DAY), Phase::Round2);
        assert_eq!(phase_at(&r, 1_000 + 5 * DAY), Phase::Distribution);
        // Distribution é terminal
        assert_eq!(phase_at(&r, 1_000 + 500 * DAY), Phase::Distribution);
    }

    #[test]
    fn test_inter_round_gap() {
        let env = Env::default();
        // round2 e distribution deslocados 600s à frente do round1
        let mut r = rounds(&env, 1_000);
        let mut r3 = r.get_unchecked(3);
        let mut r4 = r.get_unchecked(4);
        r3.start_time += 600;
        r3.end_time += 600;
        r4.start_time += 600;
        r4.end_time += 600;
        r.set(3, r3);
        r.set(4, r4);

        let round1_end = 1_000 + 4 * DAY;
        assert_eq!(phase_at(&r, round1_end - 1), Phase::Round1);
        assert_eq!(phase_at(&r, round1_end), Phase::InterRoundGap);
        assert_eq!(phase_at(&r, round1_end + 599), Phase::InterRoundGap);
        assert_eq!(phase_at(&r, round1_end + 600), Phase::Round2);
    }

    #[test]
    fn test_boundary_is_half_open() {
        let env = Env::default();
        let r = rounds(&env, 1_000);
        // fim do whitelist pertence ao buffer, não ao whitelist
        let whitelist_end = 1_000 + DAY;
        assert_eq!(phase_at(&r, whitelist_end - 1), Phase::Whitelist);
        assert_eq!(phase_at(&r, whitelist_end), Phase::Buffer);
    }
}
