// src/bin/blackjack_dev_cli.rs

use blackjack_engine::api::{apply_command, build_count_view, build_round_view, Command};
use blackjack_engine::domain::chips::Chips;
use blackjack_engine::domain::rules::Rules;
use blackjack_engine::engine::{Phase, PlayerActionKind, RoundState};
use blackjack_engine::infra::{DeterministicRng, RngSeed};

fn main() {
    println!("blackjack_dev_cli: стартуем dev-CLI раунда блэкджека…");

    // 1. Детерминированный RNG — чтобы прогон был воспроизводимым.
    let seed = RngSeed::from_u64(42);
    let mut rng = seed.derive(0).to_rng();

    // 2. Правила стола и стартовый банкролл.
    let rules = Rules::default();
    let mut state = RoundState::new(rules, Chips::new(1_000), &mut rng);

    println!();
    println!("================ SINGLE SEAT SIMULATION =================");
    println!(
        "[CLI] Банкролл: {:?}, шуз: {} карт",
        state.bankroll,
        state.shoe.remaining()
    );

    // Сыграем несколько раундов подряд по простейшей стратегии.
    for round_no in 1..=5 {
        println!();
        println!("------ ROUND {round_no} ------");
        play_round(&mut state, &mut rng, Chips::new(100));
        debug_print_round(&state);
    }

    let count = build_count_view(&state);
    println!();
    println!(
        "[CLI] Счёт карт ({}): running={}, true={:.2}",
        count.system, count.running_count, count.true_count
    );
    println!("[CLI] Завершение работы dev-CLI.");
}

/// Один полный раунд: ставка → раздача → игрок → дилер → расчёт.
fn play_round(state: &mut RoundState, rng: &mut DeterministicRng, bet: Chips) {
    if let Err(e) = apply_command(state, rng, Command::PlaceBet { amount: bet }) {
        println!("[CLI] place_bet отклонён: {e:?}");
        return;
    }
    if let Err(e) = apply_command(state, rng, Command::Deal) {
        println!("[CLI] deal отклонён: {e:?}");
        return;
    }

    // Ход игрока: страховку не берём, добираем до 17.
    while state.phase == Phase::PlayerTurn {
        if state.insurance_open {
            println!("[CLI] Туз у дилера — отказываемся от страховки.");
            apply_command(state, rng, Command::DeclineInsurance).expect("decline_insurance");
            continue;
        }

        let Some(hand) = state.active_hand() else {
            break;
        };
        let hand_id = hand.id;
        let view = build_round_view(state);
        let dto = view
            .hands
            .iter()
            .find(|h| h.hand_id == hand_id)
            .expect("активная рука есть в DTO");

        let command = if dto.best_total < 17 && view.legal_actions.contains(&PlayerActionKind::Hit)
        {
            Command::Hit { hand_id }
        } else {
            Command::Stand { hand_id }
        };
        println!(
            "[CLI] Рука {hand_id}: {} очков → {command:?}",
            dto.best_total
        );
        apply_command(state, rng, command).expect("действие игрока");
    }

    // Ход дилера — пошагово, как это делал бы фронт с анимацией.
    while state.phase == Phase::DealerTurn {
        apply_command(state, rng, Command::ResolveDealerStep).expect("шаг дилера");
    }

    if state.phase == Phase::Settlement {
        apply_command(state, rng, Command::Settle).expect("расчёт раунда");
    }
}

/// Печать состояния раунда (DTO + события хвостом).
fn debug_print_round(state: &RoundState) {
    let view = build_round_view(state);
    println!(
        "[CLI] Фаза: {:?}, банкролл: {:?}",
        view.phase, view.bankroll
    );
    println!(
        "[CLI] Дилер: {}",
        serde_json::to_string(&view.dealer.cards).unwrap_or_default()
    );
    for hand in &view.hands {
        println!(
            "[CLI] Рука {}: {} очков, ставка {:?}, итог {:?}",
            hand.hand_id, hand.best_total, hand.bet, hand.result
        );
    }
    if let Some(event) = state.events.events.last() {
        println!("[CLI] Последнее событие #{}: {:?}", event.index, event.kind);
    }
}
