use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{Hand, Outcome};
use crate::domain::rules::Rules;
use crate::engine::errors::EngineError;
use crate::engine::events::RoundEventKind;
use crate::engine::round::{Phase, RoundState};
use crate::engine::validation::ensure_phase;
use crate::eval;

/// Рассчитать раунд: классифицировать каждую руку против финальной руки
/// дилера, выплатить выигрыши, рассчитать страховку.
///
/// Единственное место, где банкролл пополняется по итогам раунда
/// (списания были в place_bet / double / split / take_insurance).
/// Руки, закрытые перебором или сдачей, повторно не оцениваются.
pub fn settle(state: &mut RoundState) -> Result<(), EngineError> {
    ensure_phase(state, Phase::Settlement, "settle")?;

    let dealer_cards = state.dealer_hand.cards.clone();
    let mut total_return = Chips::ZERO;

    for idx in 0..state.player_hands.len() {
        let (outcome, payout) = match state.player_hands[idx].result {
            // Ставка сгорела в момент перебора.
            Some(Outcome::Bust) => continue,
            // Сдача: возврат половины ставки независимо от руки дилера.
            Some(Outcome::Surrender) => {
                total_return += state.player_hands[idx].bet.half();
                continue;
            }
            Some(_) => continue,
            None => {
                let hand = &state.player_hands[idx];
                let outcome = classify_outcome(hand, &dealer_cards);
                let payout = payout_for(outcome, hand.bet, &state.rules);
                (outcome, payout)
            }
        };

        state.player_hands[idx].result = Some(outcome);
        total_return += payout;
        let hand_id = state.player_hands[idx].id;
        state.events.push(RoundEventKind::HandResolved {
            hand_id,
            outcome,
            payout,
        });
    }

    // Страховка живёт отдельно от исходов рук: выигрывает ровно тогда,
    // когда у дилера блэкджек, иначе сгорает.
    if !state.insurance_bet.is_zero() {
        let amount = state.insurance_bet;
        let payout = if eval::is_blackjack(&dealer_cards, false) {
            amount + state.rules.insurance_payout.winnings(amount)
        } else {
            Chips::ZERO
        };
        total_return += payout;
        state
            .events
            .push(RoundEventKind::InsuranceSettled { amount, payout });
    }

    state.bankroll += total_return;
    state.set_phase(Phase::Completed);
    Ok(())
}

/// Классификация исхода руки против финальных карт дилера.
/// Перебор игрока сюда не попадает — он зафиксирован в момент действия.
pub fn classify_outcome(hand: &Hand, dealer_cards: &[Card]) -> Outcome {
    let player_bj = eval::is_blackjack(&hand.cards, hand.is_from_split);
    let dealer_bj = eval::is_blackjack(dealer_cards, false);

    if player_bj && dealer_bj {
        return Outcome::Push;
    }
    if player_bj {
        return Outcome::Blackjack;
    }
    if dealer_bj {
        // Натуральный блэкджек дилера бьёт любые 21 из трёх карт.
        return Outcome::Loss;
    }
    if eval::is_bust(dealer_cards) {
        return Outcome::Win;
    }

    let player = eval::best_total(&hand.cards);
    let dealer = eval::best_total(dealer_cards);
    if player > dealer {
        Outcome::Win
    } else if player < dealer {
        Outcome::Loss
    } else {
        Outcome::Push
    }
}

/// Полный возврат по руке (ставка + выигрыш), который уходит в банкролл.
pub fn payout_for(outcome: Outcome, bet: Chips, rules: &Rules) -> Chips {
    match outcome {
        Outcome::Win => bet + bet,
        Outcome::Blackjack => bet + rules.blackjack_payout.winnings(bet),
        Outcome::Push => bet,
        Outcome::Loss | Outcome::Bust => Chips::ZERO,
        Outcome::Surrender => bet.half(),
    }
}
