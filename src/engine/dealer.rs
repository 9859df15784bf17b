use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::HandOwner;
use crate::domain::rules::Rules;
use crate::engine::errors::EngineError;
use crate::engine::events::RoundEventKind;
use crate::engine::round::{self, Phase, RoundState};
use crate::engine::validation::ensure_phase;
use crate::eval;

/// Что произошло за один шаг хода дилера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum DealerStep {
    /// Холд-карта вскрыта.
    HoleCardRevealed,
    /// Дилер добрал карту и продолжает.
    CardDrawn(Card),
    /// Дилер остановился; раунд перешёл к расчёту.
    Stood,
    /// Дилер перебрал; раунд перешёл к расчёту.
    Busted,
}

/// Политика добора дилера — чистая функция от правил и руки.
/// Никакой случайности, кроме порядка карт в шузе.
pub fn dealer_should_hit(cards: &[Card], rules: &Rules) -> bool {
    if eval::is_bust(cards) {
        return false;
    }
    let total = eval::best_total(cards);
    if total < 17 {
        return true;
    }
    total == 17 && eval::is_soft(cards) && rules.dealer_hits_soft_17
}

/// Один дискретный шаг хода дилера. Темп (анимации, паузы) задаёт
/// вызывающий слой, дергая эту функцию по своему расписанию.
pub fn resolve_dealer_step(state: &mut RoundState) -> Result<DealerStep, EngineError> {
    ensure_phase(state, Phase::DealerTurn, "resolve_dealer_step")?;

    // Первый шаг — всегда вскрытие холд-карты.
    if hole_card_hidden(state) {
        reveal_hole_card(state);
        return Ok(DealerStep::HoleCardRevealed);
    }

    if !dealer_should_hit(&state.dealer_hand.cards, &state.rules) {
        state.set_phase(Phase::Settlement);
        return Ok(DealerStep::Stood);
    }

    let card = round::draw_or_fail(state, true)?;
    state.dealer_hand.push_card(card);
    let hand_id = state.dealer_hand.id;
    state.events.push(RoundEventKind::CardDealt {
        owner: HandOwner::Dealer,
        hand_id,
        card,
    });

    if eval::is_bust(&state.dealer_hand.cards) {
        state.set_phase(Phase::Settlement);
        return Ok(DealerStep::Busted);
    }
    Ok(DealerStep::CardDrawn(card))
}

/// Доиграть ход дилера до конца (для вызывающих без пошаговой подачи).
pub fn resolve_dealer(state: &mut RoundState) -> Result<(), EngineError> {
    ensure_phase(state, Phase::DealerTurn, "resolve_dealer")?;
    while state.phase == Phase::DealerTurn {
        resolve_dealer_step(state)?;
    }
    Ok(())
}

fn hole_card_hidden(state: &RoundState) -> bool {
    state
        .dealer_hand
        .cards
        .get(1)
        .map(|c| !c.face_up)
        .unwrap_or(false)
}

/// Вскрыть холд-карту: перевернуть, учесть в счёте, отдать событие.
/// Идемпотентно — повторный вызов ничего не делает.
pub(crate) fn reveal_hole_card(state: &mut RoundState) {
    if !hole_card_hidden(state) {
        return;
    }
    state.dealer_hand.cards[1].face_up = true;
    let card = state.dealer_hand.cards[1];
    state.count_card(card.rank);
    state.events.push(RoundEventKind::HoleCardRevealed { card });
}
