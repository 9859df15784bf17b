use serde::{Deserialize, Serialize};

use crate::engine::actions::PlayerActionKind;
use crate::engine::round::{Phase, RoundState};
use crate::engine::validation::legal_actions;
use crate::eval;

use super::dto::{CountDto, DealerHandDto, HandDto, RoundViewDto};

/// Запросы "только чтение".
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние раунда для отрисовки.
    GetRound,

    /// Текущий счёт карт.
    GetCount,

    /// Легальные действия по активной руке.
    GetLegalActions,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Round(RoundViewDto),
    Count(CountDto),
    LegalActions(Vec<PlayerActionKind>),
}

pub fn run_query(state: &RoundState, query: Query) -> QueryResponse {
    match query {
        Query::GetRound => QueryResponse::Round(build_round_view(state)),
        Query::GetCount => QueryResponse::Count(build_count_view(state)),
        Query::GetLegalActions => QueryResponse::LegalActions(legal_actions(state)),
    }
}

/// Сформировать DTO раунда. Закрытая холд-карта дилера наружу не уходит.
pub fn build_round_view(state: &RoundState) -> RoundViewDto {
    let dealer_cards: Vec<_> = state
        .dealer_hand
        .cards
        .iter()
        .map(|c| if c.face_up { Some(*c) } else { None })
        .collect();
    let visible: Vec<_> = state
        .dealer_hand
        .cards
        .iter()
        .copied()
        .filter(|c| c.face_up)
        .collect();

    let hands = state
        .player_hands
        .iter()
        .map(|h| HandDto {
            hand_id: h.id,
            cards: h.cards.clone(),
            bet: h.bet,
            result: h.result,
            is_double_down: h.is_double_down,
            is_from_split: h.is_from_split,
            split_depth: h.split_depth,
            is_standing: h.is_standing,
            best_total: eval::best_total(&h.cards),
            is_soft: eval::is_soft(&h.cards),
            is_bust: eval::is_bust(&h.cards),
        })
        .collect();

    let active_hand_index = if state.phase == Phase::PlayerTurn
        && state.active_hand_index < state.player_hands.len()
    {
        Some(state.active_hand_index)
    } else {
        None
    };

    RoundViewDto {
        phase: state.phase,
        bankroll: state.bankroll,
        current_bet: state.current_bet,
        insurance_bet: state.insurance_bet,
        insurance_open: state.insurance_open,
        dealer: DealerHandDto {
            cards: dealer_cards,
            visible_total: if visible.is_empty() {
                0
            } else {
                eval::best_total(&visible)
            },
        },
        hands,
        active_hand_index,
        shoe_remaining: state.shoe.remaining(),
        needs_reshuffle: state.shoe.needs_reshuffle(),
        legal_actions: legal_actions(state),
    }
}

/// Сформировать DTO счёта карт.
pub fn build_count_view(state: &RoundState) -> CountDto {
    CountDto {
        system: state.counting_system().name().to_string(),
        running_count: state.count.running,
        true_count: state.true_count(),
        cards_remaining: state.shoe.remaining(),
    }
}
