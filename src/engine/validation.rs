use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::round::{Phase, RoundState};
use crate::domain::rules::SurrenderMode;
use crate::eval;

/// Проверка фазы для команды. Любая команда начинается с неё.
pub fn ensure_phase(
    state: &RoundState,
    expected: Phase,
    command: &'static str,
) -> Result<(), EngineError> {
    if state.phase != expected {
        return Err(EngineError::InvalidPhaseTransition {
            phase: state.phase,
            command,
        });
    }
    Ok(())
}

/// Может ли игрок выполнить действие по руке `idx` прямо сейчас.
///
/// Вся легальность действий живёт здесь, внутри движка: UI-слой может
/// показывать какие угодно кнопки, но обойти эти проверки не может.
/// Чистая функция: состояние не меняет.
pub fn validate_player_action(
    state: &RoundState,
    idx: usize,
    kind: PlayerActionKind,
) -> Result<(), EngineError> {
    if idx != state.active_hand_index {
        return Err(EngineError::IllegalAction);
    }
    let hand = state
        .player_hands
        .get(idx)
        .ok_or(EngineError::Internal("активный индекс вне списка рук"))?;
    if hand.is_resolved() {
        return Err(EngineError::IllegalAction);
    }

    // Пока открыто окно страховки, допустим только ранний surrender;
    // остальное — после решения по страховке.
    if state.insurance_open
        && !(kind == PlayerActionKind::Surrender && state.rules.surrender == SurrenderMode::Early)
    {
        return Err(EngineError::IllegalAction);
    }

    match kind {
        PlayerActionKind::Hit => Ok(()),

        PlayerActionKind::Stand => Ok(()),

        PlayerActionKind::Double => {
            if hand.cards.len() != 2 || hand.is_double_down {
                return Err(EngineError::IllegalAction);
            }
            if hand.split_depth > 0 && !state.rules.double_after_split {
                return Err(EngineError::IllegalAction);
            }
            if state.bankroll < hand.bet {
                return Err(EngineError::InsufficientFunds);
            }
            Ok(())
        }

        PlayerActionKind::Split => {
            if !eval::can_split(&hand.cards, &state.rules, hand.split_depth) {
                return Err(EngineError::IllegalAction);
            }
            if state.bankroll < hand.bet {
                return Err(EngineError::InsufficientFunds);
            }
            Ok(())
        }

        PlayerActionKind::Surrender => {
            if state.rules.surrender == SurrenderMode::None {
                return Err(EngineError::IllegalAction);
            }
            // Только первым действием по исходной руке из двух карт.
            if hand.cards.len() != 2 || hand.has_acted {
                return Err(EngineError::IllegalAction);
            }
            Ok(())
        }
    }
}

/// Набор легальных действий для активной руки (для UI).
pub fn legal_actions(state: &RoundState) -> Vec<PlayerActionKind> {
    if state.phase != Phase::PlayerTurn {
        return Vec::new();
    }
    let idx = state.active_hand_index;
    [
        PlayerActionKind::Hit,
        PlayerActionKind::Stand,
        PlayerActionKind::Double,
        PlayerActionKind::Split,
        PlayerActionKind::Surrender,
    ]
    .into_iter()
    .filter(|&kind| validate_player_action(state, idx, kind).is_ok())
    .collect()
}
