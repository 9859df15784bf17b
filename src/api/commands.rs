use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::HandId;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::{self, RandomSource, RoundState};

use super::errors::ApiError;

/// Команда верхнего уровня — один вызов движка.
///
/// Каждая команда валидирует фазу и легальность, меняет состояние и
/// дописывает события в `RoundState::events`. Таймингов здесь нет:
/// пошаговый ход дилера обеспечивается повторными `ResolveDealerStep`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Поставить (или заменить) ставку раунда.
    PlaceBet { amount: Chips },

    /// Снять ставку до раздачи.
    ClearBet,

    /// Раздать руки.
    Deal,

    /// Взять карту.
    Hit { hand_id: HandId },

    /// Остановиться.
    Stand { hand_id: HandId },

    /// Удвоиться.
    Double { hand_id: HandId },

    /// Разделить пару.
    Split { hand_id: HandId },

    /// Сдаться.
    Surrender { hand_id: HandId },

    /// Принять страховку на указанную сумму (не больше половины ставки).
    TakeInsurance { amount: Chips },

    /// Отказаться от страховки.
    DeclineInsurance,

    /// Один шаг хода дилера (вскрытие/добор/стоп).
    ResolveDealerStep,

    /// Доиграть ход дилера до конца.
    ResolveDealer,

    /// Рассчитать раунд.
    Settle,

    /// Вернуться к ставкам (из Completed или Error).
    Reset,

    /// Бросить раунд по политике из правил.
    Abandon,
}

/// Применить команду к раунду. Тонкий диспетчер: вся логика и все
/// проверки — в engine, сюда ничего не просачивается.
pub fn apply_command<R: RandomSource>(
    state: &mut RoundState,
    rng: &mut R,
    command: Command,
) -> Result<(), ApiError> {
    match command {
        Command::PlaceBet { amount } => engine::place_bet(state, amount)?,
        Command::ClearBet => engine::clear_bet(state)?,
        Command::Deal => engine::deal(state, rng)?,
        Command::Hit { hand_id } => {
            engine::apply_player_action(
                state,
                PlayerAction {
                    hand_id,
                    kind: PlayerActionKind::Hit,
                },
            )?;
        }
        Command::Stand { hand_id } => {
            engine::apply_player_action(
                state,
                PlayerAction {
                    hand_id,
                    kind: PlayerActionKind::Stand,
                },
            )?;
        }
        Command::Double { hand_id } => {
            engine::apply_player_action(
                state,
                PlayerAction {
                    hand_id,
                    kind: PlayerActionKind::Double,
                },
            )?;
        }
        Command::Split { hand_id } => {
            engine::apply_player_action(
                state,
                PlayerAction {
                    hand_id,
                    kind: PlayerActionKind::Split,
                },
            )?;
        }
        Command::Surrender { hand_id } => {
            engine::apply_player_action(
                state,
                PlayerAction {
                    hand_id,
                    kind: PlayerActionKind::Surrender,
                },
            )?;
        }
        Command::TakeInsurance { amount } => engine::take_insurance(state, amount)?,
        Command::DeclineInsurance => engine::decline_insurance(state)?,
        Command::ResolveDealerStep => {
            engine::resolve_dealer_step(state)?;
        }
        Command::ResolveDealer => engine::resolve_dealer(state)?,
        Command::Settle => engine::settle(state)?,
        Command::Reset => engine::reset(state)?,
        Command::Abandon => engine::abandon(state)?,
    }
    Ok(())
}
