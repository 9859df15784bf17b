use crate::domain::HandId;
use crate::engine::round::Phase;

use thiserror::Error;

/// Ошибки движка блэкджека.
///
/// Все ошибки возвращаются, никогда не паникуем; команда либо применяется
/// целиком, либо отклоняется без изменений состояния. Единственное
/// исключение — `ShoeExhausted`: это фатальный сбой посреди раунда,
/// он переводит раунд в фазу `Error` (выход — только `reset`).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Команда {command} недопустима в фазе {phase:?}")]
    InvalidPhaseTransition {
        phase: Phase,
        command: &'static str,
    },

    #[error("Недостаточно средств в банкролле")]
    InsufficientFunds,

    #[error("Ставка вне лимитов стола")]
    BetOutOfRange,

    #[error("Недопустимое действие в текущем состоянии раунда")]
    IllegalAction,

    #[error("Шуз исчерпан посреди раунда")]
    ShoeExhausted,

    #[error("Рука с id={0} не найдена")]
    HandNotFound(HandId),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
