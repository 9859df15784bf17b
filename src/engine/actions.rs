use serde::{Deserialize, Serialize};

use crate::domain::HandId;

/// Тип действия игрока по конкретной руке.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    /// Взять ещё одну карту.
    Hit,
    /// Остановиться.
    Stand,
    /// Удвоить ставку и получить ровно одну карту.
    Double,
    /// Разделить пару на две руки.
    Split,
    /// Сдаться за половину ставки.
    Surrender,
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// По какой руке действие (после сплитов рук может быть несколько).
    pub hand_id: HandId,
    /// Само действие.
    pub kind: PlayerActionKind,
}
