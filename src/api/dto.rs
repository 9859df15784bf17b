use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Outcome;
use crate::domain::HandId;
use crate::engine::actions::PlayerActionKind;
use crate::engine::round::Phase;

/// DTO руки игрока. Производные свойства уже посчитаны —
/// фронту не нужно тащить eval.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandDto {
    pub hand_id: HandId,
    pub cards: Vec<Card>,
    pub bet: Chips,
    pub result: Option<Outcome>,
    pub is_double_down: bool,
    pub is_from_split: bool,
    pub split_depth: u8,
    pub is_standing: bool,
    pub best_total: u8,
    pub is_soft: bool,
    pub is_bust: bool,
}

/// DTO руки дилера. Закрытая холд-карта наружу не отдаётся —
/// вместо неё `None`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DealerHandDto {
    pub cards: Vec<Option<Card>>,
    /// Сумма только по открытым картам.
    pub visible_total: u8,
}

/// DTO всего раунда — то, что фронт рисует после каждой команды.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundViewDto {
    pub phase: Phase,
    pub bankroll: Chips,
    pub current_bet: Chips,
    pub insurance_bet: Chips,
    /// Страховка предложена и ждёт решения.
    pub insurance_open: bool,
    pub dealer: DealerHandDto,
    pub hands: Vec<HandDto>,
    /// Индекс активной руки (None вне PlayerTurn или когда все закрыты).
    pub active_hand_index: Option<usize>,
    pub shoe_remaining: usize,
    pub needs_reshuffle: bool,
    /// Легальные действия по активной руке.
    pub legal_actions: Vec<PlayerActionKind>,
}

/// DTO счёта карт.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountDto {
    pub system: String,
    pub running_count: i32,
    pub true_count: f64,
    pub cards_remaining: usize,
}
