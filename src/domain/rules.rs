use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Режим surrender за столом.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SurrenderMode {
    /// Сдаться нельзя.
    None,
    /// Ранний surrender — до того, как дилер проверит себя на блэкджек.
    Early,
    /// Поздний surrender — только если у дилера нет блэкджека.
    Late,
}

/// Что делать со ставками при команде `abandon`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AbandonPolicy {
    /// Ставки сгорают (обычный выход из-за стола посреди раунда).
    ForfeitBet,
    /// Ставки возвращаются (аварийный сценарий, см. ShoeExhausted).
    RefundBet,
}

/// Коэффициент выплаты как рациональное число (3:2, 6:5, 2:1).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutRatio {
    pub num: u32,
    pub den: u32,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: PayoutRatio = PayoutRatio { num: 3, den: 2 };
    pub const SIX_TO_FIVE: PayoutRatio = PayoutRatio { num: 6, den: 5 };
    pub const TWO_TO_ONE: PayoutRatio = PayoutRatio { num: 2, den: 1 };

    /// Выигрыш по этой ставке (без возврата самой ставки).
    pub fn winnings(self, bet: Chips) -> Chips {
        bet.mul_ratio(self.num, self.den)
    }
}

/// Правила стола. Неизменны в течение раунда;
/// смена правил означает новый шуз (и новый `RoundState`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rules {
    /// Количество колод в шузе (1–8).
    pub decks: u8,
    /// Дилер добирает на мягких 17 (H17) или стоит (S17).
    pub dealer_hits_soft_17: bool,
    /// Можно ли удваивать после сплита (DAS).
    pub double_after_split: bool,
    /// Можно ли пересплитовывать (split уже сплитованной руки).
    pub resplit_allowed: bool,
    /// Можно ли пересплитовывать тузы.
    pub resplit_aces_allowed: bool,
    /// Максимальная глубина сплитов на линию.
    pub max_splits: u8,
    /// Режим surrender.
    pub surrender: SurrenderMode,
    /// Выплата за натуральный блэкджек.
    pub blackjack_payout: PayoutRatio,
    /// Выплата по страховке.
    pub insurance_payout: PayoutRatio,
    /// Дилер сразу проверяет себя на блэкджек при тузе/десятке.
    pub dealer_peeks_for_blackjack: bool,
    /// Доля шуза, которая раздаётся до пересборки (cut card).
    pub penetration: f64,
    /// Лимиты ставок стола.
    pub min_bet: Chips,
    pub max_bet: Chips,
    /// Политика для `abandon`.
    pub abandon_policy: AbandonPolicy,
}

impl Default for Rules {
    /// Стандартные правила: 6 колод, S17, DAS, 3:2, поздний surrender.
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_hits_soft_17: false,
            double_after_split: true,
            resplit_allowed: true,
            resplit_aces_allowed: false,
            max_splits: 3,
            surrender: SurrenderMode::Late,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            insurance_payout: PayoutRatio::TWO_TO_ONE,
            dealer_peeks_for_blackjack: true,
            penetration: 0.75,
            min_bet: Chips(10),
            max_bet: Chips(10_000),
            abandon_policy: AbandonPolicy::ForfeitBet,
        }
    }
}

impl Rules {
    /// Порог пересборки: сколько карт должно оставаться в шузе,
    /// чтобы раздавать новый раунд без пересборки.
    pub fn reshuffle_threshold(&self) -> usize {
        let total = self.decks as usize * 52;
        let dealt_limit = (total as f64 * self.penetration) as usize;
        total.saturating_sub(dealt_limit)
    }
}
