use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Система подсчёта карт. Подключаемая: движку важен только вес карты.
///
/// Вес применяется ровно один раз на каждую карту, показанную лицом вверх
/// (закрытая холд-карта считается в момент вскрытия).
pub trait CountingSystem {
    fn name(&self) -> &'static str;

    /// Знаковый вклад карты в running count.
    fn weight(&self, rank: Rank) -> i32;
}

/// Классический Hi-Lo: 2–6 → +1, 7–9 → 0, десятки/картинки/тузы → −1.
#[derive(Clone, Copy, Debug, Default)]
pub struct HiLo;

impl CountingSystem for HiLo {
    fn name(&self) -> &'static str {
        "hi-lo"
    }

    fn weight(&self, rank: Rank) -> i32 {
        match rank.base_value() {
            2..=6 => 1,
            7..=9 => 0,
            // Десятки/картинки (10) и тузы (1).
            _ => -1,
        }
    }
}

/// Текущий счёт. Обнуляется ровно при пересборке шуза,
/// завершение раунда счёт НЕ трогает.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountState {
    pub running: i32,
}

impl CountState {
    pub fn on_card(&mut self, system: &dyn CountingSystem, rank: Rank) {
        self.running += system.weight(rank);
    }

    pub fn reset(&mut self) {
        self.running = 0;
    }

    /// True count: running count на колоду в остатке.
    /// Остаток ограничен снизу половиной колоды, чтобы не взрывать деление
    /// в конце шуза.
    pub fn true_count(&self, cards_remaining: usize) -> f64 {
        let decks_remaining = (cards_remaining as f64 / 52.0).max(0.5);
        self.running as f64 / decks_remaining
    }
}
