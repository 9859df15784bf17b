use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandOwner, Outcome};
use crate::domain::HandId;
use crate::engine::round::Phase;

/// Тип события в раунде.
///
/// События — единственный «выхлоп» движка помимо самого состояния:
/// презентационный слой подписывается на них и сам решает, что и когда
/// анимировать. Карты в событиях не скрываются — прятать холд-карту
/// от клиента обязан DTO-слой (см. `api::queries`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundEventKind {
    /// Ставка принята (и списана с банкролла).
    BetPlaced { amount: Chips },

    /// Ставка снята и возвращена в банкролл.
    BetCleared { amount: Chips },

    /// Шуз пересобран и перемешан; счёт карт обнулён.
    ShoeReshuffled { decks: u8, remaining: usize },

    /// Карта роздана в руку.
    CardDealt {
        owner: HandOwner,
        hand_id: HandId,
        card: Card,
    },

    /// Холд-карта дилера вскрыта.
    HoleCardRevealed { card: Card },

    /// Рука изменилась (новая карта, stand, дабл, сплит).
    HandUpdated { hand_id: HandId },

    /// Фаза раунда сменилась.
    PhaseChanged { from: Phase, to: Phase },

    /// Итог руки определён.
    HandResolved {
        hand_id: HandId,
        outcome: Outcome,
        payout: Chips,
    },

    /// Страховка принята.
    InsuranceTaken { amount: Chips },

    /// Страховка рассчитана. `payout` — полный возврат по ней
    /// (ноль, если у дилера нет блэкджека).
    InsuranceSettled { amount: Chips, payout: Chips },

    /// Раунд брошен командой abandon.
    RoundAbandoned { refunded: Chips },
}

/// Событие раунда с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Журнал событий раунда (накапливается за время жизни RoundState).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundLog {
    pub events: Vec<RoundEvent>,
}

impl RoundLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }
}
