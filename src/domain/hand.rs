use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::HandId;

/// Кому принадлежит рука.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOwner {
    Dealer,
    Player,
}

/// Итог руки. Выставляется ровно один раз:
/// bust/surrender — в момент действия, остальное — на этапе Settlement.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    /// Обычная победа, платит 1:1.
    Win,
    /// Натуральный блэкджек, платит по `Rules::blackjack_payout`.
    Blackjack,
    /// Ничья, ставка возвращается.
    Push,
    /// Проигрыш по очкам.
    Loss,
    /// Перебор, ставка сгорела в момент перебора.
    Bust,
    /// Сдача, возвращается половина ставки.
    Surrender,
}

/// Рука за столом. Производные свойства (суммы, мягкость, блэкджек,
/// возможность сплита) здесь НЕ хранятся — их считает `eval`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hand {
    pub id: HandId,
    pub owner: HandOwner,
    pub cards: Vec<Card>,
    /// Ставка руки. Списана с банкролла при place_bet / double / split.
    pub bet: Chips,
    pub result: Option<Outcome>,
    pub is_double_down: bool,
    /// Рука получена сплитом (сама или её предок) — натуральный блэкджек
    /// для неё невозможен.
    pub is_from_split: bool,
    /// Сколько раз линия этой руки сплитовалась от исходной раздачи.
    pub split_depth: u8,
    /// Игрок сказал "стоп" (или 21/дабл закрыли руку автоматически).
    pub is_standing: bool,
    /// По руке уже было хоть одно действие — закрывает surrender.
    pub has_acted: bool,
}

impl Hand {
    pub fn new(id: HandId, owner: HandOwner, bet: Chips) -> Self {
        Self {
            id,
            owner,
            cards: Vec::new(),
            bet,
            result: None,
            is_double_down: false,
            is_from_split: false,
            split_depth: 0,
            is_standing: false,
            has_acted: false,
        }
    }

    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Рука больше не ждёт действий игрока
    /// (stand / перебор / surrender / закрытый дабл).
    pub fn is_resolved(&self) -> bool {
        self.is_standing || self.result.is_some()
    }
}
