use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Шуз — рабочий набор карт на несколько колод.
/// В домене это просто два упорядоченных списка: нерозданные и розданные.
/// Перемешивание делает engine (через RandomSource из infra), НЕ здесь.
///
/// Инвариант: `remaining() + dealt.len() == decks * 52`
/// в любой момент, кроме самой пересборки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Shoe {
    /// Нерозданные карты; верх шуза — конец вектора.
    pub cards: Vec<Card>,
    /// Уже розданные карты, в порядке раздачи.
    pub dealt: Vec<Card>,
    /// Из скольких колод собран шуз.
    pub decks: u8,
    /// Порог пересборки: карт в остатке, ниже которого нужна пересборка.
    pub reshuffle_threshold: usize,
}

impl Shoe {
    /// Шуз из `decks` стандартных колод в фабричном порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A, колода за колодой.
    pub fn standard(decks: u8, reshuffle_threshold: usize) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * 52);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe {
            cards,
            dealt: Vec::new(),
            decks,
            reshuffle_threshold,
        }
    }

    /// Шуз с заранее известным порядком карт — для тестов и реплея.
    /// Первая карта списка раздаётся первой.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let decks = (cards.len() / 52).max(1) as u8;
        let mut ordered = cards;
        // Внутри храним верх шуза в конце.
        ordered.reverse();
        Shoe {
            cards: ordered,
            dealt: Vec::new(),
            decks,
            reshuffle_threshold: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять верхнюю карту. Карта уходит и в руку, и в список розданных.
    pub fn draw(&mut self, face_up: bool) -> Option<Card> {
        let mut card = self.cards.pop()?;
        card.face_up = face_up;
        self.dealt.push(card);
        Some(card)
    }

    /// Пора ли пересобирать шуз (проверяется между раундами, не посреди руки).
    pub fn needs_reshuffle(&self) -> bool {
        self.remaining() < self.reshuffle_threshold
    }
}
