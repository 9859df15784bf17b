use crate::domain::card::{Card, Rank};
use crate::domain::rules::Rules;

/// Все достижимые суммы руки.
///
/// Каждый туз считается как 1; затем для каждого туза можно добавить +10,
/// пока сумма не превышает 21. Базовая сумма входит всегда, даже если это
/// перебор. Результат отсортирован по возрастанию, без дубликатов.
pub fn legal_totals(cards: &[Card]) -> Vec<u8> {
    let mut base: u16 = 0;
    let mut aces = 0u8;

    for card in cards {
        if card.rank == Rank::Ace {
            aces += 1;
        }
        base += card.rank.base_value() as u16;
    }

    let mut totals = vec![base.min(255) as u8];
    for k in 1..=aces as u16 {
        let t = base + 10 * k;
        if t <= 21 {
            totals.push(t as u8);
        }
    }
    totals
}

/// Лучшая сумма: максимальная ≤ 21, иначе минимальная
/// (значение перебора — только для отображения).
pub fn best_total(cards: &[Card]) -> u8 {
    let totals = legal_totals(cards);
    totals
        .iter()
        .copied()
        .filter(|&t| t <= 21)
        .max()
        .unwrap_or_else(|| totals[0])
}

/// Перебор: все достижимые суммы больше 21.
pub fn is_bust(cards: &[Card]) -> bool {
    legal_totals(cards).iter().all(|&t| t > 21)
}

/// Мягкая рука: сумм больше одной, то есть какой-то туз сейчас считается как 11.
pub fn is_soft(cards: &[Card]) -> bool {
    legal_totals(cards).len() > 1
}

/// Натуральный блэкджек: ровно 2 исходные карты на 21, без сплитовой родословной.
pub fn is_blackjack(cards: &[Card], from_split: bool) -> bool {
    !from_split && cards.len() == 2 && best_total(cards) == 21
}

/// Можно ли сплитовать: ровно 2 карты одинаковой стоимости,
/// глубина меньше лимита, пересплиты и пересплиты тузов — по правилам.
pub fn can_split(cards: &[Card], rules: &Rules, split_depth: u8) -> bool {
    if cards.len() != 2 {
        return false;
    }
    if cards[0].rank.base_value() != cards[1].rank.base_value() {
        return false;
    }
    if split_depth >= rules.max_splits {
        return false;
    }
    if split_depth > 0 && !rules.resplit_allowed {
        return false;
    }
    if cards[0].rank == Rank::Ace && split_depth > 0 && !rules.resplit_aces_allowed {
        return false;
    }
    true
}
