use std::collections::HashMap;

use blackjack_engine::domain::card::{Card, Rank};
use blackjack_engine::domain::shoe::Shoe;

fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| s.parse().expect("card spec"))
        .collect()
}

#[test]
fn standard_shoe_has_decks_times_52_cards() {
    for decks in [1u8, 2, 6, 8] {
        let shoe = Shoe::standard(decks, 0);
        assert_eq!(shoe.remaining(), decks as usize * 52);
        assert!(shoe.dealt.is_empty());
    }
}

#[test]
fn standard_shoe_has_correct_rank_multiplicity() {
    // В шузе на N колод каждого ранга ровно 4*N (по одному на масть).
    let decks = 6u8;
    let shoe = Shoe::standard(decks, 0);

    let mut by_rank: HashMap<Rank, usize> = HashMap::new();
    for card in &shoe.cards {
        *by_rank.entry(card.rank).or_insert(0) += 1;
    }

    assert_eq!(by_rank.len(), 13);
    for (_, count) in by_rank {
        assert_eq!(count, 4 * decks as usize);
    }
}

#[test]
fn drawing_all_cards_empties_shoe_exactly_once() {
    let mut shoe = Shoe::standard(2, 0);
    let total = shoe.remaining();

    for i in 0..total {
        // Инвариант: remaining + dealt == total на каждом шаге.
        assert_eq!(shoe.remaining() + shoe.dealt.len(), total);
        let card = shoe.draw(true);
        assert!(card.is_some(), "card {i} must exist");
    }

    assert!(shoe.is_empty());
    assert_eq!(shoe.dealt.len(), total);
    // Дальше шуз пуст — и остаётся пустым.
    assert!(shoe.draw(true).is_none());
    assert!(shoe.draw(false).is_none());
}

#[test]
fn draw_sets_face_orientation() {
    let mut shoe = Shoe::from_cards(cards("Ah Kd"));

    let up = shoe.draw(true).unwrap();
    assert!(up.face_up);

    let down = shoe.draw(false).unwrap();
    assert!(!down.face_up);
    // В списке розданных карта лежит в той же ориентации.
    assert!(!shoe.dealt[1].face_up);
}

#[test]
fn from_cards_deals_in_listed_order() {
    let mut shoe = Shoe::from_cards(cards("Ah Kd 7c"));

    assert_eq!(shoe.draw(true).unwrap().to_string(), "Ah");
    assert_eq!(shoe.draw(true).unwrap().to_string(), "Kd");
    assert_eq!(shoe.draw(true).unwrap().to_string(), "7c");
    assert!(shoe.is_empty());
}

#[test]
fn needs_reshuffle_below_threshold() {
    let mut shoe = Shoe::standard(1, 20);
    assert!(!shoe.needs_reshuffle());

    // Снимаем карты, пока не пробьём порог.
    for _ in 0..32 {
        shoe.draw(true);
    }
    assert_eq!(shoe.remaining(), 20);
    assert!(!shoe.needs_reshuffle()); // ровно на пороге — ещё можно

    shoe.draw(true);
    assert!(shoe.needs_reshuffle());
}
