use blackjack_engine::domain::card::Card;
use blackjack_engine::domain::rules::Rules;
use blackjack_engine::eval::{best_total, can_split, is_blackjack, is_bust, is_soft, legal_totals};

/// Разбор списка карт из строки вида "Ah Kd 7c".
fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| s.parse().expect("card spec"))
        .collect()
}

//
// legal_totals
//
#[test]
fn legal_totals_no_aces_single_total() {
    assert_eq!(legal_totals(&cards("7c 9d")), vec![16]);
    assert_eq!(legal_totals(&cards("Kh Qs Jd")), vec![30]);
}

#[test]
fn legal_totals_one_ace_two_totals() {
    // Туз как 1 или 11.
    assert_eq!(legal_totals(&cards("Ah 6s")), vec![7, 17]);
}

#[test]
fn legal_totals_two_aces_capped_at_21() {
    // База 2; +10 можно только один раз: 2, 12. 22 уже перебор.
    assert_eq!(legal_totals(&cards("Ah As")), vec![2, 12]);
}

#[test]
fn legal_totals_ace_dropped_when_it_busts() {
    // База 16; 26 > 21, так что туз остаётся единицей.
    assert_eq!(legal_totals(&cards("Ah 6s 9c")), vec![16]);
}

#[test]
fn legal_totals_consistent_with_ace_one_or_eleven() {
    // Любая сумма отличается от базовой на 10*k — других вариантов нет.
    let hand = cards("Ah As 4c 3d");
    let totals = legal_totals(&hand);
    let base = totals[0];
    for t in &totals {
        assert_eq!((t - base) % 10, 0);
        assert!(*t == base || *t <= 21);
    }
}

//
// best_total
//
#[test]
fn best_total_prefers_highest_under_21() {
    assert_eq!(best_total(&cards("Ah 6s")), 17);
    assert_eq!(best_total(&cards("Ah 6s 4c")), 21);
    assert_eq!(best_total(&cards("7c 9d")), 16);
}

#[test]
fn best_total_on_bust_is_minimum() {
    // Перебор: показываем минимально возможную сумму.
    assert_eq!(best_total(&cards("Kh Qs 5c")), 25);
    assert_eq!(best_total(&cards("Kh Qs Jd 2c")), 32);
}

//
// is_bust / is_soft
//
#[test]
fn bust_only_when_every_total_exceeds_21() {
    assert!(!is_bust(&cards("Ah Kh Qs")));
    assert!(is_bust(&cards("Kh Qs 5c")));
    assert!(!is_bust(&cards("Ah 6s 9c")));
}

#[test]
fn soft_hand_has_ace_counted_as_eleven() {
    assert!(is_soft(&cards("Ah 6s")));
    // Туз принудительно стал единицей — рука жёсткая.
    assert!(!is_soft(&cards("Ah 6s 9c")));
    assert!(!is_soft(&cards("Kh 7s")));
}

//
// is_blackjack
//
#[test]
fn blackjack_is_two_card_21_without_split_ancestry() {
    assert!(is_blackjack(&cards("Ah Kd"), false));
    assert!(!is_blackjack(&cards("Ah Kd 2c"), false)); // 3 карты
    assert!(!is_blackjack(&cards("Kh 7s 4d"), false)); // 21 из трёх
    // 21 из двух карт после сплита — НЕ блэкджек.
    assert!(!is_blackjack(&cards("Ah Kd"), true));
}

//
// can_split
//
#[test]
fn can_split_requires_equal_value_pair() {
    let rules = Rules::default();
    assert!(can_split(&cards("8h 8s"), &rules, 0));
    assert!(!can_split(&cards("8h 9s"), &rules, 0));
    // Три карты сплитовать нельзя, даже если пара внутри есть.
    assert!(!can_split(&cards("8h 8s 2c"), &rules, 0));
}

#[test]
fn can_split_by_rank_value_not_exact_rank() {
    // K и Q — обе по 10, это валидная пара для сплита.
    let rules = Rules::default();
    assert!(can_split(&cards("Kh Qs"), &rules, 0));
    assert!(can_split(&cards("Th Js"), &rules, 0));
}

#[test]
fn can_split_respects_max_depth() {
    let mut rules = Rules::default();
    rules.max_splits = 2;
    assert!(can_split(&cards("8h 8s"), &rules, 1));
    assert!(!can_split(&cards("8h 8s"), &rules, 2));
}

#[test]
fn can_split_respects_resplit_flag() {
    let mut rules = Rules::default();
    rules.resplit_allowed = false;
    assert!(can_split(&cards("8h 8s"), &rules, 0));
    assert!(!can_split(&cards("8h 8s"), &rules, 1));
}

#[test]
fn resplitting_aces_is_gated_by_rules() {
    let mut rules = Rules::default();
    rules.resplit_aces_allowed = false;
    // Первый сплит тузов разрешён, пересплит — нет.
    assert!(can_split(&cards("Ah As"), &rules, 0));
    assert!(!can_split(&cards("Ah As"), &rules, 1));

    rules.resplit_aces_allowed = true;
    assert!(can_split(&cards("Ah As"), &rules, 1));
}
