use blackjack_engine::domain::card::Card;
use blackjack_engine::domain::chips::Chips;
use blackjack_engine::domain::hand::Outcome;
use blackjack_engine::domain::rules::{Rules, SurrenderMode};
use blackjack_engine::domain::shoe::Shoe;
use blackjack_engine::engine::{
    self, EngineError, Phase, PlayerAction, PlayerActionKind, RandomSource, RoundEventKind,
    RoundState,
};

/// RNG-заглушка: шуз остаётся в заданном порядке.
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {
        // no-op
    }
}

fn cards(spec: &str) -> Vec<Card> {
    spec.split_whitespace()
        .map(|s| s.parse().expect("card spec"))
        .collect()
}

fn make_state_with(rules: Rules, bankroll: u64) -> RoundState {
    let mut rng = DummyRng;
    RoundState::new(rules, Chips::new(bankroll), &mut rng)
}

fn bet_and_deal(state: &mut RoundState, bet: u64, shoe_spec: &str) {
    state.shoe = Shoe::from_cards(cards(shoe_spec));
    engine::place_bet(state, Chips::new(bet)).expect("place_bet");
    let mut rng = DummyRng;
    engine::deal(state, &mut rng).expect("deal");
}

fn act(state: &mut RoundState, kind: PlayerActionKind) -> Result<(), EngineError> {
    let hand_id = state.active_hand().expect("активная рука").id;
    engine::apply_player_action(state, PlayerAction { hand_id, kind })
}

//
// Окно страховки.
//
#[test]
fn ace_upcard_opens_insurance_window() {
    let mut state = make_state_with(Rules::default(), 1_000);
    // Дилер Ah + Kd; peek откладывается до решения по страховке.
    bet_and_deal(&mut state, 100, "Th Ah 9c Kd");

    assert_eq!(state.phase, Phase::PlayerTurn);
    assert!(state.insurance_open);
    // Холд-карта ещё закрыта — блэкджек дилера пока не вскрыт.
    assert!(!state.dealer_hand.cards[1].face_up);
}

#[test]
fn ten_upcard_does_not_offer_insurance() {
    let mut state = make_state_with(Rules::default(), 1_000);
    bet_and_deal(&mut state, 100, "Th Kc 9s 8d");

    assert!(!state.insurance_open);
    let err = engine::take_insurance(&mut state, Chips::new(50)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
}

#[test]
fn player_actions_wait_for_insurance_decision() {
    let mut state = make_state_with(Rules::default(), 1_000);
    bet_and_deal(&mut state, 100, "Th Ah 9c 9d");

    // Пока решение не принято, обычные действия заблокированы.
    let err = act(&mut state, PlayerActionKind::Hit).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
    let err = act(&mut state, PlayerActionKind::Stand).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));

    engine::decline_insurance(&mut state).unwrap();
    act(&mut state, PlayerActionKind::Stand).unwrap();
}

#[test]
fn insurance_bet_is_capped_at_half_the_main_bet() {
    let mut state = make_state_with(Rules::default(), 1_000);
    bet_and_deal(&mut state, 100, "Th Ah 9c 9d");

    let err = engine::take_insurance(&mut state, Chips::new(60)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
    let err = engine::take_insurance(&mut state, Chips::ZERO).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));

    // Ровно половина — можно.
    engine::take_insurance(&mut state, Chips::new(50)).unwrap();
    assert_eq!(state.insurance_bet, Chips::new(50));
}

#[test]
fn insurance_requires_funds() {
    let mut state = make_state_with(Rules::default(), 100);
    bet_and_deal(&mut state, 100, "Th Ah 9c 9d");

    // Банкролл пуст после основной ставки.
    let err = engine::take_insurance(&mut state, Chips::new(50)).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds));
}

//
// Расчёт страховки.
//
#[test]
fn insurance_pays_two_to_one_when_dealer_has_blackjack() {
    let mut state = make_state_with(Rules::default(), 1_000);
    // Дилер Ah + Kd — блэкджек.
    bet_and_deal(&mut state, 100, "Th Ah 9c Kd");

    engine::take_insurance(&mut state, Chips::new(50)).unwrap();

    // Решение принято → peek вскрывает блэкджек, сразу расчёт.
    assert_eq!(state.phase, Phase::Settlement);
    assert!(state.dealer_hand.cards[1].face_up);

    engine::settle(&mut state).unwrap();

    // Рука проиграна (100), страховка вернула 50 + 100.
    assert_eq!(state.player_hands[0].result, Some(Outcome::Loss));
    assert_eq!(state.bankroll, Chips::new(1_000));
    assert!(state.events.events.iter().any(|e| matches!(
        e.kind,
        RoundEventKind::InsuranceSettled {
            amount: Chips(50),
            payout: Chips(150),
        }
    )));
}

#[test]
fn insurance_is_forfeited_without_dealer_blackjack() {
    let mut state = make_state_with(Rules::default(), 1_000);
    // Дилер Ah + 9d — мягкие 20, блэкджека нет.
    bet_and_deal(&mut state, 100, "Th Ah 9c 9d");

    engine::take_insurance(&mut state, Chips::new(50)).unwrap();
    // Peek ничего не нашёл — играем дальше.
    assert_eq!(state.phase, Phase::PlayerTurn);

    act(&mut state, PlayerActionKind::Stand).unwrap();
    engine::resolve_dealer(&mut state).unwrap();
    engine::settle(&mut state).unwrap();

    // 19 против 20 — проигрыш; страховка сгорела.
    assert_eq!(state.player_hands[0].result, Some(Outcome::Loss));
    assert_eq!(state.bankroll, Chips::new(850));
    assert!(state.events.events.iter().any(|e| matches!(
        e.kind,
        RoundEventKind::InsuranceSettled {
            amount: Chips(50),
            payout: Chips::ZERO,
        }
    )));
}

#[test]
fn declining_insurance_resolves_the_peek() {
    let mut state = make_state_with(Rules::default(), 1_000);
    bet_and_deal(&mut state, 100, "Th Ah 9c Kd");

    engine::decline_insurance(&mut state).unwrap();

    // Блэкджек дилера вскрыт, раунд сразу в расчёте.
    assert_eq!(state.phase, Phase::Settlement);
    engine::settle(&mut state).unwrap();
    assert_eq!(state.bankroll, Chips::new(900));
    // Страховки не было — и события о ней нет.
    assert!(!state
        .events
        .events
        .iter()
        .any(|e| matches!(e.kind, RoundEventKind::InsuranceSettled { .. })));
}

#[test]
fn player_blackjack_still_waits_for_insurance_decision() {
    let mut state = make_state_with(Rules::default(), 1_000);
    // Игрок Ah Kd — блэкджек; дилер As + 9d.
    bet_and_deal(&mut state, 100, "Ah As Kd 9d");

    assert_eq!(state.phase, Phase::PlayerTurn);
    assert!(state.insurance_open);

    engine::decline_insurance(&mut state).unwrap();
    assert_eq!(state.phase, Phase::DealerTurn);

    engine::resolve_dealer(&mut state).unwrap();
    engine::settle(&mut state).unwrap();

    // Блэкджек игрока против 20 дилера — 3:2.
    assert_eq!(state.player_hands[0].result, Some(Outcome::Blackjack));
    assert_eq!(state.bankroll, Chips::new(1_150));
}

//
// Ранний surrender против возможного блэкджека.
//
#[test]
fn early_surrender_is_allowed_before_the_peek() {
    let mut rules = Rules::default();
    rules.surrender = SurrenderMode::Early;
    let mut state = make_state_with(rules, 1_000);
    // Дилер Ah + Kd — блэкджек, но ранняя сдача успевает раньше peek.
    bet_and_deal(&mut state, 100, "Th Ah 6c Kd");
    assert!(state.insurance_open);

    act(&mut state, PlayerActionKind::Surrender).unwrap();

    assert_eq!(state.player_hands[0].result, Some(Outcome::Surrender));
    assert_eq!(state.phase, Phase::Settlement);

    engine::settle(&mut state).unwrap();
    // Половина ставки спасена, несмотря на блэкджек дилера.
    assert_eq!(state.bankroll, Chips::new(950));
}

#[test]
fn late_surrender_is_blocked_while_insurance_is_open() {
    let mut state = make_state_with(Rules::default(), 1_000);
    bet_and_deal(&mut state, 100, "Th Ah 6c Kd");

    // Поздний surrender ждёт решения по страховке — а решение
    // вскроет блэкджек дилера, и сдаваться будет поздно.
    let err = act(&mut state, PlayerActionKind::Surrender).unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction));
}
