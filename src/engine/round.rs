use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;
use crate::domain::hand::{Hand, HandOwner, Outcome};
use crate::domain::rules::{AbandonPolicy, Rules, SurrenderMode};
use crate::domain::shoe::Shoe;
use crate::domain::HandId;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::counting::{CountState, CountingSystem, HiLo};
use crate::engine::dealer;
use crate::engine::errors::EngineError;
use crate::engine::events::{RoundEventKind, RoundLog};
use crate::engine::validation::{ensure_phase, validate_player_action};
use crate::engine::RandomSource;
use crate::eval;

/// Фаза раунда.
///
/// Нормальный цикл: Betting → Dealing → PlayerTurn → DealerTurn →
/// Settlement → Completed → Betting. Dealing — внутренняя фаза команды
/// `deal`, между командами она не наблюдается. `Error` достижима из любой
/// фазы при фатальном сбое и покидается только через `reset`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Betting,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Settlement,
    Completed,
    Error,
}

/// Состояние одного раунда (и его шуза) за одним местом стола.
///
/// Единственный владелец шуза и счёта карт; все команды движка работают
/// с одним `RoundState` строго по очереди. Несколько столов — несколько
/// независимых `RoundState`, никакого общего мутабельного счёта.
pub struct RoundState {
    pub phase: Phase,
    pub rules: Rules,
    pub shoe: Shoe,
    pub dealer_hand: Hand,
    /// Руки игрока в порядке игры; сплиты вставляют новую руку
    /// сразу после породившей.
    pub player_hands: Vec<Hand>,
    pub active_hand_index: usize,
    pub bankroll: Chips,
    /// Текущая ставка раунда. Списана с банкролла в момент place_bet.
    pub current_bet: Chips,
    pub insurance_bet: Chips,
    /// Страховка предложена (туз у дилера) и решение ещё не принято.
    pub insurance_open: bool,
    pub count: CountState,
    counting: Box<dyn CountingSystem>,
    pub events: RoundLog,
    next_hand_id: HandId,
}

impl RoundState {
    /// Новый раунд-стейт с перемешанным шузом и системой Hi-Lo.
    pub fn new<R: RandomSource>(rules: Rules, bankroll: Chips, rng: &mut R) -> Self {
        Self::with_counting(rules, bankroll, rng, Box::new(HiLo))
    }

    /// То же, но с произвольной системой подсчёта.
    pub fn with_counting<R: RandomSource>(
        rules: Rules,
        bankroll: Chips,
        rng: &mut R,
        counting: Box<dyn CountingSystem>,
    ) -> Self {
        let mut shoe = Shoe::standard(rules.decks, rules.reshuffle_threshold());
        rng.shuffle(&mut shoe.cards);

        let mut events = RoundLog::new();
        events.push(RoundEventKind::ShoeReshuffled {
            decks: shoe.decks,
            remaining: shoe.remaining(),
        });

        Self {
            phase: Phase::Betting,
            rules,
            shoe,
            dealer_hand: Hand::new(0, HandOwner::Dealer, Chips::ZERO),
            player_hands: Vec::new(),
            active_hand_index: 0,
            bankroll,
            current_bet: Chips::ZERO,
            insurance_bet: Chips::ZERO,
            insurance_open: false,
            count: CountState::default(),
            counting,
            events,
            next_hand_id: 1,
        }
    }

    pub fn counting_system(&self) -> &dyn CountingSystem {
        self.counting.as_ref()
    }

    /// True count по текущему остатку шуза.
    pub fn true_count(&self) -> f64 {
        self.count.true_count(self.shoe.remaining())
    }

    /// Активная рука игрока (если сейчас её ход).
    pub fn active_hand(&self) -> Option<&Hand> {
        self.player_hands.get(self.active_hand_index)
    }

    pub fn hand_index_by_id(&self, hand_id: HandId) -> Option<usize> {
        self.player_hands.iter().position(|h| h.id == hand_id)
    }

    /// Открытая карта дилера.
    pub fn dealer_upcard(&self) -> Option<&Card> {
        self.dealer_hand.cards.first()
    }

    pub(crate) fn alloc_hand_id(&mut self) -> HandId {
        let id = self.next_hand_id;
        self.next_hand_id += 1;
        id
    }

    /// Учесть карту в running count.
    pub(crate) fn count_card(&mut self, rank: Rank) {
        self.count.on_card(self.counting.as_ref(), rank);
    }

    /// Сменить фазу с событием (no-op, если фаза та же).
    pub(crate) fn set_phase(&mut self, to: Phase) {
        if self.phase != to {
            let from = self.phase;
            self.phase = to;
            self.events.push(RoundEventKind::PhaseChanged { from, to });
        }
    }
}

/// Поставить ставку. Повторный вызов заменяет текущую ставку.
/// Из фазы Completed автоматически начинает новый раунд (auto-loop).
pub fn place_bet(state: &mut RoundState, amount: Chips) -> Result<(), EngineError> {
    if !matches!(state.phase, Phase::Betting | Phase::Completed) {
        return Err(EngineError::InvalidPhaseTransition {
            phase: state.phase,
            command: "place_bet",
        });
    }
    if amount < state.rules.min_bet || amount > state.rules.max_bet {
        return Err(EngineError::BetOutOfRange);
    }

    // В Betting прежняя ставка ещё не в игре и возвращается при замене;
    // в Completed она принадлежит уже рассчитанному раунду.
    let available = if state.phase == Phase::Betting {
        state.bankroll + state.current_bet
    } else {
        state.bankroll
    };
    if amount > available {
        return Err(EngineError::InsufficientFunds);
    }

    if state.phase == Phase::Completed {
        clear_round(state);
        state.set_phase(Phase::Betting);
    }

    state.bankroll = available - amount;
    state.current_bet = amount;
    state.events.push(RoundEventKind::BetPlaced { amount });
    Ok(())
}

/// Снять ставку до раздачи.
pub fn clear_bet(state: &mut RoundState) -> Result<(), EngineError> {
    ensure_phase(state, Phase::Betting, "clear_bet")?;
    if state.current_bet.is_zero() {
        return Err(EngineError::IllegalAction);
    }

    let amount = state.current_bet;
    state.bankroll += amount;
    state.current_bet = Chips::ZERO;
    state.events.push(RoundEventKind::BetCleared { amount });
    Ok(())
}

/// Раздать руки: по две карты игроку и дилеру (вторая карта дилера —
/// рубашкой вверх). При необходимости предварительно пересобирает шуз.
///
/// Завершается в PlayerTurn, DealerTurn (игроку сразу выпал блэкджек)
/// или Settlement (дилер подсмотрел и нашёл у себя блэкджек).
pub fn deal<R: RandomSource>(state: &mut RoundState, rng: &mut R) -> Result<(), EngineError> {
    ensure_phase(state, Phase::Betting, "deal")?;
    if state.current_bet.is_zero() {
        return Err(EngineError::IllegalAction);
    }

    // Пересборка — строго между раундами, никогда посреди руки.
    if state.shoe.needs_reshuffle() {
        rebuild_shoe(state, rng);
    }

    state.set_phase(Phase::Dealing);

    let player_id = state.alloc_hand_id();
    let dealer_id = state.alloc_hand_id();
    state
        .player_hands
        .push(Hand::new(player_id, HandOwner::Player, state.current_bet));
    state.dealer_hand = Hand::new(dealer_id, HandOwner::Dealer, Chips::ZERO);
    state.active_hand_index = 0;

    // Порядок как за столом: игрок, дилер (открытая), игрок, дилер (закрытая).
    draw_into_player_hand(state, 0)?;
    draw_into_dealer_hand(state, true)?;
    draw_into_player_hand(state, 0)?;
    draw_into_dealer_hand(state, false)?;

    let upcard_rank = state.dealer_upcard().map(|c| c.rank);

    // Туз у дилера — открывается окно страховки; peek откладывается
    // до решения по страховке.
    if upcard_rank == Some(Rank::Ace) {
        state.insurance_open = true;
    }

    // Peek на десятке/картинке — сразу при раздаче.
    // При раннем surrender дилер не подсматривает (см. Rules::surrender).
    let peek_now = state.rules.dealer_peeks_for_blackjack
        && state.rules.surrender != SurrenderMode::Early
        && !state.insurance_open
        && upcard_rank.map(|r| r.is_ten_value()).unwrap_or(false);

    if peek_now && eval::is_blackjack(&state.dealer_hand.cards, false) {
        dealer::reveal_hole_card(state);
        state.set_phase(Phase::Settlement);
        return Ok(());
    }

    // Блэкджек игрока закрывает руку сразу.
    if eval::is_blackjack(&state.player_hands[0].cards, false) {
        state.player_hands[0].is_standing = true;
        state.events.push(RoundEventKind::HandUpdated {
            hand_id: player_id,
        });
    }

    state.set_phase(Phase::PlayerTurn);
    advance_turn(state);
    Ok(())
}

/// Принять страховку (доступна, пока открыта карта дилера — туз).
pub fn take_insurance(state: &mut RoundState, amount: Chips) -> Result<(), EngineError> {
    ensure_phase(state, Phase::PlayerTurn, "take_insurance")?;
    if !state.insurance_open {
        return Err(EngineError::IllegalAction);
    }
    if amount.is_zero() || amount > state.current_bet.half() {
        return Err(EngineError::IllegalAction);
    }
    if amount > state.bankroll {
        return Err(EngineError::InsufficientFunds);
    }

    state.bankroll -= amount;
    state.insurance_bet = amount;
    state.insurance_open = false;
    state.events.push(RoundEventKind::InsuranceTaken { amount });

    close_insurance_window(state);
    Ok(())
}

/// Отказаться от страховки.
pub fn decline_insurance(state: &mut RoundState) -> Result<(), EngineError> {
    ensure_phase(state, Phase::PlayerTurn, "decline_insurance")?;
    if !state.insurance_open {
        return Err(EngineError::IllegalAction);
    }

    state.insurance_open = false;
    close_insurance_window(state);
    Ok(())
}

/// Действие игрока по руке. Вся легальность проверяется здесь, в движке —
/// обойти проверки через вызывающий слой нельзя.
pub fn apply_player_action(
    state: &mut RoundState,
    action: PlayerAction,
) -> Result<(), EngineError> {
    ensure_phase(state, Phase::PlayerTurn, "apply_player_action")?;

    let idx = state
        .hand_index_by_id(action.hand_id)
        .ok_or(EngineError::HandNotFound(action.hand_id))?;

    validate_player_action(state, idx, action.kind)?;

    match action.kind {
        PlayerActionKind::Hit => apply_hit(state, idx)?,
        PlayerActionKind::Stand => apply_stand(state, idx),
        PlayerActionKind::Double => apply_double(state, idx)?,
        PlayerActionKind::Split => apply_split(state, idx)?,
        PlayerActionKind::Surrender => apply_surrender(state, idx),
    }

    advance_turn(state);
    Ok(())
}

/// Бросить раунд. Ставки возвращаются или сгорают по `Rules::abandon_policy`.
pub fn abandon(state: &mut RoundState) -> Result<(), EngineError> {
    if !matches!(
        state.phase,
        Phase::Betting | Phase::PlayerTurn | Phase::DealerTurn
    ) {
        return Err(EngineError::InvalidPhaseTransition {
            phase: state.phase,
            command: "abandon",
        });
    }

    let refunded = match state.rules.abandon_policy {
        AbandonPolicy::ForfeitBet => Chips::ZERO,
        AbandonPolicy::RefundBet => outstanding_bets(state),
    };
    state.bankroll += refunded;
    state.events.push(RoundEventKind::RoundAbandoned { refunded });

    clear_round(state);
    state.set_phase(Phase::Betting);
    Ok(())
}

/// Вернуться к фазе ставок. Из Completed — обычное начало нового раунда;
/// из Error — аварийный сброс с возвратом всех незакрытых ставок.
pub fn reset(state: &mut RoundState) -> Result<(), EngineError> {
    if !matches!(state.phase, Phase::Completed | Phase::Error) {
        return Err(EngineError::InvalidPhaseTransition {
            phase: state.phase,
            command: "reset",
        });
    }

    if state.phase == Phase::Error {
        let refunded = outstanding_bets(state);
        if !refunded.is_zero() {
            state.bankroll += refunded;
            state.events.push(RoundEventKind::BetCleared { amount: refunded });
        }
    }

    clear_round(state);
    state.set_phase(Phase::Betting);
    Ok(())
}

//
// Внутренности.
//

/// Сумма ставок, которые ещё не были разыграны/рассчитаны.
fn outstanding_bets(state: &RoundState) -> Chips {
    let mut total = if state.player_hands.is_empty() {
        state.current_bet
    } else {
        state
            .player_hands
            .iter()
            .filter(|h| h.result.is_none())
            .fold(Chips::ZERO, |acc, h| acc + h.bet)
    };
    total += state.insurance_bet;
    total
}

/// Очистить руки и ставки раунда; шуз, счёт карт и банкролл сохраняются.
fn clear_round(state: &mut RoundState) {
    state.player_hands.clear();
    state.dealer_hand = Hand::new(0, HandOwner::Dealer, Chips::ZERO);
    state.active_hand_index = 0;
    state.current_bet = Chips::ZERO;
    state.insurance_bet = Chips::ZERO;
    state.insurance_open = false;
}

/// Пересобрать и перемешать шуз; running count обнуляется.
fn rebuild_shoe<R: RandomSource>(state: &mut RoundState, rng: &mut R) {
    let mut shoe = Shoe::standard(state.rules.decks, state.rules.reshuffle_threshold());
    rng.shuffle(&mut shoe.cards);
    state.shoe = shoe;
    state.count.reset();
    state.events.push(RoundEventKind::ShoeReshuffled {
        decks: state.shoe.decks,
        remaining: state.shoe.remaining(),
    });
}

/// Взять карту из шуза. Пустой шуз посреди раунда — фатальный сбой:
/// раунд уходит в Error, наверх — ShoeExhausted.
pub(crate) fn draw_or_fail(state: &mut RoundState, face_up: bool) -> Result<Card, EngineError> {
    match state.shoe.draw(face_up) {
        Some(card) => {
            if face_up {
                state.count_card(card.rank);
            }
            Ok(card)
        }
        None => {
            state.set_phase(Phase::Error);
            Err(EngineError::ShoeExhausted)
        }
    }
}

fn draw_into_player_hand(state: &mut RoundState, idx: usize) -> Result<Card, EngineError> {
    let card = draw_or_fail(state, true)?;
    let hand_id = state.player_hands[idx].id;
    state.player_hands[idx].push_card(card);
    state.events.push(RoundEventKind::CardDealt {
        owner: HandOwner::Player,
        hand_id,
        card,
    });
    Ok(card)
}

fn draw_into_dealer_hand(state: &mut RoundState, face_up: bool) -> Result<Card, EngineError> {
    let card = draw_or_fail(state, face_up)?;
    state.dealer_hand.push_card(card);
    state.events.push(RoundEventKind::CardDealt {
        owner: HandOwner::Dealer,
        hand_id: state.dealer_hand.id,
        card,
    });
    Ok(card)
}

fn apply_hit(state: &mut RoundState, idx: usize) -> Result<(), EngineError> {
    state.player_hands[idx].has_acted = true;
    draw_into_player_hand(state, idx)?;

    let hand_id = state.player_hands[idx].id;
    state.events.push(RoundEventKind::HandUpdated { hand_id });

    if eval::is_bust(&state.player_hands[idx].cards) {
        resolve_bust(state, idx);
    } else if eval::best_total(&state.player_hands[idx].cards) == 21 {
        // На 21 добирать нечего — рука закрывается сама.
        state.player_hands[idx].is_standing = true;
    }
    Ok(())
}

fn apply_stand(state: &mut RoundState, idx: usize) {
    let hand = &mut state.player_hands[idx];
    hand.has_acted = true;
    hand.is_standing = true;
    let hand_id = hand.id;
    state.events.push(RoundEventKind::HandUpdated { hand_id });
}

fn apply_double(state: &mut RoundState, idx: usize) -> Result<(), EngineError> {
    let bet = state.player_hands[idx].bet;
    state.bankroll -= bet;
    {
        let hand = &mut state.player_hands[idx];
        hand.bet += bet;
        hand.is_double_down = true;
        hand.has_acted = true;
    }

    draw_into_player_hand(state, idx)?;

    let hand_id = state.player_hands[idx].id;
    state.events.push(RoundEventKind::HandUpdated { hand_id });

    if eval::is_bust(&state.player_hands[idx].cards) {
        resolve_bust(state, idx);
    } else {
        // Дабл получает ровно одну карту и закрывается.
        state.player_hands[idx].is_standing = true;
    }
    Ok(())
}

fn apply_split(state: &mut RoundState, idx: usize) -> Result<(), EngineError> {
    let bet = state.player_hands[idx].bet;
    state.bankroll -= bet;

    let new_id = state.alloc_hand_id();
    let moved = {
        let hand = &mut state.player_hands[idx];
        hand.is_from_split = true;
        hand.split_depth += 1;
        hand.has_acted = true;
        hand.cards.pop().expect("validate_player_action проверил пару")
    };

    let depth = state.player_hands[idx].split_depth;
    let mut new_hand = Hand::new(new_id, HandOwner::Player, bet);
    new_hand.is_from_split = true;
    new_hand.split_depth = depth;
    new_hand.has_acted = true;
    new_hand.push_card(moved);

    // Новая рука — сразу после породившей; активный индекс не двигается:
    // первая сплит-рука доигрывается раньше второй.
    state.player_hands.insert(idx + 1, new_hand);

    // Обе руки добирают по свежей карте.
    draw_into_player_hand(state, idx)?;
    draw_into_player_hand(state, idx + 1)?;

    for i in [idx, idx + 1] {
        if eval::best_total(&state.player_hands[i].cards) == 21 {
            state.player_hands[i].is_standing = true;
        }
        let hand_id = state.player_hands[i].id;
        state.events.push(RoundEventKind::HandUpdated { hand_id });
    }
    Ok(())
}

fn apply_surrender(state: &mut RoundState, idx: usize) {
    // Сдача возможна и вместо решения по страховке (ранний surrender) —
    // окно страховки при этом просто закрывается, без peek.
    state.insurance_open = false;

    let hand = &mut state.player_hands[idx];
    hand.has_acted = true;
    hand.result = Some(Outcome::Surrender);
    let hand_id = hand.id;
    let payout = hand.bet.half();
    state.events.push(RoundEventKind::HandResolved {
        hand_id,
        outcome: Outcome::Surrender,
        payout,
    });
}

/// Перебор: ставка сгорает немедленно, итог руки фиксируется сразу.
fn resolve_bust(state: &mut RoundState, idx: usize) {
    let hand = &mut state.player_hands[idx];
    hand.result = Some(Outcome::Bust);
    let hand_id = hand.id;
    state.events.push(RoundEventKind::HandResolved {
        hand_id,
        outcome: Outcome::Bust,
        payout: Chips::ZERO,
    });
}

/// Решение по страховке принято: дилер (если правила велят) подсматривает
/// холд-карту и при блэкджеке раунд сразу уходит в Settlement.
fn close_insurance_window(state: &mut RoundState) {
    let peek = state.rules.dealer_peeks_for_blackjack
        && state.rules.surrender != SurrenderMode::Early;

    if peek && eval::is_blackjack(&state.dealer_hand.cards, false) {
        dealer::reveal_hole_card(state);
        state.set_phase(Phase::Settlement);
        return;
    }
    advance_turn(state);
}

/// Передвинуть активный индекс на следующую незакрытую руку;
/// когда таких не осталось — перейти к ходу дилера (или сразу к расчёту,
/// если все руки уже мертвы — дилеру незачем играть, но холд-карта
/// вскрывается для отображения).
pub(crate) fn advance_turn(state: &mut RoundState) {
    while state.active_hand_index < state.player_hands.len()
        && state.player_hands[state.active_hand_index].is_resolved()
    {
        state.active_hand_index += 1;
    }

    if state.active_hand_index < state.player_hands.len() {
        return;
    }
    if state.insurance_open {
        // Все руки закрыты, но решение по страховке ещё не принято
        // (например, блэкджек игрока против туза дилера).
        return;
    }

    let all_dead = state.player_hands.iter().all(|h| h.result.is_some());
    if all_dead {
        dealer::reveal_hole_card(state);
        state.set_phase(Phase::Settlement);
    } else {
        state.set_phase(Phase::DealerTurn);
    }
}
