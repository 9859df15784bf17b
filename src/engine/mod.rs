//! Движок раунда блэкджека: фазовый автомат, легальность действий,
//! автоигра дилера, подсчёт карт и расчёт выплат.
//!
//! Высокоуровневый объект: `RoundState`
//! Основные операции:
//!   - `place_bet` / `clear_bet` / `deal` — подготовка и раздача раунда
//!   - `apply_player_action` — hit / stand / double / split / surrender
//!   - `take_insurance` / `decline_insurance` — страховка при тузе дилера
//!   - `resolve_dealer_step` / `resolve_dealer` — ход дилера (пошагово или разом)
//!   - `settle` — классификация исходов и выплаты
//!   - `reset` / `abandon` — возврат к фазе ставок

pub mod actions;
pub mod counting;
pub mod dealer;
pub mod errors;
pub mod events;
pub mod round;
pub mod settlement;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use counting::{CountState, CountingSystem, HiLo};
pub use dealer::{dealer_should_hit, resolve_dealer, resolve_dealer_step, DealerStep};
pub use errors::EngineError;
pub use events::{RoundEvent, RoundEventKind, RoundLog};
pub use round::{
    abandon, apply_player_action, clear_bet, deal, decline_insurance, place_bet, reset,
    take_insurance, Phase, RoundState,
};
pub use settlement::settle;
pub use validation::legal_actions;

/// RNG интерфейс для engine.
/// Реализации — в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
