//! Движок одного раунда блэкджека.
//!
//! Чистое, синхронное ядро правил: шуз, оценка рук, фазовый автомат раунда,
//! автоигра дилера, подсчёт карт и расчёт выплат. Никакого I/O, таймеров и
//! анимаций — презентационный слой сам решает, когда дёргать команды
//! (в том числе пошаговый ход дилера через `resolve_dealer_step`).

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
