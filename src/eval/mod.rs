//! Модуль оценки рук блэкджека.
//!
//! Чистые функции без состояния и побочных эффектов:
//!   `legal_totals`, `best_total`, `is_bust`, `is_soft`,
//!   `is_blackjack`, `can_split`
//!
//! Их дергают все остальные компоненты движка, поэтому они
//! тестируются отдельно и не зависят ни от фазы, ни от RNG.

pub mod evaluator;

pub use evaluator::{best_total, can_split, is_blackjack, is_bust, is_soft, legal_totals};
