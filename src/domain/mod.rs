//! Доменная модель блэкджека: карты, шуз, руки, фишки, правила.

pub mod card;
pub mod chips;
pub mod hand;
pub mod rules;
pub mod shoe;

// Базовые идентификаторы.
pub type HandId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use hand::*;
pub use rules::*;
pub use shoe::*;
