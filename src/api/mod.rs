//! Внешний API движка блэкджека.
//!
//! Здесь описываются:
//! - команды (commands.rs) — всё, что меняет состояние раунда (ставка, раздача, действия, расчёт);
//! - запросы (queries.rs) — только чтение;
//! - DTO (dto.rs) — удобные структуры для фронта (с закрытой холд-картой);
//! - ошибки (errors.rs) — то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
