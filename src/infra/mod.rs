//! Инфраструктурный слой вокруг движка блэкджека:
//! - RNG-реализации для engine;
//! - воспроизводимые seed'ы для шузов.

pub mod rng;
pub mod rng_seed;

pub use rng::*;
pub use rng_seed::RngSeed;
