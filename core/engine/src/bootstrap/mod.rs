pub mod core;
pub mod builder;
pub mod lifecycle;

pub use self::core::EmotionEngine;
pub use builder::EmotionEngineBuilder;
pub use lifecycle::EngineHealth;
