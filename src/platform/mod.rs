//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (`clock`)
//! - Input events (`input` + per-device translators)
//! - Storage (LocalStorage on web, in-memory on native)

pub mod clock;
pub mod gamepad;
pub mod input;
pub mod keyboard;
pub mod storage;
pub mod touch;

pub use clock::FrameClock;
pub use input::{InputEvent, InputHandler, InputKind};
pub use storage::{KeyValueStore, MemoryStore};
