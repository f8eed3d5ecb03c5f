//! One-shot viewport observation.
//!
//! Everything here follows the same discipline: an element is watched until
//! its first qualifying intersection, transitions exactly once, and is then
//! unobserved. Nothing ever moves back to the watching state.

pub mod engine;
pub mod lazy;
pub mod ramp;
pub mod stagger;

pub use engine::RevealEngine;
pub use lazy::LazyLoader;
pub use ramp::CounterRamp;
pub use stagger::EntranceStagger;
