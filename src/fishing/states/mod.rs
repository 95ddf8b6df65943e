//! One module per encounter state.

pub mod bite_check;
pub mod casting;
pub mod caught;
pub mod hook_opportunity;
pub mod hooked;
pub mod idle;
pub mod lost;
pub mod lure_drift;
pub mod micro_twitch;
pub mod reeling;
pub mod slack_event;
pub mod stillness;

pub use bite_check::*;
pub use casting::*;
pub use caught::*;
pub use hook_opportunity::*;
pub use hooked::*;
pub use idle::*;
pub use lost::*;
pub use lure_drift::*;
pub use micro_twitch::*;
pub use reeling::*;
pub use slack_event::*;
pub use stillness::*;
