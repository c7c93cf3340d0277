//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. This is the presentation boundary: every resolved
//! action and every scheduler transition is published here.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, BattleEvent, PromptEvent, TurnEvent};
