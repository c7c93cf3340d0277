//! Async orchestration for turn-based battles.
//!
//! This crate wires the pure rules in `game-core` to action providers, a
//! topic-based event bus and an out-of-band command channel. Consumers build a
//! [`Battle`], drive it with [`Battle::run`] or [`Battle::step`], and talk to it
//! through a cloneable [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the battle loop and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the weighted AI and the external-actor coordinator
//! - [`report`] describes a finished battle
pub mod api;
pub mod events;
pub mod providers;
pub mod report;
pub mod runtime;

pub use api::{
    ActionProvider, BasicAttackProvider, BattleHandle, ProviderKind, ProviderRegistry, Result,
    RuntimeError,
};
pub use events::{ActionEvent, BattleEvent, Event, EventBus, PromptEvent, Topic, TurnEvent};
pub use providers::{
    AiChoice, Decision, ExternalActorCoordinator, WeightedAiProvider, choose_action,
};
pub use report::BattleReport;
pub use runtime::{Battle, BattleBuilder, RuntimeConfig, StepOutcome};
