//! Action provider implementations for the two kinds of actor.

pub mod ai;
pub mod interactive;

pub use ai::{AiChoice, WeightedAiProvider, choose_action};
pub use interactive::{Decision, ExternalActorCoordinator};
