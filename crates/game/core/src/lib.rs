//! Deterministic battle rules and data types.
//!
//! `game-core` defines the canonical battle rules (combatants, skills, turn
//! order, damage and healing) as pure, synchronous APIs. All state mutation
//! flows through [`engine::BattleEngine`]; the async runtime and the content
//! loaders depend on the types re-exported here.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionError, ActionKind, ActionMenu, ActionResult, Skill, SkillKind, SkillOption,
    SkillRef, TargetEffect, TargetRule, available_actions, resolve_targets, validate_action,
};
pub use combat::{apply_attack, apply_heal, calculate_damage};
pub use config::{ActionWeights, BattleConfig};
pub use engine::{BattleEngine, TurnError, TurnSignal, TurnStep};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    BattleOutcome, BattleState, Combatant, CombatantId, CombatantSnapshot, InitializationError,
    ResourceMeter, Side, StateError, TurnState,
};
