//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the battle loop can stay focused on orchestration.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod registry;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use handle::BattleHandle;
pub(crate) use handle::Command;
pub use providers::{ActionProvider, BasicAttackProvider};
pub use registry::ProviderRegistry;
