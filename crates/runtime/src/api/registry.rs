//! Provider registry for managing action providers.
//!
//! The [`ProviderRegistry`] maps combatants to the provider that decides for
//! them.
//!
//! # Design
//!
//! - **Provider instances**: Stored by `ProviderKind`, shared across combatants
//! - **Combatant bindings**: Any combatant can be bound to a specific `ProviderKind`
//! - **Fallback chain**: Combatant binding → side default
//!   (`Player` → `Interactive`, `Hostile` → `Ai`)

use std::collections::HashMap;
use std::sync::Arc;

use game_core::{Combatant, CombatantId, Side};

use super::{ActionProvider, ProviderKind, Result, RuntimeError};

/// Registry for managing action providers with combatant-specific bindings.
///
/// ```text
/// ProviderRegistry
/// ├── providers: HashMap<ProviderKind, Provider>  (provider instances)
/// ├── bindings: HashMap<CombatantId, ProviderKind>  (overrides)
/// └── side defaults: Player → Interactive, Hostile → Ai
/// ```
pub struct ProviderRegistry {
    /// Uses Arc so a provider can be awaited without holding the registry.
    providers: HashMap<ProviderKind, Arc<dyn ActionProvider>>,

    /// Sparse: only combatants that deviate from their side default.
    bindings: HashMap<CombatantId, ProviderKind>,

    player_default: ProviderKind,
    hostile_default: ProviderKind,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            bindings: HashMap::new(),
            player_default: ProviderKind::Interactive,
            hostile_default: ProviderKind::Ai,
        }
    }

    /// Register a provider for a specific kind, replacing any previous one.
    pub fn register(&mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) {
        self.providers.insert(kind, Arc::new(provider));
    }

    /// Bind a combatant to a specific provider kind.
    ///
    /// ```ignore
    /// // An ally fighting on its own:
    /// registry.bind(CombatantId(1), ProviderKind::Ai);
    /// ```
    pub fn bind(&mut self, combatant: CombatantId, kind: ProviderKind) {
        self.bindings.insert(combatant, kind);
    }

    /// Unbind a combatant, reverting it to its side default.
    pub fn unbind(&mut self, combatant: CombatantId) -> Option<ProviderKind> {
        self.bindings.remove(&combatant)
    }

    /// Set the default provider kind for one side.
    pub fn set_side_default(&mut self, side: Side, kind: ProviderKind) {
        match side {
            Side::Player => self.player_default = kind,
            Side::Hostile => self.hostile_default = kind,
        }
    }

    pub fn side_default(&self, side: Side) -> ProviderKind {
        match side {
            Side::Player => self.player_default,
            Side::Hostile => self.hostile_default,
        }
    }

    /// Provider kind for a combatant: explicit binding, else side default.
    pub fn kind_for(&self, combatant: &Combatant) -> ProviderKind {
        self.bindings
            .get(&combatant.id)
            .copied()
            .unwrap_or_else(|| self.side_default(combatant.side))
    }

    /// Get the provider for a combatant.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::ProviderNotSet` if the resolved kind has no
    /// registered provider instance.
    pub fn get_for(&self, combatant: &Combatant) -> Result<Arc<dyn ActionProvider>> {
        self.get(self.kind_for(combatant))
    }

    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn ActionProvider>> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(RuntimeError::ProviderNotSet { kind })
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use game_core::CombatantSnapshot;

    use super::*;
    use crate::api::BasicAttackProvider;

    fn combatant(id: u32, side: Side) -> Combatant {
        Combatant::spawn(
            CombatantId(id),
            side,
            CombatantSnapshot::new("c", 10, 0, 1, 0, 1),
        )
    }

    #[test]
    fn side_defaults_route_players_to_interactive() {
        let registry = ProviderRegistry::new();
        assert_eq!(
            registry.kind_for(&combatant(0, Side::Player)),
            ProviderKind::Interactive
        );
        assert_eq!(registry.kind_for(&combatant(1, Side::Hostile)), ProviderKind::Ai);
    }

    #[test]
    fn binding_overrides_side_default() {
        let mut registry = ProviderRegistry::new();
        registry.bind(CombatantId(1), ProviderKind::Ai);

        assert_eq!(registry.kind_for(&combatant(1, Side::Player)), ProviderKind::Ai);

        registry.unbind(CombatantId(1));
        assert_eq!(
            registry.kind_for(&combatant(1, Side::Player)),
            ProviderKind::Interactive
        );
    }

    #[test]
    fn missing_provider_is_an_error() {
        let mut registry = ProviderRegistry::new();
        registry.register(ProviderKind::Ai, BasicAttackProvider);

        assert!(registry.get_for(&combatant(3, Side::Hostile)).is_ok());
        assert!(matches!(
            registry.get_for(&combatant(0, Side::Player)),
            Err(RuntimeError::ProviderNotSet {
                kind: ProviderKind::Interactive
            })
        ));
    }
}
