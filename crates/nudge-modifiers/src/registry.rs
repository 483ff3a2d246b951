#![forbid(unsafe_code)]

//! Ordered set of installed modifiers.
//!
//! Registration order is application order: earlier modifiers see the raw
//! position, later ones see it with every earlier locked correction applied.

use crate::error::{ModifierError, Result};
use crate::modifier::ModifierKind;
use crate::options::{ActionOptions, TargetOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierRegistry {
    kinds: Vec<ModifierKind>,
}

impl ModifierRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Every built-in modifier, snap first.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            kinds: ModifierKind::ALL.to_vec(),
        }
    }

    /// Build a registry from modifier names, in order.
    pub fn from_names(names: &[&str]) -> Result<Self> {
        let mut registry = Self::new();
        for name in names {
            registry.register(name.parse()?)?;
        }
        Ok(registry)
    }

    /// Append `kind`; a modifier may appear only once.
    pub fn register(&mut self, kind: ModifierKind) -> Result<()> {
        if self.contains(kind) {
            return Err(ModifierError::DuplicateModifier { name: kind.name() });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "nudge.modifiers",
            modifier = kind.name(),
            position = self.kinds.len(),
            "modifier registered"
        );

        self.kinds.push(kind);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, kind: ModifierKind) -> Result<Self> {
        self.register(kind)?;
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, kind: ModifierKind) -> bool {
        self.kinds.contains(&kind)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Modifiers in application order.
    pub fn iter(&self) -> impl Iterator<Item = ModifierKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(ModifierKind::name)
    }

    /// Install the default record of every registered modifier into `action`,
    /// keeping records that are already configured.
    pub fn apply_defaults(&self, action: &mut ActionOptions) {
        for kind in self.iter() {
            kind.apply_defaults(action);
        }
    }

    /// [`apply_defaults`](Self::apply_defaults) for every action of a target.
    pub fn apply_defaults_to_target(&self, options: &mut TargetOptions) {
        for (_, action) in options.actions_mut() {
            self.apply_defaults(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_core::ActionName;

    #[test]
    fn standard_order_is_snap_then_restrict() {
        let registry = ModifierRegistry::standard();
        assert_eq!(registry.names().collect::<Vec<_>>(), ["snap", "restrictEdges"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ModifierRegistry::new();
        registry.register(ModifierKind::RestrictEdges).unwrap();
        let err = registry.register(ModifierKind::RestrictEdges).unwrap_err();
        assert!(matches!(err, ModifierError::DuplicateModifier { name: "restrictEdges" }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn from_names_preserves_order() {
        let registry = ModifierRegistry::from_names(&["restrictEdges", "snap"]).unwrap();
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            [ModifierKind::RestrictEdges, ModifierKind::Snap]
        );

        assert!(matches!(
            ModifierRegistry::from_names(&["snap", "inertia"]),
            Err(ModifierError::UnknownModifier { .. })
        ));
    }

    #[test]
    fn empty_registry() {
        let registry = ModifierRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn defaults_are_merged_into_every_action() {
        let mut options = TargetOptions::new()
            .with_action(ActionName::Drag, ActionOptions::default())
            .with_action(ActionName::Resize, ActionOptions::default());

        ModifierRegistry::new()
            .with(ModifierKind::RestrictEdges)
            .unwrap()
            .apply_defaults_to_target(&mut options);

        for name in [ActionName::Drag, ActionName::Resize] {
            let action = options.action(name).unwrap();
            assert!(action.restrict_edges.is_some());
            assert!(action.snap.is_none());
        }
    }
}
