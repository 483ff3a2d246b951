#![forbid(unsafe_code)]

//! A modifier registry paired with the signal bus it is wired into.

use nudge_core::{Flow, Signal, SignalArgs, SignalBus};

use crate::pipeline;
use crate::registry::ModifierRegistry;
use crate::session::Interaction;

/// Signal bus carrying the registry as shared context.
pub type ModifierBus = SignalBus<ModifierRegistry, Interaction>;

/// Everything an interaction needs to run its modifiers.
///
/// The pipeline listeners are installed first; hosts may subscribe their
/// own listeners after them through [`signals_mut`](Self::signals_mut).
#[derive(Debug)]
pub struct Scope {
    registry: ModifierRegistry,
    signals: ModifierBus,
}

impl Scope {
    #[must_use]
    pub fn new(registry: ModifierRegistry) -> Self {
        let mut signals = ModifierBus::new();
        pipeline::install(&mut signals);
        Self { registry, signals }
    }

    /// Scope with [`ModifierRegistry::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ModifierRegistry::standard())
    }

    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub const fn signals(&self) -> &ModifierBus {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut ModifierBus {
        &mut self.signals
    }

    /// Dispatch `signal` for `interaction`.
    pub fn emit(&self, signal: Signal, interaction: &mut Interaction, args: &mut SignalArgs) -> Flow {
        self.signals.emit(signal, &self.registry, interaction, args)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::standard()
    }
}
