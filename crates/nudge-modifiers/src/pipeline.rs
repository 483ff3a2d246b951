#![forbid(unsafe_code)]

//! Modifier pipeline: runs every registered modifier across the lifecycle
//! signals of an interaction and folds their corrections into one
//! [`ModifierResult`] per tick.
//!
//! # Signal wiring ([`install`])
//!
//! | signal | listeners, in order |
//! |--------|---------------------|
//! | `New` | fresh [`ModifiersState`] |
//! | `BeforeActionStart` | [`start`] at the start coordinates, then [`set_cur_coords`] |
//! | `ActionResume` | [`before_move`], then [`start`] at the current coordinates |
//! | `BeforeActionMove` | [`before_move`] (may suppress), then [`set_cur_coords`] |
//! | `BeforeActionEnd` | [`before_end`] |
//!
//! # Invariants
//!
//! 1. Modifiers run in registry order; within one [`set_all`] each modifier
//!    sees the position with every earlier locked delta applied.
//! 2. A modifier without an option record for the running action is skipped
//!    at every phase.
//! 3. Only `delta` and `locked` are reset between phases.
//! 4. A suppressed move never reaches [`set_cur_coords`].

use std::sync::Arc;

use nudge_core::{Flow, Phase, Point, Sides, Signal, SignalArgs};

use crate::modifier::{ModifyContext, SetContext, StartContext};
use crate::options::ModifierConfig;
use crate::registry::ModifierRegistry;
use crate::scope::ModifierBus;
use crate::session::{Interaction, Session};
use crate::status::{ModifierResult, ModifiersState};

// ---------------------------------------------------------------------------
// Phase operations
// ---------------------------------------------------------------------------

/// Whether a modifier with `options` takes part in a tick.
///
/// True iff the options exist and are enabled, the tick is a pre-end move or
/// the modifier is not end-only, and end-only is not required or the
/// modifier is end-only.
#[must_use]
pub fn should_do<C: ModifierConfig + ?Sized>(
    options: Option<&C>,
    pre_end: bool,
    require_end_only: bool,
) -> bool {
    options.is_some_and(|options| {
        options.enabled()
            && (pre_end || !options.end_only())
            && (!require_end_only || options.end_only())
    })
}

/// Measure the start offset and compute each configured modifier's start
/// data, with the phase starting from `page`.
pub fn start_all(
    registry: &ModifierRegistry,
    session: &Session,
    state: &mut ModifiersState,
    page: Point,
) {
    let rect = session.target.rect();
    state.start_offset = rect.map_or(Sides::ZERO, |rect| rect.offsets_from(page));

    let Some(action) = session.action_options() else {
        return;
    };
    let ctx = StartContext {
        session,
        rect,
        start_offset: state.start_offset,
    };

    for kind in registry.iter() {
        if let Some(options) = kind.options(action) {
            state.offsets.insert(kind, options.start(&ctx));
        }
    }
}

/// Run `set` on every participating modifier, starting from `page`.
pub fn set_all(
    registry: &ModifierRegistry,
    session: &Session,
    state: &mut ModifiersState,
    page: Point,
    pre_end: bool,
    require_end_only: bool,
) -> ModifierResult {
    let mut result = ModifierResult {
        coords: page,
        should_move: true,
        ..ModifierResult::default()
    };
    let mut any_ran = false;

    if let Some(action) = session.action_options() {
        for kind in registry.iter() {
            let Some(options) = kind
                .options(action)
                .filter(|options| should_do(Some(options), pre_end, require_end_only))
            else {
                continue;
            };
            any_ran = true;

            let ctx = SetContext {
                session,
                modified: result.coords,
            };
            let status = state.statuses.entry(kind).or_default();
            options.set(&ctx, state.offsets.get(&kind), status);

            if status.locked {
                result.coords += status.delta;
                result.delta += status.delta;
                result.locked = true;
            }
        }
    }

    result.changed = session.cur_coords.page != result.coords;
    result.should_move = !any_ran || !result.locked || result.changed;

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "nudge.modifiers",
        delta = ?result.delta,
        locked = result.locked,
        changed = result.changed,
        should_move = result.should_move,
        pre_end = pre_end,
        "modifiers set"
    );

    result
}

/// Zero `delta` and clear `locked` for every registered modifier.
pub fn reset_statuses(registry: &ModifierRegistry, state: &mut ModifiersState) {
    state.reset_statuses(registry);
}

/// Begin a phase from `page`: [`start_all`], [`reset_statuses`], then an
/// immediate [`set_all`] at the session's start coordinates so a result
/// exists before the first move.
pub fn start(registry: &ModifierRegistry, interaction: &mut Interaction, page: Point) {
    let session = &interaction.session;
    let state = &mut interaction.modifiers;

    start_all(registry, session, state, page);
    reset_statuses(registry, state);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "nudge.modifiers",
        action = %session.prepared.name,
        has_rect = session.target.rect().is_some(),
        modifiers = state.offsets.len(),
        "modifiers start"
    );

    let result = set_all(registry, session, state, session.start_coords.page, false, false);
    state.result = Some(result);
}

/// Recompute the result at the current pointer position.
///
/// Returns [`Flow::Suppress`] when the result says not to move and the
/// session had already moved before this tick.
pub fn before_move(
    registry: &ModifierRegistry,
    interaction: &mut Interaction,
    args: &SignalArgs,
) -> Flow {
    let session = &interaction.session;
    let state = &mut interaction.modifiers;

    let result = set_all(
        registry,
        session,
        state,
        session.cur_coords.page,
        args.pre_end,
        false,
    );
    state.result = Some(result);

    if !result.should_move && args.interacting_before_move {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "nudge.modifiers",
            coords = ?result.coords,
            "move suppressed"
        );
        return Flow::Suppress;
    }
    Flow::Continue
}

/// Ask for one synthetic pre-end move when any modifier is end-only.
pub fn before_end(
    registry: &ModifierRegistry,
    interaction: &mut Interaction,
    args: &mut SignalArgs,
) -> Flow {
    let requested = interaction.session.action_options().is_some_and(|action| {
        registry
            .iter()
            .any(|kind| should_do(kind.options(action).as_ref(), true, true))
    });

    if requested {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "nudge.modifiers", "pre-end move requested");
        args.pre_end_move_requested = true;
    }
    Flow::Continue
}

/// Let every configured modifier apply its locked correction to the
/// session's current coordinates, collecting observer feedback.
pub fn set_cur_coords(registry: &ModifierRegistry, interaction: &mut Interaction, phase: Phase) {
    let Interaction {
        session, modifiers, ..
    } = interaction;
    modifiers.feedback.clear();

    let target = Arc::clone(&session.target);
    let Some(action) = target.options().action(session.prepared.name) else {
        return;
    };
    let coords = &mut session.cur_coords;

    for kind in registry.iter() {
        let Some(options) = kind.options(action) else {
            continue;
        };
        let status = modifiers.statuses.get(&kind).copied().unwrap_or_default();
        let mut ctx = ModifyContext {
            page: &mut coords.page,
            client: &mut coords.client,
            phase,
        };
        if let Some(feedback) = options.modify_coords(&mut ctx, &status) {
            modifiers.feedback.push(feedback);
        }
    }
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// Subscribe the pipeline to the lifecycle signals of `bus`.
pub fn install(bus: &mut ModifierBus) {
    bus.on(Signal::New, on_new);
    bus.on(Signal::BeforeActionStart, on_action_start);
    bus.on(Signal::ActionResume, on_action_resume);
    bus.on(Signal::BeforeActionMove, on_action_move);
    bus.on(Signal::BeforeActionEnd, before_end);
    bus.on(Signal::BeforeActionStart, on_set_cur_coords);
    bus.on(Signal::BeforeActionMove, on_set_cur_coords);
}

fn on_new(registry: &ModifierRegistry, interaction: &mut Interaction, _: &mut SignalArgs) -> Flow {
    interaction.modifiers = ModifiersState::new(registry);
    Flow::Continue
}

fn on_action_start(
    registry: &ModifierRegistry,
    interaction: &mut Interaction,
    _: &mut SignalArgs,
) -> Flow {
    let page = interaction.session.start_coords.page;
    start(registry, interaction, page);
    Flow::Continue
}

fn on_action_resume(
    registry: &ModifierRegistry,
    interaction: &mut Interaction,
    args: &mut SignalArgs,
) -> Flow {
    // The resume tick is delivered regardless of the move verdict.
    let _ = before_move(registry, interaction, args);
    let page = interaction.session.cur_coords.page;
    start(registry, interaction, page);
    Flow::Continue
}

fn on_action_move(
    registry: &ModifierRegistry,
    interaction: &mut Interaction,
    args: &mut SignalArgs,
) -> Flow {
    before_move(registry, interaction, args)
}

fn on_set_cur_coords(
    registry: &ModifierRegistry,
    interaction: &mut Interaction,
    args: &mut SignalArgs,
) -> Flow {
    set_cur_coords(registry, interaction, args.phase);
    Flow::Continue
}
