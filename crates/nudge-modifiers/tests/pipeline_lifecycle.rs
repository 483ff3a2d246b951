//! End-to-end lifecycle tests: start, move, suppression, resume and end
//! driven through `Interaction` and the installed pipeline listeners.

use std::sync::Arc;

use nudge_core::{ActionName, CoordsPair, Edges, Flow, PartialRect, Point, PreparedAction, Rect};
use nudge_modifiers::{
    ActionOptions, Feedback, GridSpec, Interaction, ModifierKind, ModifierRegistry, RectKeyword,
    RectSource, RestrictEdgesOptions, Scope, SnapOffset, SnapOptions, SnapPoint, SnapTarget,
    StaticTarget, TargetOptions,
};

fn at(x: f64, y: f64) -> CoordsPair {
    CoordsPair::uniform(Point::new(x, y))
}

fn target(name: ActionName, options: ActionOptions) -> Arc<StaticTarget> {
    Arc::new(StaticTarget::new(TargetOptions::new().with_action(name, options)))
}

fn bounded_resize() -> ActionOptions {
    ActionOptions::default().with_restrict_edges(RestrictEdgesOptions::new(
        Some(RectSource::Rect(PartialRect::edges(200.0, 400.0, 400.0, 200.0))),
        Some(RectSource::Rect(PartialRect::edges(0.0, 600.0, 600.0, 0.0))),
    ))
}

// ---------------------------------------------------------------------------
// RestrictEdges
// ---------------------------------------------------------------------------

#[test]
fn restrict_edges_clamps_grabbed_corner() {
    let scope = Scope::standard();
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Resize, bounded_resize()),
        PreparedAction::resize(Edges::TOP | Edges::LEFT),
    );

    interaction.start(&scope, at(100.0, 100.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(100.0, 100.0));

    interaction.pointer_move(&scope, at(-50.0, -50.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(0.0, 0.0));
    assert_eq!(interaction.session.cur_coords.client, Point::new(0.0, 0.0));

    interaction.pointer_move(&scope, at(300.0, 300.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(200.0, 200.0));

    interaction.pointer_move(&scope, at(150.0, 120.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(150.0, 120.0));
    assert!(!interaction.result().unwrap().locked);
}

#[test]
fn restrict_edges_clamps_the_edge_not_the_pointer() {
    let scope = Scope::standard();
    let options = ActionOptions::default().with_restrict_edges(RestrictEdgesOptions::new(
        None,
        Some(RectSource::Rect(PartialRect::edges(0.0, 600.0, 600.0, 0.0))),
    ));
    let target = StaticTarget::new(TargetOptions::new().with_action(ActionName::Resize, options))
        .with_rect(Rect::from_edges(50.0, 50.0, 150.0, 150.0));
    let mut interaction = Interaction::new(
        &scope,
        Arc::new(target),
        PreparedAction::resize(Edges::TOP | Edges::LEFT),
    );

    // Grab 10px inside the top-left corner.
    interaction.start(&scope, at(60.0, 60.0));
    interaction.pointer_move(&scope, at(0.0, 0.0));

    // The edge stops at the outer bound; the pointer keeps its 10px grip.
    assert_eq!(interaction.session.cur_coords.page, Point::new(10.0, 10.0));
}

#[test]
fn restrict_edges_uses_target_rect_keyword() {
    let scope = Scope::standard();
    let options = ActionOptions::default().with_restrict_edges(RestrictEdgesOptions::new(
        None,
        Some(RectSource::Keyword(RectKeyword::Target)),
    ));
    let target = StaticTarget::new(TargetOptions::new().with_action(ActionName::Resize, options))
        .with_rect(Rect::from_edges(0.0, 0.0, 100.0, 100.0));
    let mut interaction = Interaction::new(
        &scope,
        Arc::new(target),
        PreparedAction::resize(Edges::BOTTOM | Edges::RIGHT),
    );

    interaction.start(&scope, at(100.0, 100.0));
    interaction.pointer_move(&scope, at(180.0, 40.0));

    assert_eq!(interaction.session.cur_coords.page, Point::new(100.0, 40.0));
}

#[test]
fn restrict_edges_ignores_drags() {
    let scope = Scope::standard();
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, bounded_resize()),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(100.0, 100.0));
    interaction.pointer_move(&scope, at(-50.0, -50.0));

    assert_eq!(interaction.session.cur_coords.page, Point::new(-50.0, -50.0));
}

#[test]
fn computed_bounds_follow_the_session() {
    let scope = Scope::standard();
    let outer = RectSource::computed(|_, session| {
        let start = session.start_coords.page;
        Some(PartialRect {
            left: Some(start.x - 20.0),
            top: Some(start.y - 20.0),
            ..PartialRect::default()
        })
    });
    let options =
        ActionOptions::default().with_restrict_edges(RestrictEdgesOptions::new(None, Some(outer)));
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Resize, options),
        PreparedAction::resize(Edges::TOP | Edges::LEFT),
    );

    interaction.start(&scope, at(100.0, 100.0));
    interaction.pointer_move(&scope, at(0.0, 95.0));

    assert_eq!(interaction.session.cur_coords.page, Point::new(80.0, 95.0));
}

// ---------------------------------------------------------------------------
// Snap
// ---------------------------------------------------------------------------

#[test]
fn finite_target_beats_infinite_when_both_in_range() {
    let scope = Scope::standard();
    let snap = SnapOptions::new(vec![
        SnapPoint::new(0.0, 0.0).with_range(10.0).into(),
        SnapPoint::new(100.0, 0.0).with_range(f64::INFINITY).into(),
    ]);
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(200.0, 200.0));

    interaction.pointer_move(&scope, at(5.0, 0.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(0.0, 0.0));

    interaction.pointer_move(&scope, at(50.0, 0.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(100.0, 0.0));
    assert!(interaction.result().unwrap().locked);
}

#[test]
fn snap_feedback_reports_real_and_target() {
    let scope = Scope::standard();
    let snap = SnapOptions {
        range: 10.0,
        ..SnapOptions::new(vec![SnapPoint::new(50.0, 50.0).into()])
    };
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(0.0, 0.0));
    interaction.pointer_move(&scope, at(47.0, 54.0));

    let [Feedback::Snap(feedback)] = interaction.modifiers.feedback.as_slice() else {
        panic!("expected one snap payload, got {:?}", interaction.modifiers.feedback);
    };
    assert!(feedback.locked);
    assert_eq!(feedback.real, Point::new(47.0, 54.0));
    assert_eq!(feedback.point, Some(Point::new(50.0, 50.0)));
    assert_eq!(feedback.delta, Point::new(3.0, -4.0));
    assert_eq!(feedback.range, 10.0);

    interaction.pointer_move(&scope, at(100.0, 100.0));
    let [Feedback::Snap(feedback)] = interaction.modifiers.feedback.as_slice() else {
        panic!("expected one snap payload");
    };
    assert!(!feedback.locked);
    assert_eq!(interaction.session.cur_coords.page, Point::new(100.0, 100.0));
}

#[test]
fn snap_to_grid_relative_to_origin() {
    let scope = Scope::standard();
    let snap = SnapOptions::new(vec![SnapTarget::Grid {
        grid: GridSpec::new(20.0, 20.0),
    }]);
    let drag = ActionOptions {
        origin: Some(Point::new(5.0, 5.0)),
        ..ActionOptions::default().with_snap(snap)
    };
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, drag),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(0.0, 0.0));
    interaction.pointer_move(&scope, at(38.0, 52.0));

    // Relative (33, 47) snaps to grid node (40, 40), i.e. page (45, 45).
    assert_eq!(interaction.session.cur_coords.page, Point::new(45.0, 45.0));
}

#[test]
fn zero_spacing_grid_axis_follows_pointer() {
    let scope = Scope::standard();
    let snap = SnapOptions::new(vec![SnapTarget::Grid {
        grid: GridSpec::new(0.0, 10.0),
    }]);
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(3.0, 3.0));
    interaction.pointer_move(&scope, at(7.0, 14.0));

    assert_eq!(interaction.session.cur_coords.page, Point::new(7.0, 10.0));
    let result = interaction.result().unwrap();
    assert_eq!(result.delta, Point::new(0.0, -4.0));
    assert!(result.locked);
}

#[test]
fn snap_axis_without_target_value_is_free() {
    let scope = Scope::standard();
    let snap = SnapOptions::new(vec![SnapTarget::Point(SnapPoint {
        y: Some(75.0),
        ..SnapPoint::default()
    })]);
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(0.0, 0.0));
    interaction.pointer_move(&scope, at(33.0, 60.0));

    assert_eq!(interaction.session.cur_coords.page, Point::new(33.0, 75.0));
}

#[test]
fn snap_generator_can_decline() {
    let scope = Scope::standard();
    let snap = SnapOptions::new(vec![SnapTarget::generator(|relative, _| {
        (relative.x > 0.0).then_some(SnapPoint::new(10.0, 10.0))
    })]);
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(0.0, 0.0));
    interaction.pointer_move(&scope, at(-5.0, 3.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(-5.0, 3.0));
    assert!(!interaction.result().unwrap().locked);

    interaction.pointer_move(&scope, at(5.0, 3.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(10.0, 10.0));
}

#[test]
fn snap_start_coords_offset_keeps_grip() {
    let scope = Scope::standard();
    let snap = SnapOptions {
        offset: Some(SnapOffset::START_COORDS),
        ..SnapOptions::new(vec![SnapTarget::Grid {
            grid: GridSpec::new(100.0, 100.0),
        }])
    };
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    // The pointer grabs 7px right and 3px below the element's corner.
    interaction.start(&scope, at(7.0, 3.0));
    interaction.pointer_move(&scope, at(110.0, 190.0));

    // Corner lands on grid node (100, 200); the pointer keeps its grip.
    assert_eq!(interaction.session.cur_coords.page, Point::new(107.0, 203.0));
}

#[test]
fn relative_points_snap_each_anchor() {
    let scope = Scope::standard();
    let snap = SnapOptions {
        range: 15.0,
        relative_points: Some(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
        ..SnapOptions::new(vec![SnapPoint::new(300.0, 300.0).into()])
    };
    let target = StaticTarget::new(
        TargetOptions::new().with_action(ActionName::Drag, ActionOptions::default().with_snap(snap)),
    )
    .with_rect(Rect::from_edges(0.0, 0.0, 100.0, 50.0));
    let mut interaction = Interaction::new(
        &scope,
        Arc::new(target),
        PreparedAction::new(ActionName::Drag),
    );

    // Grab the rectangle at its centre.
    interaction.start(&scope, at(50.0, 25.0));
    assert!(interaction.modifiers.feedback.is_empty());

    // Moving by (240, 270) puts the bottom-right corner at (340, 320): out of
    // range. Top-left would be at (240, 270): also out of range.
    interaction.pointer_move(&scope, at(290.0, 295.0));
    assert!(!interaction.result().unwrap().locked);

    // Bottom-right corner near (300, 300).
    interaction.pointer_move(&scope, at(245.0, 272.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(250.0, 275.0));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn redundant_locked_move_is_suppressed() {
    let scope = Scope::standard();
    let snap = SnapOptions::new(vec![SnapPoint::new(10.0, 10.0).into()]);
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(0.0, 0.0));

    // First tick of the session is never suppressed.
    assert_eq!(interaction.pointer_move(&scope, at(10.0, 10.0)), Flow::Continue);
    // Locked onto the same point with no change: suppressed.
    assert_eq!(interaction.pointer_move(&scope, at(10.0, 10.0)), Flow::Suppress);
    let result = interaction.result().unwrap();
    assert!(result.locked && !result.changed && !result.should_move);
    // A move that snaps somewhere else is delivered again.
    assert_eq!(interaction.pointer_move(&scope, at(12.0, 9.0)), Flow::Continue);
}

#[test]
fn end_only_snap_applies_on_release() {
    let scope = Scope::standard();
    let snap = SnapOptions {
        end_only: true,
        ..SnapOptions::new(vec![SnapPoint::new(0.0, 0.0).into()])
    };
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Drag, ActionOptions::default().with_snap(snap)),
        PreparedAction::new(ActionName::Drag),
    );

    interaction.start(&scope, at(40.0, 40.0));
    interaction.pointer_move(&scope, at(30.0, 20.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(30.0, 20.0));

    interaction.end(&scope);

    assert_eq!(interaction.session.cur_coords.page, Point::new(0.0, 0.0));
    assert!(interaction.result().unwrap().locked);
    assert!(!interaction.session.interacting());
}

#[test]
fn resume_restarts_offsets_from_current_position() {
    let scope = Scope::standard();
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Resize, bounded_resize()),
        PreparedAction::resize(Edges::TOP | Edges::LEFT),
    );

    interaction.start(&scope, at(100.0, 100.0));
    interaction.pointer_move(&scope, at(-50.0, -50.0));
    assert!(interaction.result().unwrap().locked);

    interaction.end(&scope);
    interaction.resume(&scope, at(120.0, 130.0));

    let status = interaction.modifiers.status(ModifierKind::RestrictEdges).unwrap();
    assert!(!status.locked);
    assert_eq!(status.delta, Point::ZERO);
    assert!(interaction.session.interacting());

    interaction.pointer_move(&scope, at(350.0, 50.0));
    assert_eq!(interaction.session.cur_coords.page, Point::new(200.0, 50.0));
}

#[test]
fn registry_order_controls_composition() {
    let options = ActionOptions::default()
        .with_snap(SnapOptions::new(vec![SnapPoint::new(250.0, 250.0).into()]))
        .with_restrict_edges(RestrictEdgesOptions::new(
            Some(RectSource::Rect(PartialRect::edges(200.0, 400.0, 400.0, 200.0))),
            None,
        ));

    let run = |registry: ModifierRegistry| {
        let scope = Scope::new(registry);
        let mut interaction = Interaction::new(
            &scope,
            target(ActionName::Resize, options.clone()),
            PreparedAction::resize(Edges::TOP | Edges::LEFT),
        );
        interaction.start(&scope, at(0.0, 0.0));
        interaction.pointer_move(&scope, at(100.0, 100.0));
        interaction.session.cur_coords.page
    };

    // Snap first: (250, 250) is then clamped to the inner corner.
    assert_eq!(run(ModifierRegistry::standard()), Point::new(200.0, 200.0));

    // Restrict first: (100, 100) passes, then snaps to (250, 250).
    let restrict_first = ModifierRegistry::from_names(&["restrictEdges", "snap"]).unwrap();
    assert_eq!(run(restrict_first), Point::new(250.0, 250.0));
}

#[test]
fn options_from_json_drive_a_session() {
    let options = TargetOptions::from_json(
        r#"{
            "resize": {
                "restrictEdges": {
                    "enabled": true,
                    "outer": { "top": 0, "left": 0, "right": 600, "bottom": 600 }
                }
            }
        }"#,
    )
    .unwrap();
    let scope = Scope::standard();
    let mut interaction = Interaction::new(
        &scope,
        Arc::new(StaticTarget::new(options)),
        PreparedAction::resize(Edges::BOTTOM | Edges::RIGHT),
    );

    interaction.start(&scope, at(500.0, 500.0));
    interaction.pointer_move(&scope, at(650.0, 620.0));

    assert_eq!(interaction.session.cur_coords.page, Point::new(600.0, 600.0));
}

#[test]
fn moves_before_start_are_ignored() {
    let scope = Scope::standard();
    let mut interaction = Interaction::new(
        &scope,
        target(ActionName::Resize, bounded_resize()),
        PreparedAction::resize(Edges::TOP | Edges::LEFT),
    );

    assert_eq!(interaction.pointer_move(&scope, at(5.0, 5.0)), Flow::Continue);
    assert!(interaction.result().is_none());
}
