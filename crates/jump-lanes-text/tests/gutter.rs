use jump_lanes::{Edge, LaneLayout, LineNumber, PlanOptions, RowPlan, layout_listing};
use jump_lanes_text::{GutterPainter, GutterStyle, render_listing};
use pretty_assertions::assert_eq;

fn nested_layout() -> LaneLayout<LineNumber> {
    let edges = vec![
        Edge::new(LineNumber(10), LineNumber(16)),
        Edge::new(LineNumber(12), LineNumber(14)),
    ];
    let plan = RowPlan::build((10..=16).map(LineNumber), &edges, PlanOptions::default());
    layout_listing(&plan, edges).unwrap()
}

#[test]
fn test_paint_nested_jumps_unicode() {
    let layout = nested_layout();
    let gutters = GutterPainter::default().paint(&layout);

    assert_eq!(
        gutters,
        vec![
            "    ", // 10
            " ┌──", // 10: jump to 16
            " │  ", // 11
            " │  ", // 12
            "┌┼──", // 12: jump to 14
            "││  ", // 13
            "└┼─>", // 14
            " │  ", // 15
            " └─>", // 16
        ]
    );
}

#[test]
fn test_paint_nested_jumps_ascii() {
    let layout = nested_layout();
    let gutters = GutterPainter::new(GutterStyle::ascii()).paint(&layout);

    assert_eq!(gutters[4], ".+--");
    assert_eq!(gutters[6], "`+->");
    assert_eq!(gutters[8], " `->");
}

#[test]
fn test_conditional_jump_is_dashed() {
    let edges = vec![Edge::new(LineNumber(1), LineNumber(3)).with_conditional(true)];
    let plan = RowPlan::build((1..=3).map(LineNumber), &edges, PlanOptions::default());
    let layout = layout_listing(&plan, edges).unwrap();

    let dashed = GutterPainter::default().paint(&layout);
    assert_eq!(dashed[2], "┆  ");

    let plain = GutterPainter::new(GutterStyle {
        mark_conditional: false,
        ..GutterStyle::default()
    })
    .paint(&layout);
    assert_eq!(plain[2], "│  ");
}

#[test]
fn test_back_edge_arrow_points_at_target() {
    let edges = vec![Edge::new(LineNumber(3), LineNumber(1))];
    let plan = RowPlan::build((1..=3).map(LineNumber), &edges, PlanOptions::default());
    let layout = layout_listing(&plan, edges).unwrap();

    let gutters = GutterPainter::default().paint(&layout);
    assert_eq!(gutters, vec!["┌─>", "│  ", "└──", "   "]);
}

#[test]
fn test_render_listing_columns() {
    let layout = nested_layout();
    let lines = render_listing(&layout, &[], GutterStyle::default());

    assert_eq!(lines[0], "10");
    assert_eq!(lines[1], "    ┌── jump to 16 (1x)");
    assert_eq!(lines[6], "14 └┼─>");
    assert_eq!(lines.len(), layout.rows.len());
}

#[test]
fn test_track_handed_over_on_one_row_is_not_a_self_loop() {
    // Without detail rows, 10 -> 14 ends and 14 -> 18 starts on the anchor row of 14.
    let edges = vec![
        Edge::new(LineNumber(10), LineNumber(14)),
        Edge::new(LineNumber(14), LineNumber(18)),
    ];
    let plan = RowPlan::build((10..=18).map(LineNumber), &edges, PlanOptions::anchors_only());
    let layout = layout_listing(&plan, edges).unwrap();

    let row_14 = &layout.rows[4];
    assert_eq!(row_14.position, LineNumber(14));
    assert_eq!(row_14.starts.len(), 1);
    assert_eq!(row_14.ends.len(), 1);

    assert_eq!(GutterPainter::default().paint_row(&layout, row_14), "├─>");
    assert_eq!(
        GutterPainter::new(GutterStyle::ascii()).paint_row(&layout, row_14),
        "+->"
    );
}

#[test]
fn test_self_loop_glyph() {
    let edges = vec![Edge::new(LineNumber(14), LineNumber(14))];
    let plan = RowPlan::build((13..=15).map(LineNumber), &edges, PlanOptions::default());
    let layout = layout_listing(&plan, edges).unwrap();

    let gutters = GutterPainter::default().paint(&layout);
    assert_eq!(gutters, vec!["   ", "●─>", "   ", "   "]);
}
