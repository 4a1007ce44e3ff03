//! Layout scenarios over small hand-written listings.

use jump_lanes::{
    DetailSide, Edge, EdgeId, LineNumber, LineSweep, PlanOptions, RowPlan, RowRole, Sweep,
    SweepError, TrackMark, layout_listing,
};
use pretty_assertions::assert_eq;

fn line_edges(raw: &[(u32, u32)]) -> Vec<Edge<LineNumber>> {
    raw.iter()
        .map(|&(from, to)| Edge::new(LineNumber(from), LineNumber(to)))
        .collect()
}

fn layout(
    raw: &[(u32, u32)],
    lines: std::ops::RangeInclusive<u32>,
) -> jump_lanes::LaneLayout<LineNumber> {
    let edges = line_edges(raw);
    let plan = RowPlan::build(lines.map(LineNumber), &edges, PlanOptions::default());
    layout_listing(&plan, edges).unwrap()
}

fn anchor_tracks(layout: &jump_lanes::LaneLayout<LineNumber>, line: u32) -> Vec<Option<EdgeId>> {
    layout
        .rows
        .iter()
        .find(|row| row.position == LineNumber(line) && row.role.is_anchor())
        .map(|row| row.tracks.clone())
        .unwrap()
}

#[test]
fn test_disjoint_edges_share_track() {
    let layout = layout(&[(10, 12), (14, 16)], 10..=16);

    assert_eq!(layout.track_of(EdgeId(0)), Some(0));
    assert_eq!(layout.track_of(EdgeId(1)), Some(0));
    assert_eq!(layout.levels, 1);
}

#[test]
fn test_nested_edges_use_first_fit() {
    let layout = layout(&[(10, 16), (12, 14)], 10..=17);

    assert_eq!(layout.track_of(EdgeId(0)), Some(0));
    assert_eq!(layout.track_of(EdgeId(1)), Some(1));
    assert_eq!(layout.levels, 2);
    assert_eq!(
        anchor_tracks(&layout, 13),
        vec![Some(EdgeId(0)), Some(EdgeId(1))]
    );
    assert_eq!(anchor_tracks(&layout, 17), vec![None, None]);
}

#[test]
fn test_three_mutually_overlapping_edges() {
    let layout = layout(&[(10, 20), (12, 18), (14, 16)], 10..=20);

    assert_eq!(layout.track_of(EdgeId(0)), Some(0));
    assert_eq!(layout.track_of(EdgeId(1)), Some(1));
    assert_eq!(layout.track_of(EdgeId(2)), Some(2));
    assert_eq!(layout.levels, 3);
}

#[test]
fn test_end_then_start_at_same_line_reuses_track() {
    let layout = layout(&[(10, 14), (14, 18)], 10..=18);

    let at_14: Vec<_> = layout
        .rows
        .iter()
        .filter(|row| row.position == LineNumber(14))
        .collect();
    assert_eq!(at_14.len(), 2);

    // Anchor row: A arrives and frees track 0.
    assert_eq!(at_14[0].role, RowRole::Anchor);
    assert_eq!(at_14[0].ends, vec![TrackMark { track: 0, edge: EdgeId(0) }]);
    assert!(at_14[0].starts.is_empty());

    // Detail row for B: B leaves and takes the freed track.
    assert_eq!(at_14[1].role, RowRole::jump_from(EdgeId(1)));
    assert_eq!(at_14[1].starts, vec![TrackMark { track: 0, edge: EdgeId(1) }]);

    assert_eq!(layout.levels, 1);
}

#[test]
fn test_source_side_detail_row_defers_arriving_end() {
    let mut sweep = LineSweep::new(line_edges(&[(10, 14), (14, 18)]));

    sweep.annotate(LineNumber(10), RowRole::Anchor).unwrap();
    sweep
        .annotate(LineNumber(10), RowRole::jump_from(EdgeId(0)))
        .unwrap();

    // The jump-from row for B comes first here: A's arrival at 14 is not ended on it.
    let detail = sweep
        .annotate(LineNumber(14), RowRole::jump_from(EdgeId(1)))
        .unwrap();
    assert!(detail.ends.is_empty());
    assert_eq!(detail.starts, vec![TrackMark { track: 1, edge: EdgeId(1) }]);
    assert_eq!(detail.tracks, vec![Some(EdgeId(0)), Some(EdgeId(1))]);

    let anchor = sweep.annotate(LineNumber(14), RowRole::Anchor).unwrap();
    assert_eq!(anchor.end(), Some(TrackMark { track: 0, edge: EdgeId(0) }));
    assert_eq!(anchor.tracks, vec![None, Some(EdgeId(1))]);
}

#[test]
fn test_back_edge_target_claims_before_outgoing_jump() {
    // Edge 0 leaves line 14 downwards, edge 1 is a loop back-edge arriving at 14.
    let layout = layout(&[(14, 16), (18, 14)], 14..=18);

    assert_eq!(layout.track_of(EdgeId(1)), Some(0));
    assert_eq!(layout.track_of(EdgeId(0)), Some(1));

    let anchor_14 = &layout.rows[0];
    assert_eq!(anchor_14.starts, vec![TrackMark { track: 0, edge: EdgeId(1) }]);
    assert_eq!(layout.levels, 2);
}

#[test]
fn test_back_edge_ends_on_source_anchor_row() {
    let layout = layout(&[(20, 10)], 10..=20);

    let row = layout
        .rows
        .iter()
        .find(|row| !row.ends.is_empty())
        .unwrap();
    assert_eq!(row.position, LineNumber(20));
    assert!(row.role.is_anchor());
    assert_eq!(layout.levels, 1);
}

#[test]
fn test_rows_out_of_order_fail() {
    let mut sweep = LineSweep::new(line_edges(&[(10, 16)]));

    sweep.annotate(LineNumber(12), RowRole::Anchor).unwrap();
    let err = sweep.annotate(LineNumber(11), RowRole::Anchor).unwrap_err();
    assert_eq!(
        err,
        SweepError::OutOfOrder {
            previous: "LineNumber(12)".to_string(),
            current: "LineNumber(11)".to_string(),
        }
    );

    // The sweep is over after a precondition failure.
    assert_eq!(
        sweep.annotate(LineNumber(13), RowRole::Anchor),
        Err(SweepError::Finished)
    );
}

#[test]
fn test_flag_level_operations_match_annotate() {
    // Two forward jumps and a back-edge from 15 to 11.
    let edges = line_edges(&[(10, 16), (12, 14), (15, 11)]);
    let plan = RowPlan::build((10..=16).map(LineNumber), &edges, PlanOptions::default());

    let mut by_role = Sweep::new(edges.clone());
    let mut by_flags = Sweep::new(edges);
    let mut claimed = Vec::new();

    for row in plan.iter() {
        let snapshot = by_role.annotate(row.position, row.role).unwrap();
        let (edge_at_row, ignore_from_starts, ignore_to_ends) = match row.role {
            RowRole::Anchor => (None, true, false),
            RowRole::Detail {
                edge,
                side: DetailSide::JumpFrom,
            } => (Some(edge), false, true),
            RowRole::Detail {
                edge,
                side: DetailSide::JumpInto,
            } => (Some(edge), true, false),
        };
        let starts = by_flags
            .advance_starts(row.position, edge_at_row, ignore_from_starts)
            .unwrap();
        let ends = by_flags.advance_ends(row.position, ignore_to_ends).unwrap();

        assert_eq!(snapshot.starts, starts);
        assert_eq!(snapshot.ends, ends);
        assert_eq!(snapshot.tracks, by_flags.tracks());
        claimed.extend(starts.into_iter().map(|mark| (row.position, row.role, mark)));
    }

    assert_eq!(
        claimed,
        vec![
            (
                LineNumber(10),
                RowRole::jump_from(EdgeId(0)),
                TrackMark { track: 0, edge: EdgeId(0) }
            ),
            (
                LineNumber(11),
                RowRole::Anchor,
                TrackMark { track: 1, edge: EdgeId(2) }
            ),
            (
                LineNumber(12),
                RowRole::jump_from(EdgeId(1)),
                TrackMark { track: 2, edge: EdgeId(1) }
            ),
        ]
    );
    assert_eq!(by_flags.finish(), Ok(3));
    assert_eq!(by_role.finish(), Ok(3));
}

#[test]
fn test_jump_into_rows_leave_tracks_untouched() {
    // Forward jumps 10 -> 14 and 12 -> 15, back-edge 16 -> 12.
    let edges = line_edges(&[(10, 14), (16, 12), (12, 15)]);
    let lines = || (10..=16).map(LineNumber);

    let plain = layout_listing(
        &RowPlan::build(lines(), &edges, PlanOptions::default()),
        edges.clone(),
    )
    .unwrap();
    let with_into = layout_listing(
        &RowPlan::build(
            lines(),
            &edges,
            PlanOptions {
                detail_rows: true,
                into_rows: true,
            },
        ),
        edges,
    )
    .unwrap();

    let into_rows: Vec<_> = with_into
        .rows
        .iter()
        .filter(|row| {
            matches!(
                row.role,
                RowRole::Detail {
                    side: DetailSide::JumpInto,
                    ..
                }
            )
        })
        .collect();
    assert_eq!(
        into_rows.iter().map(|row| row.position).collect::<Vec<_>>(),
        vec![LineNumber(12), LineNumber(14), LineNumber(15)]
    );
    for row in &into_rows {
        assert!(row.starts.is_empty());
        assert!(row.ends.is_empty());
    }

    let other_rows = with_into.rows.iter().filter(|row| {
        !matches!(
            row.role,
            RowRole::Detail {
                side: DetailSide::JumpInto,
                ..
            }
        )
    });
    assert!(plain.rows.iter().eq(other_rows));
    for edge in 0..3 {
        assert_eq!(
            with_into.track_of(EdgeId(edge)),
            plain.track_of(EdgeId(edge))
        );
    }
    assert_eq!(with_into.levels, plain.levels);
    assert_eq!(with_into.inconsistencies, 0);
}

#[test]
fn test_repeated_runs_are_identical() {
    let raw = [(10, 14), (14, 10), (14, 18), (12, 14), (18, 14)];
    let first = layout(&raw, 10..=18);
    let second = layout(&raw, 10..=18);
    assert_eq!(first, second);
}
