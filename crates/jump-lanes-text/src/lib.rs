#![warn(missing_docs)]
//! `jump-lanes-text` - monospace gutter painter for `jump-lanes` layouts.
//!
//! This crate turns a finished [`LaneLayout`] into text: one gutter string per row, `levels`
//! columns wide, with track 0 nearest to the listing text. It is meant for terminals, logs and
//! snapshot tests; graphical hosts draw the same snapshots with their own primitives.
//!
//! ```text
//! 12  │   cmp  eax, 3
//!    ┌┼── jump to 14 (2x)
//! 13 ││   add  eax, 1
//! 14 └┼─> mov  ebx, eax
//! ```

use jump_lanes::{DetailSide, Edge, LaneLayout, Position, RowRole, RowSnapshot};
use std::fmt::Display;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Glyph set used for painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Box-drawing characters.
    #[default]
    Unicode,
    /// Plain ASCII.
    Ascii,
}

/// Painter options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterStyle {
    /// Glyph set.
    pub charset: Charset,
    /// Draw conditional jumps with a dashed continuation glyph.
    pub mark_conditional: bool,
    /// Truncate row labels to this display width (in cells), if set.
    pub max_label_width: Option<usize>,
}

impl Default for GutterStyle {
    fn default() -> Self {
        Self {
            charset: Charset::Unicode,
            mark_conditional: true,
            max_label_width: None,
        }
    }
}

impl GutterStyle {
    /// ASCII glyphs, otherwise default options.
    pub fn ascii() -> Self {
        Self {
            charset: Charset::Ascii,
            ..Self::default()
        }
    }
}

struct Glyphs {
    vertical: char,
    dashed: char,
    start: char,
    end: char,
    self_loop: char,
    handoff: char,
    cross: char,
    horizontal: char,
    head: char,
}

impl Glyphs {
    fn for_charset(charset: Charset) -> Self {
        match charset {
            Charset::Unicode => Self {
                vertical: '│',
                dashed: '┆',
                start: '┌',
                end: '└',
                self_loop: '●',
                handoff: '├',
                cross: '┼',
                horizontal: '─',
                head: '>',
            },
            Charset::Ascii => Self {
                vertical: '|',
                dashed: ':',
                start: '.',
                end: '`',
                self_loop: 'o',
                handoff: '+',
                cross: '+',
                horizontal: '-',
                head: '>',
            },
        }
    }
}

/// Paints gutter strings for a layout.
pub struct GutterPainter {
    style: GutterStyle,
    glyphs: Glyphs,
}

impl GutterPainter {
    /// Create a painter.
    pub fn new(style: GutterStyle) -> Self {
        Self {
            style,
            glyphs: Glyphs::for_charset(style.charset),
        }
    }

    /// The painter options.
    pub fn style(&self) -> GutterStyle {
        self.style
    }

    /// One gutter string per row of `layout`.
    ///
    /// Every string is `layout.levels + 2` cells wide: the track columns followed by a two-cell
    /// lead into the row text.
    pub fn paint<P: Position>(&self, layout: &LaneLayout<P>) -> Vec<String> {
        layout
            .rows
            .iter()
            .map(|row| self.paint_row(layout, row))
            .collect()
    }

    /// Paint a single row of `layout`.
    pub fn paint_row<P: Position>(&self, layout: &LaneLayout<P>, row: &RowSnapshot<P>) -> String {
        let levels = layout.levels;
        let g = &self.glyphs;
        let column = |track: usize| levels - 1 - track;
        let mut cells = vec![' '; levels];

        for track in 0..levels.min(row.tracks.len()) {
            let starts = row.starts.iter().any(|mark| mark.track == track);
            let ends = row.ends.iter().any(|mark| mark.track == track);
            let self_loop = row
                .starts
                .iter()
                .filter(|mark| mark.track == track)
                .any(|start| row.ends.contains(start));
            cells[column(track)] = match (starts, ends, row.track(track)) {
                // One arrow ends on the track and another one takes it over.
                (true, true, _) if !self_loop => g.handoff,
                (true, true, _) => g.self_loop,
                (true, false, _) => g.start,
                (false, true, _) => g.end,
                (false, false, Some(edge)) => {
                    let conditional = layout.edge(edge).is_some_and(|edge| edge.conditional);
                    if conditional && self.style.mark_conditional {
                        g.dashed
                    } else {
                        g.vertical
                    }
                }
                (false, false, None) => ' ',
            };
        }

        let reach = row.starts.iter().chain(row.ends.iter()).map(|m| m.track).max();
        let mut lead = [' ', ' '];
        if let Some(reach) = reach {
            for track in 0..reach {
                let cell = &mut cells[column(track)];
                if *cell == ' ' {
                    *cell = g.horizontal;
                } else if *cell == g.vertical || *cell == g.dashed {
                    *cell = g.cross;
                }
            }

            let arrives = row
                .starts
                .iter()
                .any(|mark| layout.edge(mark.edge).is_some_and(Edge::low_is_target))
                || row
                    .ends
                    .iter()
                    .any(|mark| layout.edge(mark.edge).is_some_and(Edge::high_is_target));
            lead = [g.horizontal, if arrives { g.head } else { g.horizontal }];
        }

        cells.iter().chain(lead.iter()).collect()
    }
}

impl Default for GutterPainter {
    fn default() -> Self {
        Self::new(GutterStyle::default())
    }
}

/// Describe the edge of a detail row, e.g. `jump to 0x4010 (3x)`.
pub fn detail_label<P: Position + Display>(edge: &Edge<P>, side: DetailSide) -> String {
    let kind = if edge.conditional {
        "conditional jump"
    } else {
        "jump"
    };
    match side {
        DetailSide::JumpFrom => format!("{kind} to {} ({}x)", edge.to, edge.executed),
        DetailSide::JumpInto => format!("{kind} from {} ({}x)", edge.from, edge.executed),
    }
}

/// Render `layout` as listing lines: position column, gutter, then the row label.
///
/// `labels[i]` is the text of row `i`; missing labels default to the [`detail_label`] of detail
/// rows and to an empty string for anchor rows. Positions are printed on anchor rows only.
pub fn render_listing<P: Position + Display>(
    layout: &LaneLayout<P>,
    labels: &[String],
    style: GutterStyle,
) -> Vec<String> {
    let painter = GutterPainter::new(style);
    let gutters = painter.paint(layout);

    let positions: Vec<String> = layout
        .rows
        .iter()
        .map(|row| {
            if row.role.is_anchor() {
                row.position.to_string()
            } else {
                String::new()
            }
        })
        .collect();
    let width = positions.iter().map(|p| p.width()).max().unwrap_or(0);

    layout
        .rows
        .iter()
        .zip(gutters)
        .zip(positions)
        .enumerate()
        .map(|(index, ((row, gutter), position))| {
            let label = match (labels.get(index), row.role) {
                (Some(label), _) => label.clone(),
                (None, RowRole::Detail { edge, side }) => layout
                    .edge(edge)
                    .map(|edge| detail_label(edge, side))
                    .unwrap_or_default(),
                (None, RowRole::Anchor) => String::new(),
            };
            let label = match style.max_label_width {
                Some(max) => truncate_to_width(&label, max),
                None => label,
            };
            let pad = width - position.width();
            format!("{}{position} {gutter} {label}", " ".repeat(pad))
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Cut `text` to at most `max` display cells, ending with `…` when shortened.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
