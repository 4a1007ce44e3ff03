//! Layout a parsed listing and format the result.

use crate::error::CliError;
use crate::input::{AxisKey, Listing, ListingFile};
use jump_lanes::{PlanOptions, RowPlan, RowRole, layout_listing, live_edges};
use jump_lanes_text::{GutterStyle, detail_label, render_listing};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Listing text with an arrow gutter.
    Text,
    /// The full layout as pretty-printed JSON.
    Json,
}

/// Everything that shapes a report.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub plan: PlanOptions,
    pub style: GutterStyle,
    pub format: ReportFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            plan: PlanOptions::default(),
            style: GutterStyle::default(),
            format: ReportFormat::Text,
        }
    }
}

pub fn render_report<P: AxisKey>(
    file: &ListingFile,
    options: &ReportOptions,
) -> Result<String, CliError> {
    let listing = Listing::<P>::from_file(file)?;
    let edges = live_edges(listing.jumps.iter().copied());
    let plan = RowPlan::build(listing.positions.iter().copied(), &edges, options.plan);
    let layout = layout_listing(&plan, edges)?;
    if layout.inconsistencies > 0 {
        tracing::warn!(
            inconsistencies = layout.inconsistencies,
            "some arrows could not be laid out cleanly"
        );
    }
    tracing::debug!(rows = layout.rows.len(), levels = layout.levels, "layout done");

    let mut out = match options.format {
        ReportFormat::Json => serde_json::to_string_pretty(&layout)?,
        ReportFormat::Text => {
            let labels: Vec<String> = layout
                .rows
                .iter()
                .map(|row| match row.role {
                    RowRole::Anchor => listing.text(row.position).unwrap_or_default().to_string(),
                    RowRole::Detail { edge, side } => layout
                        .edge(edge)
                        .map(|edge| detail_label(edge, side))
                        .unwrap_or_default(),
                })
                .collect();
            render_listing(&layout, &labels, options.style).join("\n")
        }
    };
    out.push('\n');
    Ok(out)
}
