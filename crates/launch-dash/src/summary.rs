//! Diagnostic tabulations printed at startup.

#![allow(missing_docs)]

use std::fmt::Write as _;

use serde::Serialize;

use crate::dataset::{LaunchSite, LaunchTable, Outcome, PayloadBounds};

#[derive(Debug, Clone, Serialize)]
pub struct SiteCount {
    pub site: LaunchSite,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassSiteCount {
    pub class: Outcome,
    pub site: LaunchSite,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub payload_bounds: PayloadBounds,
    pub site_counts: Vec<SiteCount>,
    pub class_site_counts: Vec<ClassSiteCount>,
}

impl DatasetSummary {
    #[must_use]
    pub fn from_table(table: &LaunchTable) -> Self {
        Self {
            records: table.len(),
            payload_bounds: table.payload_bounds(),
            site_counts: table
                .site_counts()
                .into_iter()
                .map(|(site, count)| SiteCount { site, count })
                .collect(),
            class_site_counts: table
                .class_site_counts()
                .into_iter()
                .map(|(class, site, count)| ClassSiteCount { class, site, count })
                .collect(),
        }
    }

    /// Launch counts per site as an aligned text table.
    #[must_use]
    pub fn render_site_counts(&self) -> String {
        let rows = self
            .site_counts
            .iter()
            .map(|row| vec![row.site.to_string(), row.count.to_string()])
            .collect::<Vec<_>>();
        render_table(&["Launch Site", "count"], &rows)
    }

    /// Launch counts per (class, site) pair as an aligned text table.
    #[must_use]
    pub fn render_class_site_counts(&self) -> String {
        let rows = self
            .class_site_counts
            .iter()
            .map(|row| {
                vec![
                    row.class.class().to_string(),
                    row.site.to_string(),
                    row.count.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        render_table(&["class", "Launch Site", "count"], &rows)
    }
}

/// Text columns are left-aligned, the trailing count column right-aligned.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            rows.iter()
                .map(|row| row[idx].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();
    let last = headers.len() - 1;
    let mut out = String::new();
    let cells = std::iter::once(headers.iter().map(|h| (*h).to_string()).collect::<Vec<_>>())
        .chain(rows.iter().cloned());
    for row in cells {
        let mut line = String::new();
        for (idx, cell) in row.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            if idx == last {
                let _ = write!(line, "{cell:>width$}", width = widths[idx]);
            } else {
                let _ = write!(line, "{cell:<width$}", width = widths[idx]);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
