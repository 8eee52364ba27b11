//! Chart specifications returned to the page.

#![allow(missing_docs)]

use serde::Serialize;
use smol_str::SmolStr;

use crate::dataset::{
    LaunchRecord, LaunchSite, Outcome, COLUMN_BOOSTER_CATEGORY, COLUMN_CLASS, COLUMN_LAUNCH_SITE,
    COLUMN_PAYLOAD_MASS,
};

/// Sequential "Agsunset" palette, used for the all-sites pie.
pub const AGSUNSET: [&str; 7] = [
    "rgb(75, 41, 145)",
    "rgb(135, 44, 162)",
    "rgb(192, 54, 157)",
    "rgb(234, 79, 136)",
    "rgb(250, 120, 118)",
    "rgb(246, 169, 122)",
    "rgb(237, 217, 163)",
];

/// Default qualitative palette for categorical traces.
pub const QUALITATIVE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub const FAILURE_COLOR: &str = "red";
pub const SUCCESS_COLOR: &str = "blue";
pub const ALL_SITES_PIE_TITLE: &str = "Successful Launches by Site";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    /// A valid chart of `kind` with no data.
    #[must_use]
    pub fn empty(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Pie => ChartSpec::Pie(PieChart::empty()),
            ChartKind::Scatter => ChartSpec::Scatter(ScatterChart::empty()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Pie(_) => ChartKind::Pie,
            ChartSpec::Scatter(_) => ChartKind::Scatter,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Pie(pie) => pie.slices.is_empty(),
            ChartSpec::Scatter(scatter) => scatter.traces.is_empty(),
        }
    }

    #[must_use]
    pub fn as_pie(&self) -> Option<&PieChart> {
        match self {
            ChartSpec::Pie(pie) => Some(pie),
            ChartSpec::Scatter(_) => None,
        }
    }

    #[must_use]
    pub fn as_scatter(&self) -> Option<&ScatterChart> {
        match self {
            ChartSpec::Scatter(scatter) => Some(scatter),
            ChartSpec::Pie(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub names_column: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_order: Vec<String>,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            names_column: COLUMN_LAUNCH_SITE,
            category_order: Vec::new(),
            slices: Vec::new(),
        }
    }

    /// One slice per site with at least one success, in first-appearance order.
    pub fn successes_by_site<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Self {
        let mut counts: Vec<(LaunchSite, usize)> = Vec::new();
        for record in records {
            if record.outcome != Outcome::Success {
                continue;
            }
            match counts.iter_mut().find(|(site, _)| *site == record.site) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.site, 1)),
            }
        }
        let slices = counts
            .into_iter()
            .zip(AGSUNSET.iter().cycle())
            .map(|((site, count), color)| PieSlice {
                label: site.as_str().to_string(),
                value: count,
                color: *color,
            })
            .collect();
        Self {
            title: ALL_SITES_PIE_TITLE.to_string(),
            names_column: COLUMN_LAUNCH_SITE,
            category_order: Vec::new(),
            slices,
        }
    }

    /// Failure/success split for one site. Both classes always appear, class 0 first;
    /// a site with no rows yields no slices.
    pub fn outcomes_for_site<'a>(
        site: LaunchSite,
        records: impl IntoIterator<Item = &'a LaunchRecord>,
    ) -> Self {
        let mut counts = [0usize; 2];
        for record in records.into_iter().filter(|record| record.site == site) {
            counts[usize::from(record.outcome.class())] += 1;
        }
        let slices = if counts.iter().all(|count| *count == 0) {
            Vec::new()
        } else {
            Outcome::ORDER
                .into_iter()
                .map(|outcome| PieSlice {
                    label: outcome.class().to_string(),
                    value: counts[usize::from(outcome.class())],
                    color: outcome_color(outcome),
                })
                .collect()
        };
        Self {
            title: outcomes_title(site),
            names_column: COLUMN_CLASS,
            category_order: Outcome::ORDER
                .iter()
                .map(|outcome| outcome.class().to_string())
                .collect(),
            slices,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.slices.iter().map(|slice| slice.value).sum()
    }
}

#[must_use]
pub fn outcomes_title(site: LaunchSite) -> String {
    format!("Percentage of Successful Launches (class=1) for Site {site}")
}

fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Failure => FAILURE_COLOR,
        Outcome::Success => SUCCESS_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: u8,
    pub site: LaunchSite,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<SmolStr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: SmolStr,
    pub color: &'static str,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_column: &'static str,
    pub y_column: &'static str,
    pub color_column: &'static str,
    pub traces: Vec<ScatterTrace>,
}

impl ScatterChart {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            title: None,
            x_column: COLUMN_PAYLOAD_MASS,
            y_column: COLUMN_CLASS,
            color_column: COLUMN_BOOSTER_CATEGORY,
            traces: Vec::new(),
        }
    }

    /// Payload mass against outcome, one trace per booster category in first-appearance order.
    pub fn payload_vs_outcome<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> Self {
        let mut chart = Self::empty();
        for record in records {
            let point = ScatterPoint {
                x: record.payload_mass_kg,
                y: record.outcome.class(),
                site: record.site,
                flight_number: record.flight_number,
                booster_version: record.booster_version.clone(),
            };
            let next_color = QUALITATIVE[chart.traces.len() % QUALITATIVE.len()];
            match chart
                .traces
                .iter_mut()
                .find(|trace| trace.name == record.booster_category)
            {
                Some(trace) => trace.points.push(point),
                None => chart.traces.push(ScatterTrace {
                    name: record.booster_category.clone(),
                    color: next_color,
                    points: vec![point],
                }),
            }
        }
        chart
    }

    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.traces.iter().flat_map(|trace| trace.points.iter())
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|trace| trace.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: LaunchSite, mass: f64, outcome: Outcome, category: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            site,
            payload_mass_kg: mass,
            outcome,
            booster_version: None,
            booster_category: SmolStr::new(category),
        }
    }

    #[test]
    fn successes_by_site_skips_sites_without_success() {
        let records = vec![
            record(LaunchSite::KscLc39a, 100.0, Outcome::Success, "FT"),
            record(LaunchSite::CcafsLc40, 100.0, Outcome::Failure, "v1.0"),
            record(LaunchSite::VafbSlc4e, 100.0, Outcome::Success, "FT"),
            record(LaunchSite::KscLc39a, 100.0, Outcome::Success, "B4"),
        ];
        let pie = PieChart::successes_by_site(&records);
        assert_eq!(pie.title, ALL_SITES_PIE_TITLE);
        let labels = pie.slices.iter().map(|s| s.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(pie.slices[0].value, 2);
        assert_eq!(pie.slices[0].color, AGSUNSET[0]);
        assert_eq!(pie.slices[1].color, AGSUNSET[1]);
    }

    #[test]
    fn outcomes_for_site_keeps_fixed_order_and_colors() {
        let records = vec![
            record(LaunchSite::KscLc39a, 100.0, Outcome::Success, "FT"),
            record(LaunchSite::KscLc39a, 100.0, Outcome::Success, "FT"),
            record(LaunchSite::KscLc39a, 100.0, Outcome::Failure, "FT"),
            record(LaunchSite::CcafsLc40, 100.0, Outcome::Failure, "v1.0"),
        ];
        let pie = PieChart::outcomes_for_site(LaunchSite::KscLc39a, &records);
        assert!(pie.title.contains("KSC LC-39A"));
        assert!(pie.title.contains("(class=1)"));
        assert_eq!(pie.category_order, vec!["0", "1"]);
        let slices = pie
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value, s.color))
            .collect::<Vec<_>>();
        assert_eq!(slices, vec![("0", 1, "red"), ("1", 2, "blue")]);
    }

    #[test]
    fn outcomes_for_site_emits_zero_slice_for_absent_class() {
        let records = vec![record(LaunchSite::VafbSlc4e, 100.0, Outcome::Failure, "v1.1")];
        let pie = PieChart::outcomes_for_site(LaunchSite::VafbSlc4e, &records);
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slices[1].value, 0);
        assert_eq!(pie.total(), 1);
    }

    #[test]
    fn outcomes_for_site_without_rows_is_empty() {
        let pie = PieChart::outcomes_for_site(LaunchSite::CcafsSlc40, &[]);
        assert!(pie.slices.is_empty());
        assert!(pie.title.contains("CCAFS SLC-40"));
    }

    #[test]
    fn scatter_groups_by_category_in_appearance_order() {
        let records = vec![
            record(LaunchSite::KscLc39a, 2500.0, Outcome::Success, "FT"),
            record(LaunchSite::CcafsLc40, 500.0, Outcome::Failure, "v1.0"),
            record(LaunchSite::KscLc39a, 3500.0, Outcome::Failure, "FT"),
        ];
        let scatter = ScatterChart::payload_vs_outcome(&records);
        assert_eq!(scatter.title, None);
        assert_eq!(scatter.traces.len(), 2);
        assert_eq!(scatter.traces[0].name, "FT");
        assert_eq!(scatter.traces[0].color, QUALITATIVE[0]);
        assert_eq!(scatter.traces[0].points.len(), 2);
        assert_eq!(scatter.traces[1].name, "v1.0");
        assert_eq!(scatter.traces[1].color, QUALITATIVE[1]);
        assert_eq!(scatter.point_count(), 3);
    }

    #[test]
    fn accessors_follow_the_variant() {
        let records = vec![record(LaunchSite::KscLc39a, 2500.0, Outcome::Success, "FT")];
        let pie = ChartSpec::Pie(PieChart::successes_by_site(&records));
        let scatter = ChartSpec::Scatter(ScatterChart::payload_vs_outcome(&records));
        assert_eq!(pie.as_pie().map(PieChart::total), Some(1));
        assert!(pie.as_scatter().is_none());
        assert_eq!(scatter.as_scatter().map(ScatterChart::point_count), Some(1));
        assert!(scatter.as_pie().is_none());
    }

    #[test]
    fn empty_specs_are_well_formed() {
        let pie = ChartSpec::empty(ChartKind::Pie);
        let scatter = ChartSpec::empty(ChartKind::Scatter);
        assert!(pie.is_empty() && scatter.is_empty());
        let json = serde_json::to_value(&scatter).expect("serialize");
        assert_eq!(json["kind"], "scatter");
        assert_eq!(json["traces"], serde_json::json!([]));
        assert_eq!(json["x_column"], COLUMN_PAYLOAD_MASS);
    }
}
