//! Reactive filter engine: callback table and the chart transformations.

#![allow(missing_docs)]

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::chart::{ChartKind, ChartSpec, PieChart, ScatterChart};
use crate::context::DashContext;
use crate::controls::{ControlValues, PayloadRange, SiteSelection};
use crate::dataset::{LaunchRecord, LaunchTable};
use crate::error::DashError;
use crate::layout::{ComponentId, ComponentRole, Layout};

/// Pure chart builder; receives only the values of its declared inputs.
pub type Handler = fn(&DashContext, &ControlValues) -> Result<ChartSpec, DashError>;

#[derive(Clone, Copy)]
pub struct Callback {
    pub output: ComponentId,
    pub inputs: &'static [ComponentId],
    pub kind: ChartKind,
    handler: Handler,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Callback {
    #[must_use]
    pub const fn new(
        output: ComponentId,
        inputs: &'static [ComponentId],
        kind: ChartKind,
        handler: Handler,
    ) -> Self {
        Self {
            output,
            inputs,
            kind,
            handler,
        }
    }

    #[must_use]
    pub fn subscribes_to(&self, id: ComponentId) -> bool {
        self.inputs.contains(&id)
    }

    /// Runs the handler. Bad control values degrade to an empty chart of the declared kind.
    #[must_use]
    pub fn invoke(&self, ctx: &DashContext, values: &ControlValues) -> ChartSpec {
        let mut scoped = ControlValues::new();
        for input in self.inputs {
            if let Some(value) = values.get(*input) {
                scoped.insert(*input, value.clone());
            }
        }
        match (self.handler)(ctx, &scoped) {
            Ok(spec) if spec.kind() == self.kind => spec,
            Ok(_) => {
                warn!(output = self.output.as_str(), "callback returned the wrong chart kind");
                ChartSpec::empty(self.kind)
            }
            Err(err) => {
                warn!(output = self.output.as_str(), error = %err, "rendering empty chart");
                ChartSpec::empty(self.kind)
            }
        }
    }
}

const PIE_INPUTS: &[ComponentId] = &[ComponentId::SiteDropdown];
const SCATTER_INPUTS: &[ComponentId] = &[ComponentId::SiteDropdown, ComponentId::PayloadSlider];

/// Output id -> (handler, ordered inputs). Checked against the layout at startup.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The two dashboard callbacks: outcome share (pie) and payload correlation (scatter).
    #[must_use]
    pub fn dashboard() -> Self {
        Self {
            callbacks: vec![
                Callback::new(
                    ComponentId::SuccessPieChart,
                    PIE_INPUTS,
                    ChartKind::Pie,
                    success_pie_chart,
                ),
                Callback::new(
                    ComponentId::SuccessPayloadScatterChart,
                    SCATTER_INPUTS,
                    ChartKind::Scatter,
                    success_payload_scatter_chart,
                ),
            ],
        }
    }

    pub fn register(&mut self, callback: Callback) -> Result<(), DashError> {
        if self.get(callback.output).is_some() {
            return Err(DashError::InvalidLayout(
                format!("output '{}' registered twice", callback.output.as_str()).into(),
            ));
        }
        self.callbacks.push(callback);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, output: ComponentId) -> Option<&Callback> {
        self.callbacks.iter().find(|cb| cb.output == output)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Callback> {
        self.callbacks.iter()
    }

    /// Every output must be a chart placeholder and every input a control in `layout`.
    pub fn validate(&self, layout: &Layout) -> Result<(), DashError> {
        for (idx, callback) in self.iter().enumerate() {
            if self.callbacks[..idx]
                .iter()
                .any(|other| other.output == callback.output)
            {
                return Err(DashError::InvalidLayout(
                    format!("output '{}' registered twice", callback.output.as_str()).into(),
                ));
            }
            if layout.role_of(callback.output)? != ComponentRole::Chart {
                return Err(DashError::InvalidLayout(
                    format!("output '{}' is not a chart", callback.output.as_str()).into(),
                ));
            }
            if callback.inputs.is_empty() {
                return Err(DashError::InvalidLayout(
                    format!("output '{}' has no inputs", callback.output.as_str()).into(),
                ));
            }
            for input in callback.inputs {
                if layout.role_of(*input)? != ComponentRole::Control {
                    return Err(DashError::InvalidLayout(
                        format!(
                            "input '{}' of '{}' is not a control",
                            input.as_str(),
                            callback.output.as_str()
                        )
                        .into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Recomputes every output subscribed to a changed control. An empty `changed`
    /// list is the initial render and runs every callback.
    #[must_use]
    pub fn dispatch(
        &self,
        ctx: &DashContext,
        changed: &[ComponentId],
        values: &ControlValues,
    ) -> IndexMap<ComponentId, ChartSpec> {
        self.iter()
            .filter(|cb| changed.is_empty() || changed.iter().any(|id| cb.subscribes_to(*id)))
            .map(|cb| {
                debug!(output = cb.output.as_str(), "dispatching callback");
                (cb.output, cb.invoke(ctx, values))
            })
            .collect()
    }
}

fn success_pie_chart(ctx: &DashContext, values: &ControlValues) -> Result<ChartSpec, DashError> {
    let site = values.site()?;
    Ok(ChartSpec::Pie(outcome_share(ctx.table(), site)))
}

fn success_payload_scatter_chart(
    ctx: &DashContext,
    values: &ControlValues,
) -> Result<ChartSpec, DashError> {
    let site = values.site()?;
    let range = values.payload_range()?;
    Ok(ChartSpec::Scatter(payload_correlation(ctx.table(), site, range)))
}

/// Successes per site for `ALL`, otherwise the failure/success split of one site.
#[must_use]
pub fn outcome_share(table: &LaunchTable, site: SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => PieChart::successes_by_site(table.records()),
        SiteSelection::Site(site) => PieChart::outcomes_for_site(site, table.records()),
    }
}

/// Scatter of payload mass against outcome for the launches inside `range` at `site`.
#[must_use]
pub fn payload_correlation(
    table: &LaunchTable,
    site: SiteSelection,
    range: PayloadRange,
) -> ScatterChart {
    ScatterChart::payload_vs_outcome(filter_launches(table, site, range))
}

pub fn filter_launches(
    table: &LaunchTable,
    site: SiteSelection,
    range: PayloadRange,
) -> impl Iterator<Item = &LaunchRecord> {
    table
        .records()
        .iter()
        .filter(move |record| range.contains(record.payload_mass_kg))
        .filter(move |record| site.matches(record.site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LaunchSite, Outcome};
    use serde_json::json;
    use smol_str::SmolStr;

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

    fn context() -> DashContext {
        let table = LaunchTable::from_records(vec![
            record(LaunchSite::CcafsLc40, 500.0, Outcome::Failure, "v1.0"),
            record(LaunchSite::CcafsLc40, 2500.0, Outcome::Success, "v1.1"),
            record(LaunchSite::KscLc39a, 3000.0, Outcome::Success, "FT"),
            record(LaunchSite::VafbSlc4e, 9600.0, Outcome::Failure, "B4"),
        ])
        .expect("table");
        DashContext::new(table).expect("context")
    }

    fn values(site: &str, range: [f64; 2]) -> ControlValues {
        ControlValues::new()
            .with(ComponentId::SiteDropdown, json!(site))
            .with(ComponentId::PayloadSlider, json!(range))
    }

    #[test]
    fn dashboard_registry_matches_layout() {
        let ctx = context();
        CallbackRegistry::dashboard()
            .validate(ctx.layout())
            .expect("valid wiring");
    }

    #[test]
    fn dashboard_registry_lists_pie_before_scatter() {
        let registry = CallbackRegistry::dashboard();
        let outputs = registry
            .iter()
            .map(|cb| (cb.output, cb.kind))
            .collect::<Vec<_>>();
        assert_eq!(
            outputs,
            vec![
                (ComponentId::SuccessPieChart, ChartKind::Pie),
                (ComponentId::SuccessPayloadScatterChart, ChartKind::Scatter),
            ]
        );
    }

    #[test]
    fn registry_rejects_control_as_output() {
        let ctx = context();
        let mut registry = CallbackRegistry::new();
        registry
            .register(Callback::new(
                ComponentId::PayloadSlider,
                PIE_INPUTS,
                ChartKind::Pie,
                success_pie_chart,
            ))
            .expect("register");
        assert!(registry.validate(ctx.layout()).is_err());
    }

    #[test]
    fn registry_rejects_chart_as_input() {
        let ctx = context();
        let mut registry = CallbackRegistry::new();
        registry
            .register(Callback::new(
                ComponentId::SuccessPieChart,
                &[ComponentId::SuccessPayloadScatterChart],
                ChartKind::Pie,
                success_pie_chart,
            ))
            .expect("register");
        assert!(registry.validate(ctx.layout()).is_err());
    }

    #[test]
    fn registry_rejects_duplicate_outputs() {
        let mut registry = CallbackRegistry::dashboard();
        let duplicate = Callback::new(
            ComponentId::SuccessPieChart,
            PIE_INPUTS,
            ChartKind::Pie,
            success_pie_chart,
        );
        assert!(registry.register(duplicate).is_err());
    }

    #[test]
    fn dropdown_change_updates_both_charts() {
        let ctx = context();
        let outputs = ctx.dispatch(&[ComponentId::SiteDropdown], &values("ALL", [0.0, 10000.0]));
        let ids = outputs.keys().copied().collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                ComponentId::SuccessPieChart,
                ComponentId::SuccessPayloadScatterChart
            ]
        );
    }

    #[test]
    fn slider_change_updates_only_scatter() {
        let ctx = context();
        let outputs =
            ctx.dispatch(&[ComponentId::PayloadSlider], &values("ALL", [0.0, 10000.0]));
        assert_eq!(outputs.len(), 1);
        assert!(outputs.contains_key(&ComponentId::SuccessPayloadScatterChart));
    }

    #[test]
    fn initial_render_runs_every_callback() {
        let ctx = context();
        let outputs = ctx.dispatch(&[], &values("ALL", [0.0, 10000.0]));
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn all_sites_pie_counts_successes() {
        let ctx = context();
        let pie = outcome_share(ctx.table(), SiteSelection::All);
        let slices = pie
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect::<Vec<_>>();
        assert_eq!(slices, vec![("CCAFS LC-40", 1), ("KSC LC-39A", 1)]);
    }

    #[test]
    fn scatter_filters_by_site_and_range() {
        let ctx = context();
        let range = PayloadRange::new(2000.0, 4000.0).expect("range");
        let site = SiteSelection::Site(LaunchSite::CcafsLc40);
        let scatter = payload_correlation(ctx.table(), site, range);
        let masses = scatter.points().map(|p| p.x).collect::<Vec<_>>();
        assert_eq!(masses, vec![2500.0]);
    }

    #[test]
    fn invalid_range_degrades_to_empty_scatter() {
        let ctx = context();
        let outputs = ctx.dispatch(
            &[ComponentId::PayloadSlider],
            &values("ALL", [4000.0, 2000.0]),
        );
        let chart = &outputs[&ComponentId::SuccessPayloadScatterChart];
        assert_eq!(chart.kind(), ChartKind::Scatter);
        assert!(chart.is_empty());
    }

    #[test]
    fn unknown_site_degrades_both_charts() {
        let ctx = context();
        let outputs = ctx.dispatch(
            &[ComponentId::SiteDropdown],
            &values("Boca Chica", [0.0, 10000.0]),
        );
        assert_eq!(outputs.len(), 2);
        assert!(outputs.values().all(ChartSpec::is_empty));
        assert_eq!(
            outputs[&ComponentId::SuccessPieChart].kind(),
            ChartKind::Pie
        );
    }

    #[test]
    fn pie_ignores_slider_value() {
        let ctx = context();
        let outputs = ctx.dispatch(&[], &values("KSC LC-39A", [9000.0, 1.0]));
        let pie = outputs[&ComponentId::SuccessPieChart]
            .as_pie()
            .expect("pie output");
        assert!(pie.total() > 0);
        let scatter = outputs[&ComponentId::SuccessPayloadScatterChart]
            .as_scatter()
            .expect("scatter output");
        assert_eq!(scatter.point_count(), 0);
    }
}
