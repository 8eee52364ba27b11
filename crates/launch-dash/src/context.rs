//! Application context shared by every request.

#![allow(missing_docs)]

use indexmap::IndexMap;

use crate::callbacks::CallbackRegistry;
use crate::chart::ChartSpec;
use crate::controls::ControlValues;
use crate::dataset::LaunchTable;
use crate::error::DashError;
use crate::layout::{ComponentId, Layout};

/// Loaded dataset, page layout and callback table. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct DashContext {
    table: LaunchTable,
    layout: Layout,
    callbacks: CallbackRegistry,
}

impl DashContext {
    pub fn new(table: LaunchTable) -> Result<Self, DashError> {
        Self::with_callbacks(table, CallbackRegistry::dashboard())
    }

    pub fn with_callbacks(
        table: LaunchTable,
        callbacks: CallbackRegistry,
    ) -> Result<Self, DashError> {
        let layout = Layout::dashboard(table.payload_bounds());
        layout.validate()?;
        callbacks.validate(&layout)?;
        Ok(Self {
            table,
            layout,
            callbacks,
        })
    }

    #[must_use]
    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn dispatch(
        &self,
        changed: &[ComponentId],
        values: &ControlValues,
    ) -> IndexMap<ComponentId, ChartSpec> {
        self.callbacks.dispatch(self, changed, values)
    }
}
