//! Control value snapshots sent by the browser.

#![allow(missing_docs)]

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use smol_str::SmolStr;

use crate::dataset::{LaunchSite, PayloadBounds};
use crate::error::DashError;
use crate::layout::ComponentId;

/// Dropdown sentinel selecting every launch site.
pub const ALL_SITES: &str = "ALL";
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Site(LaunchSite),
}

impl SiteSelection {
    pub fn parse(text: &str) -> Result<Self, DashError> {
        if text == ALL_SITES {
            return Ok(Self::All);
        }
        LaunchSite::parse(text).map(Self::Site).map_err(|err| {
            DashError::invalid_control(ComponentId::SiteDropdown.as_str(), err.to_string())
        })
    }

    pub fn from_value(value: Option<&Value>) -> Result<Self, DashError> {
        let id = ComponentId::SiteDropdown.as_str();
        match value {
            Some(Value::String(text)) => Self::parse(text),
            Some(other) => Err(DashError::invalid_control(
                id,
                format!("expected a site name, got {other}"),
            )),
            None => Err(DashError::invalid_control(id, "missing value")),
        }
    }

    #[must_use]
    pub fn matches(self, site: LaunchSite) -> bool {
        match self {
            Self::All => true,
            Self::Site(selected) => selected == site,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(site) => site.as_str(),
        }
    }
}

impl Serialize for SiteSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inclusive payload mass interval; `low <= high`, both inside the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, DashError> {
        let id = ComponentId::PayloadSlider.as_str();
        if !low.is_finite() || !high.is_finite() {
            return Err(DashError::invalid_control(id, "bounds must be finite"));
        }
        if low > high {
            return Err(DashError::invalid_control(
                id,
                format!("lower bound {low} exceeds upper bound {high}"),
            ));
        }
        if low < PAYLOAD_SLIDER_MIN || high > PAYLOAD_SLIDER_MAX {
            return Err(DashError::invalid_control(
                id,
                format!(
                    "range [{low}, {high}] outside [{PAYLOAD_SLIDER_MIN}, {PAYLOAD_SLIDER_MAX}]"
                ),
            ));
        }
        Ok(Self { low, high })
    }

    pub fn from_value(value: Option<&Value>) -> Result<Self, DashError> {
        let id = ComponentId::PayloadSlider.as_str();
        let Some(value) = value else {
            return Err(DashError::invalid_control(id, "missing value"));
        };
        let bounds = value
            .as_array()
            .filter(|items| items.len() == 2)
            .and_then(|items| Some((items[0].as_f64()?, items[1].as_f64()?)));
        let Some((low, high)) = bounds else {
            return Err(DashError::invalid_control(
                id,
                format!("expected [low, high], got {value}"),
            ));
        };
        Self::new(low, high)
    }

    /// Slider default: the observed payload bounds clamped to the slider range.
    #[must_use]
    pub fn initial(bounds: PayloadBounds) -> Self {
        let low = bounds.min.clamp(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX);
        let high = bounds.max.clamp(low, PAYLOAD_SLIDER_MAX);
        Self { low, high }
    }

    #[must_use]
    pub fn full() -> Self {
        Self {
            low: PAYLOAD_SLIDER_MIN,
            high: PAYLOAD_SLIDER_MAX,
        }
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[must_use]
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

impl Serialize for PayloadRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.low, self.high].serialize(serializer)
    }
}

/// Raw control values keyed by component id, as posted by the page.
#[derive(Debug, Clone, Default)]
pub struct ControlValues {
    values: IndexMap<SmolStr, Value>,
}

impl ControlValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: ComponentId, value: Value) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&mut self, id: ComponentId, value: Value) {
        self.values.insert(SmolStr::new(id.as_str()), value);
    }

    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Value> {
        self.values.get(id.as_str())
    }

    pub fn site(&self) -> Result<SiteSelection, DashError> {
        SiteSelection::from_value(self.get(ComponentId::SiteDropdown))
    }

    pub fn payload_range(&self) -> Result<PayloadRange, DashError> {
        PayloadRange::from_value(self.get(ComponentId::PayloadSlider))
    }
}

impl FromIterator<(String, Value)> for ControlValues {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (SmolStr::new(key), value))
                .collect(),
        }
    }
}
