//! Launch dataset loading and aggregates.

#![allow(missing_docs)]

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::info;

use crate::error::DashError;

pub const COLUMN_LAUNCH_SITE: &str = "Launch Site";
pub const COLUMN_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COLUMN_CLASS: &str = "class";
pub const COLUMN_BOOSTER_CATEGORY: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_LAUNCH_SITE,
    COLUMN_PAYLOAD_MASS,
    COLUMN_CLASS,
    COLUMN_BOOSTER_CATEGORY,
];

/// Launch sites present in the dataset, in dropdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LaunchSite {
    #[serde(rename = "CCAFS LC-40")]
    CcafsLc40,
    #[serde(rename = "KSC LC-39A")]
    KscLc39a,
    #[serde(rename = "VAFB SLC-4E")]
    VafbSlc4e,
    #[serde(rename = "CCAFS SLC-40")]
    CcafsSlc40,
}

impl LaunchSite {
    pub const ALL: [LaunchSite; 4] = [
        LaunchSite::CcafsLc40,
        LaunchSite::KscLc39a,
        LaunchSite::VafbSlc4e,
        LaunchSite::CcafsSlc40,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LaunchSite::CcafsLc40 => "CCAFS LC-40",
            LaunchSite::KscLc39a => "KSC LC-39A",
            LaunchSite::VafbSlc4e => "VAFB SLC-4E",
            LaunchSite::CcafsSlc40 => "CCAFS SLC-40",
        }
    }

    /// Exact, case-sensitive lookup. Free text never maps to a site.
    pub fn parse(text: &str) -> Result<Self, DashError> {
        Self::ALL
            .into_iter()
            .find(|site| site.as_str() == text)
            .ok_or_else(|| DashError::UnknownSite(SmolStr::new(text)))
    }

    fn order(self) -> usize {
        Self::ALL
            .iter()
            .position(|site| *site == self)
            .unwrap_or(usize::MAX)
    }
}

impl fmt::Display for LaunchSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary mission outcome (`class` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub const ORDER: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    #[must_use]
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    fn from_class(value: u8) -> Option<Self> {
        match value {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.class())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    pub site: LaunchSite,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<SmolStr>,
    pub booster_category: SmolStr,
}

/// Observed payload mass range of the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl LaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, DashError> {
        let invalid = |message: String| DashError::InvalidRecord {
            row,
            message: message.into(),
        };
        let site = LaunchSite::parse(self.launch_site.trim())
            .map_err(|err| invalid(err.to_string()))?;
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(invalid(format!(
                "payload mass must be a non-negative number, got {}",
                self.payload_mass_kg
            )));
        }
        let outcome = Outcome::from_class(self.class)
            .ok_or_else(|| invalid(format!("class must be 0 or 1, got {}", self.class)))?;
        let booster_category = self.booster_category.trim();
        if booster_category.is_empty() {
            return Err(invalid("empty booster version category".to_string()));
        }
        Ok(LaunchRecord {
            flight_number: self.flight_number,
            site,
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_version: self
                .booster_version
                .map(|text| SmolStr::new(text.trim()))
                .filter(|text| !text.is_empty()),
            booster_category: SmolStr::new(booster_category),
        })
    }
}

/// Immutable in-memory launch table.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    bounds: PayloadBounds,
}

impl LaunchTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| {
            DashError::Dataset(format!("{}: {err}", path.display()).into())
        })?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = table.len(),
            payload_min = table.bounds.min,
            payload_max = table.bounds.max,
            "loaded launch dataset"
        );
        Ok(table)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DashError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|err| DashError::Dataset(format!("header row: {err}").into()))?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DashError::MissingColumn(SmolStr::new(column)));
            }
        }
        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<LaunchRow>().enumerate() {
            let row_number = idx + 1;
            let row = row.map_err(|err| DashError::InvalidRecord {
                row: row_number,
                message: err.to_string().into(),
            })?;
            records.push(row.into_record(row_number)?);
        }
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DashError> {
        let mut iter = records.iter().map(|record| record.payload_mass_kg);
        let first = iter.next().ok_or(DashError::EmptyDataset)?;
        let (min, max) = iter.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        Ok(Self {
            records,
            bounds: PayloadBounds { min, max },
        })
    }

    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn payload_bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Launch count per site, most frequent first. Sites without launches are omitted.
    #[must_use]
    pub fn site_counts(&self) -> Vec<(LaunchSite, usize)> {
        let mut counts = LaunchSite::ALL
            .into_iter()
            .map(|site| {
                let count = self.records.iter().filter(|r| r.site == site).count();
                (site, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect::<Vec<_>>();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.order().cmp(&b.0.order())));
        counts
    }

    /// Launch count per (class, site) pair, most frequent first.
    #[must_use]
    pub fn class_site_counts(&self) -> Vec<(Outcome, LaunchSite, usize)> {
        let mut counts = Vec::new();
        for outcome in Outcome::ORDER {
            for site in LaunchSite::ALL {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.outcome == outcome && r.site == site)
                    .count();
                if count > 0 {
                    counts.push((outcome, site, count));
                }
            }
        }
        counts.sort_by(|a, b| b.2.cmp(&a.2));
        counts
    }
}
