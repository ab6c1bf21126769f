// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Listing identifier as the backend sends it: either an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyId {
    Int(i64),
    Text(String),
}

impl PropertyId {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<i64> for PropertyId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomBand {
    Fast,
    Average,
    Slow,
}

impl DomBand {
    pub const ALL: [Self; 3] = [Self::Fast, Self::Average, Self::Slow];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Average => "Average",
            Self::Slow => "Slow",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Fast" => Some(Self::Fast),
            "Average" => Some(Self::Average),
            "Slow" => Some(Self::Slow),
            _ => None,
        }
    }
}

/// One listing as served by `/api/properties`.
///
/// Fields the dashboard does not know about are kept in `extra` so the record
/// can be posted back to the coach endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    #[serde(default)]
    pub address: String,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub bedrooms: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub bathrooms: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub car_spaces: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub listed_price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub weekly_rent_estimate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub gross_yield_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub days_on_market: Option<u32>,
    #[serde(default)]
    pub dom_risk_band: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertyRecord {
    pub fn new(id: impl Into<PropertyId>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            bedrooms: None,
            bathrooms: None,
            car_spaces: None,
            listed_price: None,
            weekly_rent_estimate: None,
            suburb: None,
            state: None,
            gross_yield_pct: None,
            days_on_market: None,
            dom_risk_band: None,
            extra: Map::new(),
        }
    }

    pub fn band(&self) -> Option<DomBand> {
        self.dom_risk_band.as_deref().and_then(DomBand::parse)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomMix {
    #[serde(rename = "Fast")]
    pub fast: u64,
    #[serde(rename = "Average")]
    pub average: u64,
    #[serde(rename = "Slow")]
    pub slow: u64,
}

impl DomMix {
    pub fn increment(&mut self, band: DomBand) {
        match band {
            DomBand::Fast => self.fast += 1,
            DomBand::Average => self.average += 1,
            DomBand::Slow => self.slow += 1,
        }
    }

    pub const fn total(&self) -> u64 {
        self.fast + self.average + self.slow
    }
}

/// Aggregate served by `/api/insights/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: u64,
    #[serde(default)]
    pub yield_avg: Option<f64>,
    #[serde(default)]
    pub yield_p25: Option<f64>,
    #[serde(default)]
    pub yield_p75: Option<f64>,
    pub dom_mix: DomMix,
}

fn lenient_percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(numeric_value))
}

/// Non-negative amounts; anything else reads as missing.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(numeric_value)
        .filter(|amount| *amount >= 0.0))
}

/// Whole non-negative counts, accepting `2`, `2.0` and `"2"`. Fractional,
/// negative, or non-numeric values read as missing rather than failing the
/// whole listing.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(numeric_value)
        .filter(|count| count.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(count))
        .map(|count| count as u32))
}

fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|value| value.is_finite())
}
