use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Decoded body of WeatherAPI.com `current.json`.
///
/// Every nested object and leaf is optional so a partial response still
/// decodes. A value of the wrong type decodes as absent without affecting
/// its siblings. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawWeather {
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<RawLocation>,
    #[serde(default, deserialize_with = "lenient")]
    pub current: Option<RawCurrent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLocation {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCurrent {
    #[serde(default, deserialize_with = "lenient")]
    pub temp_c: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_kph: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub condition: Option<RawCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCondition {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl RawWeather {
    /// True when the body carried neither `location` nor `current`.
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.current.is_none()
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref()?.name.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.location.as_ref()?.region.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.location.as_ref()?.country.as_deref()
    }

    pub fn temp_c(&self) -> Option<f64> {
        self.current.as_ref()?.temp_c
    }

    pub fn condition_text(&self) -> Option<&str> {
        self.current.as_ref()?.condition.as_ref()?.text.as_deref()
    }

    pub fn humidity(&self) -> Option<i64> {
        self.current.as_ref()?.humidity
    }

    pub fn wind_kph(&self) -> Option<f64> {
        self.current.as_ref()?.wind_kph
    }
}

/// Keeps a field only if it converts to `T`; anything else becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Flat record written to object storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub temperature: Option<f64>,
    pub condition: Option<String>,
    pub humidity: Option<i64>,
    pub wind_kph: Option<f64>,
    /// Capture time, RFC 3339.
    pub timestamp: String,
}
