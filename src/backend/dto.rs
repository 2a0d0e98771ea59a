use super::model::{Event, Startup};
use crate::map::model::LatLng;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

// Note: the backend stores documents as-is, so most string fields may be missing or null
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    #[serde(default, rename = "_id", deserialize_with = "deserialize_opt_str")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub name: String,
    #[serde(default, rename = "initialDate", deserialize_with = "deserialize_str")]
    pub initial_date: String,
    #[serde(default, rename = "finalDate", deserialize_with = "deserialize_str")]
    pub final_date: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub website: String,
    #[serde(default, deserialize_with = "deserialize_location_point")]
    pub location_point: Option<LocationPointResponse>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub theme: Option<String>,
}

impl EventResponse {
    pub fn to_model(&self) -> Event {
        Event {
            id: self.object_id.clone().or_else(|| self.id.clone()),
            name: self.name.to_string(),
            initial_date: self.initial_date.to_string(),
            final_date: self.final_date.to_string(),
            location: self.location.to_string(),
            website: self.website.to_string(),
            position: self
                .location_point
                .as_ref()
                .and_then(LocationPointResponse::position),
            description: self.description.clone(),
            theme: self.theme.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationPointResponse {
    #[serde(default)]
    pub coordinates: Value,
}

impl LocationPointResponse {
    /// Only a two element array of finite numbers is a usable `[lng, lat]` pair
    pub fn position(&self) -> Option<LatLng> {
        match self.coordinates.as_array()?.as_slice() {
            [lng, lat] => {
                let lng = lng.as_f64().filter(|n| n.is_finite())?;
                let lat = lat.as_f64().filter(|n| n.is_finite())?;

                Some(LatLng::from_geojson([lng, lat]))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StartupResponse {
    #[serde(default, deserialize_with = "deserialize_str")]
    pub company: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub sector: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub website: String,
}

impl StartupResponse {
    pub fn to_model(&self) -> Startup {
        Startup {
            company: self.company.to_string(),
            description: self.description.to_string(),
            sector: self.sector.to_string(),
            website: self.website.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "deserialize_opt_str")]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|err| {
            warn!("Error body is not the expected JSON. Err: {err}");
            Self::default()
        })
    }
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s.parse().map_err(de::Error::custom)?,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_location_point<'de, D>(d: D) -> Result<Option<LocationPointResponse>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Object(point) => LocationPointResponse::deserialize(Value::Object(point)).ok(),
        Value::Null => None,
        unknown => {
            warn!("Ignoring location point that is not an object: {}", unknown);
            None
        }
    })
}

fn deserialize_opt_str<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
