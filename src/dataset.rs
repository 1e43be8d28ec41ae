//! Country dataset records and their JSON persistence.
//!
//! Primary records are kept as the raw JSON object they were read from so that
//! fields this tool does not understand survive the rewrite untouched, in their
//! original key order. Reference records are decoded into a narrow typed view
//! since only the name, code, and population are ever consulted.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned},
};
use serde_json::{Map, Number, Value};

use crate::error::LoadError;

const NAME_FIELD: &str = "name";
const COMMON_FIELD: &str = "common";
const CODE_FIELD: &str = "cca3";
const POPULATION_FIELD: &str = "population";

/// An entry of the primary dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryRecord(Map<String, Value>);

impl CountryRecord {
    pub fn new(common_name: &str, cca3: &str, population: u64) -> Self {
        let mut fields = Map::new();
        let mut name = Map::new();
        name.insert(COMMON_FIELD.to_string(), Value::from(common_name));
        fields.insert(NAME_FIELD.to_string(), Value::Object(name));
        fields.insert(CODE_FIELD.to_string(), Value::from(cca3));
        fields.insert(POPULATION_FIELD.to_string(), Value::from(population));
        CountryRecord(fields)
    }

    pub fn common_name(&self) -> Option<&str> {
        self.0
            .get(NAME_FIELD)
            .and_then(|name| name.get(COMMON_FIELD))
            .and_then(Value::as_str)
    }

    /// Common name for notices; `<unnamed>` when the record has none.
    pub fn display_name(&self) -> &str {
        self.common_name().unwrap_or("<unnamed>")
    }

    pub fn cca3(&self) -> Option<&str> {
        self.0.get(CODE_FIELD).and_then(Value::as_str)
    }

    pub fn population(&self) -> Option<u64> {
        self.0.get(POPULATION_FIELD).and_then(Value::as_u64)
    }

    /// True only when a `population` field is present and numerically zero.
    pub fn has_zero_population(&self) -> bool {
        matches!(
            self.0.get(POPULATION_FIELD),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0)
        )
    }

    pub fn set_population(&mut self, population: u64) {
        self.0
            .insert(POPULATION_FIELD.to_string(), Value::from(population));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
}

/// An entry of the reference snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: CountryName,
    pub cca3: String,
    #[serde(default, deserialize_with = "whole_population")]
    pub population: Option<u64>,
}

/// Accepts any whole, non-negative JSON number, so `39000` and `39000.0` agree.
fn whole_population<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|value| {
                    value.fract() == 0.0 && *value >= 0.0 && *value < u64::MAX as f64
                })
                .map(|value| value as u64)
        })
        .map(Some)
        .ok_or_else(|| {
            de::Error::custom(format!(
                "population {number} is not a whole non-negative number"
            ))
        })
}

impl ReferenceRecord {
    pub fn new(common_name: &str, cca3: &str, population: u64) -> Self {
        ReferenceRecord {
            name: CountryName {
                common: common_name.to_string(),
            },
            cca3: cca3.to_string(),
            population: Some(population),
        }
    }
}

pub fn load_primary(path: &Path) -> Result<Vec<CountryRecord>, LoadError> {
    load_json(path)
}

pub fn load_reference(path: &Path) -> Result<Vec<ReferenceRecord>, LoadError> {
    load_json(path)
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes records as 2-space indented UTF-8 JSON. Non-ASCII text is emitted as-is.
pub fn save_records(path: &Path, records: &[CountryRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Creating dataset file {path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("Writing dataset JSON to {path:?}"))?;
    writer
        .flush()
        .with_context(|| format!("Flushing dataset file {path:?}"))
}
