use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A UTM parameter and the columns concatenated to form its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtmParameter {
    pub name: String,
    pub columns: Vec<String>,
}

impl UtmParameter {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parameter mapping in the order the tool file declares it.
///
/// The composed URL lists parameters in this order, so it is kept as a list
/// rather than a hash map. (De)serializes as a plain mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmConfig {
    parameters: Vec<UtmParameter>,
}

impl UtmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing the columns of an existing one with the same name
    pub fn insert(&mut self, parameter: UtmParameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => existing.columns = parameter.columns,
            None => self.parameters.push(parameter),
        }
    }

    pub fn with<I, S>(mut self, name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(UtmParameter::new(name, columns));
        self
    }

    pub fn get(&self, name: &str) -> Option<&UtmParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UtmParameter> {
        self.parameters.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<'a> IntoIterator for &'a UtmConfig {
    type Item = &'a UtmParameter;
    type IntoIter = std::slice::Iter<'a, UtmParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<UtmParameter> for UtmConfig {
    fn from_iter<I: IntoIterator<Item = UtmParameter>>(iter: I) -> Self {
        let mut config = UtmConfig::new();
        for parameter in iter {
            config.insert(parameter);
        }
        config
    }
}

/// Columns may be written as a single string or a list
#[derive(Deserialize)]
#[serde(untagged)]
enum Columns {
    One(String),
    Many(Vec<String>),
}

impl From<Columns> for Vec<String> {
    fn from(columns: Columns) -> Self {
        match columns {
            Columns::One(column) => vec![column],
            Columns::Many(columns) => columns,
        }
    }
}

impl Serialize for UtmConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.parameters.len()))?;
        for parameter in &self.parameters {
            map.serialize_entry(&parameter.name, &parameter.columns)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UtmConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = UtmConfig;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of UTM parameter names to column lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut config = UtmConfig::new();
                while let Some((name, columns)) = access.next_entry::<String, Columns>()? {
                    if config.get(&name).is_some() {
                        return Err(de::Error::custom(format!("duplicate parameter '{}'", name)));
                    }
                    config.insert(UtmParameter::new(name, Vec::<String>::from(columns)));
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}
