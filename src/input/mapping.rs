//! Ordered, duplicate-free mapping of configuration keys to values.

use std::{collections::HashMap, fmt};

use serde::{
    de::{Error as DeError, MapAccess, Visitor},
    Deserialize, Deserializer,
};

use crate::{Error, Result};

/// The ordered string to string mapping consumed by both encoders.
///
/// Insertion order is preserved and significant: it fixes the record order of the blob
/// encoding and the row order of the `ModuleRef` table. Keys are unique; a second insert of
/// the same key is rejected rather than overwriting the first value.
///
/// # Examples
///
/// ```rust
/// use configmeta::ConfigMapping;
///
/// let mut mapping = ConfigMapping::new();
/// mapping.insert("System.GC.Server", "true")?;
/// mapping.insert("System.Globalization.Invariant", "false")?;
///
/// assert_eq!(mapping.len(), 2);
/// assert_eq!(mapping.get("System.GC.Server"), Some("true"));
/// assert!(mapping.insert("System.GC.Server", "false").is_err());
/// # Ok::<(), configmeta::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ConfigMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair at the end of the mapping.
    ///
    /// # Arguments
    /// * `key` - The property name, must not be present yet
    /// * `value` - The property value
    ///
    /// # Errors
    /// Returns [`crate::Error::DuplicateKey`] if `key` is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value.into()));
        Ok(())
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Number of key/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Builds a mapping from pairs, rejecting duplicate keys.
    ///
    /// # Errors
    /// Returns [`crate::Error::DuplicateKey`] for the first key that occurs twice.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut mapping = Self::new();
        for (key, value) in pairs {
            mapping.insert(key, value)?;
        }
        Ok(mapping)
    }
}

impl<'a> IntoIterator for &'a ConfigMapping {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn ExactSizeIterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl TryFrom<Vec<(String, String)>> for ConfigMapping {
    type Error = Error;

    fn try_from(pairs: Vec<(String, String)>) -> Result<Self> {
        Self::from_pairs(pairs)
    }
}

struct ConfigMappingVisitor;

impl<'de> Visitor<'de> for ConfigMappingVisitor {
    type Value = ConfigMapping;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of string properties")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = ConfigMapping::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            mapping
                .insert(key, value)
                .map_err(|error| A::Error::custom(error.to_string()))?;
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for ConfigMapping {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ConfigMappingVisitor)
    }
}
