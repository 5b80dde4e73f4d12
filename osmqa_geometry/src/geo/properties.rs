use super::GeoValue;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// Attribute map of a feature, ordered by key.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties {
	properties: BTreeMap<String, GeoValue>,
}

impl GeoProperties {
	pub fn new() -> GeoProperties {
		GeoProperties::default()
	}

	pub fn insert(&mut self, key: String, value: GeoValue) {
		self.properties.insert(key, value);
	}

	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.properties.get(key)
	}

	pub fn len(&self) -> usize {
		self.properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.properties.iter()
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = btree_map::IntoIter<String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl<'a> IntoIterator for &'a GeoProperties {
	type Item = (&'a String, &'a GeoValue);
	type IntoIter = btree_map::Iter<'a, String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.iter()
	}
}

impl<V> From<Vec<(&str, V)>> for GeoProperties
where
	GeoValue: From<V>,
{
	fn from(value: Vec<(&str, V)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), GeoValue::from(v))).collect()
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		GeoProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}
