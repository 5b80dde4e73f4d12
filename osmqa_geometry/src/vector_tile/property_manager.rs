use crate::geo::{GeoProperties, GeoValue};
use anyhow::{Result, anyhow, ensure};
use std::{collections::HashMap, fmt::Debug, hash::Hash};

/// An append-only list with a reverse index, used for the key and value tables of a layer.
#[derive(Clone, PartialEq)]
pub struct IndexedTable<T>
where
	T: Clone + Eq + Hash,
{
	list: Vec<T>,
	map: HashMap<T, u32>,
}

impl<T> IndexedTable<T>
where
	T: Clone + Debug + Eq + Hash,
{
	pub fn new(list: Vec<T>) -> IndexedTable<T> {
		let map = list.iter().enumerate().map(|(i, e)| (e.clone(), i as u32)).collect();
		IndexedTable { list, map }
	}

	/// Returns the index of `entry`, appending it first if it is new.
	pub fn add(&mut self, entry: T) -> u32 {
		if let Some(index) = self.map.get(&entry) {
			return *index;
		}
		let index = self.list.len() as u32;
		self.map.insert(entry.clone(), index);
		self.list.push(entry);
		index
	}

	pub fn get(&self, id: u32) -> Result<&T> {
		self
			.list
			.get(id as usize)
			.ok_or_else(|| anyhow!("index {id} is out of range ({} entries)", self.list.len()))
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.list.iter()
	}

	pub fn len(&self) -> usize {
		self.list.len()
	}

	pub fn is_empty(&self) -> bool {
		self.list.is_empty()
	}
}

impl<T: Clone + Debug + Eq + Hash> Default for IndexedTable<T> {
	fn default() -> IndexedTable<T> {
		IndexedTable::new(Vec::new())
	}
}

impl<T: Clone + Debug + Eq + Hash> Debug for IndexedTable<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.list).finish()
	}
}

/// Key and value tables of a layer. Features reference them through alternating key/value
/// indices (`tag_ids`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyManager {
	pub keys: IndexedTable<String>,
	pub values: IndexedTable<GeoValue>,
}

impl PropertyManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds tables containing exactly the keys and values used by `properties`.
	///
	/// Entries are ranked by how often they occur, most frequent first, so the common tags get
	/// the shortest varints. Ties are broken by the natural order of the entries.
	pub fn from_properties<'a, I>(properties: I) -> Self
	where
		I: IntoIterator<Item = &'a GeoProperties>,
	{
		let mut key_counts: HashMap<&String, u32> = HashMap::new();
		let mut value_counts: HashMap<&GeoValue, u32> = HashMap::new();
		for properties in properties {
			for (k, v) in properties {
				*key_counts.entry(k).or_default() += 1;
				*value_counts.entry(v).or_default() += 1;
			}
		}

		fn rank<T: Clone + Debug + Eq + Hash + Ord>(counts: HashMap<&T, u32>) -> IndexedTable<T> {
			let mut entries: Vec<(&T, u32)> = counts.into_iter().collect();
			entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
			IndexedTable::new(entries.into_iter().map(|(entry, _)| entry.clone()).collect())
		}

		Self {
			keys: rank(key_counts),
			values: rank(value_counts),
		}
	}

	pub fn add_key(&mut self, key: String) -> u32 {
		self.keys.add(key)
	}

	pub fn add_value(&mut self, value: GeoValue) -> u32 {
		self.values.add(value)
	}

	pub fn encode_tag_ids(&mut self, properties: GeoProperties) -> Vec<u32> {
		let mut tag_ids = Vec::with_capacity(properties.len() * 2);
		for (key, value) in properties {
			tag_ids.push(self.keys.add(key));
			tag_ids.push(self.values.add(value));
		}
		tag_ids
	}

	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties> {
		ensure!(tag_ids.len().is_multiple_of(2), "Tag ids must come in pairs, got {}", tag_ids.len());
		tag_ids
			.chunks_exact(2)
			.map(|pair| Ok((self.keys.get(pair[0])?.clone(), self.values.get(pair[1])?.clone())))
			.collect()
	}
}
