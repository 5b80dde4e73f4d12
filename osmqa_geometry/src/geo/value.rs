use std::{
	cmp::Ordering,
	fmt::{Debug, Display},
	hash::Hash,
};

/// A typed attribute value, mirroring the value kinds a vector tile can carry.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	String(String),
	Float(f32),
	Double(f64),
	Int(i64),
	UInt(u64),
	Bool(bool),
}

impl GeoValue {
	fn rank(&self) -> u8 {
		match self {
			GeoValue::String(_) => 0,
			GeoValue::Float(_) => 1,
			GeoValue::Double(_) => 2,
			GeoValue::Int(_) => 3,
			GeoValue::UInt(_) => 4,
			GeoValue::Bool(_) => 5,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			GeoValue::String(s) => Some(s),
			_ => None,
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::String(v) => f.debug_tuple("String").field(v).finish(),
			GeoValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
			GeoValue::Double(v) => f.debug_tuple("Double").field(v).finish(),
			GeoValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
			GeoValue::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			GeoValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
		}
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::String(v) => f.write_str(v),
			GeoValue::Float(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Int(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
			GeoValue::Bool(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<&String> for GeoValue {
	fn from(value: &String) -> Self {
		GeoValue::String(value.clone())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

/// Non-negative integers become `UInt`, negative ones `Int`.
impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		GeoValue::from(i64::from(value))
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		match u64::try_from(value) {
			Ok(v) => GeoValue::UInt(v),
			Err(_) => GeoValue::Int(value),
		}
	}
}

impl From<u32> for GeoValue {
	fn from(value: u32) -> Self {
		GeoValue::UInt(u64::from(value))
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<f32> for GeoValue {
	fn from(value: f32) -> Self {
		GeoValue::Float(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl Eq for GeoValue {}

impl Hash for GeoValue {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.rank().hash(state);
		match self {
			GeoValue::String(v) => v.hash(state),
			GeoValue::Float(v) => v.to_bits().hash(state),
			GeoValue::Double(v) => v.to_bits().hash(state),
			GeoValue::Int(v) => v.hash(state),
			GeoValue::UInt(v) => v.hash(state),
			GeoValue::Bool(v) => v.hash(state),
		}
	}
}

impl PartialOrd for GeoValue {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Values of the same kind compare by content, different kinds by kind: strings, floats,
/// doubles, signed, unsigned, booleans.
impl Ord for GeoValue {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(GeoValue::String(a), GeoValue::String(b)) => a.cmp(b),
			(GeoValue::Float(a), GeoValue::Float(b)) => a.total_cmp(b),
			(GeoValue::Double(a), GeoValue::Double(b)) => a.total_cmp(b),
			(GeoValue::Int(a), GeoValue::Int(b)) => a.cmp(b),
			(GeoValue::UInt(a), GeoValue::UInt(b)) => a.cmp(b),
			(GeoValue::Bool(a), GeoValue::Bool(b)) => a.cmp(b),
			_ => self.rank().cmp(&other.rank()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(GeoValue::from(7), GeoValue::UInt(7))]
	#[case(GeoValue::from(-7), GeoValue::Int(-7))]
	#[case(GeoValue::from(-7i64), GeoValue::Int(-7))]
	#[case(GeoValue::from(7u32), GeoValue::UInt(7))]
	#[case(GeoValue::from("way"), GeoValue::String(String::from("way")))]
	fn conversions(#[case] value: GeoValue, #[case] expected: GeoValue) {
		assert_eq!(value, expected);
	}

	#[test]
	fn ordering_within_kind() {
		assert!(GeoValue::from("a") < GeoValue::from("b"));
		assert!(GeoValue::from(1.0f32) < GeoValue::from(2.0f32));
		assert!(GeoValue::from(-2) < GeoValue::from(-1));
		assert!(GeoValue::from(false) < GeoValue::from(true));
	}

	#[test]
	fn ordering_across_kinds() {
		assert!(GeoValue::from("z") < GeoValue::from(0.0f32));
		assert!(GeoValue::from(9.0f32) < GeoValue::from(0.0f64));
		assert!(GeoValue::from(-1) < GeoValue::from(0u64));
		assert!(GeoValue::from(100u64) < GeoValue::from(false));
	}

	#[test]
	fn display() {
		assert_eq!(GeoValue::from("node").to_string(), "node");
		assert_eq!(GeoValue::from(12u64).to_string(), "12");
		assert_eq!(GeoValue::from(true).to_string(), "true");
		assert_eq!(GeoValue::from(0.5).to_string(), "0.5");
	}

	#[test]
	fn as_str() {
		assert_eq!(GeoValue::from("osm").as_str(), Some("osm"));
		assert_eq!(GeoValue::from(1).as_str(), None);
	}
}
