use serde::Serialize;

/// A single element of a [ChainVec](crate::ChainVec).
///
/// The ancestry of this structure stored elements as an untagged
/// union; here every value carries its discriminant, so reading never
/// depends on the caller remembering which variant was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
  Int(i64),
  Float(f64),
  Text(String),
}

impl Value {
  /// Name of the active variant, as used in driver output and
  /// diagnostics.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::Text(_) => "text",
    }
  }
}

impl std::fmt::Display for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Int(i) => write!(f, "{}", i),
      // The `{:?}` form keeps the trailing `.0` on integral floats, so
      // a float element never prints like an int one
      Value::Float(x) => write!(f, "{:?}", x),
      Value::Text(s) => write!(f, "{}", s),
    }
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Value::Int(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Float(value)
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::Text(value.to_owned())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Value::Text(value)
  }
}
