use std::collections::BTreeMap;

/// A single column value of a metadata record.
///
/// Portal records are flat: every column holds a scalar. Most columns are
/// free text, a few (spot and base counts, read length) are numeric.
///
/// # Examples
///
/// ```
/// use riboquery::Value;
///
/// assert_eq!(Value::Integer(42).as_text().as_deref(), Some("42"));
/// assert_eq!(Value::String("HeLa".into()).as_text().as_deref(), Some("HeLa"));
/// assert_eq!(Value::Null.as_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or empty column
    Null,

    /// Boolean flag
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number
    Integer(i64),

    /// UTF-8 string
    String(String),
}

impl Value {
    /// Textual form used for substring matching. `Null` has none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Boolean(b) => Some(b.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Integer(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// One Study or Sample row: column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use riboquery::Record;
    ///
    /// let record = Record::new().with("Run", "SRR000001").with("spots", 1200_i64);
    /// assert_eq!(record.text("spots").as_deref(), Some("1200"));
    /// ```
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).and_then(Value::as_text)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}
