//! Cell values resolved from records

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::fmt;

/// A value extracted from a record through a column accessor
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text used for substring search; `None` when the value is absent
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::DateTime(_) => 4,
            Self::List(_) => 5,
        }
    }

    /// Natural ordering between two present values.
    ///
    /// Text compares case-insensitively, numbers compare numerically across
    /// integer and float, and values of different kinds order by kind.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => compare_text(a, b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.compare(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().flat_map(char::to_lowercase);
    let mut right = b.chars().flat_map(char::to_lowercase);
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Into::into).collect()),
            serde_json::Value::Object(_) => Self::Text(json.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn text_compares_case_insensitively() {
        let ann = Value::from("ann");
        let bob = Value::from("Bob");
        assert_eq!(ann.compare(&bob), Ordering::Less);
        assert_eq!(bob.compare(&ann), Ordering::Greater);
        assert_eq!(Value::from("ANN").compare(&ann), Ordering::Equal);
    }

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(10.0).compare(&Value::Int(9)), Ordering::Greater);
        assert_eq!(Value::Int(3).compare(&Value::Float(3.0)), Ordering::Equal);
    }

    #[test]
    fn dates_compare_chronologically() {
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .map(Value::from)
            .unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Value::from)
            .unwrap();
        assert_eq!(earlier.compare(&later), Ordering::Less);
        assert_eq!(earlier.to_string(), "2024-01-05 08:00:00");
    }

    #[test]
    fn mixed_kinds_order_by_kind() {
        assert_eq!(Value::Bool(true).compare(&Value::Int(0)), Ordering::Less);
        assert_eq!(Value::Int(1_000).compare(&Value::from("a")), Ordering::Less);
    }

    #[test]
    fn search_text_joins_lists_like_plain_strings() {
        let roles = Value::from(vec!["ADMIN", "MANAGER"]);
        assert_eq!(roles.search_text().as_deref(), Some("ADMIN,MANAGER"));
        assert_eq!(Value::Bool(false).search_text().as_deref(), Some("false"));
        assert_eq!(Value::Null.search_text(), None);
    }

    #[test]
    fn json_conversion() {
        let json = serde_json::json!({"n": 4, "f": 1.5, "s": "x", "l": [1, "a"], "z": null});
        assert_eq!(Value::from(&json["n"]), Value::Int(4));
        assert_eq!(Value::from(&json["f"]), Value::Float(1.5));
        assert_eq!(Value::from(&json["s"]), Value::from("x"));
        assert_eq!(
            Value::from(&json["l"]),
            Value::List(vec![Value::Int(1), Value::from("a")])
        );
        assert!(Value::from(&json["z"]).is_null());
    }
}
