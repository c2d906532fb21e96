use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// 轉換後的唯讀結構。
///
/// 物件變成 [`Record`]，全部元素都是物件的陣列變成 [`RecordList`]，
/// 欄位名稱不可用時退回 [`Mapping`]，其餘原樣保留在 `Value`。
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredNode {
    Record(Record),
    List(RecordList),
    Mapping(Mapping),
    Value(Value),
}

/// 具名欄位的記錄。`label` 只用於顯示，不參與相等比較。
#[derive(Debug, Clone)]
pub struct Record {
    label: String,
    fields: Vec<(String, StructuredNode)>,
}

#[derive(Debug, Clone)]
pub struct RecordList {
    label: String,
    items: Vec<StructuredNode>,
}

/// 欄位名稱衝突或不合法時的退路，保留所有項目 (包含重複名稱)。
///
/// 重複名稱以最後一個為準：`get`、`to_json`、序列化與顯示都只看到最後的值，
/// 其餘項目仍可由 `get_all` 與 `entries` 取得。
#[derive(Debug, Clone)]
pub struct Mapping {
    label: String,
    entries: Vec<(String, StructuredNode)>,
}

impl Record {
    /// Field names must already be unique identifiers; `core::transform` checks this.
    pub(crate) fn new(label: impl Into<String>, fields: Vec<(String, StructuredNode)>) -> Self {
        Self {
            label: label.into(),
            fields,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self, name: &str) -> Option<&StructuredNode> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &StructuredNode)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl RecordList {
    pub(crate) fn new(label: impl Into<String>, items: Vec<StructuredNode>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn get(&self, index: usize) -> Option<&StructuredNode> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StructuredNode> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PartialEq for RecordList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a StructuredNode;
    type IntoIter = std::slice::Iter<'a, StructuredNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Mapping {
    pub(crate) fn new(label: impl Into<String>, entries: Vec<(String, StructuredNode)>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// 回傳最後一個符合的項目
    pub fn get(&self, key: &str) -> Option<&StructuredNode> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a StructuredNode> + 'a {
        self.entries
            .iter()
            .filter(move |(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &StructuredNode)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// One entry per key in first-seen order, holding the last value for that key.
    pub fn resolved(&self) -> Vec<(&str, &StructuredNode)> {
        let mut resolved: Vec<(&str, &StructuredNode)> = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            match resolved.iter_mut().find(|(seen, _)| *seen == name.as_str()) {
                Some(slot) => slot.1 = value,
                None => resolved.push((name.as_str(), value)),
            }
        }
        resolved
    }

    /// Keys that appear more than once, in first-seen order.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (index, (name, _)) in self.entries.iter().enumerate() {
            let seen_before = self.entries[..index].iter().any(|(other, _)| other == name);
            if seen_before && !duplicates.contains(&name.as_str()) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl StructuredNode {
    /// 依欄位名稱取值 (Record 或 Mapping)
    pub fn get(&self, name: &str) -> Option<&StructuredNode> {
        match self {
            StructuredNode::Record(record) => record.get(name),
            StructuredNode::Mapping(mapping) => mapping.get(name),
            _ => None,
        }
    }

    /// 依索引取值 (RecordList)
    pub fn at(&self, index: usize) -> Option<&StructuredNode> {
        match self {
            StructuredNode::List(list) => list.get(index),
            _ => None,
        }
    }

    /// Dotted lookup such as `fc_members.0.name`.
    ///
    /// Numeric segments index into record lists, every other segment is a
    /// field name. Passthrough values are leaves: a path that continues into
    /// one does not resolve.
    pub fn path(&self, dotted: &str) -> Option<&StructuredNode> {
        if dotted.is_empty() {
            return Some(self);
        }

        dotted.split('.').try_fold(self, |node, segment| match node {
            StructuredNode::List(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
            _ => node.get(segment),
        })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            StructuredNode::Record(record) => Some(record.label()),
            StructuredNode::List(list) => Some(list.label()),
            StructuredNode::Mapping(mapping) => Some(mapping.label()),
            StructuredNode::Value(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            StructuredNode::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&RecordList> {
        match self {
            StructuredNode::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            StructuredNode::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            StructuredNode::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, StructuredNode::Record(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, StructuredNode::List(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, StructuredNode::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_value().and_then(Value::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StructuredNode::Value(Value::Null))
    }

    /// 轉回 JSON，使用轉換後的欄位名稱
    pub fn to_json(&self) -> Value {
        match self {
            StructuredNode::Record(record) => Value::Object(
                record
                    .fields()
                    .map(|(name, value)| (name.to_string(), value.to_json()))
                    .collect(),
            ),
            StructuredNode::List(list) => Value::Array(list.iter().map(Self::to_json).collect()),
            StructuredNode::Mapping(mapping) => Value::Object(
                mapping
                    .resolved()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value.to_json()))
                    .collect(),
            ),
            StructuredNode::Value(value) => value.clone(),
        }
    }
}

impl Serialize for StructuredNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StructuredNode::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (name, value) in record.fields() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            StructuredNode::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StructuredNode::Mapping(mapping) => {
                let resolved = mapping.resolved();
                let mut map = serializer.serialize_map(Some(resolved.len()))?;
                for (name, value) in resolved {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            StructuredNode::Value(value) => value.serialize(serializer),
        }
    }
}

impl fmt::Display for StructuredNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuredNode::Record(record) => fmt::Display::fmt(record, f),
            StructuredNode::List(list) => {
                write!(f, "[")?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            StructuredNode::Mapping(mapping) => {
                write!(f, "{{")?;
                for (index, (name, value)) in mapping.resolved().into_iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", name, value)?;
                }
                write!(f, "}}")
            }
            StructuredNode::Value(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.label)?;
        for (index, (name, value)) in self.fields().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(label: &str, name: &str, id: i64) -> StructuredNode {
        StructuredNode::Record(Record::new(
            label,
            vec![
                ("name".to_string(), StructuredNode::Value(json!(name))),
                ("id".to_string(), StructuredNode::Value(json!(id))),
            ],
        ))
    }

    fn company() -> StructuredNode {
        StructuredNode::Record(Record::new(
            "FreeCompany",
            vec![
                ("name".to_string(), StructuredNode::Value(json!("Alpha"))),
                (
                    "fc_members".to_string(),
                    StructuredNode::List(RecordList::new(
                        "FcMembers",
                        vec![member("FcMembers", "A", 1), member("FcMembers", "B", 2)],
                    )),
                ),
            ],
        ))
    }

    #[test]
    fn test_equality_ignores_label() {
        assert_eq!(member("FcMembers", "A", 1), member("Member", "A", 1));
        assert_ne!(member("FcMembers", "A", 1), member("FcMembers", "A", 2));
    }

    #[test]
    fn test_path_lookup() {
        let fc = company();
        assert_eq!(fc.path("name").and_then(StructuredNode::as_str), Some("Alpha"));
        assert_eq!(
            fc.path("fc_members.1.name").and_then(StructuredNode::as_str),
            Some("B")
        );
        assert_eq!(fc.path("fc_members.0.id").and_then(StructuredNode::as_i64), Some(1));
        assert!(fc.path("fc_members.2").is_none());
        assert!(fc.path("fc_members.first").is_none());
        assert!(fc.path("name.length").is_none());
        assert_eq!(fc.path(""), Some(&fc));
    }

    #[test]
    fn test_mapping_keeps_duplicates() {
        let mapping = Mapping::new(
            "Thing",
            vec![
                ("id".to_string(), StructuredNode::Value(json!(1))),
                ("name".to_string(), StructuredNode::Value(json!("x"))),
                ("id".to_string(), StructuredNode::Value(json!(2))),
            ],
        );

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("id").and_then(StructuredNode::as_i64), Some(2));
        let ids: Vec<i64> = mapping.get_all("id").filter_map(StructuredNode::as_i64).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(mapping.duplicate_keys(), vec!["id"]);

        let node = StructuredNode::Mapping(mapping);
        assert_eq!(node.to_string(), r#"{"id": 2, "name": "x"}"#);
    }

    #[test]
    fn test_display_record() {
        assert_eq!(
            company().to_string(),
            r#"FreeCompany(name="Alpha", fc_members=[FcMembers(name="A", id=1), FcMembers(name="B", id=2)])"#
        );
    }

    #[test]
    fn test_serialize_keeps_field_order() {
        let json = serde_json::to_string(&company()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Alpha","fc_members":[{"name":"A","id":1},{"name":"B","id":2}]}"#
        );
        assert_eq!(serde_json::to_value(company()).unwrap(), company().to_json());
    }
}
