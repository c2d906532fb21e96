use crate::core::naming::{is_field_identifier, to_compound_capitalized, to_lower_separated};
use crate::domain::model::{Mapping, Record, RecordList, StructuredNode};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// 將原始 JSON 轉成唯讀的 [`StructuredNode`]，不會失敗。
///
/// Objects become records labelled by their position (`root_label` at the
/// top, the PascalCase form of the field name below). Arrays made only of
/// objects become record lists. Anything else is passed through unchanged.
pub fn transform(raw: &Value, root_label: &str) -> StructuredNode {
    transform_node(raw, root_label, root_label)
}

fn transform_node(raw: &Value, label: &str, parent_label: &str) -> StructuredNode {
    match raw {
        Value::Object(object) => transform_object(object, label),
        Value::Array(items) if is_record_sequence(items) => {
            // 同一個陣列的元素共用父層的 label
            let records = items
                .iter()
                .map(|item| transform_node(item, parent_label, parent_label))
                .collect();
            StructuredNode::List(RecordList::new(parent_label, records))
        }
        _ => StructuredNode::Value(raw.clone()),
    }
}

fn is_record_sequence(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

fn transform_object(object: &Map<String, Value>, label: &str) -> StructuredNode {
    let fields: Vec<(String, StructuredNode)> = object
        .iter()
        .map(|(key, value)| {
            let field = to_lower_separated(key);
            let child_label = to_compound_capitalized(&field);
            let node = transform_node(value, &child_label, &child_label);
            (field, node)
        })
        .collect();

    if usable_as_fields(&fields) {
        return StructuredNode::Record(Record::new(label, fields));
    }

    tracing::warn!(
        "⚠️ {}: keys {:?} cannot all be used as field names, falling back to a mapping",
        label,
        object.keys().collect::<Vec<_>>()
    );
    StructuredNode::Mapping(Mapping::new(label, fields))
}

fn usable_as_fields(fields: &[(String, StructuredNode)]) -> bool {
    let mut seen = HashSet::with_capacity(fields.len());
    fields
        .iter()
        .all(|(name, _)| is_field_identifier(name) && seen.insert(name.as_str()))
}
