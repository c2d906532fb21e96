use fcview::{to_compound_capitalized, to_lower_separated, transform, StructuredNode, ROOT_LABEL};
use serde_json::{json, Value};

/// 接近 XIVAPI `/freecompany/{id}?data=FCM` 的回應
fn xivapi_payload() -> Value {
    json!({
        "FreeCompany": {
            "Active": "Always",
            "ActiveMemberCount": 2,
            "Crest": [
                "https://img2.finalfantasyxiv.com/c/B0_a.png",
                "https://img2.finalfantasyxiv.com/c/F0_b.png"
            ],
            "DC": "Aether",
            "Estate": {"Greeting": "Welcome", "Name": "Alpha House", "Plot": "Plot 7, 3 Ward, Lavender Beds"},
            "Focus": [
                {"Icon": "https://img.finalfantasyxiv.com/f/role.png", "Name": "Role-playing", "Status": false},
                {"Icon": "https://img.finalfantasyxiv.com/f/leveling.png", "Name": "Leveling", "Status": true}
            ],
            "Formed": 1566144427,
            "GrandCompany": "Maelstrom",
            "ID": "9231253336202687179",
            "Name": "Alpha",
            "ParseDate": 1600000000,
            "Rank": 30,
            "Ranking": {"Monthly": 100, "Weekly": 25},
            "Recruitment": "Open",
            "Reputation": [
                {"Name": "Maelstrom", "Progress": 100, "Rank": "Allied"},
                {"Name": "Order of the Twin Adder", "Progress": 20, "Rank": "Neutral"}
            ],
            "Seeking": [],
            "Server": "Gilgamesh",
            "Slogan": "Hello",
            "Tag": "ALPH"
        },
        "FreeCompanyMembers": [
            {"Avatar": "https://img2.finalfantasyxiv.com/a.jpg", "FeastMatches": 0, "ID": 1, "Name": "A", "Rank": "Master", "RankIcon": "r.png", "Server": "Gilgamesh"},
            {"Avatar": "https://img2.finalfantasyxiv.com/b.jpg", "FeastMatches": 3, "ID": 2, "Name": "B", "Rank": "Member", "RankIcon": "r.png", "Server": "Gilgamesh"}
        ],
        "Info": {"FreeCompany": {"State": 2, "Updated": 1600000000}, "FreeCompanyMembers": {"State": 2, "Updated": 1600000000}}
    })
}

/// 結構相同：物件對應 Record，物件陣列對應等長 RecordList，其餘原樣保留
fn assert_same_shape(raw: &Value, node: &StructuredNode) {
    match raw {
        Value::Object(object) => {
            let record = node.as_record().unwrap_or_else(|| panic!("expected record for {}", raw));
            assert_eq!(record.len(), object.len());
            for ((key, value), (field, child)) in object.iter().zip(record.fields()) {
                assert_eq!(field, to_lower_separated(key));
                assert_eq!(child.label().is_some(), value.is_object() || is_record_array(value));
                assert_same_shape(value, child);
            }
        }
        Value::Array(items) if is_record_array(raw) => {
            let list = node.as_list().unwrap_or_else(|| panic!("expected record list for {}", raw));
            assert_eq!(list.len(), items.len());
            for (item, child) in items.iter().zip(list) {
                assert_eq!(child.label(), Some(list.label()));
                assert_same_shape(item, child);
            }
        }
        _ => assert_eq!(node.as_value(), Some(raw)),
    }
}

fn is_record_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_object))
}

#[test]
fn test_xivapi_payload_shape_is_preserved() {
    let raw = xivapi_payload();

    let view = transform(&raw, ROOT_LABEL);

    assert_same_shape(&raw, &view);
}

#[test]
fn test_xivapi_payload_field_access() {
    let view = transform(&xivapi_payload(), ROOT_LABEL);

    assert_eq!(view.label(), Some("FreeCompany"));
    assert_eq!(
        view.path("free_company.active_member_count").and_then(StructuredNode::as_i64),
        Some(2)
    );
    assert_eq!(view.path("free_company.dc").and_then(StructuredNode::as_str), Some("Aether"));
    assert_eq!(
        view.path("free_company.estate.plot").and_then(StructuredNode::as_str),
        Some("Plot 7, 3 Ward, Lavender Beds")
    );
    assert_eq!(view.path("free_company.focus.1.status").and_then(StructuredNode::as_bool), Some(true));
    assert_eq!(
        view.path("free_company_members.0.feast_matches").and_then(StructuredNode::as_i64),
        Some(0)
    );
    assert_eq!(
        view.path("free_company.parse_date").and_then(StructuredNode::as_i64),
        Some(1600000000)
    );
    assert_eq!(
        view.path("free_company.seeking").and_then(StructuredNode::as_value),
        Some(&json!([]))
    );
}

#[test]
fn test_labels_follow_field_names() {
    let view = transform(&xivapi_payload(), ROOT_LABEL);

    assert_eq!(view.path("free_company").and_then(StructuredNode::label), Some("FreeCompany"));
    assert_eq!(view.path("free_company.estate").and_then(StructuredNode::label), Some("Estate"));
    assert_eq!(view.path("free_company.reputation.0").and_then(StructuredNode::label), Some("Reputation"));
    assert_eq!(
        view.path("free_company_members.1").and_then(StructuredNode::label),
        Some("FreeCompanyMembers")
    );
    assert_eq!(
        view.path("info.free_company_members").and_then(StructuredNode::label),
        Some("FreeCompanyMembers")
    );
    // 縮寫會被轉成首字大寫
    assert_eq!(to_compound_capitalized(&to_lower_separated("DC")), "Dc");
}

#[test]
fn test_view_serializes_with_renamed_keys() {
    let view = transform(&xivapi_payload(), ROOT_LABEL);

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["free_company"]["active_member_count"], 2);
    assert_eq!(json["free_company_members"][1]["name"], "B");
    assert!(json["free_company"].get("ActiveMemberCount").is_none());
}

#[test]
fn test_repr_output() {
    let raw = json!({"ID": 123, "Name": "Alpha", "FCMembers": [{"Name": "A", "ID": 1}]});

    let view = transform(&raw, ROOT_LABEL);

    assert_eq!(
        view.to_string(),
        r#"FreeCompany(id=123, name="Alpha", fc_members=[FcMembers(name="A", id=1)])"#
    );
}
