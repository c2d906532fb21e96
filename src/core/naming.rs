use regex::Regex;
use std::sync::LazyLock;

// 一段大寫字母後面接著首字大寫的單字 (FCName -> FC_Name)
static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.)([A-Z][a-z]+)").expect("word boundary pattern is valid")
});

// 小寫或數字後面接著大寫 (memberCount -> member_Count)
static CASE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary pattern is valid")
});

pub const SEPARATOR: char = '_';

/// PascalCase -> snake_case
///
/// `"FCName"` becomes `"fc_name"` and `"ActiveMemberCount"` becomes
/// `"active_member_count"`. Already snake_case input is returned unchanged.
pub fn to_lower_separated(key: &str) -> String {
    let words = WORD_BOUNDARY.replace_all(key, "${1}_${2}");
    CASE_BOUNDARY
        .replace_all(&words, "${1}_${2}")
        .to_lowercase()
}

/// snake_case -> PascalCase
///
/// Lossy for acronyms: `"fc_members"` becomes `"FcMembers"`, not `"FCMembers"`.
pub fn to_compound_capitalized(key: &str) -> String {
    key.split(SEPARATOR).map(title_case).collect()
}

/// 每段連續字母的第一個字母大寫，其餘小寫
fn title_case(word: &str) -> String {
    let mut titled = String::with_capacity(word.len());
    let mut previous_cased = false;

    for c in word.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            titled.push(c);
            previous_cased = false;
        }
    }

    titled
}

/// 可以當作 Record 欄位名稱的字串。
///
/// Must start with a letter and continue with letters, digits or `_`. A
/// leading `_` is reserved for structural names and is rejected.
pub fn is_field_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.all(|c| c.is_alphanumeric() || c == SEPARATOR),
        _ => false,
    }
}
