//! Text normalization helpers shared by profiles and their records

/// True when the value is absent, empty, or whitespace only
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Keep a value only when it carries something other than whitespace
pub fn non_blank(value: Option<&str>) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        value.map(str::to_string)
    }
}

/// Empty string for blank values, the value verbatim otherwise
pub fn empty_if_blank(value: Option<&str>) -> String {
    if is_blank(value) {
        String::new()
    } else {
        value.unwrap_or_default().to_string()
    }
}
