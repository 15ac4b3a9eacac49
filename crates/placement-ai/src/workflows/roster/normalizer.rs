pub(crate) fn normalize_cell(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a `;`-separated cell, dropping blanks.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(normalize_cell)
        .filter(|item| !item.is_empty())
        .collect()
}
