/// Clean one raw heading into lowercase words.
///
/// ASCII punctuation is removed outright (so `don't` becomes `dont`),
/// non-breaking spaces count as ordinary whitespace, and the result is split
/// on whitespace. A heading made only of punctuation yields no words.
pub fn normalize_heading(raw: &str) -> Vec<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().map(str::to_string).collect()
}
