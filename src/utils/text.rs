use regex::Regex;
use std::sync::OnceLock;

fn control_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{Cc}+").expect("static regex"))
}

fn format_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{Cf}--[\x{200C}\x{200D}]]+").expect("static regex"))
}

/// 壓縮空白並截斷到 `max_words` 個字，作為搜尋查詢字串。
/// 保留所有文字（含非拉丁文字），只去掉控制字元與格式字元；
/// 印度系文字需要的 ZWJ/ZWNJ 保留。
pub fn shorten_query(text: &str, max_words: usize) -> String {
    let without_format = format_re().replace_all(text, "");
    let without_control = control_re().replace_all(&without_format, " ");
    without_control
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 依字元數截斷（不會切在 UTF-8 字元中間）
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
