use serde::{Deserialize, Serialize};
use crate::utils::fountain_constants::{ELEMENT_REGEX, HTML_REGEX, STYLE_REGEX};

/// 强调样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    BoldItalicUnderline,
    BoldItalic,
    BoldUnderline,
    ItalicUnderline,
    Bold,
    Italic,
    Underline,
}

impl TextStyle {
    fn from_key(key: &str) -> Option<TextStyle> {
        match key {
            "bold_italic_underline" => Some(TextStyle::BoldItalicUnderline),
            "bold_italic" => Some(TextStyle::BoldItalic),
            "bold_underline" => Some(TextStyle::BoldUnderline),
            "italic_underline" => Some(TextStyle::ItalicUnderline),
            "bold" => Some(TextStyle::Bold),
            "italic" => Some(TextStyle::Italic),
            "underline" => Some(TextStyle::Underline),
            _ => None,
        }
    }
}

// 识别文本中的强调样式
//
// 先匹配复合样式，匹配到的片段替换成内部文本，避免 *** 又被识别成 ** 和 *。
pub fn text_styles(text: &str) -> Vec<TextStyle> {
    // 处理转义字符
    let mut remaining = text.replace(r"\*", "").replace(r"\_", "");
    let mut styles = Vec::new();

    for (key, re) in STYLE_REGEX.iter() {
        if re.is_match(&remaining) {
            if let Some(style) = TextStyle::from_key(key) {
                styles.push(style);
            }
            remaining = re.replace_all(&remaining, "$2").into_owned();
        }
    }

    styles
}

/// 去除首尾的强调标记 `*` 和 `_`
pub fn strip_emphasis(text: &str) -> &str {
    text.trim().trim_matches(|c: char| c == '*' || c == '_').trim()
}

/// 角色名后的扩展，如 `(V.O.)`、`(CONT'D)`
pub fn character_extensions(name: &str) -> Vec<String> {
    ELEMENT_REGEX["character_extension"]
        .find_iter(name)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

// 去除角色名前的@符号
pub fn trim_character_force_symbol(text: &str) -> &str {
    let trimmed = text.trim_start();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

// 去除角色名后的扩展部分和双对白标记
pub fn trim_character_extension(text: &str) -> String {
    let without_caret = ELEMENT_REGEX["dual_dialogue"].replace(text, "");
    let name = ELEMENT_REGEX["character_extension"].replace_all(&without_caret, "");
    trim_character_force_symbol(&name).trim().to_string()
}

// 生成展示用HTML
pub fn to_html(text: &str) -> String {
    let html = HTML_REGEX["bold"].replace_all(text, "<b>$1</b>");
    let html = HTML_REGEX["italic"].replace_all(&html, "<i>$1</i>");
    let html = HTML_REGEX["underline"].replace_all(&html, "<u>$1</u>");
    html.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_markers_are_reported_once() {
        assert_eq!(text_styles("***loud***"), vec![TextStyle::BoldItalic]);
        assert_eq!(text_styles("_**under bold**_"), vec![TextStyle::BoldUnderline]);
    }

    #[test]
    fn independent_markers_are_all_reported() {
        let styles = text_styles("**bold** then *soft* and _line_");
        assert_eq!(styles, vec![TextStyle::Bold, TextStyle::Italic, TextStyle::Underline]);
    }

    #[test]
    fn escaped_asterisks_are_not_styles() {
        assert!(text_styles(r"5 \* 3 \* 2").is_empty());
        assert!(text_styles("plain text").is_empty());
    }

    #[test]
    fn emphasis_is_stripped_from_both_ends() {
        assert_eq!(strip_emphasis("  **CUT TO:**  "), "CUT TO:");
        assert_eq!(strip_emphasis("_FADE OUT._"), "FADE OUT.");
    }

    #[test]
    fn extensions_are_listed() {
        assert_eq!(character_extensions("BOB (V.O.) (CONT'D)"), vec!["(V.O.)", "(CONT'D)"]);
        assert!(character_extensions("BOB").is_empty());
    }

    #[test]
    fn cue_is_reduced_to_the_name() {
        assert_eq!(trim_character_extension("BOB (V.O.) ^"), "BOB");
        assert_eq!(trim_character_extension("@McCLANE"), "McCLANE");
    }
}
