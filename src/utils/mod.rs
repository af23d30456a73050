pub mod fountain_constants;

pub use fountain_constants::FountainConstants;

/// 检查一行文本是否为空行（仅包含空白字符）
pub fn is_blank_line(text: &str) -> bool {
    text.trim().is_empty()
}

/// 去除首尾的空格和制表符，保留换行
pub fn trim_inline_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_blank() {
        assert!(is_blank_line(""));
        assert!(is_blank_line(" \t "));
        assert!(!is_blank_line(" a "));
    }

    #[test]
    fn inline_trim_keeps_newlines() {
        assert_eq!(trim_inline_whitespace(" \ta\nb \t"), "a\nb");
        assert_eq!(trim_inline_whitespace("\na\n"), "\na\n");
    }
}
