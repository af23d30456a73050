use crate::models::TitlePage;
use crate::utils::fountain_constants::TITLE_PAGE_REGEX;
use crate::utils::{is_blank_line, FountainConstants};

/// 标题页与正文的拆分结果
#[derive(Debug, Clone, PartialEq)]
pub struct TitleSplit<'a> {
    /// 标题块（不含分隔空行），没有标题页时为 None
    pub title_block: Option<String>,
    /// 正文，从标题块后的空行开始
    pub body: &'a str,
    /// 正文第一行在原文中的行号
    pub body_line_offset: usize,
}

// 标题页中的一行
#[derive(Debug, Clone, PartialEq)]
enum DirectiveLine<'a> {
    Inline { key: &'a str, value: &'a str },
    Opener { key: &'a str },
    Continuation(&'a str),
    Other,
}

// 多行指令的收集状态
#[derive(Debug)]
enum DirectiveState {
    Idle,
    Collecting { key: String, values: Vec<String> },
}

fn classify_line(line: &str) -> DirectiveLine<'_> {
    if let Some(caps) = TITLE_PAGE_REGEX["inline_directive"].captures(line) {
        if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
            return DirectiveLine::Inline { key: key.as_str(), value: value.as_str() };
        }
    }
    if let Some(caps) = TITLE_PAGE_REGEX["directive_opener"].captures(line) {
        if let Some(key) = caps.get(1) {
            return DirectiveLine::Opener { key: key.as_str() };
        }
    }
    match continuation_text(line) {
        Some(text) => DirectiveLine::Continuation(text),
        None => DirectiveLine::Other,
    }
}

// 续行：一个制表符或 2–8 个空格缩进，且内容非空
fn continuation_text(line: &str) -> Option<&str> {
    let rest = match line.strip_prefix('\t') {
        Some(rest) => rest,
        None => {
            let indent = line.len() - line.trim_start_matches(' ').len();
            if indent < FountainConstants::CONTINUATION_MIN_INDENT || indent > FountainConstants::CONTINUATION_MAX_INDENT {
                return None;
            }
            &line[indent..]
        }
    };
    let text = rest.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// 把标题块与正文分开
///
/// 跳过开头的空行后，标题块延续到第一个空行或文末。
/// 首行是行内指令，或者是多行指令开头且下一行为续行时，才算标题页。
pub fn split_title_page(text: &str) -> TitleSplit<'_> {
    let no_title = TitleSplit { title_block: None, body: text, body_line_offset: 0 };

    let lines: Vec<&str> = text.split('\n').collect();
    let start = match lines.iter().position(|l| !is_blank_line(l)) {
        Some(start) => start,
        None => return no_title,
    };
    let end = lines[start..]
        .iter()
        .position(|l| is_blank_line(l))
        .map(|p| start + p)
        .unwrap_or(lines.len());
    let block = &lines[start..end];

    let is_title = match classify_line(block[0]) {
        DirectiveLine::Inline { .. } => true,
        DirectiveLine::Opener { .. } => block
            .get(1)
            .map_or(false, |next| matches!(classify_line(next), DirectiveLine::Continuation(_))),
        _ => false,
    };
    if !is_title {
        return no_title;
    }

    // 正文从分隔空行开始，行号与原文保持一致
    let body_start: usize = lines[..end].iter().map(|l| l.len() + 1).sum();
    let body = text.get(body_start.min(text.len())..).unwrap_or("");

    TitleSplit {
        title_block: Some(block.join("\n")),
        body,
        body_line_offset: end,
    }
}

/// 标题页解析器
pub struct TitlePageParser;

impl TitlePageParser {
    /// 解析标题块，没有任何指令时返回空标题页
    pub fn parse(block: &str) -> TitlePage {
        let mut page = TitlePage::new();
        let mut state = DirectiveState::Idle;

        for line in block.split('\n') {
            state = match (classify_line(line), state) {
                (DirectiveLine::Inline { key, value }, previous) => {
                    Self::flush(&mut page, previous);
                    page.insert(key, vec![value.to_string()]);
                    DirectiveState::Idle
                }
                (DirectiveLine::Opener { key }, previous) => {
                    Self::flush(&mut page, previous);
                    DirectiveState::Collecting { key: key.to_string(), values: Vec::new() }
                }
                (DirectiveLine::Continuation(text), DirectiveState::Collecting { key, mut values }) => {
                    values.push(text.to_string());
                    DirectiveState::Collecting { key, values }
                }
                // 不在收集状态的续行和其它行都忽略
                (_, state) => state,
            };
        }
        Self::flush(&mut page, state);

        page
    }

    fn flush(page: &mut TitlePage, state: DirectiveState) {
        if let DirectiveState::Collecting { key, values } = state {
            if !values.is_empty() {
                page.insert(&key, values);
            }
        }
    }
}

/// 解析文本开头的标题页
pub fn parse_title_page(text: &str) -> TitlePage {
    split_title_page(text)
        .title_block
        .map(|block| TitlePageParser::parse(&block))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_directives() {
        let page = TitlePageParser::parse("Title: My Play\nAuthor: J. Doe");
        assert_eq!(page.get("title"), Some(&["My Play".to_string()][..]));
        assert_eq!(page.get("authors"), Some(&["J. Doe".to_string()][..]));
    }

    #[test]
    fn multi_line_directive_collects_continuations() {
        let page = TitlePageParser::parse("Contact:\n    Jane Doe\n\t555-0100\nTitle: After");
        assert_eq!(page.get("contact").map(|v| v.len()), Some(2));
        assert_eq!(page.value("contact").as_deref(), Some("Jane Doe\n555-0100"));
        assert_eq!(page.value("title").as_deref(), Some("After"));
    }

    #[test]
    fn opener_without_values_is_not_recorded() {
        let page = TitlePageParser::parse("Notes:\nTitle: Only");
        assert!(!page.contains_key("notes"));
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn deep_indent_is_not_a_continuation() {
        assert_eq!(continuation_text("  two"), Some("two"));
        assert_eq!(continuation_text("          ten"), None);
        assert_eq!(continuation_text(" one"), None);
        assert_eq!(continuation_text("\t"), None);
    }

    #[test]
    fn indented_key_is_not_a_directive() {
        assert!(matches!(classify_line("  Title: x"), DirectiveLine::Continuation(_)));
        assert!(matches!(classify_line("INT. HOUSE - DAY"), DirectiveLine::Other));
    }

    #[test]
    fn split_keeps_body_line_numbers() {
        let split = split_title_page("Title: X\nCredit: by\n\nINT. HOUSE\n");
        assert_eq!(split.title_block.as_deref(), Some("Title: X\nCredit: by"));
        assert_eq!(split.body, "\nINT. HOUSE\n");
        assert_eq!(split.body_line_offset, 2);
    }

    #[test]
    fn split_skips_leading_blank_lines() {
        let split = split_title_page("\n\nTitle: X\n\nBody");
        assert_eq!(split.title_block.as_deref(), Some("Title: X"));
        assert_eq!(split.body_line_offset, 3);
        assert_eq!(split.body, "\nBody");
    }

    #[test]
    fn text_without_title_page_is_all_body() {
        let split = split_title_page("INT. HOUSE - DAY\n\nBOB\nHi.");
        assert!(split.title_block.is_none());
        assert_eq!(split.body_line_offset, 0);
        assert!(parse_title_page("").is_empty());
    }

    #[test]
    fn title_block_at_end_of_input() {
        let split = split_title_page("Title: Alone");
        assert_eq!(split.title_block.as_deref(), Some("Title: Alone"));
        assert_eq!(split.body, "");
    }
}
