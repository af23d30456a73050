use std::collections::HashMap;
use lazy_static::lazy_static;
use regex::Regex;

pub struct FountainConstants;

impl FountainConstants {
    /// 动作行占位角色名
    pub const ACTION_NAME: &'static str = "ACTION";

    /// 不以 `TO:` 结尾的固定转场
    pub const FIXED_TRANSITIONS: [&'static str; 3] = ["FADE TO BLACK.", "FADE OUT.", "CUT TO BLACK."];

    /// 场景标题前缀，长的在前面
    pub const SCENE_HEADING_PREFIXES: [&'static str; 6] = ["I./E.", "I./E", "I/E.", "I/E", "INT", "EXT"];

    /// 标题页多行内容的缩进范围（空格数）
    pub const CONTINUATION_MIN_INDENT: usize = 2;
    pub const CONTINUATION_MAX_INDENT: usize = 8;

    /// 分页符重复字符数范围
    pub const PAGE_BREAK_MIN: usize = 3;
    pub const PAGE_BREAK_MAX: usize = 8;
    pub const PAGE_BREAK_CHARS: [char; 3] = ['=', '-', '_'];

    /// 序列化时标题页指令的固定顺序
    pub const TITLE_DIRECTIVE_ORDER: [&'static str; 6] = ["Title", "Credit", "Author", "Source", "Draft date", "Contact"];

    /// 标题页键名别名
    pub fn directive_alias(key: &str) -> &str {
        match key {
            "author" | "author(s)" => "authors",
            other => other,
        }
    }
}

lazy_static! {
    // 标题页正则
    pub static ref TITLE_PAGE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("inline_directive", Regex::new(r"^([\w&()][\w &()]*?)[ \t]*:[ \t]*(\S.*?)[ \t]*$").unwrap());
        map.insert("directive_opener", Regex::new(r"^([\w&()][\w &()]*?)[ \t]*:[ \t]*$").unwrap());
        map
    };

    // 正文细化正则
    pub static ref ELEMENT_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("scene_number", Regex::new(r"#([0-9A-Za-z.)\-]+)#").unwrap());
        map.insert("centered", Regex::new(r"^>([^<>\n]+)<").unwrap());
        map.insert("dual_dialogue", Regex::new(r"\s*\^\s*$").unwrap());
        map.insert("character_extension", Regex::new(r"(\([^<>]*?\)\s?)").unwrap());
        map
    };

    // 样式正则，按从复合到单一的顺序检查
    pub static ref STYLE_REGEX: Vec<(&'static str, Regex)> = vec![
        ("bold_italic_underline", Regex::new(r"(_\*{3}|\*{3}_)([^<>]+?)(_\*{3}|\*{3}_)").unwrap()),
        ("bold_italic", Regex::new(r"(\*{3})([^<>]+?)(\*{3})").unwrap()),
        ("bold_underline", Regex::new(r"(_\*{2}|\*{2}_)([^<>]+?)(_\*{2}|\*{2}_)").unwrap()),
        ("italic_underline", Regex::new(r"(_\*|\*_)([^<>]+?)(_\*|\*_)").unwrap()),
        ("bold", Regex::new(r"(\*{2})([^<>]+?)(\*{2})").unwrap()),
        ("italic", Regex::new(r"(\*)([^<>*]+?)(\*)").unwrap()),
        ("underline", Regex::new(r"(_)([^<>_]+)(_)").unwrap()),
    ];

    // 行内HTML展示用
    pub static ref HTML_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("bold", Regex::new(r"\*\*([^*]+)\*\*").unwrap());
        map.insert("italic", Regex::new(r"\*([^*]+)\*").unwrap());
        map.insert("underline", Regex::new(r"_([^_]+)_").unwrap());
        map
    };
}
