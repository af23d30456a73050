//! 正文分类规则表
//!
//! 每条规则由 编号、结果类型、对当前块的影响、匹配函数、提取函数 组成，
//! 按编号顺序依次尝试，第一条命中的规则决定该逻辑行的类型。
//! 规则 1–9 具有抢占性：即使处在对白块中间也会先于对白被识别。

use lazy_static::lazy_static;
use unicode_segmentation::UnicodeSegmentation;
use crate::error::{FountainError, FountainResult};
use crate::models::ElementType;
use crate::parser::lexer::{LineKind, SourceLine};
use crate::parser::text_processor::{strip_emphasis, trim_character_force_symbol};
use crate::utils::FountainConstants;

/// 规则编号，数值即优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    Boneyard = 1,
    Note = 2,
    Synopsis = 3,
    PageBreak = 4,
    FalseTransition = 5,
    ForcedTransition = 6,
    SceneHeading = 7,
    FirstLineAction = 8,
    Transition = 9,
    Character = 10,
    Parenthetical = 11,
    Dialogue = 12,
    SectionHeading = 13,
    Action = 14,
}

impl RuleId {
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// 规则 1–9 可以打断对白块和动作块
    pub fn is_preemptive(self) -> bool {
        self <= RuleId::Transition
    }
}

/// 当前打开的块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenBlock {
    Action,
    Dialogue,
}

/// 规则命中后对块状态的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEffect {
    /// 独立元素，关闭当前块
    Standalone,
    /// 角色，开启对白块
    OpensDialogue,
    /// 对白块中的独立元素（括号注释）
    InDialogue,
    /// 与前面的对白行合并
    JoinsDialogue,
    /// 与前面的动作行合并
    JoinsAction,
}

impl BlockEffect {
    pub fn next_block(self) -> Option<OpenBlock> {
        match self {
            BlockEffect::Standalone => None,
            BlockEffect::OpensDialogue | BlockEffect::InDialogue | BlockEffect::JoinsDialogue => Some(OpenBlock::Dialogue),
            BlockEffect::JoinsAction => Some(OpenBlock::Action),
        }
    }

    pub fn joins(self) -> bool {
        matches!(self, BlockEffect::JoinsDialogue | BlockEffect::JoinsAction)
    }
}

/// 规则匹配时看到的上下文
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub lines: &'a [SourceLine],
    pub index: usize,
    pub open_block: Option<OpenBlock>,
}

impl<'a> LineContext<'a> {
    pub fn new(lines: &'a [SourceLine], index: usize, open_block: Option<OpenBlock>) -> Self {
        LineContext { lines, index, open_block }
    }

    pub fn source(&self) -> &'a SourceLine {
        &self.lines[self.index]
    }

    pub fn text(&self) -> &'a str {
        &self.lines[self.index].text
    }

    pub fn trimmed(&self) -> &'a str {
        self.text().trim()
    }

    pub fn is_plain(&self) -> bool {
        self.source().kind == LineKind::Plain
    }

    pub fn in_dialogue(&self) -> bool {
        self.open_block == Some(OpenBlock::Dialogue)
    }

    /// 块的开头：正文首行、空行之后或独立元素之后
    pub fn at_block_start(&self) -> bool {
        self.open_block.is_none()
    }

    /// 下一逻辑行（按块开头看待）
    pub fn next(&self) -> Option<LineContext<'a>> {
        if self.index + 1 < self.lines.len() {
            Some(LineContext::new(self.lines, self.index + 1, None))
        } else {
            None
        }
    }
}

/// 规则提取出的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub section_depth: usize,
}

impl Extraction {
    pub fn text(text: impl Into<String>) -> Self {
        Extraction { text: text.into(), section_depth: 0 }
    }
}

/// 分类规则
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub element_type: ElementType,
    pub effect: BlockEffect,
    pub matcher: fn(&LineContext<'_>) -> bool,
    pub extract: fn(&LineContext<'_>) -> Extraction,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("element_type", &self.element_type)
            .field("effect", &self.effect)
            .finish()
    }
}

pub static RULES: [Rule; 14] = [
    Rule { id: RuleId::Boneyard, element_type: ElementType::Comment, effect: BlockEffect::Standalone, matcher: is_boneyard, extract: extract_block },
    Rule { id: RuleId::Note, element_type: ElementType::Comment, effect: BlockEffect::Standalone, matcher: is_note, extract: extract_block },
    Rule { id: RuleId::Synopsis, element_type: ElementType::Synopsis, effect: BlockEffect::Standalone, matcher: is_synopsis, extract: extract_synopsis },
    Rule { id: RuleId::PageBreak, element_type: ElementType::PageBreak, effect: BlockEffect::Standalone, matcher: is_page_break, extract: extract_nothing },
    Rule { id: RuleId::FalseTransition, element_type: ElementType::Action, effect: BlockEffect::Standalone, matcher: is_false_transition, extract: extract_trimmed },
    Rule { id: RuleId::ForcedTransition, element_type: ElementType::Transition, effect: BlockEffect::Standalone, matcher: is_forced_transition, extract: extract_forced_transition },
    Rule { id: RuleId::SceneHeading, element_type: ElementType::SceneHeading, effect: BlockEffect::Standalone, matcher: is_scene_heading, extract: extract_scene_heading },
    Rule { id: RuleId::FirstLineAction, element_type: ElementType::Action, effect: BlockEffect::Standalone, matcher: is_first_line_action, extract: extract_trimmed },
    Rule { id: RuleId::Transition, element_type: ElementType::Transition, effect: BlockEffect::Standalone, matcher: is_transition, extract: extract_trimmed },
    Rule { id: RuleId::Character, element_type: ElementType::Character, effect: BlockEffect::OpensDialogue, matcher: is_character, extract: extract_character },
    Rule { id: RuleId::Parenthetical, element_type: ElementType::Parenthetical, effect: BlockEffect::InDialogue, matcher: is_parenthetical, extract: extract_trimmed },
    Rule { id: RuleId::Dialogue, element_type: ElementType::Dialogue, effect: BlockEffect::JoinsDialogue, matcher: is_dialogue, extract: extract_trimmed },
    Rule { id: RuleId::SectionHeading, element_type: ElementType::SectionHeading, effect: BlockEffect::Standalone, matcher: is_section_heading, extract: extract_section_heading },
    Rule { id: RuleId::Action, element_type: ElementType::Action, effect: BlockEffect::JoinsAction, matcher: is_action, extract: extract_action },
];

lazy_static! {
    pub static ref RULE_TABLE: RuleTable<'static> = RuleTable::new(&RULES).expect("内置分类规则表不一致");
}

/// 经过一致性检查的规则表
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<'a> {
    rules: &'a [Rule],
}

impl<'a> RuleTable<'a> {
    /// 检查规则表：非空、优先级严格递增、对白规则位于角色规则之后、最后一条为兜底动作规则
    pub fn new(rules: &'a [Rule]) -> FountainResult<Self> {
        let last = rules.last().ok_or_else(|| FountainError::RuleTable("规则表为空".to_string()))?;

        for pair in rules.windows(2) {
            if pair[0].id >= pair[1].id {
                return Err(FountainError::RuleTable(format!(
                    "规则 {:?} 必须位于 {:?} 之前", pair[1].id, pair[0].id
                )));
            }
        }

        if last.id != RuleId::Action || last.effect != BlockEffect::JoinsAction {
            return Err(FountainError::RuleTable(format!("最后一条规则必须是兜底动作规则，实际为 {:?}", last.id)));
        }

        for rule in rules {
            let dialogue_rule = matches!(rule.effect, BlockEffect::InDialogue | BlockEffect::JoinsDialogue);
            if dialogue_rule && rule.id < RuleId::Character {
                return Err(FountainError::RuleTable(format!("对白规则 {:?} 不能先于角色规则", rule.id)));
            }
            if rule.effect == BlockEffect::OpensDialogue && rule.element_type != ElementType::Character {
                return Err(FountainError::RuleTable(format!("规则 {:?} 开启对白块却不产生角色", rule.id)));
            }
        }

        Ok(RuleTable { rules })
    }

    pub fn rules(&self) -> &'a [Rule] {
        self.rules
    }

    /// 按优先级找到第一条命中的规则
    pub fn classify(&self, ctx: &LineContext<'_>) -> &'a Rule {
        let rules = self.rules;
        rules.iter().find(|rule| (rule.matcher)(ctx)).unwrap_or(&rules[rules.len() - 1])
    }

    /// 是否有抢占性规则（1–9）命中
    pub fn preempts(&self, ctx: &LineContext<'_>) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.id.is_preemptive())
            .any(|rule| (rule.matcher)(ctx))
    }
}

// ---- 匹配函数 ----

fn is_boneyard(ctx: &LineContext<'_>) -> bool {
    ctx.source().kind == LineKind::Boneyard
}

fn is_note(ctx: &LineContext<'_>) -> bool {
    ctx.source().kind == LineKind::Note
}

fn is_synopsis(ctx: &LineContext<'_>) -> bool {
    let t = ctx.trimmed();
    ctx.is_plain()
        && t.starts_with('=')
        && !t[1..].starts_with('=')
        && !is_page_break_line(t)
        && !t[1..].trim().is_empty()
}

fn is_page_break(ctx: &LineContext<'_>) -> bool {
    ctx.is_plain() && is_page_break_line(ctx.trimmed())
}

/// 3–8 个相同的 `=`、`-` 或 `_`
pub fn is_page_break_line(text: &str) -> bool {
    let mut chars = text.chars();
    let first = match chars.next() {
        Some(c) if FountainConstants::PAGE_BREAK_CHARS.contains(&c) => c,
        _ => return false,
    };
    let count = text.chars().count();
    (FountainConstants::PAGE_BREAK_MIN..=FountainConstants::PAGE_BREAK_MAX).contains(&count)
        && chars.all(|c| c == first)
}

fn is_false_transition(ctx: &LineContext<'_>) -> bool {
    let t = ctx.trimmed();
    ctx.is_plain() && t.len() > 2 && t.starts_with('>') && t.ends_with('<') && !t[1..t.len() - 1].trim().is_empty()
}

fn is_forced_transition(ctx: &LineContext<'_>) -> bool {
    let t = ctx.trimmed();
    ctx.is_plain() && t.starts_with('>') && !t[1..].trim().is_empty()
}

fn is_scene_heading(ctx: &LineContext<'_>) -> bool {
    ctx.is_plain() && scene_heading_text(ctx.trimmed()).is_some()
}

/// 场景标题文本；强制标题去掉开头的 `.`
pub fn scene_heading_text(text: &str) -> Option<&str> {
    if let Some(rest) = text.strip_prefix('.') {
        // 省略号不是强制场景标题
        return match rest.chars().next() {
            Some(c) if c != '.' && !rest.trim().is_empty() => Some(rest.trim()),
            _ => None,
        };
    }

    for prefix in FountainConstants::SCENE_HEADING_PREFIXES {
        if starts_with_ignore_ascii_case(text, prefix) && heading_continues(&text[prefix.len()..]) {
            return Some(text);
        }
    }

    // 非单词字符 + EST
    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        let rest = chars.as_str();
        if !first.is_alphanumeric() && first != '_' && starts_with_ignore_ascii_case(rest, "EST") && heading_continues(&rest[3..]) {
            return Some(text);
        }
    }

    None
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

// 前缀后面至少还有一个字符
fn heading_continues(rest: &str) -> bool {
    !rest.is_empty()
}

fn is_first_line_action(ctx: &LineContext<'_>) -> bool {
    ctx.index == 0 && ctx.is_plain() && !ctx.trimmed().starts_with('#')
}

fn is_transition(ctx: &LineContext<'_>) -> bool {
    ctx.is_plain() && is_transition_line(ctx.trimmed())
}

/// 去掉强调标记后以 `TO:` 结尾且没有小写字母，或是固定转场
pub fn is_transition_line(text: &str) -> bool {
    let core = strip_emphasis(text);
    if FountainConstants::FIXED_TRANSITIONS.contains(&core) {
        return true;
    }
    core.ends_with("TO:") && !core.chars().any(char::is_lowercase)
}

fn is_character(ctx: &LineContext<'_>) -> bool {
    ctx.is_plain()
        && !ctx.in_dialogue()
        && ctx.at_block_start()
        && looks_like_character(ctx.trimmed())
        && next_line_takes_dialogue(ctx)
}

/// 角色名判定
///
/// 以 `@` 开头的行总是角色。否则需要同时满足：
/// 至少两个字素且含字母；首字符不是空白、`/`、`(` 或小写；
/// 第一个 `(` 之前的名字部分没有小写字母和 `:` `!` `?`（括号扩展里允许小写）；
/// 末字符不是小写，也不是 `.` `,` `:` `!` `?` `(`。标点同时包括对应的全角形式。
pub fn looks_like_character(text: &str) -> bool {
    if let Some(forced) = text.strip_prefix('@') {
        return !forced.trim().is_empty();
    }
    if text.graphemes(true).count() < 2 {
        return false;
    }

    let first = match text.chars().next() {
        Some(c) => c,
        None => return false,
    };
    if first.is_whitespace() || first == '/' || first == '(' || first.is_lowercase() {
        return false;
    }

    let name = match text.find('(') {
        Some(pos) => &text[..pos],
        None => text,
    };
    if !name.chars().any(char::is_alphabetic) {
        return false;
    }
    if name.chars().any(|c| c.is_lowercase() || matches!(c, ':' | '!' | '?' | '：' | '！' | '？')) {
        return false;
    }

    match text.chars().last() {
        Some(last) => {
            !last.is_lowercase()
                && !matches!(last, '.' | ',' | ':' | '!' | '?' | '(' | '。' | '，' | '：' | '！' | '？' | '（')
        }
        None => false,
    }
}

// 下一行必须是非空普通行，且不会被规则 1–9 抢走
fn next_line_takes_dialogue(ctx: &LineContext<'_>) -> bool {
    match ctx.next() {
        Some(next) => {
            next.is_plain()
                && !next.source().is_blank()
                && !RULE_TABLE.preempts(&next)
        }
        None => false,
    }
}

fn is_parenthetical(ctx: &LineContext<'_>) -> bool {
    let t = ctx.trimmed();
    ctx.is_plain() && ctx.in_dialogue() && t.len() >= 2 && t.starts_with('(') && t.ends_with(')')
}

fn is_dialogue(ctx: &LineContext<'_>) -> bool {
    ctx.is_plain() && ctx.in_dialogue()
}

fn is_section_heading(ctx: &LineContext<'_>) -> bool {
    ctx.is_plain() && ctx.trimmed().starts_with('#')
}

fn is_action(_ctx: &LineContext<'_>) -> bool {
    true
}

// ---- 提取函数 ----

fn extract_block(ctx: &LineContext<'_>) -> Extraction {
    Extraction::text(ctx.text().trim())
}

fn extract_nothing(_ctx: &LineContext<'_>) -> Extraction {
    Extraction::text("")
}

fn extract_trimmed(ctx: &LineContext<'_>) -> Extraction {
    Extraction::text(ctx.trimmed())
}

fn extract_synopsis(ctx: &LineContext<'_>) -> Extraction {
    Extraction::text(ctx.trimmed()[1..].trim())
}

fn extract_forced_transition(ctx: &LineContext<'_>) -> Extraction {
    Extraction::text(ctx.trimmed()[1..].trim())
}

fn extract_scene_heading(ctx: &LineContext<'_>) -> Extraction {
    let t = ctx.trimmed();
    Extraction::text(scene_heading_text(t).unwrap_or(t))
}

fn extract_character(ctx: &LineContext<'_>) -> Extraction {
    Extraction::text(trim_character_force_symbol(ctx.trimmed()).trim())
}

fn extract_section_heading(ctx: &LineContext<'_>) -> Extraction {
    let t = ctx.trimmed();
    let depth = t.chars().take_while(|&c| c == '#').count();
    Extraction {
        text: t[depth..].trim().to_string(),
        section_depth: depth,
    }
}

// 动作行保留行首缩进
fn extract_action(ctx: &LineContext<'_>) -> Extraction {
    Extraction::text(ctx.text().trim_end())
}
