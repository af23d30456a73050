use std::fmt;
use serde::{Deserialize, Serialize};

/// 元素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "Scene Heading")]
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    #[serde(rename = "Section Heading")]
    SectionHeading,
    Synopsis,
    Comment,
    #[serde(rename = "Page Break")]
    PageBreak,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "Scene Heading",
            ElementType::Action => "Action",
            ElementType::Character => "Character",
            ElementType::Dialogue => "Dialogue",
            ElementType::Parenthetical => "Parenthetical",
            ElementType::Transition => "Transition",
            ElementType::SectionHeading => "Section Heading",
            ElementType::Synopsis => "Synopsis",
            ElementType::Comment => "Comment",
            ElementType::PageBreak => "Page Break",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 剧本元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub element_type: ElementType,
    pub text: String,
    pub is_centered: bool,
    /// 场景编号（仅场景标题）
    pub scene_number: Option<String>,
    /// 双对白（仅角色）
    pub is_dual_dialogue: bool,
    /// 章节层级（仅章节标题，其余为0）
    pub section_depth: usize,
    /// 元素在原文中的起始行号
    pub line: usize,
}

impl Element {
    pub fn new(element_type: ElementType, text: impl Into<String>) -> Self {
        Element {
            element_type,
            text: text.into(),
            is_centered: false,
            scene_number: None,
            is_dual_dialogue: false,
            section_depth: 0,
            line: 0,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn with_section_depth(mut self, depth: usize) -> Self {
        self.section_depth = depth;
        self
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>{}</{}>", self.element_type, self.text, self.element_type)
    }
}
