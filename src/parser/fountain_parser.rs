use std::time::Instant;
use log::debug;
use crate::models::{Conf, Document, Element, ElementType};
use crate::parser::classifier::BodyClassifier;
use crate::parser::lexer::{lex, normalize_line_breaks};
use crate::parser::refine::refine;
use crate::parser::title_page_parser::{split_title_page, TitlePageParser};

/// Fountain 解析器
///
/// 解析过程：统一换行 -> 拆出标题页 -> 正文切分逻辑行 -> 按规则表分类 -> 细化 -> 按配置过滤。
/// 解析不会失败，无法识别的内容都归为动作。
#[derive(Debug, Clone, Default)]
pub struct FountainParser {
    conf: Conf,
}

impl FountainParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(conf: Conf) -> Self {
        FountainParser { conf }
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// 解析Fountain格式文本
    ///
    /// # Arguments
    ///
    /// * `script` - Fountain格式的剧本文本
    ///
    /// # Returns
    ///
    /// 标题页和按原文顺序排列的元素
    pub fn parse(&self, script: &str) -> Document {
        if script.is_empty() {
            return Document::default();
        }
        let started = Instant::now();

        // 处理换行符差异
        let normalized = normalize_line_breaks(script);
        let split = split_title_page(&normalized);
        let title_page = split
            .title_block
            .as_deref()
            .map(TitlePageParser::parse)
            .unwrap_or_default();

        let lines = lex(split.body, split.body_line_offset);
        let elements = BodyClassifier::new().classify(&lines);
        let elements: Vec<Element> = refine(elements, &self.conf)
            .into_iter()
            .filter(|e| self.keeps(e.element_type))
            .collect();

        debug!(
            "解析完成: 标题页 {} 项, 逻辑行 {} 行, 元素 {} 个, 耗时 {:?}",
            title_page.len(),
            lines.len(),
            elements.len(),
            started.elapsed()
        );

        Document::new(title_page, elements)
    }

    // 根据配置决定是否保留该类型
    fn keeps(&self, element_type: ElementType) -> bool {
        match element_type {
            ElementType::Comment => self.conf.print_notes,
            ElementType::Synopsis => self.conf.print_synopsis,
            ElementType::SectionHeading => self.conf.print_sections,
            _ => true,
        }
    }
}
