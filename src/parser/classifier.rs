use log::trace;
use crate::models::{Element, ElementType};
use crate::parser::lexer::SourceLine;
use crate::parser::rules::{Extraction, LineContext, OpenBlock, Rule, RuleId, RuleTable, RULE_TABLE};
use crate::utils::trim_inline_whitespace;

// 尚未结束的可合并元素（对白、动作）
struct Pending {
    rule: RuleId,
    element: Element,
}

/// 正文分类器：对逻辑行逐行套用规则表
pub struct BodyClassifier {
    table: &'static RuleTable<'static>,
}

impl BodyClassifier {
    /// 使用内置规则表
    pub fn new() -> Self {
        BodyClassifier { table: &*RULE_TABLE }
    }

    pub fn classify(&self, lines: &[SourceLine]) -> Vec<Element> {
        let mut elements = Vec::new();
        let mut pending: Option<Pending> = None;
        let mut open_block: Option<OpenBlock> = None;

        for (index, source) in lines.iter().enumerate() {
            // 空行结束当前块
            if source.is_blank() {
                flush(&mut pending, &mut elements);
                open_block = None;
                continue;
            }

            let ctx = LineContext::new(lines, index, open_block);
            let rule = self.table.classify(&ctx);
            let extraction = (rule.extract)(&ctx);
            trace!("第{}行 {:?} -> {}", source.line, rule.id, rule.element_type);

            if rule.effect.joins() {
                match pending.as_mut() {
                    Some(p) if p.rule == rule.id => {
                        p.element.text.push('\n');
                        p.element.text.push_str(&extraction.text);
                    }
                    _ => {
                        flush(&mut pending, &mut elements);
                        pending = Some(Pending { rule: rule.id, element: build(rule, extraction, source.line) });
                    }
                }
            } else {
                flush(&mut pending, &mut elements);
                push(&mut elements, build(rule, extraction, source.line));
            }

            open_block = rule.effect.next_block();
        }
        flush(&mut pending, &mut elements);

        elements
    }
}

impl Default for BodyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn build(rule: &Rule, extraction: Extraction, line: usize) -> Element {
    Element::new(rule.element_type, extraction.text)
        .with_section_depth(extraction.section_depth)
        .at_line(line)
}

fn flush(pending: &mut Option<Pending>, elements: &mut Vec<Element>) {
    if let Some(p) = pending.take() {
        push(elements, p.element);
    }
}

// 去掉首尾空白，空文本的元素丢弃（分页符除外）
fn push(elements: &mut Vec<Element>, mut element: Element) {
    let trimmed = trim_inline_whitespace(&element.text);
    if trimmed.len() != element.text.len() {
        element.text = trimmed.to_string();
    }
    if element.text.is_empty() && element.element_type != ElementType::PageBreak {
        return;
    }
    elements.push(element);
}
