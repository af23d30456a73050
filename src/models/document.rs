use serde::{Deserialize, Serialize};
use crate::models::element::{Element, ElementType};
use crate::models::title_page::TitlePage;

/// 解析结果：标题页 + 按原文顺序排列的元素
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title_page: TitlePage,
    pub elements: Vec<Element>,
}

impl Document {
    pub fn new(title_page: TitlePage, elements: Vec<Element>) -> Self {
        Document { title_page, elements }
    }

    pub fn is_empty(&self) -> bool {
        self.title_page.is_empty() && self.elements.is_empty()
    }

    /// 指定类型的元素
    pub fn elements_of(&self, element_type: ElementType) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.element_type == element_type)
    }
}
