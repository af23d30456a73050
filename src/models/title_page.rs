use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::utils::FountainConstants;

/// 标题页：规范化键名 -> 按原顺序排列的多行值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitlePage {
    directives: HashMap<String, Vec<String>>,
}

impl TitlePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 规范化键名：小写，作者别名统一为 `authors`
    pub fn normalize_key(key: &str) -> String {
        let lower = key.trim().to_lowercase();
        FountainConstants::directive_alias(&lower).to_string()
    }

    /// 写入指令，同名键后写覆盖先写
    pub fn insert(&mut self, key: &str, values: Vec<String>) {
        self.directives.insert(Self::normalize_key(key), values);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.directives.get(&Self::normalize_key(key)).map(|v| v.as_slice())
    }

    /// 多行值以换行拼接
    pub fn value(&self, key: &str) -> Option<String> {
        self.get(key).map(|lines| lines.join("\n"))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.directives.contains_key(&Self::normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
