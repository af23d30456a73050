pub mod error;
pub mod models;
pub mod utils;
pub mod parser;
pub mod serializer;
pub mod api;

pub use error::{FountainError, FountainResult};

pub use models::{
    Element,
    ElementType,
    TitlePage,
    Document,
    Actor,
    Line,
    Scene,
    Script,
    Conf
};

pub use parser::{
    FountainParser,
    TextStyle
};

pub use serializer::{
    FountainSerializer,
    serialize
};

pub use api::{
    parse_fountain_text,
    fountain_to_script_json,
    serialize_script_json
};

/// 解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
///
/// # Returns
///
/// 标题页和元素列表
pub fn parse(script: &str) -> Document {
    FountainParser::new().parse(script)
}

/// 使用指定配置解析
pub fn parse_with_config(script: &str, config: &Conf) -> Document {
    FountainParser::with_config(config.clone()).parse(script)
}
