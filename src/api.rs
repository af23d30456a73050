//! 宿主桥接 API
//!
//! 以字符串进出的接口，供宿主应用通过 JSON 调用

use crate::error::FountainResult;
use crate::models::{Conf, Script};
use crate::parser::FountainParser;
use crate::serializer::FountainSerializer;

/// 解析Fountain文本，返回 Document 的 JSON
pub fn parse_fountain_text(text: String, config: Option<Conf>) -> String {
    let parser = FountainParser::with_config(config.unwrap_or_default());
    let result = parser.parse(&text);

    serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
}

/// 解析Fountain文本并构建剧本模型，返回 Script 的 JSON
pub fn fountain_to_script_json(text: String) -> FountainResult<String> {
    let document = FountainParser::new().parse(&text);
    let script = Script::from_document(&document);
    Ok(serde_json::to_string(&script)?)
}

/// 把 Script 的 JSON 写回 Fountain 文本
pub fn serialize_script_json(json: String, config: Option<Conf>) -> FountainResult<String> {
    let conf = config.unwrap_or_default();
    conf.validate()?;
    let script: Script = serde_json::from_str(&json)?;
    Ok(FountainSerializer::with_config(conf).serialize(&script))
}
