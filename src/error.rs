use thiserror::Error;

/// 解析/序列化相关错误
///
/// 正常的剧本文本永远不会产生错误：解析对任何输入都返回结果。
/// 这里的错误只来自配置、JSON 桥接以及分类规则表本身的不一致。
#[derive(Error, Debug)]
pub enum FountainError {
    #[error("无效的配置: {0}")]
    InvalidConfig(String),

    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("分类规则表不一致: {0}")]
    RuleTable(String),
}

/// 结果类型
pub type FountainResult<T> = Result<T, FountainError>;
