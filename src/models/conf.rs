use serde::{Deserialize, Serialize};
use crate::error::{FountainError, FountainResult};
use crate::utils::FountainConstants;

/// 解析与序列化配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 是否保留注释（`/* */` 与 `[[ ]]`）
    pub print_notes: bool,
    /// 是否保留概要 `=`
    pub print_synopsis: bool,
    /// 是否保留章节 `#`
    pub print_sections: bool,
    /// 是否处理双对白标记 `^`
    pub use_dual_dialogue: bool,
    /// 是否从场景标题中提取 `#编号#`
    pub scene_numbers: bool,
    /// 动作行使用的占位角色名
    pub action_name: String,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            print_notes: true,
            print_synopsis: true,
            print_sections: true,
            use_dual_dialogue: true,
            scene_numbers: true,
            action_name: FountainConstants::ACTION_NAME.to_string(),
        }
    }
}

impl Conf {
    /// 从JSON读取配置，缺省字段使用默认值
    pub fn from_json(json: &str) -> FountainResult<Self> {
        let conf: Conf = serde_json::from_str(json)?;
        conf.validate()?;
        Ok(conf)
    }

    /// 校验配置
    pub fn validate(&self) -> FountainResult<()> {
        if self.action_name.trim().is_empty() {
            return Err(FountainError::InvalidConfig("action_name 不能为空".to_string()));
        }
        Ok(())
    }

    /// 判断角色名是否是动作占位角色
    pub fn is_action_name(&self, name: &str) -> bool {
        name.trim().eq_ignore_ascii_case(&self.action_name)
    }
}
