//! 容差配置
//!
//! 包装类型的方法默认使用 [`Tolerances::default`]，调用方也可以从 JSON 加载一份。

use crate::error::Result;
use crate::math::{check_angle_epsilon, check_distance_epsilon, ONE_MILLIONTH, ONE_TEN_MILLIONTH, ONE_TRILLIONTH};
use serde::{Deserialize, Serialize};

/// 查询容差
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// 平行/共线判断的角度容差（弧度，位于 `[0, π/2]`）
    pub angle_epsilon: f64,
    /// 共线/共面判断的距离容差
    pub distance_epsilon: f64,
    /// 点在线上/平面上的判定距离
    pub on_line_epsilon: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            angle_epsilon: ONE_MILLIONTH,
            distance_epsilon: ONE_TEN_MILLIONTH,
            on_line_epsilon: ONE_TRILLIONTH,
        }
    }
}

impl Tolerances {
    /// 从 JSON 解析并校验，缺省字段取默认值
    pub fn from_json(json: &str) -> Result<Self> {
        let tolerances: Tolerances = serde_json::from_str(json)?;
        tolerances.validate()?;
        tracing::debug!(?tolerances, "loaded tolerances");
        Ok(tolerances)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 校验各容差的取值范围
    pub fn validate(&self) -> Result<()> {
        check_angle_epsilon(self.angle_epsilon)?;
        check_distance_epsilon(self.distance_epsilon)?;
        check_distance_epsilon(self.on_line_epsilon)
    }
}
