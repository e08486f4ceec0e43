//! 错误类型
//!
//! 只有非法参数才会产生错误；退化输入与"无解"通过返回值表达。

use thiserror::Error;

/// 几何查询错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Angle epsilon must lie in [0, π/2], got {0}")]
    InvalidAngleEpsilon(f64),

    #[error("Distance epsilon must be non-negative, got {0}")]
    NegativeEpsilon(f64),

    #[error("Malformed bounding box: min ({min}) > max ({max}) on axis {axis}")]
    InvalidBoundingBox { axis: usize, min: f64, max: f64 },

    #[error("{name} must be strictly positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },

    #[error("Lengths ({0}, {1}, {2}) cannot form a triangle")]
    NotATriangle(f64, f64, f64),

    #[error("Invalid tolerance configuration: {0}")]
    Config(String),
}

/// 几何查询结果
pub type Result<T> = std::result::Result<T, GeometryError>;

impl From<serde_json::Error> for GeometryError {
    fn from(e: serde_json::Error) -> Self {
        GeometryError::Config(e.to_string())
    }
}
