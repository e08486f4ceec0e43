//! 直线、线段、射线、平面之间的两两关系
//!
//! - [`parallel`]: 平行、共线、共面判断
//! - [`closest`]: 两条直线/线段之间的最近点与距离
//! - [`intersect2d`]: 2D直线、线段、射线的相交
//! - [`plane`]: 3D直线/线段与平面、平面与平面的相交

pub mod closest;
pub mod intersect2d;
pub mod parallel;
pub mod plane;

pub use closest::*;
pub use intersect2d::*;
pub use parallel::*;
pub use plane::*;
