//! 相交结果
//!
//! 至多两个交点，按直线参数升序排列。有效的交点总是排在前面。

use nalgebra::{Point, SVector};

/// 直线与体的交点集合（0、1 或 2 个）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersections<P> {
    slots: [Option<P>; 2],
}

impl<P: Copy> Intersections<P> {
    /// 无交点
    pub fn none() -> Self {
        Self { slots: [None, None] }
    }

    /// 一个交点
    pub fn one(first: P) -> Self {
        Self {
            slots: [Some(first), None],
        }
    }

    /// 两个交点
    pub fn two(first: P, second: P) -> Self {
        Self {
            slots: [Some(first), Some(second)],
        }
    }

    /// 从迭代器中取前两个值
    pub fn from_iter_truncated(values: impl IntoIterator<Item = P>) -> Self {
        let mut iter = values.into_iter();
        match (iter.next(), iter.next()) {
            (Some(first), Some(second)) => Self::two(first, second),
            (Some(first), None) => Self::one(first),
            _ => Self::none(),
        }
    }

    /// 交点数量
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// 是否至少有一个交点
    pub fn does_intersect(&self) -> bool {
        !self.is_empty()
    }

    pub fn first(&self) -> Option<P> {
        self.slots[0]
    }

    pub fn second(&self) -> Option<P> {
        self.slots[1]
    }

    /// 两个槽位
    pub fn slots(&self) -> [Option<P>; 2] {
        self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = P> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// 保留满足条件的交点，剩余交点前移
    pub fn filter(self, predicate: impl Fn(&P) -> bool) -> Self {
        Self::from_iter_truncated(self.iter().filter(|value| predicate(value)))
    }

    pub fn map<Q: Copy>(self, f: impl Fn(P) -> Q) -> Intersections<Q> {
        Intersections {
            slots: [self.slots[0].map(&f), self.slots[1].map(&f)],
        }
    }
}

impl<P: Copy> Default for Intersections<P> {
    fn default() -> Self {
        Self::none()
    }
}

impl<const D: usize> Intersections<Point<f64, D>> {
    /// 转换为两个点，未使用的槽位所有坐标都是 NaN
    pub fn into_nan_filled(self) -> [Point<f64, D>; 2] {
        let nan = Point::from(SVector::<f64, D>::repeat(f64::NAN));
        [self.slots[0].unwrap_or(nan), self.slots[1].unwrap_or(nan)]
    }
}
