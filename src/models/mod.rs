//! 数据模型模块

pub mod offer;
pub mod user;
