//! 领域模型定义
//!
//! - `enums`: 材料类型、投放物状态
//! - `item`: 投放物
//! - `user`: 用户及奖励余额

mod enums;
mod item;
mod user;

pub use enums::{ItemState, MaterialType, UnknownMaterial, canonical_material};
pub use item::Item;
pub use user::User;
