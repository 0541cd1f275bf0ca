//! 模拟器数据模型
//!
//! - `status`: 商品状态枚举
//! - `message`: 发往 Kafka 的状态消息
//! - `context`: 模拟上下文与单步记录

mod context;
mod message;
mod status;

pub use context::{MessageSendContext, SimulationContext, SimulationStep, TimeoutSettingContext};
pub use message::StatusMessage;
pub use status::ProductStatus;
