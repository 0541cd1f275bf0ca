//! 共享库
//!
//! RFID 模拟器各组件共用的配置、错误处理、Kafka 生产者与可观测性基础设施。

pub mod config;
pub mod error;
pub mod kafka;
pub mod observability;
