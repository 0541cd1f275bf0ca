//! CLI 模块
//!
//! - `serve` - 启动 HTTP 服务，按请求启动模拟
//! - `simulate` - 直接启动一次模拟，进程保持运行直到 Ctrl+C
//!
//! ```bash
//! status-simulator serve --port 8080
//! status-simulator simulate --item-id ITM-1 --article 42 --status created,shipped,delivered
//! status-simulator simulate --item-id ITM-2 --article 7 --strategy lost-in-transit
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
