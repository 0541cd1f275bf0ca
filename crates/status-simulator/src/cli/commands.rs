//! CLI 命令定义

use clap::{Parser, Subcommand};

use crate::api::SimulationRequest;
use crate::models::ProductStatus;
use crate::strategy::StrategyType;

/// 商品状态模拟器
#[derive(Parser, Debug)]
#[command(name = "status-simulator")]
#[command(version, about = "RFID 商品状态变更模拟器")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别，覆盖配置文件 (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// 配置目录，覆盖 CONFIG_DIR
    #[arg(long)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动 HTTP 服务
    Serve {
        /// 服务端口，缺省取配置
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 直接启动一次模拟
    Simulate {
        #[arg(short, long)]
        item_id: String,

        #[arg(short, long)]
        article: i64,

        /// 目标 topic，缺省取配置
        #[arg(short, long)]
        topic: Option<String>,

        /// 显式状态序列，逗号分隔或重复指定
        #[arg(short, long = "status", value_delimiter = ',')]
        statuses: Vec<ProductStatus>,

        /// 预定义序列，显式序列为空时生效
        #[arg(long)]
        strategy: Option<StrategyType>,

        /// 步间最小延迟（分钟）
        #[arg(long, allow_negative_numbers = true)]
        min_timeout: Option<i32>,

        /// 步间最大延迟（分钟）
        #[arg(long, allow_negative_numbers = true)]
        max_timeout: Option<i32>,
    },
}

impl Commands {
    /// `simulate` 子命令转换为与 HTTP 接口相同的请求结构
    pub fn into_simulation_request(self) -> Option<SimulationRequest> {
        match self {
            Self::Simulate {
                item_id,
                article,
                topic,
                statuses,
                strategy,
                min_timeout,
                max_timeout,
            } => Some(SimulationRequest {
                item_id,
                article,
                topic,
                statuses: Some(statuses),
                strategy,
                min_timeout_minutes: min_timeout,
                max_timeout_minutes: max_timeout,
            }),
            Self::Serve { .. } => None,
        }
    }
}
