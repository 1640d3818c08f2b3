use std::net::SocketAddr;

use casino_royale_core::Money;
use clap::Parser;

/// 服务器配置，命令行参数优先，其次读取环境变量
#[derive(Debug, Clone, Parser)]
#[command(name = "casino_royale_server", about = "单桌 21 点 HTTP 服务")]
pub struct ServerConfig {
    /// 监听地址
    #[arg(long, env = "CASINO_ADDR", default_value = "0.0.0.0:25917")]
    pub addr: SocketAddr,

    /// 新玩家的初始资金
    #[arg(long, env = "CASINO_STARTING_MONEY", default_value_t = 100.0)]
    pub starting_money: Money,

    /// 固定发牌随机种子，不设置则使用系统熵源
    #[arg(long, env = "CASINO_SEED")]
    pub seed: Option<u64>,
}
