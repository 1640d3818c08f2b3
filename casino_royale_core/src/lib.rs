//! # 21 点核心逻辑库
//!
//! 这个 `core` crate 包含单桌 21 点的全部牌局规则：发牌、计分、
//! A 的 1/11 处理、庄家策略以及结算，还有与边界层交换的数据结构。
//! 它不做任何持久化，也不保存牌局，每个操作都接收并返回完整的牌桌。

mod card;
mod error;
mod logic;
mod message;
mod rng;
mod state;

pub use card::*;

pub use error::GameError;

pub use logic::*;

pub use message::*;

pub use rng::{RandomSource, SeededRng, SystemRng};

pub use state::*;
