use crate::error::GameError;
use crate::state::Money;
use serde::{Deserialize, Serialize};

// --- 边界层的数据传输对象 ---
// 引擎之外（HTTP、持久化）与引擎交换的数据。

/// 玩家钱包快照
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerModel {
    pub username: String,
    pub current_money: Option<Money>,
    pub total_earned: Option<Money>,
    pub total_lost: Option<Money>,
    pub active: Option<bool>,
}

/// 开局请求：下注金额 + 玩家快照
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerBetRequest {
    pub bet: Money,
    pub player: Option<PlayerModel>,
}

impl PlayerBetRequest {
    pub fn new(bet: Money, player: PlayerModel) -> Self {
        Self { bet, player: Some(player) }
    }

    /// 开局前的边界校验。
    ///
    /// 引擎本身只检查玩家是否缺失，下注金额必须在这里先挡住：
    /// 金额大于 0，且不超过玩家当前的钱。
    pub fn validate(&self) -> Result<(), GameError> {
        let player = self.player.as_ref().ok_or(GameError::InvalidArgument("Player"))?;
        let current_money = player.current_money.ok_or(GameError::InvalidArgument("CurrentMoney"))?;
        if !(self.bet > 0.0) || self.bet > current_money {
            return Err(GameError::InvalidBet(
                "Please choose a bet greater than zero and less than the player's available money."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// 玩家信息的部分更新，为空的字段保持原值
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub username: Option<String>,
    pub current_money: Option<Money>,
    pub total_earned: Option<Money>,
    pub total_lost: Option<Money>,
    pub active: Option<bool>,
}
