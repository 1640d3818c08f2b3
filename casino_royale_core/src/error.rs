use thiserror::Error;

/// 牌局引擎与下注校验产生的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// 必需的输入缺失
    #[error("{0} cannot be null")]
    InvalidArgument(&'static str),

    #[error("Invalid bet. {0}")]
    InvalidBet(String),

    /// 牌局已有结果，不能再要牌或停牌
    #[error("The round is already over")]
    RoundFinished,

    /// 桌上已有全部 52 张牌面，无法再发出不重复的牌
    #[error("No unique card left to deal")]
    DeckExhausted,
}
