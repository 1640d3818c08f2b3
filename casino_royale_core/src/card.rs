use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- 核心数据结构定义 ---

/// 一副牌的总张数
pub const DECK_SIZE: usize = 52;

/// 花色 (Suit)
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Clubs,    // 梅花 ♣️
    Diamonds, // 方块 ♦️
    Hearts,   // 红心 ♥️
    Spades,   // 黑桃 ♠️
}

/// 点数 (Rank)
/// 序列化时使用牌面标签 ("2".."10", "J", "Q", "K", "A")
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// 发牌时的初始权重：数字牌为其点数，J/Q/K 为 10，A 为 11
    pub fn weight(self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }
}

/// 单张扑克牌 (Card)
///
/// `weight` 是计分时使用的当前分值。除了 A 从 11 降为 1 之外，发出后的牌不再改变，
/// 降级通过 [`Card::with_weight`] 生成一张新牌完成。
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub weight: u32,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { suit, rank, weight: rank.weight() }
    }

    /// 随机抽一张牌：先随机花色，再随机点数
    pub fn random(rng: &mut impl RandomSource) -> Card {
        let suit = Suit::ALL[rng.pick(Suit::ALL.len())];
        let rank = Rank::ALL[rng.pick(Rank::ALL.len())];
        Card::new(rank, suit)
    }

    pub fn with_weight(self, weight: u32) -> Card {
        Card { weight, ..self }
    }

    /// 仍按 11 计分的 A
    pub fn is_soft_ace(&self) -> bool {
        self.rank == Rank::Ace && self.weight == 11
    }

    /// 牌面 (花色, 点数)，判断重复时只看牌面，不看权重
    pub fn face(&self) -> (Suit, Rank) {
        (self.suit, self.rank)
    }

    pub fn same_face(&self, other: &Card) -> bool {
        self.face() == other.face()
    }
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Suit::Clubs => "♣️",
            Suit::Diamonds => "♦️",
            Suit::Hearts => "♥️",
            Suit::Spades => "♠️",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

// --- 单元测试 ---
