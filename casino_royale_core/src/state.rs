use crate::card::Card;
use crate::message::PlayerModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 金额类型
pub type Money = f64;

/// 庄家的固定名字
pub const DEALER_NAME: &str = "Daryl";

/// 一手牌：按发牌顺序排列的牌，加上缓存的分数。
/// 分数不会自动更新，每次加牌后由引擎重新计算。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
    pub score: u32,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// 坐在牌桌上的玩家
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAtTable {
    pub username: String,
    // 钱包字段可以为空，便于上游做部分更新
    pub current_money: Option<Money>,
    pub total_earned: Option<Money>,
    pub total_lost: Option<Money>,
    pub active: Option<bool>,
    pub current_bet: Money,
    #[serde(flatten)]
    pub hand: Hand,
}

impl PlayerAtTable {
    /// 从玩家快照复制钱包信息，手牌清空，分数归零
    pub fn from_snapshot(player: &PlayerModel, bet: Money) -> Self {
        Self {
            username: player.username.clone(),
            current_money: player.current_money,
            total_earned: player.total_earned,
            total_lost: player.total_lost,
            active: player.active,
            current_bet: bet,
            hand: Hand::new(),
        }
    }

    /// 两张牌且正好 21 点
    pub fn has_natural(&self) -> bool {
        self.hand.len() == 2 && self.hand.score == 21
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealer {
    pub name: String,
    #[serde(flatten)]
    pub hand: Hand,
}

impl Default for Dealer {
    fn default() -> Self {
        Self { name: DEALER_NAME.to_string(), hand: Hand::new() }
    }
}

/// 牌局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    PlayerWins,
    DealerWins,
    Tie,
    Bust,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            GameResult::PlayerWins => "PlayerWins",
            GameResult::DealerWins => "DealerWins",
            GameResult::Tie => "Tie",
            GameResult::Bust => "Bust",
        })
    }
}

/// 一局牌的完整状态。
///
/// 服务端不保存牌局，每次请求都把整张牌桌交给调用方，
/// 下一次要牌/停牌时再原样传回来。`result` 一旦有值，这一局就结束了。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub player: PlayerAtTable,
    pub dealer: Dealer,
    pub result: Option<GameResult>,
}

impl Table {
    pub fn new(player: &PlayerModel, bet: Money) -> Self {
        Self {
            player: PlayerAtTable::from_snapshot(player, bet),
            dealer: Dealer::default(),
            result: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// 桌上所有的牌（玩家 + 庄家）
    pub fn cards_in_play(&self) -> impl Iterator<Item = &Card> {
        self.player.hand.cards.iter().chain(self.dealer.hand.cards.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn snapshot() -> PlayerModel {
        PlayerModel {
            username: "MichaelScott".to_string(),
            current_money: Some(100.0),
            total_earned: Some(0.0),
            total_lost: Some(0.0),
            active: Some(true),
        }
    }

    #[test]
    fn test_new_table_copies_wallet_and_resets_hands() {
        let table = Table::new(&snapshot(), 5.0);

        assert_eq!(table.player.username, "MichaelScott");
        assert_eq!(table.player.current_money, Some(100.0));
        assert_eq!(table.player.current_bet, 5.0);
        assert!(table.player.hand.is_empty());
        assert_eq!(table.player.hand.score, 0);
        assert_eq!(table.dealer.name, DEALER_NAME);
        assert!(table.dealer.hand.is_empty());
        assert_eq!(table.result, None);
    }

    #[test]
    fn test_table_json_shape() {
        let mut table = Table::new(&snapshot(), 5.0);
        table.player.hand.cards.push(Card::new(Rank::Ace, Suit::Spades).with_weight(1));
        table.player.hand.score = 1;

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["player"]["currentBet"], 5.0);
        assert_eq!(value["player"]["cards"][0]["rank"], "A");
        assert_eq!(value["player"]["cards"][0]["weight"], 1);
        assert_eq!(value["player"]["score"], 1);
        assert_eq!(value["dealer"]["name"], "Daryl");
        assert!(value["result"].is_null());
    }

    #[test]
    fn test_table_round_trip_keeps_order_weights_and_score() {
        let mut table = Table::new(&snapshot(), 5.0);
        table.player.hand.cards = vec![
            Card::new(Rank::Five, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Ace, Suit::Spades).with_weight(1),
        ];
        table.player.hand.score = 16;
        table.dealer.hand.cards = vec![Card::new(Rank::Ace, Suit::Diamonds)];
        table.dealer.hand.score = 11;
        table.result = Some(GameResult::Tie);

        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_result_serializes_as_tag() {
        assert_eq!(serde_json::to_string(&GameResult::PlayerWins).unwrap(), r#""PlayerWins""#);
        assert_eq!(GameResult::Bust.to_string(), "Bust");
    }

    #[test]
    fn test_natural_needs_two_cards() {
        let mut player = PlayerAtTable::from_snapshot(&snapshot(), 5.0);
        player.hand.cards = vec![Card::new(Rank::Ace, Suit::Clubs), Card::new(Rank::King, Suit::Clubs)];
        player.hand.score = 21;
        assert!(player.has_natural());

        player.hand.cards.push(Card::new(Rank::Two, Suit::Clubs));
        assert!(!player.has_natural());
    }
}
