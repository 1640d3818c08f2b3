use crate::card::*;
use crate::error::GameError;
use crate::message::PlayerBetRequest;
use crate::rng::{RandomSource, SystemRng};
use crate::state::*;
use std::collections::HashSet;
use tracing::{debug, info};

/// 爆牌线
pub const BLACKJACK: u32 = 21;
/// 庄家至少要到这个分数才停牌
pub const DEALER_STANDS_AT: u32 = 17;

const WIN_MULTIPLIER: Money = 2.0;
const NATURAL_MULTIPLIER: Money = 2.5;

// --- 纯计算函数 ---

/// 一手牌的分数：所有牌当前权重之和
pub fn calculate_score(cards: &[Card]) -> u32 {
    cards.iter().map(|card| card.weight).sum()
}

/// 处理 A 的 1/11 歧义。
///
/// A 默认按 11 计分。只要分数超过 21 且手里还有按 11 计的 A，
/// 就把最靠前的那张降为 1，然后重新计分。会更新 `hand.score`。
pub fn handle_aces(hand: &mut Hand) -> &[Card] {
    hand.score = calculate_score(&hand.cards);
    while hand.score > BLACKJACK {
        let Some(idx) = hand.cards.iter().position(Card::is_soft_ace) else {
            break;
        };
        hand.cards[idx] = hand.cards[idx].with_weight(1);
        hand.score = calculate_score(&hand.cards);
    }
    &hand.cards
}

/// 玩家爆牌，直接结束这一局
pub fn end_game_from_user_bust(table: &mut Table) {
    table.result = Some(GameResult::Bust);
    table.dealer.hand.score = calculate_score(&table.dealer.hand.cards);
    settle(table);
}

/// 比较双方分数得出结果。玩家爆牌不会走到这里。
fn determine_result(player_score: u32, dealer_score: u32) -> GameResult {
    if player_score > dealer_score || dealer_score > BLACKJACK {
        GameResult::PlayerWins
    } else if dealer_score > player_score {
        GameResult::DealerWins
    } else {
        GameResult::Tie
    }
}

/// 结算。
///
/// 开局时下注已经从钱包扣除：
/// - 赢：返还 倍数 × 下注（天成 21 点为 2.5 倍，否则 2 倍），同时计入 total_earned
/// - 平：退回下注
/// - 输/爆牌：钱包不变，下注计入 total_lost
fn settle(table: &mut Table) {
    let player = &mut table.player;
    let bet = player.current_bet;
    match table.result {
        Some(GameResult::PlayerWins) => {
            let multiplier = if player.has_natural() { NATURAL_MULTIPLIER } else { WIN_MULTIPLIER };
            credit(&mut player.current_money, multiplier * bet);
            credit(&mut player.total_earned, multiplier * bet);
        }
        Some(GameResult::Tie) => credit(&mut player.current_money, bet),
        Some(GameResult::DealerWins) | Some(GameResult::Bust) => credit(&mut player.total_lost, bet),
        None => return,
    }
    info!(
        player = %player.username,
        result = ?table.result,
        player_score = player.hand.score,
        dealer_score = table.dealer.hand.score,
        "牌局结束"
    );
}

/// 空的钱包字段按 0 处理
fn credit(field: &mut Option<Money>, amount: Money) {
    *field = Some(field.unwrap_or_default() + amount);
}

// --- 牌局引擎 ---

/// 21 点牌局引擎。
///
/// 引擎不保存任何牌局状态，唯一持有的是发牌用的随机源。
pub struct GameManager<R = SystemRng> {
    rng: R,
}

impl Default for GameManager<SystemRng> {
    fn default() -> Self {
        Self::new(SystemRng)
    }
}

impl<R: RandomSource> GameManager<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 开始新的一局
    ///
    /// - 从玩家快照创建牌桌，从钱包扣除下注。
    /// - 给玩家发两张牌，给庄家发一张牌，并分别计分。
    ///
    /// 下注金额的合法性由调用方通过 [`PlayerBetRequest::validate`] 保证，
    /// 这里只检查玩家是否缺失。
    pub fn start_new_game(&mut self, request: &PlayerBetRequest) -> Result<Table, GameError> {
        let player = request.player.as_ref().ok_or(GameError::InvalidArgument("Player"))?;

        let mut table = Table::new(player, request.bet);
        let wallet = table.player.current_money.unwrap_or_default();
        table.player.current_money = Some(wallet - table.player.current_bet);

        for _ in 0..2 {
            let card = self.deal_new_card(&table)?;
            table.player.hand.cards.push(card);
        }
        table.player.hand.score = calculate_score(&table.player.hand.cards);

        let card = self.deal_new_card(&table)?;
        table.dealer.hand.cards.push(card);
        table.dealer.hand.score = calculate_score(&table.dealer.hand.cards);

        debug!(
            player = %table.player.username,
            bet = table.player.current_bet,
            player_score = table.player.hand.score,
            dealer_score = table.dealer.hand.score,
            "新牌局已发牌"
        );
        Ok(table)
    }

    /// 抽一张桌上没有的牌。
    ///
    /// 每次独立随机抽取花色和点数，与桌上任何一张牌面相同则重抽。
    /// 不修改牌桌，由调用方把牌加入手牌并重新计分。
    pub fn deal_new_card(&mut self, table: &Table) -> Result<Card, GameError> {
        let in_play: HashSet<(Suit, Rank)> = table.cards_in_play().map(Card::face).collect();
        if in_play.len() >= DECK_SIZE {
            return Err(GameError::DeckExhausted);
        }

        loop {
            let card = Card::random(&mut self.rng);
            if !in_play.contains(&card.face()) {
                return Ok(card);
            }
        }
    }

    /// 玩家要牌。加牌后处理 A 并计分，超过 21 点则按爆牌结束。
    pub fn player_hit(&mut self, table: &mut Table) -> Result<(), GameError> {
        if table.is_finished() {
            return Err(GameError::RoundFinished);
        }

        let card = self.deal_new_card(table)?;
        debug!(player = %table.player.username, %card, "玩家要牌");
        table.player.hand.cards.push(card);
        handle_aces(&mut table.player.hand);

        if table.player.hand.score > BLACKJACK {
            end_game_from_user_bust(table);
        }
        Ok(())
    }

    /// 玩家停牌
    pub fn stand(&mut self, table: &mut Table) -> Result<(), GameError> {
        if table.is_finished() {
            return Err(GameError::RoundFinished);
        }
        self.finish_game(table)
    }

    /// 庄家行动、判定结果并结算
    pub fn finish_game(&mut self, table: &mut Table) -> Result<(), GameError> {
        // 牌桌由调用方传回，分数以牌面为准
        handle_aces(&mut table.player.hand);
        if table.player.hand.score > BLACKJACK {
            end_game_from_user_bust(table);
            return Ok(());
        }
        self.play_dealers_turn(table)?;

        let result = determine_result(table.player.hand.score, table.dealer.hand.score);
        table.result = Some(result);
        settle(table);
        Ok(())
    }

    /// 庄家在不足 17 点且不领先玩家时持续要牌
    fn play_dealers_turn(&mut self, table: &mut Table) -> Result<(), GameError> {
        handle_aces(&mut table.dealer.hand);

        while table.dealer.hand.score < DEALER_STANDS_AT
            && table.dealer.hand.score <= table.player.hand.score
        {
            let card = self.deal_new_card(table)?;
            debug!(%card, "庄家要牌");
            table.dealer.hand.cards.push(card);
            handle_aces(&mut table.dealer.hand);
        }
        Ok(())
    }
}

// --- 单元测试 ---
