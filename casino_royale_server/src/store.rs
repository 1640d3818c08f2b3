use std::sync::atomic::{AtomicU32, Ordering};

use casino_royale_core::{Money, PlayerModel, PlayerUpdate};
use chrono::{DateTime, Local};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Player {0} does not exist.")]
    NotFound(String),

    #[error("Player {0} already exists.")]
    AlreadyExists(String),

    #[error("Username cannot be empty.")]
    EmptyUsername,
}

/// 一条玩家记录
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub id: u32,
    pub username: String,
    pub current_money: Option<Money>,
    pub total_earned: Option<Money>,
    pub total_lost: Option<Money>,
    pub active: Option<bool>,
    pub last_updated: DateTime<Local>,
}

impl PlayerRecord {
    fn apply(&mut self, update: &PlayerUpdate) {
        if let Some(username) = &update.username {
            self.username = username.clone();
        }
        self.current_money = update.current_money.or(self.current_money);
        self.total_earned = update.total_earned.or(self.total_earned);
        self.total_lost = update.total_lost.or(self.total_lost);
        self.active = update.active.or(self.active);
        self.last_updated = Local::now();
    }
}

impl From<&PlayerRecord> for PlayerModel {
    fn from(record: &PlayerRecord) -> Self {
        PlayerModel {
            username: record.username.clone(),
            current_money: record.current_money,
            total_earned: record.total_earned,
            total_lost: record.total_lost,
            active: record.active,
        }
    }
}

/// 内存中的玩家表，按用户名索引。
/// 读操作直接走 DashMap；写操作先拿 `writes` 锁，改名涉及两个键，必须整体完成。
pub struct PlayerStore {
    players: DashMap<String, PlayerRecord>,
    writes: Mutex<()>,
    next_id: AtomicU32,
    starting_money: Money,
}

impl PlayerStore {
    pub fn new(starting_money: Money) -> Self {
        Self {
            players: DashMap::new(),
            writes: Mutex::new(()),
            next_id: AtomicU32::new(1),
            starting_money,
        }
    }

    /// 所有玩家，按 id 排序
    pub fn all(&self) -> Vec<PlayerRecord> {
        let mut players: Vec<PlayerRecord> = self.players.iter().map(|p| p.value().clone()).collect();
        players.sort_by_key(|p| p.id);
        players
    }

    pub fn get_by_id(&self, id: u32) -> Option<PlayerRecord> {
        self.players.iter().find(|p| p.id == id).map(|p| p.value().clone())
    }

    pub fn get_by_username(&self, username: &str) -> Option<PlayerRecord> {
        self.players.get(username).map(|p| p.value().clone())
    }

    /// 以默认钱包创建新玩家
    pub fn add(&self, username: &str) -> Result<PlayerRecord, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::EmptyUsername);
        }

        let _guard = self.writes.lock();
        match self.players.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(username.to_string())),
            Entry::Vacant(slot) => {
                let record = PlayerRecord {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    username: username.to_string(),
                    current_money: Some(self.starting_money),
                    total_earned: Some(0.0),
                    total_lost: Some(0.0),
                    active: Some(false),
                    last_updated: Local::now(),
                };
                slot.insert(record.clone());
                info!("新增玩家 {} (id={})", record.username, record.id);
                Ok(record)
            }
        }
    }

    pub fn remove(&self, username: &str) -> Result<PlayerRecord, StoreError> {
        let _guard = self.writes.lock();
        let (_, record) = self
            .players
            .remove(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
        info!("删除玩家 {}", username);
        Ok(record)
    }

    /// 部分更新，更新中为空的字段保持原值。改名时会检查新名字是否已被占用。
    pub fn update(&self, username: &str, update: &PlayerUpdate) -> Result<PlayerRecord, StoreError> {
        let renamed_to = update.username.as_deref().map(str::trim).filter(|name| *name != username);

        let _guard = self.writes.lock();
        let record = match renamed_to {
            None => {
                let mut entry = self
                    .players
                    .get_mut(username)
                    .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
                entry.apply(update);
                entry.username = username.to_string();
                entry.value().clone()
            }
            Some(new_name) => {
                if new_name.is_empty() {
                    return Err(StoreError::EmptyUsername);
                }
                if self.players.contains_key(new_name) {
                    return Err(StoreError::AlreadyExists(new_name.to_string()));
                }
                let mut record = self
                    .get_by_username(username)
                    .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
                record.apply(update);
                record.username = new_name.to_string();
                // 先插入新名字再删旧名字，读者任何时刻都能查到这名玩家
                self.players.insert(record.username.clone(), record.clone());
                self.players.remove(username);
                info!("玩家 {} 改名为 {}", username, record.username);
                record
            }
        };

        info!("更新玩家 {}", record.username);
        Ok(record)
    }
}
