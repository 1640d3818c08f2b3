use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use casino_royale_core::{
    handle_aces, GameError, GameManager, PlayerBetRequest, PlayerModel, PlayerUpdate, SeededRng, Table,
};
use parking_lot::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::store::{PlayerStore, StoreError};

/// 服务器全局状态。
/// 牌局本身不在服务端保存，这里只有玩家表和发牌用的随机源。
pub struct AppState {
    pub players: PlayerStore,
    dealer_rng: Mutex<SeededRng>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SeededRng::from_seed(seed),
            None => SeededRng::from_os_rng(),
        };
        Self {
            players: PlayerStore::new(config.starting_money),
            dealer_rng: Mutex::new(rng),
        }
    }

    /// 借用随机源构造一个引擎。锁只在同步代码里持有。
    fn with_manager<T>(&self, f: impl FnOnce(&mut GameManager<&mut SeededRng>) -> T) -> T {
        let mut rng = self.dealer_rng.lock();
        let mut manager = GameManager::new(&mut *rng);
        f(&mut manager)
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/blackjack/start-game", post(start_game))
        .route("/api/blackjack/player/hit", post(player_hit))
        .route("/api/blackjack/player/stay", post(player_stay))
        .route("/api/players", get(list_players).post(add_player))
        .route("/api/players/{key}", get(get_player).put(update_player).delete(remove_player))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- 21 点 ---

async fn start_game(
    State(state): State<SharedState>,
    Json(request): Json<PlayerBetRequest>,
) -> Result<Json<Table>, ApiError> {
    request.validate()?;

    let table = state.with_manager(|manager| {
        let mut table = manager.start_new_game(&request)?;
        handle_aces(&mut table.player.hand);
        Ok::<_, GameError>(table)
    })?;

    info!("玩家 {} 下注 {} 开局", table.player.username, table.player.current_bet);
    Ok(Json(table))
}

async fn player_hit(
    State(state): State<SharedState>,
    Json(mut table): Json<Table>,
) -> Result<Json<Table>, ApiError> {
    state.with_manager(|manager| manager.player_hit(&mut table))?;
    Ok(Json(table))
}

async fn player_stay(
    State(state): State<SharedState>,
    Json(mut table): Json<Table>,
) -> Result<Json<Table>, ApiError> {
    state.with_manager(|manager| manager.stand(&mut table))?;
    Ok(Json(table))
}

// --- 玩家 ---

async fn list_players(State(state): State<SharedState>) -> Json<Vec<PlayerModel>> {
    Json(state.players.all().iter().map(PlayerModel::from).collect())
}

/// 纯数字按 id 查找，否则按用户名查找
async fn get_player(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<PlayerModel>, ApiError> {
    let record = key
        .parse::<u32>()
        .ok()
        .and_then(|id| state.players.get_by_id(id))
        .or_else(|| state.players.get_by_username(&key))
        .ok_or(StoreError::NotFound(key))?;
    Ok(Json(PlayerModel::from(&record)))
}

async fn add_player(
    State(state): State<SharedState>,
    Json(username): Json<String>,
) -> Result<(StatusCode, Json<PlayerModel>), ApiError> {
    let record = state.players.add(&username)?;
    Ok((StatusCode::CREATED, Json(PlayerModel::from(&record))))
}

async fn update_player(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Json(update): Json<PlayerUpdate>,
) -> Result<Json<PlayerModel>, ApiError> {
    let record = state.players.update(&username, &update)?;
    Ok(Json(PlayerModel::from(&record)))
}

async fn remove_player(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<String, ApiError> {
    let record = state.players.remove(&username)?;
    Ok(format!("Player '{}' was removed", record.username))
}
