//! Fixtures that drive games through the public services.

use backend_test_support::unique_helpers::unique_display_name;
use bluff_backend::db::require_db;
use bluff_backend::repos::answers::{self, Answer};
use bluff_backend::repos::rounds::Round;
use bluff_backend::services::games::GameService;
use bluff_backend::services::questions::QuestionService;
use bluff_backend::services::round_flow::RoundFlowService;
use bluff_backend::AppState;

pub const PROMPT: &str = "What is the capital of France?";
pub const TRUTH: &str = "Paris";

#[derive(Debug, Clone)]
pub struct PlayingGame {
    pub game_id: i64,
    pub join_code: String,
    /// Host first, then joiners in join order
    pub player_ids: Vec<i64>,
}

impl PlayingGame {
    pub fn host(&self) -> i64 {
        self.player_ids[0]
    }

    pub fn player(&self, idx: usize) -> i64 {
        self.player_ids[idx]
    }
}

/// Game in `waiting` with `players` seated (host included), all connected.
pub async fn setup_waiting_game(state: &AppState, players: usize, round_count: i16) -> PlayingGame {
    let games = GameService::new();
    let created = games
        .create_game(state, &unique_display_name("host"), round_count, 16)
        .await
        .expect("create game");

    let mut player_ids = vec![created.player.id];
    for _ in 1..players {
        let joined = games
            .join_game(state, &created.game.join_code, &unique_display_name("p"))
            .await
            .expect("join game");
        player_ids.push(joined.player.id);
    }

    PlayingGame {
        game_id: created.game.id,
        join_code: created.game.join_code,
        player_ids,
    }
}

/// Game in `playing`, round 1 not yet opened.
pub async fn setup_playing_game(state: &AppState, players: usize, round_count: i16) -> PlayingGame {
    let game = setup_waiting_game(state, players, round_count).await;
    GameService::new()
        .start_game(state, game.game_id, game.host())
        .await
        .expect("start game");
    game
}

pub async fn create_question(state: &AppState) -> i64 {
    QuestionService::new()
        .create_question(state, PROMPT, TRUTH)
        .await
        .expect("create question")
        .id
}

/// Playing game with its current round open for answers.
pub async fn setup_answering_round(
    state: &AppState,
    players: usize,
    round_count: i16,
) -> (PlayingGame, Round) {
    let game = setup_playing_game(state, players, round_count).await;
    let round = open_round(state, &game).await;
    (game, round)
}

pub async fn open_round(state: &AppState, game: &PlayingGame) -> Round {
    let question_id = create_question(state).await;
    RoundFlowService::from_state(state)
        .open_round(state, game.game_id, game.host(), question_id)
        .await
        .expect("open round")
}

pub async fn correct_answer(state: &AppState, round_id: i64) -> Answer {
    answers::find_correct(require_db(state).expect("db"), round_id)
        .await
        .expect("query correct answer")
        .expect("correct answer seeded")
}
