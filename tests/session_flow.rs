//! Game sessions end to end, backed by a persisted table

use std::path::Path;

use tdtoe::{
    Error,
    adapters::InMemoryRepository,
    app::{AgentConfig, App},
    session::{GameStatus, SessionStore, TreeSource, Winner},
    tictactoe::{Cell, Player},
    training::{TrainingConfig, train},
};

fn trained_store() -> SessionStore {
    let repo = InMemoryRepository::new();
    let app = App::for_testing()
        .with_repository(repo)
        .with_default_seed(10)
        .build();

    let run = train(&TrainingConfig {
        episodes: 2_000,
        seed: Some(10),
        ..TrainingConfig::default()
    })
    .unwrap();
    app.save_agent(&run.o_agent, Path::new("o")).unwrap();

    let (agent, outcome) = app
        .load_agent(AgentConfig::inference(Player::O).with_loss_value(-1.0), Path::new("o"))
        .unwrap();
    assert!(outcome.is_loaded());
    SessionStore::new(agent).unwrap()
}

#[test]
fn test_sessions_are_independent() {
    let mut store = trained_store();
    let a = store.new_game().id;
    let b = store.new_game().id;

    store.make_move(a, 0, 0).unwrap();
    assert_eq!(store.board(b).unwrap().occupied_count(), 0);

    store.make_move(b, 2, 2).unwrap();
    assert_eq!(store.board(a).unwrap().cells[0], Cell::X);
    assert_eq!(store.board(b).unwrap().cells[8], Cell::X);

    store.end_game(a).unwrap();
    assert!(matches!(store.board(a), Err(Error::UnknownSession { .. })));
    assert!(store.board(b).is_ok());
}

#[test]
fn test_rejected_moves_keep_the_board() {
    let mut store = trained_store();
    let id = store.new_game().id;

    let first = store.make_move(id, 0, 0).unwrap();
    let reply = first.agent_move.unwrap();
    let before = store.board(id).unwrap();

    for (row, col) in [(0, 0), (reply.row(), reply.col()), (3, 1), (1, 9)] {
        assert!(matches!(
            store.make_move(id, row, col),
            Err(Error::InvalidMove { .. })
        ));
    }
    assert_eq!(store.board(id).unwrap(), before);
}

#[test]
fn test_tree_follows_decision_context() {
    let mut store = trained_store();
    let id = store.new_game().id;

    store.make_move(id, 1, 1).unwrap();
    let response = store.game_tree(id, None).unwrap();

    assert_eq!(response.source, TreeSource::DecisionContext);
    let tree = response.tree.unwrap();
    assert_eq!(tree.board.occupied_count(), 1);
    assert_eq!(tree.moves.len(), 8);
    assert_eq!(response.current_board.occupied_count(), 2);
}

#[test]
fn test_full_game_reaches_a_result() {
    let mut store = trained_store();
    let id = store.new_game().id;

    let mut winner = None;
    while winner.is_none() {
        let board = store.board(id).unwrap();
        let next = board.empty_positions()[0];
        let reply = store.make_move(id, next.row(), next.col()).unwrap();
        if reply.status == GameStatus::Finished {
            winner = reply.winner;
        }
    }

    assert!(matches!(winner, Some(Winner::Human | Winner::Agent | Winner::Draw)));
    assert!(matches!(store.make_move(id, 0, 0), Err(Error::GameOver)));
}
