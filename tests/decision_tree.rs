//! Decision tree and heuristic scenarios

use tdtoe::{
    analysis::{TreeGenerator, TreeNode, ValueSource, evaluate_position, move_values},
    app::AgentConfig,
    td::{Agent, ValueTable},
    tictactoe::{Board, GameOutcome, Player},
    types::Position,
};

fn board(s: &str) -> Board {
    Board::from_string(s).unwrap()
}

fn all_nodes<'a>(node: &'a TreeNode, out: &mut Vec<&'a TreeNode>) {
    out.push(node);
    for mv in &node.moves {
        if let Some(child) = &mv.child {
            all_nodes(child, out);
        }
    }
}

#[test]
fn test_full_tree_from_empty_board() {
    let agent = Agent::new(AgentConfig::new(Player::O).with_epsilon(0.0).with_seed(1)).unwrap();
    let tree = TreeGenerator::for_agent(&agent)
        .generate(&Board::new(), Player::O)
        .unwrap();

    assert_eq!(tree.moves.len(), 9);
    assert!(tree.expanded);
    assert_eq!(tree.node_count(), 294_778);
    assert_eq!(tree.max_depth(), 8);

    let mut nodes = Vec::new();
    all_nodes(&tree, &mut nodes);
    for node in nodes {
        assert!(node.moves.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(node.expanded, node.depth == 0);
        for mv in &node.moves {
            assert_eq!(mv.player, node.player);
            assert_eq!(mv.child.is_none(), mv.board.is_terminal());
            assert_eq!(mv.has_children, mv.child.as_ref().is_some_and(|c| c.has_children()));
        }
    }
}

#[test]
fn test_heuristic_prefers_blocking_without_training() {
    // X X .
    // . O .
    // . . .
    let position = board("XX..O....");
    let empty = ValueTable::new();
    let tree = TreeGenerator::new(&empty, 0.0)
        .with_max_depth(0)
        .generate(&position, Player::O)
        .unwrap();

    let block = Position::new(2).unwrap();
    let best = tree.best_move().unwrap();
    assert_eq!(best.position, block);
    assert_eq!(best.source, ValueSource::Heuristic);
    for mv in tree.moves.iter().skip(1) {
        assert!(best.value > mv.value, "{} scored {}", mv.position, mv.value);
    }

    let direct = evaluate_position(&position.with_move(block, Player::O), Player::O);
    assert_eq!(best.value, direct);
}

#[test]
fn test_draw_board_has_no_tree() {
    // X O X
    // X O O
    // O X X
    let full = board("XOXXOOOXX");
    assert_eq!(full.winner(), Some(GameOutcome::Draw));

    let empty = ValueTable::new();
    assert!(TreeGenerator::new(&empty, 0.0).generate(&full, Player::X).is_none());
    assert!(TreeGenerator::new(&empty, 0.0).generate(&full, Player::O).is_none());
}

#[test]
fn test_trained_values_feed_tree_and_snapshot() {
    let mut agent = Agent::new(AgentConfig::inference(Player::O).with_seed(3)).unwrap();
    let position = board("X...O...X");

    let valuation = move_values(&mut agent, &position);
    let tree = TreeGenerator::for_agent(&agent)
        .with_max_depth(0)
        .generate(&position, Player::O)
        .unwrap();

    assert_eq!(valuation.values.len(), tree.moves.len());
    for mv in &tree.moves {
        assert_eq!(mv.source, ValueSource::Trained);
        assert_eq!(valuation.value_at(mv.position), Some(mv.value));
    }
}
