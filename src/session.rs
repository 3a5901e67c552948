//! Interactive game sessions against a trained agent
//!
//! A [`SessionStore`] owns every open game. Each game gets its own agent, a
//! copy of the store's template, so sessions never share mutable state.
//! The human always plays X and moves first.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    analysis::{MoveValuation, TreeGenerator, TreeNode, move_values},
    td::Agent,
    tictactoe::{Board, GameOutcome, Player},
    types::Position,
};

/// Default depth bound for session trees
pub const DEFAULT_TREE_DEPTH: usize = 2;

const HUMAN: Player = Player::X;

/// Opaque handle to an open game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Finished,
}

/// Result of a finished game from the human's side of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Human,
    Agent,
    Draw,
}

impl Winner {
    fn from_outcome(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Win(player) if player == HUMAN => Winner::Human,
            GameOutcome::Win(_) => Winner::Agent,
            GameOutcome::Draw => Winner::Draw,
        }
    }
}

/// Which board a session tree was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeSource {
    /// The board the agent last chose its reply on
    DecisionContext,
    /// No reply yet; the live board
    CurrentState,
}

/// Reply to [`SessionStore::new_game`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGame {
    pub id: SessionId,
    pub board: Board,
    pub status: GameStatus,
}

/// Reply to [`SessionStore::make_move`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReply {
    pub board: Board,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    /// Absent when the human's move ended the game
    pub agent_move: Option<Position>,
    /// The agent's valuation of the position it replied to
    pub move_values: Option<MoveValuation>,
}

/// Reply to [`SessionStore::game_tree`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionTree {
    /// `None` when the source board is already decided
    pub tree: Option<TreeNode>,
    pub current_board: Board,
    pub source: TreeSource,
}

#[derive(Debug, Clone)]
struct GameSession {
    board: Board,
    agent: Agent,
    decision_board: Option<Board>,
}

/// Open games keyed by [`SessionId`]
#[derive(Debug)]
pub struct SessionStore {
    template: Agent,
    sessions: HashMap<SessionId, GameSession>,
    next_id: u64,
}

impl SessionStore {
    /// Store whose sessions play with copies of `template`.
    ///
    /// The template must play O. It is switched to inference mode (ε = 0,
    /// learning off) so sessions never explore or touch their tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlayerMismatch`] if the template plays X.
    pub fn new(mut template: Agent) -> Result<Self> {
        if template.player() == HUMAN {
            return Err(Error::PlayerMismatch {
                expected: HUMAN.opponent(),
                found: template.player(),
            });
        }
        if template.is_learning() {
            template.set_learning(false);
        }
        template.set_epsilon(0.0);

        Ok(Self {
            template,
            sessions: HashMap::new(),
            next_id: 1,
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn board(&self, id: SessionId) -> Result<Board> {
        Ok(self.session(id)?.board)
    }

    pub fn new_game(&mut self) -> NewGame {
        let id = SessionId(self.next_id);
        self.next_id += 1;

        let mut agent = self.template.clone();
        if let Some(seed) = self.template.rng_seed() {
            agent.set_rng_seed(seed.wrapping_add(id.0));
        }

        let board = Board::new();
        self.sessions.insert(
            id,
            GameSession {
                board,
                agent,
                decision_board: None,
            },
        );

        NewGame {
            id,
            board,
            status: GameStatus::Active,
        }
    }

    /// Play the human's move at (`row`, `col`) and, unless that ends the
    /// game, the agent's reply.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSession`] for an id this store never issued or already closed
    /// - [`Error::GameOver`] if the game has already finished
    /// - [`Error::InvalidMove`] for an out-of-range or occupied cell; the board is unchanged
    pub fn make_move(&mut self, id: SessionId, row: usize, col: usize) -> Result<MoveReply> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(Error::UnknownSession { id: id.0 })?;

        if session.board.is_terminal() {
            return Err(Error::GameOver);
        }
        session.board.apply_move(row, col, HUMAN)?;

        if let Some(outcome) = session.board.winner() {
            return Ok(MoveReply {
                board: session.board,
                status: GameStatus::Finished,
                winner: Some(Winner::from_outcome(outcome)),
                agent_move: None,
                move_values: None,
            });
        }

        let valuation = move_values(&mut session.agent, &session.board);
        session.decision_board = Some(session.board);

        let reply = session.agent.action(&session.board)?;
        let agent_player = session.agent.player();
        session
            .board
            .apply_move(reply.row(), reply.col(), agent_player)?;

        let outcome = session.board.winner();
        Ok(MoveReply {
            board: session.board,
            status: if outcome.is_some() {
                GameStatus::Finished
            } else {
                GameStatus::Active
            },
            winner: outcome.map(Winner::from_outcome),
            agent_move: Some(reply),
            move_values: Some(valuation),
        })
    }

    /// Decision tree for the board the agent last decided on, or the live
    /// board before its first reply. `None` expands to full depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] for an unknown id.
    pub fn game_tree(&self, id: SessionId, max_depth: Option<usize>) -> Result<SessionTree> {
        let session = self.session(id)?;

        let (root, source) = match session.decision_board {
            Some(board) => (board, TreeSource::DecisionContext),
            None => (session.board, TreeSource::CurrentState),
        };

        let mut generator = TreeGenerator::for_agent(&session.agent);
        if let Some(depth) = max_depth {
            generator = generator.with_max_depth(depth);
        }

        Ok(SessionTree {
            tree: generator.generate(&root, session.agent.player()),
            current_board: session.board,
            source,
        })
    }

    /// Close a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if the id is not open.
    pub fn end_game(&mut self, id: SessionId) -> Result<()> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::UnknownSession { id: id.0 })
    }

    fn session(&self, id: SessionId) -> Result<&GameSession> {
        self.sessions
            .get(&id)
            .ok_or(Error::UnknownSession { id: id.0 })
    }
}
