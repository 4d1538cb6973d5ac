use crate::board::{Board, MoveError};
use crate::player::Player;

/// 対局の進行状態
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    BlackToMove,
    WhiteToMove,
    /// 直前の着手で相手がパスになり、同じ側が続けて打つ
    Passed,
    Over,
}

/// 手番の交替・パス・終局の検出を担う対局コントローラ
pub struct Game {
    pub board: Board,
    state: GameState,
    turn: Player,
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            state: GameState::NotStarted,
            turn: Player::Black,
        }
    }

    /// 対局を開始する（黒番から）
    pub fn start(&mut self) {
        self.state = GameState::BlackToMove;
        self.turn = Player::Black;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// 現在の手番を返す。開始前・終局後は None
    pub fn to_move(&self) -> Option<Player> {
        match self.state {
            GameState::BlackToMove => Some(Player::Black),
            GameState::WhiteToMove => Some(Player::White),
            GameState::Passed => Some(self.turn),
            GameState::NotStarted | GameState::Over => None,
        }
    }

    /// 現在の手番の合法手一覧
    pub fn available_moves(&self) -> Vec<usize> {
        match self.to_move() {
            Some(player) => self.board.legal_moves(player),
            None => Vec::new(),
        }
    }

    /// パスの通知を確認し、同じ側の手番に戻す
    pub fn acknowledge_pass(&mut self) {
        if self.state == GameState::Passed {
            self.state = match self.turn {
                Player::Black => GameState::BlackToMove,
                Player::White => GameState::WhiteToMove,
            };
        }
    }

    /// 現在の手番で着手し、状態を進める
    ///
    /// 着手後に相手に合法手があれば手番交替。なければ相手はパスとなり
    /// Passed 状態で同じ側が続行する。両者に合法手がなければ終局。
    pub fn play(&mut self, pos: usize) -> Result<GameState, MoveError> {
        let mover = match self.to_move() {
            Some(player) => player,
            None => return Ok(self.state),
        };

        self.board.apply_move(mover, pos)?;

        let opponent = mover.opponent();
        if !self.board.legal_moves(opponent).is_empty() {
            self.turn = opponent;
            self.state = match opponent {
                Player::Black => GameState::BlackToMove,
                Player::White => GameState::WhiteToMove,
            };
        } else if !self.board.legal_moves(mover).is_empty() {
            self.turn = mover;
            self.state = GameState::Passed;
        } else {
            self.state = GameState::Over;
        }

        Ok(self.state)
    }

    /// 終局時の勝者（引き分けは None）
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_black_to_move() {
        let mut game = Game::new();
        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.to_move(), None);

        game.start();
        assert_eq!(game.state(), GameState::BlackToMove);
        assert_eq!(game.to_move(), Some(Player::Black));
        assert_eq!(game.available_moves(), vec![19, 26, 37, 44]);
    }

    #[test]
    fn alternates_turns_after_moves() {
        let mut game = Game::new();
        game.start();

        assert_eq!(game.play(19).unwrap(), GameState::WhiteToMove);
        assert_eq!(game.to_move(), Some(Player::White));
    }

    #[test]
    fn illegal_move_leaves_state_unchanged() {
        let mut game = Game::new();
        game.start();

        let before = game.board;
        assert!(game.play(0).is_err());
        assert_eq!(game.state(), GameState::BlackToMove);
        assert_eq!(game.board, before);
    }

    #[test]
    fn double_stuck_position_is_over() {
        // 黒1石・白1石だけの盤面同士が離れていれば双方打てない
        let mut board = Board::empty();
        board.set_disc(0, Player::Black);
        board.set_disc(63, Player::White);
        assert!(board.is_game_over());
    }

    #[test]
    fn pass_keeps_same_side_to_move() {
        // 黒が0に打って1を取ると白は55しか残らず打つ手がない。
        // 黒には47（55を挟む手）が残るので白はパス、黒が続行する
        let mut board = Board::empty();
        board.set_disc(2, Player::Black);
        board.set_disc(63, Player::Black);
        board.set_disc(1, Player::White);
        board.set_disc(55, Player::White);
        let mut game = Game {
            board,
            state: GameState::BlackToMove,
            turn: Player::Black,
        };

        assert_eq!(game.play(0).unwrap(), GameState::Passed);
        assert_eq!(game.to_move(), Some(Player::Black));

        game.acknowledge_pass();
        assert_eq!(game.state(), GameState::BlackToMove);

        // 55を取ると白が全滅し、双方に合法手がなく終局
        assert_eq!(game.play(47).unwrap(), GameState::Over);
        assert_eq!(game.winner(), Some(Player::Black));
    }

    #[test]
    fn eliminating_the_opponent_ends_the_game() {
        let mut board = Board::empty();
        board.set_disc(0, Player::White);
        board.set_disc(1, Player::Black);
        let mut game = Game {
            board,
            state: GameState::WhiteToMove,
            turn: Player::White,
        };

        assert_eq!(game.play(2).unwrap(), GameState::Over);
        assert_eq!(game.winner(), Some(Player::White));
    }
}
