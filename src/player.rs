#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// 相手のプレイヤーを返す
    pub fn opponent(&self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// 文字列表現を返す
    pub fn name(&self) -> &'static str {
        match self {
            Player::Black => "黒",
            Player::White => "白",
        }
    }

    /// 文字表現を返す
    pub fn to_char(&self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
        }
    }
}
