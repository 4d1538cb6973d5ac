use crate::player::Player;
use std::fmt;
use thiserror::Error;

// 初期配置（0起点の行優先インデックス）
const DEFAULT_BLACK: [usize; 2] = [28, 35];
const DEFAULT_WHITE: [usize; 2] = [27, 36];

// 位置評価の重みテーブル
// 角の価値は非常に高く、角の斜め隣は大きなマイナス
const POSITION_WEIGHTS: [i32; 64] = [
    120, -20, 20, 5, 5, 20, -20, 120, //
    -20, -40, -5, -5, -5, -5, -40, -20, //
    20, -5, 15, 3, 3, 15, -5, 20, //
    5, -5, 3, 3, 3, 3, -5, 5, //
    5, -5, 3, 3, 3, 3, -5, 5, //
    20, -5, 15, 3, 3, 15, -5, 20, //
    -20, -40, -5, -5, -5, -5, -40, -20, //
    120, -20, 20, 5, 5, 20, -20, 120,
];

// 8方向のオフセット（行優先インデックス上での差分）
const DIRECTIONS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// 各マスの有効な隣接オフセットの事前計算テーブル
/// （盤外と、左右端をまたぐ列ラップを刈り込み済み）
const ADJACENT_OFFSETS: [([i8; 8], usize); 64] = build_adjacent_offsets();

const fn build_adjacent_offsets() -> [([i8; 8], usize); 64] {
    let mut table = [([0i8; 8], 0usize); 64];
    let mut pos = 0;
    while pos < 64 {
        let col = pos % 8;
        let mut offsets = [0i8; 8];
        let mut len = 0;
        let mut i = 0;
        while i < 8 {
            let target = pos as i32 + DIRECTIONS[i] as i32;
            let mut valid = target >= 0 && target <= 63;
            // 列0から列7へ（またはその逆へ）のラップは隣接とみなさない
            if col == 0 && target >= 0 && target % 8 == 7 {
                valid = false;
            }
            if col == 7 && target % 8 == 0 {
                valid = false;
            }
            if valid {
                offsets[len] = DIRECTIONS[i];
                len += 1;
            }
            i += 1;
        }
        table[pos] = (offsets, len);
        pos += 1;
    }
    table
}

/// 不正な着手の種別
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("position {0} is outside the board")]
    OutOfBounds(usize),
    #[error("position {0} is already occupied")]
    Occupied(usize),
    #[error("move at position {0} captures no pieces")]
    NoCaptures(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    positions: [Option<Player>; 64],
}

impl Board {
    /// 新しいボードを初期配置で作成
    pub fn new() -> Self {
        let mut board = Board::empty();
        for &pos in &DEFAULT_BLACK {
            board.positions[pos] = Some(Player::Black);
        }
        for &pos in &DEFAULT_WHITE {
            board.positions[pos] = Some(Player::White);
        }
        board
    }

    /// 空のボードを作成（任意局面の構築用）
    pub fn empty() -> Self {
        Board {
            positions: [None; 64],
        }
    }

    /// 指定位置の石を取得
    #[inline]
    pub fn disc(&self, pos: usize) -> Option<Player> {
        if pos >= 64 {
            return None;
        }
        self.positions[pos]
    }

    /// 指定位置に石を置く（反転処理なし、局面構築用）
    pub fn set_disc(&mut self, pos: usize, player: Player) {
        debug_assert!(pos < 64, "位置が範囲外です");
        self.positions[pos] = Some(player);
    }

    /// 1ステップ進めた位置を返す
    /// 盤外、または左右端をまたぐ列ラップで None
    /// 斜め・横方向のレイは何マスも進むため、ラップ判定は起点だけでなく
    /// 毎ステップ必要になる
    #[inline]
    fn step(pos: usize, offset: i8) -> Option<usize> {
        let col = pos % 8;
        if col == 7 && (offset == 1 || offset == 9 || offset == -7) {
            return None;
        }
        if col == 0 && (offset == -1 || offset == -9 || offset == 7) {
            return None;
        }
        let next = pos as i32 + offset as i32;
        if (0..64).contains(&next) {
            Some(next as usize)
        } else {
            None
        }
    }

    /// 合法手かどうかをチェック
    pub fn is_legal_move(&self, player: Player, pos: usize) -> bool {
        if pos >= 64 || self.positions[pos].is_some() {
            return false;
        }

        let opponent = player.opponent();
        let (offsets, len) = ADJACENT_OFFSETS[pos];

        for &offset in &offsets[..len] {
            let adjacent = (pos as i32 + offset as i32) as usize;
            if self.positions[adjacent] != Some(opponent) {
                continue;
            }
            // 相手の石の列をたどり、自分の石で止まれば合法
            let mut current = adjacent;
            while let Some(next) = Self::step(current, offset) {
                match self.positions[next] {
                    None => break,
                    Some(p) if p == player => return true,
                    Some(_) => current = next,
                }
            }
        }

        false
    }

    /// 反転対象の位置を全方向分まとめて計算
    fn compute_flips(&self, player: Player, pos: usize) -> Vec<usize> {
        let opponent = player.opponent();
        let (offsets, len) = ADJACENT_OFFSETS[pos];
        let mut flips = Vec::new();

        for &offset in &offsets[..len] {
            let adjacent = (pos as i32 + offset as i32) as usize;
            if self.positions[adjacent] != Some(opponent) {
                continue;
            }
            let mut run = vec![adjacent];
            let mut current = adjacent;
            while let Some(next) = Self::step(current, offset) {
                match self.positions[next] {
                    None => break,
                    Some(p) if p == player => {
                        // 挟んだ列が確定。ただし反転はまだ行わない。
                        // 他方向の走査中に盤面を書き換えると走査が壊れるため、
                        // 全方向の集合を取ってから一括で反転する
                        flips.extend_from_slice(&run);
                        break;
                    }
                    Some(_) => {
                        run.push(next);
                        current = next;
                    }
                }
            }
        }

        flips
    }

    /// 石を置いてひっくり返す
    /// 不正な着手はエラーを返し、盤面は変更しない
    pub fn apply_move(&mut self, player: Player, pos: usize) -> Result<(), MoveError> {
        if pos >= 64 {
            return Err(MoveError::OutOfBounds(pos));
        }
        if self.positions[pos].is_some() {
            return Err(MoveError::Occupied(pos));
        }

        let flips = self.compute_flips(player, pos);
        if flips.is_empty() {
            return Err(MoveError::NoCaptures(pos));
        }

        self.positions[pos] = Some(player);
        for flip in flips {
            self.positions[flip] = Some(player);
        }

        Ok(())
    }

    /// 合法手の一覧を昇順で取得
    pub fn legal_moves(&self, player: Player) -> Vec<usize> {
        (0..64)
            .filter(|&pos| self.is_legal_move(player, pos))
            .collect()
    }

    /// 位置評価：自分の石の重み合計から相手の石の重み合計を引く
    pub fn positional_score(&self, player: Player) -> i32 {
        let mut score = 0;
        for pos in 0..64 {
            match self.positions[pos] {
                Some(p) if p == player => score += POSITION_WEIGHTS[pos],
                Some(_) => score -= POSITION_WEIGHTS[pos],
                None => {}
            }
        }
        score
    }

    /// 石の数をカウント
    pub fn count_discs(&self, player: Player) -> u32 {
        self.positions
            .iter()
            .filter(|&&disc| disc == Some(player))
            .count() as u32
    }

    /// 両プレイヤーの石の数を取得
    pub fn count_all_discs(&self) -> (u32, u32) {
        (
            self.count_discs(Player::Black),
            self.count_discs(Player::White),
        )
    }

    /// パス判定
    pub fn is_pass_required(&self, player: Player) -> bool {
        self.legal_moves(player).is_empty()
    }

    /// ゲーム終了判定
    pub fn is_game_over(&self) -> bool {
        self.legal_moves(Player::Black).is_empty() && self.legal_moves(Player::White).is_empty()
    }

    /// 勝者を返す（引き分けは None）
    pub fn winner(&self) -> Option<Player> {
        let (black_count, white_count) = self.count_all_discs();
        if black_count > white_count {
            Some(Player::Black)
        } else if white_count > black_count {
            Some(Player::White)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;

        for row in 0..8 {
            write!(f, "{}|", row + 1)?;

            for col in 0..8 {
                match self.positions[row * 8 + col] {
                    Some(player) => write!(f, "{}|", player.to_char())?,
                    None => write!(f, " |")?,
                }
            }

            writeln!(f)?;
        }

        let (black_count, white_count) = self.count_all_discs();
        writeln!(f, "黒(X): {} 白(O): {}", black_count, white_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_table_trims_edges() {
        // 左上の角：右、下、右下のみ
        let (offsets, len) = ADJACENT_OFFSETS[0];
        assert_eq!(&offsets[..len], &[1, 8, 9]);

        // 右上の角：左、左下、下のみ
        let (offsets, len) = ADJACENT_OFFSETS[7];
        assert_eq!(&offsets[..len], &[-1, 7, 8]);

        // 内側のマスは8方向すべて
        let (_, len) = ADJACENT_OFFSETS[27];
        assert_eq!(len, 8);

        // 左端のマス：列7へのラップを含まない
        let (offsets, len) = ADJACENT_OFFSETS[8];
        assert_eq!(&offsets[..len], &[-8, -7, 1, 8, 9]);
    }

    #[test]
    fn step_rejects_column_wrap() {
        // 列7から右方向へは進めない（7 -> 8 のラップ禁止）
        assert_eq!(Board::step(7, 1), None);
        assert_eq!(Board::step(15, 9), None);
        assert_eq!(Board::step(23, -7), None);
        // 列0から左方向へは進めない
        assert_eq!(Board::step(8, -1), None);
        assert_eq!(Board::step(16, -9), None);
        assert_eq!(Board::step(8, 7), None);
        // 縦方向は端の列でも進める
        assert_eq!(Board::step(7, 8), Some(15));
        assert_eq!(Board::step(56, -8), Some(48));
    }
}
