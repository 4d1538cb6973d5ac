//! 盤面ロジックの結合テスト
//!
//! 合法手判定・反転処理・端の扱いを検証する。

#[cfg(test)]
mod tests {
    use gridothello::{Board, MoveError, Player};

    #[test]
    fn opening_legal_moves_for_black() {
        let board = Board::new();
        assert_eq!(board.legal_moves(Player::Black), vec![19, 26, 37, 44]);
    }

    #[test]
    fn opening_legal_moves_for_white() {
        let board = Board::new();
        assert_eq!(board.legal_moves(Player::White), vec![20, 29, 34, 43]);
    }

    #[test]
    fn applying_opening_move_flips_one_disc() {
        let mut board = Board::new();
        board.apply_move(Player::Black, 19).unwrap();

        // d3への着手で27だけが黒に反転する
        assert_eq!(board.disc(19), Some(Player::Black));
        assert_eq!(board.disc(27), Some(Player::Black));
        assert_eq!(board.disc(36), Some(Player::White));
        assert_eq!(board.count_all_discs(), (4, 1));
    }

    #[test]
    fn legal_moves_match_per_cell_checks() {
        // 列挙結果と個別判定が常に一致し、占有マスを含まないこと
        let mut board = Board::new();
        let sequence = [19usize, 18, 17, 26, 25];
        let mut player = Player::Black;

        for &pos in &sequence {
            for check in [Player::Black, Player::White] {
                let enumerated = board.legal_moves(check);
                let individual: Vec<usize> = (0..64)
                    .filter(|&p| board.is_legal_move(check, p))
                    .collect();
                assert_eq!(enumerated, individual);
                for &p in &enumerated {
                    assert_eq!(board.disc(p), None);
                }
            }

            if board.is_legal_move(player, pos) {
                board.apply_move(player, pos).unwrap();
            }
            player = player.opponent();
        }
    }

    #[test]
    fn rays_do_not_wrap_across_the_right_edge() {
        // 白7黒8の並びで6に打っても、7から8へ列をまたぐレイは成立しない
        let mut board = Board::empty();
        board.set_disc(7, Player::White);
        board.set_disc(8, Player::Black);
        assert!(!board.is_legal_move(Player::Black, 6));
        assert!(board.legal_moves(Player::Black).is_empty());
    }

    #[test]
    fn rays_do_not_wrap_across_the_left_edge() {
        let mut board = Board::empty();
        board.set_disc(8, Player::White);
        board.set_disc(7, Player::Black);
        assert!(!board.is_legal_move(Player::Black, 9));
        assert!(board.legal_moves(Player::Black).is_empty());
    }

    #[test]
    fn diagonal_ray_stops_at_the_edge_mid_walk() {
        // 右下方向(+9)のレイが列7に達した後、列0へ回り込まないこと
        let mut board = Board::empty();
        board.set_disc(14, Player::White);
        board.set_disc(23, Player::White);
        // 23の次の+9は32(列0)だが、そこに黒を置いても挟みは成立しない
        board.set_disc(32, Player::Black);
        assert!(!board.is_legal_move(Player::Black, 5));

        // 正しい終端を置けば成立する
        let mut board = Board::empty();
        board.set_disc(14, Player::White);
        board.set_disc(23, Player::Black);
        assert!(board.is_legal_move(Player::Black, 5));
    }

    #[test]
    fn apply_move_rejects_occupied_cell() {
        let mut board = Board::new();
        let before = board;
        assert_eq!(
            board.apply_move(Player::Black, 27),
            Err(MoveError::Occupied(27))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn apply_move_rejects_non_capturing_cell() {
        let mut board = Board::new();
        let before = board;
        assert_eq!(
            board.apply_move(Player::Black, 0),
            Err(MoveError::NoCaptures(0))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn apply_move_rejects_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(Player::Black, 64),
            Err(MoveError::OutOfBounds(64))
        );
    }

    #[test]
    fn occupied_count_never_decreases() {
        let mut board = Board::new();
        let mut player = Player::Black;

        // 双方が最初の合法手を選ぶ決定的な進行で不変条件を確認
        for _ in 0..20 {
            let moves = board.legal_moves(player);
            if moves.is_empty() {
                if board.legal_moves(player.opponent()).is_empty() {
                    break;
                }
                player = player.opponent();
                continue;
            }

            let (black_before, white_before) = board.count_all_discs();
            board.apply_move(player, moves[0]).unwrap();
            let (black_after, white_after) = board.count_all_discs();

            assert_eq!(black_after + white_after, black_before + white_before + 1);
            player = player.opponent();
        }
    }

    #[test]
    fn overlapping_rays_flip_the_union() {
        // 1手で複数方向を同時に挟む局面：全方向の和集合が一括で反転する
        //   黒18に打つと、横(19-20-21)と縦(26-34-42)の両方を反転
        let mut board = Board::empty();
        board.set_disc(19, Player::White);
        board.set_disc(20, Player::White);
        board.set_disc(21, Player::Black);
        board.set_disc(26, Player::White);
        board.set_disc(34, Player::White);
        board.set_disc(42, Player::Black);

        board.apply_move(Player::Black, 18).unwrap();
        for pos in [18, 19, 20, 26, 34] {
            assert_eq!(board.disc(pos), Some(Player::Black));
        }
        assert_eq!(board.count_discs(Player::White), 0);
    }

    #[test]
    fn positional_score_is_antisymmetric() {
        let mut board = Board::new();
        board.apply_move(Player::Black, 19).unwrap();
        assert_eq!(
            board.positional_score(Player::Black),
            -board.positional_score(Player::White)
        );
    }

    #[test]
    fn positional_score_after_opening_move() {
        // 黒19の後: 黒{19,27,28,35}(各3), 白{36}(3) → 12 - 3 = 9
        let mut board = Board::new();
        board.apply_move(Player::Black, 19).unwrap();
        assert_eq!(board.positional_score(Player::Black), 9);
    }
}
