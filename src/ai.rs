use crate::board::Board;
use crate::player::Player;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// 探索の既定の深さ
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// ランダムシミュレーションの既定の総予算（全候補手で分け合う）
pub const DEFAULT_ROLLOUT_BUDGET: usize = 500;

/// 候補手ごとのランダムシミュレーション結果の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloutTally {
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
}

impl RolloutTally {
    fn record(&mut self, winner: Option<Player>) {
        match winner {
            Some(Player::Black) => self.black_wins += 1,
            Some(Player::White) => self.white_wins += 1,
            None => self.draws += 1,
        }
    }

    /// 実施したシミュレーション回数
    pub fn trials(&self) -> u32 {
        self.black_wins + self.white_wins + self.draws
    }

    /// 指定プレイヤーの勝利数
    pub fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black_wins,
            Player::White => self.white_wins,
        }
    }
}

impl Board {
    /// ミニマックス探索：各合法手の先読みスコアを返す
    /// 戻り値は (位置, バックアップ済みスコア) の列（位置の昇順）
    pub fn minimax_scores(&self, player: Player, depth: usize) -> Vec<(usize, i32)> {
        let moves = self.legal_moves(player);

        // ルート直下の子は互いに独立なので並列に探索できる
        // スコアの集約は collect のジョインで全枝の完了後に行われる
        moves
            .par_iter()
            .map(|&pos| {
                let mut child = *self;
                let score = if child.apply_move(player, pos).is_ok() {
                    child.minimax_value(player.opponent(), player, 1, depth.saturating_sub(1))
                } else {
                    self.positional_score(player)
                };
                (pos, score)
            })
            .collect()
    }

    /// ミニマックスのバックアップ値を後順走査で計算する
    ///
    /// スコアは手番に関係なく常に「元のプレイヤー」視点の位置評価。
    /// MIN/MAX の交替もルートからのノード深さの偶奇で決まる（手番基準では
    /// ない）。パスは深さを消費しないため、両者がずれる局面がありうるが、
    /// この規約を変えると選択結果が変わるので意図的にこのままとする。
    fn minimax_value(
        &self,
        to_move: Player,
        root_player: Player,
        node_depth: usize,
        remaining: usize,
    ) -> i32 {
        if remaining == 0 {
            return self.positional_score(root_player);
        }

        let moves = self.legal_moves(to_move);
        if moves.is_empty() {
            let opponent = to_move.opponent();
            if self.legal_moves(opponent).is_empty() {
                // 両者とも打てないので終局、葉として評価
                return self.positional_score(root_player);
            }
            // パスは深さを消費せず、ノードも作らない
            return self.minimax_value(opponent, root_player, node_depth, remaining);
        }

        let child_values = moves.iter().filter_map(|&pos| {
            let mut child = *self;
            child
                .apply_move(to_move, pos)
                .ok()
                .map(|_| child.minimax_value(to_move.opponent(), root_player, node_depth + 1, remaining - 1))
        });

        // 奇数深さのノードは子の最小値、偶数深さは最大値を取る
        let backed_up = if node_depth % 2 == 1 {
            child_values.min()
        } else {
            child_values.max()
        };
        backed_up.unwrap_or_else(|| self.positional_score(root_player))
    }

    /// 各候補手についてランダムゲームを終局まで繰り返し、勝敗を集計する
    ///
    /// 総予算 budget を候補手で等分する（最低1回は保証）。各試行は独立な
    /// 盤面のコピー上で行われるため並列化しても結果は変わらないが、乱数の
    /// 消費順を固定するため、シードは並列化の前にまとめて引いておく。
    pub fn rollout_tallies<R: Rng>(
        &self,
        player: Player,
        moves: &[usize],
        budget: usize,
        rng: &mut R,
    ) -> Vec<RolloutTally> {
        if moves.is_empty() {
            return Vec::new();
        }

        let mut trials_per_move = budget / moves.len();
        if trials_per_move == 0 {
            // 予算が候補手の数より少ないのは設定ミス。0除算を避けるため
            // 1回に切り上げる
            log::warn!(
                "シミュレーション予算{}が候補手数{}を下回っています。各手1回に切り上げます",
                budget,
                moves.len()
            );
            trials_per_move = 1;
        }

        moves
            .iter()
            .map(|&pos| {
                let mut start = *self;
                if start.apply_move(player, pos).is_err() {
                    return RolloutTally::default();
                }

                let seeds: Vec<u64> = (0..trials_per_move).map(|_| rng.gen()).collect();
                let winners: Vec<Option<Player>> = seeds
                    .par_iter()
                    .map(|&seed| {
                        let mut trial_rng = StdRng::seed_from_u64(seed);
                        start.play_random_game(player.opponent(), &mut trial_rng)
                    })
                    .collect();

                let mut tally = RolloutTally::default();
                for winner in winners {
                    tally.record(winner);
                }
                tally
            })
            .collect()
    }

    /// 終局まで一様ランダムに打ち合い、最終的な石数で勝敗を返す
    fn play_random_game<R: Rng>(&self, first: Player, rng: &mut R) -> Option<Player> {
        let mut board = *self;
        let mut to_move = first;

        loop {
            let moves = board.legal_moves(to_move);
            if moves.is_empty() {
                if board.legal_moves(to_move.opponent()).is_empty() {
                    // 両者とも打てないので終局
                    break;
                }
                to_move = to_move.opponent();
                continue;
            }

            match moves.choose(rng) {
                Some(&pos) => {
                    if board.apply_move(to_move, pos).is_err() {
                        break;
                    }
                }
                None => break,
            }
            to_move = to_move.opponent();
        }

        board.winner()
    }

    /// ミニマックスとランダムシミュレーションを信頼度で合成して最善手を選ぶ
    ///
    /// 1. 各合法手のミニマックススコアを、最小値が1になるよう平行移動して
    ///    から平均で割り、ミニマックス信頼度とする
    /// 2. 各手の勝率（自分の勝利数÷試行回数）をシミュレーション信頼度とする
    /// 3. 両者の積が最大の手を選ぶ。同点なら位置番号が小さい方
    ///
    /// 合法手がない場合は None（パスの処理は呼び出し側の責務）
    pub fn select_move<R: Rng>(
        &self,
        player: Player,
        depth: usize,
        rollout_budget: usize,
        rng: &mut R,
    ) -> Option<usize> {
        let moves = self.legal_moves(player);
        if moves.is_empty() {
            return None;
        }
        if moves.len() == 1 {
            // 候補が1つなら信頼度の計算（平均の除算）は定義できないし不要
            return Some(moves[0]);
        }

        let minimax = self.minimax_scores(player, depth);
        let tallies = self.rollout_tallies(player, &moves, rollout_budget, rng);

        let min_score = minimax.iter().map(|&(_, score)| score).min()?;
        let shift = 1 - min_score;
        let shifted: Vec<f64> = minimax
            .iter()
            .map(|&(_, score)| (score + shift) as f64)
            .collect();
        let mean = shifted.iter().sum::<f64>() / shifted.len() as f64;

        let mut best_pos = moves[0];
        let mut best_confidence = f64::NEG_INFINITY;

        for (i, &pos) in moves.iter().enumerate() {
            let minimax_confidence = shifted[i] / mean;
            let trials = tallies[i].trials();
            let rollout_confidence = if trials == 0 {
                0.0
            } else {
                tallies[i].wins_for(player) as f64 / trials as f64
            };
            let combined = minimax_confidence * rollout_confidence;

            log::debug!(
                "候補手{}: ミニマックス信頼度={:.3} シミュレーション信頼度={:.3} 合成={:.3}",
                pos,
                minimax_confidence,
                rollout_confidence,
                combined
            );

            if combined > best_confidence {
                best_confidence = combined;
                best_pos = pos;
            }
        }

        Some(best_pos)
    }
}
