use gridothello::{Game, GameState, Player, DEFAULT_ROLLOUT_BUDGET, DEFAULT_SEARCH_DEPTH};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::time::Instant;

/// プレイヤーの種別（人間またはAI）
#[derive(Copy, Clone)]
enum PlayerKind {
    Human,
    Ai { depth: usize, budget: usize },
}

fn main() {
    // ハンドルを保持しないとロガーが停止してしまう
    let _logger = init_logging();

    // コマンドライン引数をチェック
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "battle" {
        run_robot_battle();
        return;
    }

    run_cli_game();
}

fn init_logging() -> Option<flexi_logger::LoggerHandle> {
    match flexi_logger::Logger::try_with_env_or_str("info").and_then(|l| l.start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("ロガーの初期化に失敗しました: {}", e);
            None
        }
    }
}

fn run_cli_game() {
    // タイトル表示
    println!("==========================");
    println!("   グリッド オセロ");
    println!("==========================");

    // プレイヤータイプを選択
    let black_kind = select_player_kind(Player::Black);
    let white_kind = select_player_kind(Player::White);

    let mut game = Game::new();
    game.start();
    let mut rng = StdRng::from_entropy();

    println!("\nゲーム開始！");

    loop {
        match game.state() {
            GameState::Over => break,
            GameState::Passed => {
                if let Some(player) = game.to_move() {
                    println!("{}はパスします", player.opponent().name());
                }
                game.acknowledge_pass();
                continue;
            }
            _ => {}
        }

        let player = match game.to_move() {
            Some(player) => player,
            None => break,
        };

        println!("{}", game.board);
        println!("{}の番です", player.name());

        let kind = match player {
            Player::Black => black_kind,
            Player::White => white_kind,
        };

        match kind {
            PlayerKind::Human => play_human_turn(&mut game, player),
            PlayerKind::Ai { depth, budget } => {
                if !play_ai_turn(&mut game, player, depth, budget, &mut rng) {
                    break;
                }
            }
        }
    }

    show_final_result(&game);
}

/// 人間の手番：[a-h][1-8] 形式で入力を受け付ける
fn play_human_turn(game: &mut Game, player: Player) {
    println!("列(a-h)と行(1-8)の形式で入力。例: d3");
    println!("ヘルプ: 'h'または'help', ゲーム終了: 'q'または'quit'");

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("入力エラー。もう一度入力してください。");
            continue;
        }
        let input = input.trim().to_lowercase();

        // 特殊コマンドの処理
        match input.as_str() {
            "q" | "quit" | "exit" => {
                println!("ゲームを終了します。");
                std::process::exit(0);
            }
            "h" | "help" | "?" => {
                println!("--ヘルプ--");
                println!("・列の文字と行の番号を続けて入力します。例: 'd3'");
                println!("・現在の合法手リスト:");
                let notations: Vec<String> =
                    game.available_moves().iter().map(|&p| notation(p)).collect();
                println!("  {}", notations.join(" "));
                continue;
            }
            _ => {}
        }

        let pos = match parse_notation(&input) {
            Some(pos) => pos,
            None => {
                println!("無効な入力形式です。列(a-h)行(1-8)の形式で入力してください。");
                continue;
            }
        };

        match game.play(pos) {
            Ok(_) => {
                println!("{}を{}に置きます", player.name(), notation(pos));
                return;
            }
            Err(_) => {
                println!("そこには置けません。別の場所を選んでください。");
                println!("'h'または'help'と入力すると合法手の一覧を表示します。");
            }
        }
    }
}

/// AIの手番。着手できた場合は true を返す
fn play_ai_turn(
    game: &mut Game,
    player: Player,
    depth: usize,
    budget: usize,
    rng: &mut StdRng,
) -> bool {
    println!("{}(AI)が考えています...", player.name());
    let start_thinking = Instant::now();

    let pos = match game.board.select_move(player, depth, budget, rng) {
        Some(pos) => pos,
        None => {
            // 状態機械が手番を保証しているのでここには来ないはず
            log::warn!("AIの手番に合法手がありません");
            return false;
        }
    };

    if game.play(pos).is_err() {
        log::warn!("AIが不正な手{}を選択しました", pos);
        return false;
    }

    println!(
        "{}(AI)は{}に置きました [思考時間:{:.2}s]",
        player.name(),
        notation(pos),
        start_thinking.elapsed().as_secs_f64()
    );
    true
}

/// AI同士の対戦モード。深さや予算の比較に使う
fn run_robot_battle() {
    println!("ロボットバトル開始！");

    let mut game = Game::new();
    game.start();
    let mut rng = StdRng::from_entropy();

    loop {
        match game.state() {
            GameState::Over => break,
            GameState::Passed => {
                if let Some(player) = game.to_move() {
                    println!("{}はパスします", player.opponent().name());
                }
                game.acknowledge_pass();
                continue;
            }
            _ => {}
        }

        let player = match game.to_move() {
            Some(player) => player,
            None => break,
        };

        println!("{}", game.board);
        if !play_ai_turn(
            &mut game,
            player,
            DEFAULT_SEARCH_DEPTH,
            DEFAULT_ROLLOUT_BUDGET,
            &mut rng,
        ) {
            break;
        }
    }

    show_final_result(&game);
}

fn select_player_kind(player: Player) -> PlayerKind {
    loop {
        print!("{}のプレイヤーを選択 (1: 人間, 2: AI): ", player.name());
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            continue;
        }

        match input.trim() {
            "1" => return PlayerKind::Human,
            "2" => {
                return PlayerKind::Ai {
                    depth: DEFAULT_SEARCH_DEPTH,
                    budget: DEFAULT_ROLLOUT_BUDGET,
                }
            }
            _ => println!("1か2を入力してください。"),
        }
    }
}

fn show_final_result(game: &Game) {
    println!("\n\nゲーム終了！\n");
    println!("{}", game.board);

    let (black_count, white_count) = game.board.count_all_discs();
    println!("黒: {}個 白: {}個", black_count, white_count);

    match game.winner() {
        Some(player) => println!("{}の勝ちです！", player.name()),
        None => println!("引き分けです"),
    }
}

/// [a-h][1-8] 形式の入力をマス番号(0-63)に変換
fn parse_notation(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    let col_char = chars.next()?;
    let row_char = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let col = (col_char as i32) - ('a' as i32);
    let row = row_char.to_digit(10)? as i32 - 1;
    if !(0..8).contains(&col) || !(0..8).contains(&row) {
        return None;
    }

    Some((row * 8 + col) as usize)
}

/// マス番号(0-63)を [a-h][1-8] 形式に変換
fn notation(pos: usize) -> String {
    let col = (b'a' + (pos % 8) as u8) as char;
    format!("{}{}", col, pos / 8 + 1)
}
