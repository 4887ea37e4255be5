use chess_rules::game::{Game, GameStatus, MoveOutcome};
use chess_rules::legality::all_legal_moves;
use chess_rules::special::PromotionChoice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_PLIES: usize = 300;

/// Plays random legal moves until the game ends or the ply limit is hit.
/// Usage: selfplay [seed]
fn main() {
    env_logger::init();
    log::info!("chess_rules build {}", env!("BUILD_TIMESTAMP"));

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    let mut checks = 0;

    while !game.is_over() && game.history().len() < MAX_PLIES {
        let moves = all_legal_moves(game.board(), game.current_turn());
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        let mut outcome = game.attempt_move(mv.from, mv.to);
        if outcome == MoveOutcome::PromotionPending {
            let choice = PromotionChoice::ALL[rng.gen_range(0..PromotionChoice::ALL.len())];
            outcome = match game.resolve_promotion(mv.to, choice.piece_type()) {
                Ok(o) => o,
                Err(e) => {
                    log::error!("promotion failed: {e}");
                    return;
                }
            };
        }
        if outcome == MoveOutcome::AppliedWithCheck {
            checks += 1;
        }
    }

    let result = match game.status() {
        GameStatus::Checkmate { winner } => format!("{winner:?} wins by checkmate"),
        GameStatus::Stalemate => "stalemate".to_string(),
        _ => "ongoing".to_string(),
    };
    println!("{}", game.board());
    eprintln!("Seed {seed}: {result} after {} plies, {checks} checks", game.history().len());
}
