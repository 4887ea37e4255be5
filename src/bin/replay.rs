use chess_rules::config::GameConfig;
use chess_rules::game::{Game, MoveOutcome};
use chess_rules::moves::Move;
use serde::Serialize;

#[derive(Serialize)]
struct Step {
    notation: String,
    outcome: Option<MoveOutcome>,
    error: Option<String>,
}

#[derive(Serialize)]
struct Report {
    steps: Vec<Step>,
    squares: [[i8; 8]; 8],
    status: chess_rules::game::GameStatus,
}

/// Replays coordinate-notation moves ("e2e4", "e7e8q", ...) and prints a JSON
/// report of each outcome plus the final position as piece codes.
/// Usage: replay [--config '<json>'] e2e4 e7e5 ...
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = GameConfig::default();
    if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            return Err("--config needs a JSON argument".into());
        }
        config = GameConfig::from_json(&args[1])?;
        args.drain(..2);
    }

    log::info!("replaying {} moves (build {})", args.len(), env!("BUILD_TIMESTAMP"));
    let mut game = Game::with_config(config);
    let mut steps = Vec::new();

    for notation in args {
        let step = match Move::from_uci(&notation) {
            Err(e) => Step { notation, outcome: None, error: Some(e.to_string()) },
            Ok(mv) => {
                let mut outcome = game.attempt_move(mv.from, mv.to);
                let mut error = None;
                if outcome == MoveOutcome::PromotionPending {
                    if let Some(kind) = mv.promotion {
                        match game.resolve_promotion(mv.to, kind) {
                            Ok(o) => outcome = o,
                            Err(e) => error = Some(e.to_string()),
                        }
                    }
                }
                Step { notation, outcome: Some(outcome), error }
            }
        };
        steps.push(step);
    }

    let report = Report {
        steps,
        squares: game.board().to_codes(),
        status: game.status(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!("{}", game.board());
    Ok(())
}
