use crate::board::Board;
use crate::config::GameConfig;
use crate::game::{Game, GameStatus, MoveOutcome};
use crate::piece::{Color, PieceType};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    piece_type: String,
    color: String,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    status: GameStatus,
    king_in_check: Option<[usize; 2]>,
    selected: Option<[usize; 2]>,
    last_move: Option<[[usize; 2]; 2]>,
}

#[derive(Serialize)]
struct MoveResult {
    outcome: Option<MoveOutcome>,
    error: Option<String>,
    board_state: BoardState,
}

fn piece_type_to_string(pt: PieceType) -> String {
    match pt {
        PieceType::King => "King".to_string(),
        PieceType::Queen => "Queen".to_string(),
        PieceType::Rook => "Rook".to_string(),
        PieceType::Bishop => "Bishop".to_string(),
        PieceType::Knight => "Knight".to_string(),
        PieceType::Pawn => "Pawn".to_string(),
    }
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

fn string_to_piece_type(s: &str) -> Option<PieceType> {
    match s {
        "Queen" => Some(PieceType::Queen),
        "Rook" => Some(PieceType::Rook),
        "Bishop" => Some(PieceType::Bishop),
        "Knight" => Some(PieceType::Knight),
        _ => None,
    }
}

fn build_board_state(game: &Game) -> BoardState {
    let board: &Board = game.board();
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| {
                    board.squares[r][c].map(|p| SquarePiece {
                        piece_type: piece_type_to_string(p.piece_type),
                        color: color_to_string(p.color),
                    })
                })
                .collect()
        })
        .collect();

    BoardState {
        squares,
        current_turn: color_to_string(board.current_turn),
        status: game.status(),
        king_in_check: game.king_in_check().map(|(r, c)| [r, c]),
        selected: game.selected().map(|(r, c)| [r, c]),
        last_move: game.last_move().map(|m| [[m.from.0, m.from.1], [m.to.0, m.to.1]]),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { game: Game::new() }
    }

    /// Start a game with a JSON `GameConfig`. Bad input is logged and the
    /// defaults are used.
    pub fn with_config(json: &str) -> WasmGame {
        let config = GameConfig::from_json_or_default(json);
        WasmGame { game: Game::with_config(config) }
    }

    pub fn build_timestamp() -> String {
        env!("BUILD_TIMESTAMP").to_string()
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&build_board_state(&self.game))
    }

    pub fn get_legal_moves_for_square(&self, row: usize, col: usize) -> JsValue {
        let squares: Vec<[usize; 2]> = self
            .game
            .legal_moves((row, col))
            .into_iter()
            .map(|(r, c)| [r, c])
            .collect();
        to_js(&squares)
    }

    pub fn click_square(&mut self, row: usize, col: usize) -> JsValue {
        let outcome = self.game.select((row, col));
        to_js(&MoveResult {
            outcome,
            error: None,
            board_state: build_board_state(&self.game),
        })
    }

    pub fn attempt_move(&mut self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> JsValue {
        let outcome = self.game.attempt_move((from_row, from_col), (to_row, to_col));
        to_js(&MoveResult {
            outcome: Some(outcome),
            error: None,
            board_state: build_board_state(&self.game),
        })
    }

    pub fn resolve_promotion(&mut self, row: usize, col: usize, piece: &str) -> JsValue {
        let result = match string_to_piece_type(piece) {
            Some(pt) => self.game.resolve_promotion((row, col), pt).map_err(|e| e.to_string()),
            None => Err(format!("unknown promotion piece: {piece}")),
        };
        let (outcome, error) = match result {
            Ok(outcome) => (Some(outcome), None),
            Err(e) => (None, Some(e)),
        };
        to_js(&MoveResult {
            outcome,
            error,
            board_state: build_board_state(&self.game),
        })
    }
}
