use console::Style;
use itertools::Itertools;
use multiverse_chess::board::Board;
use multiverse_chess::coord::Coord;
use multiverse_chess::force::Force;
use multiverse_chess::game::{Game, GameStatus};
use multiverse_chess::grid::GridItem;
use multiverse_chess::piece::piece_to_pictogram;


const BOARDS_PER_ROW: usize = 4;

fn format_square(ch: char) -> String { format!(" {} ", ch) }

fn render_header(game: &Game, board: &Board, board_width: usize) -> String {
    let force = match board.active_force() {
        Force::White => 'w',
        Force::Black => 'b',
    };
    let header = format!(
        "{:^1$}",
        format!("({}T{}{})", board.timeline().0, board.full_turn() + 1, force),
        board_width
    );
    let board_id = game.timeline(board.timeline()).back();
    if game.can_make_move_from_board(board_id) {
        Style::new().reverse().apply_to(header).to_string()
    } else {
        header
    }
}

fn render_grid(board: &Board) -> Vec<String> {
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let shape = board.shape();
    let mut lines = Vec::new();
    for row in shape.rows().rev() {
        let mut line = format!("{:^3}", row.to_algebraic());
        for col in shape.cols() {
            let coord = Coord::new(row, col);
            let color_idx = (row.to_zero_based() + col.to_zero_based()).rem_euclid(2) as usize;
            let ch = match board.get_piece(coord) {
                GridItem::Piece(piece) => piece_to_pictogram(piece.kind, piece.force),
                GridItem::Empty | GridItem::OutOfBounds => ' ',
            };
            line.push_str(&colors[color_idx].apply_to(format_square(ch)).to_string());
        }
        line.push_str(&format_square(' '));
        lines.push(line);
    }
    let footer = format_square(' ')
        + &shape.cols().map(|col| format_square(col.to_algebraic())).join("")
        + &format_square(' ');
    lines.push(footer);
    lines
}

fn render_board(game: &Game, board: &Board) -> Vec<String> {
    let board_width = (board.dim() as usize + 2) * 3;
    let mut lines = vec![render_header(game, board, board_width)];
    lines.extend(render_grid(board));
    lines
}

fn render_status(game: &Game) -> String {
    match game.status() {
        GameStatus::Active => format!(
            "Turn {}, {:?} to move on {} board(s)",
            game.present_full_turn() + 1,
            game.active_force(),
            game.moveable_boards().len()
        ),
        GameStatus::Victory(force, reason) => format!("{force:?} won: {reason:?}"),
    }
}

// Renders the latest board of every timeline. Boards that can be moved on are highlighted.
pub fn render_game(game: &Game) -> String {
    let mut ret = String::new();
    for chunk in &game.timelines().iter().chunks(BOARDS_PER_ROW) {
        let boards = chunk.map(|timeline| render_board(game, game.board(timeline.back()))).collect_vec();
        let num_lines = boards.iter().map(Vec::len).max().unwrap_or(0);
        for line_idx in 0..num_lines {
            let line = boards
                .iter()
                .map(|lines| lines.get(line_idx).map(String::as_str).unwrap_or(""))
                .join("    ");
            ret.push_str(&line);
            ret.push('\n');
        }
        ret.push('\n');
    }
    ret.push_str(&render_status(game));
    ret.push('\n');
    ret
}
