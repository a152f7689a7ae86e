//! Board and move files.
//!
//! A board file (`*.gboard`) holds one text row per board row in the board symbol
//! alphabet. The moves of a scripted player for that board sit next to it in
//! `<board>.moves-a` or `<board>.moves-b`, one `x1,y1,x2,y2` move per line.
use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use flagwar::{
    board::{BoardSetup, BoardSnapshot, Coordinate},
    game::GameMove,
    ships::Side,
};

/// Extension of board files.
const BOARD_EXTENSION: &str = "gboard";

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// List the board files in `dir`, sorted by name.
pub fn board_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == BOARD_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no .{} files in {}", BOARD_EXTENSION, dir.display()),
        ));
    }
    Ok(files)
}

/// Load a board file.
pub fn load_board(path: &Path) -> io::Result<BoardSetup> {
    let text = fs::read_to_string(path)?;
    let rows: Vec<&str> = text.lines().collect();
    BoardSnapshot::from_rows(&rows)
        .and_then(|snapshot| BoardSetup::from_snapshot(&snapshot))
        .map_err(|err| invalid_data(format!("{}: {}", path.display(), err)))
}

/// Path of the move file for `side` belonging to the board file `board`.
pub fn moves_path(board: &Path, side: Side) -> PathBuf {
    board.with_extension(match side {
        Side::PlayerA => "moves-a",
        Side::PlayerB => "moves-b",
    })
}

/// Load a move file.
pub fn load_moves(path: &Path) -> io::Result<Vec<GameMove>> {
    let text = fs::read_to_string(path)?;
    let moves =
        parse_moves(&text).map_err(|err| invalid_data(format!("{}: {}", path.display(), err)))?;
    debug!("[Files] {} moves read from {}", moves.len(), path.display());
    Ok(moves)
}

/// Parse move lines. Blank lines and lines starting with `#` are skipped.
fn parse_moves(text: &str) -> Result<Vec<GameMove>, String> {
    /// Matcher for one move line.
    static MOVE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<x1>[0-9]+)\s*,\s*(?P<y1>[0-9]+)\s*,\s*(?P<x2>[0-9]+)\s*,\s*(?P<y2>[0-9]+)$")
            .unwrap()
    });

    let mut moves = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let captures = MOVE
            .captures(line)
            .ok_or_else(|| format!("line {}: expected x1,y1,x2,y2, got \"{}\"", i + 1, line))?;
        let num = |name: &str| {
            captures[name]
                .parse::<usize>()
                .map_err(|err| format!("line {}: {}", i + 1, err))
        };
        moves.push(GameMove::new(
            Coordinate::new(num("x1")?, num("y1")?),
            Coordinate::new(num("x2")?, num("y2")?),
        ));
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_lines() {
        let moves = parse_moves("# opening\n2,1,2,2\n\n 3 , 4 ,3,5 \n").unwrap();
        assert_eq!(
            moves,
            vec![
                GameMove::new(Coordinate::new(2, 1), Coordinate::new(2, 2)),
                GameMove::new(Coordinate::new(3, 4), Coordinate::new(3, 5)),
            ]
        );
    }

    #[test]
    fn reports_bad_line_number() {
        let err = parse_moves("1,1,1,2\n1,1,up\n").unwrap_err();
        assert!(err.starts_with("line 2:"), "{}", err);
    }

    #[test]
    fn move_files_sit_next_to_the_board() {
        let board = Path::new("boards/level1.gboard");
        assert_eq!(
            moves_path(board, Side::PlayerB),
            PathBuf::from("boards/level1.moves-b")
        );
    }
}
