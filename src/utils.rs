use crate::engine::Board;
use crate::error::ParseError;
use std::fs;
use std::path::Path;

/// Parses a board in the puzzle file format: the dimension `n` followed by
/// `n * n` whitespace-separated tiles in row-major order.
///
/// Line breaks carry no meaning, so the tiles may be laid out one row per
/// line or all on one line.
///
/// # Returns
/// * `Ok(Board)` if the input describes a valid `n x n` permutation of `0..n*n`.
/// * `Err(ParseError)` if the input is empty, contains a token that is not a
///   non-negative integer, has `n < 2`, has the wrong number of tiles, or is
///   not a permutation.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("3\n 0  1  3\n 4  2  5\n 7  8  6\n").unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.tile(0, 2), 3);
///
/// assert!(board_from_str("2\n1 2 3").is_err());
/// assert!(board_from_str("2\n1 1 2 0").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, ParseError> {
    let mut tokens = s.split_whitespace();
    let n = parse_number(tokens.next().ok_or(ParseError::MissingDimension)?)? as usize;
    if n < 2 {
        return Err(ParseError::DimensionTooSmall(n));
    }

    let tiles = tokens.map(parse_number).collect::<Result<Vec<u32>, _>>()?;
    if tiles.len() != n * n {
        return Err(ParseError::WrongTileCount {
            expected: n * n,
            found: tiles.len(),
        });
    }

    validate_permutation(&tiles)?;
    Ok(Board::from_tiles(n, tiles))
}

/// Parses a board from one string per row, tiles separated by whitespace.
///
/// The number of rows determines `n`; every row must contain exactly `n` tiles.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2", "3 0"]).unwrap();
/// assert!(board.is_goal());
///
/// let ragged = board_from_str_array(&["1 2 3", "0"]);
/// assert!(ragged.is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board, ParseError> {
    let n = rows.len();
    if n < 2 {
        return Err(ParseError::DimensionTooSmall(n));
    }

    let mut tiles = Vec::with_capacity(n * n);
    for (r, row_str) in rows.iter().enumerate() {
        let row = row_str
            .split_whitespace()
            .map(parse_number)
            .collect::<Result<Vec<u32>, _>>()?;
        if row.len() != n {
            return Err(ParseError::RaggedRow {
                row: r,
                expected: n,
                found: row.len(),
            });
        }
        tiles.extend(row);
    }

    validate_permutation(&tiles)?;
    Ok(Board::from_tiles(n, tiles))
}

/// Reads and parses a board file in the format accepted by `board_from_str`.
pub fn board_from_file(path: &Path) -> Result<Board, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    board_from_str(&content)
}

fn parse_number(token: &str) -> Result<u32, ParseError> {
    token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

/// Checks that `tiles` holds every value in `0..tiles.len()` exactly once.
fn validate_permutation(tiles: &[u32]) -> Result<(), ParseError> {
    let max = tiles.len().saturating_sub(1) as u32;
    let mut seen = vec![false; tiles.len()];
    for &tile in tiles {
        if tile > max {
            return Err(ParseError::TileOutOfRange { tile, max });
        }
        if seen[tile as usize] {
            return Err(ParseError::DuplicateTile(tile));
        }
        seen[tile as usize] = true;
    }
    Ok(())
}
