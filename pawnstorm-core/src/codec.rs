//! Compact textual snapshots
//!
//! A snapshot is one 4-character record per piece followed by a single
//! side-to-move character:
//!
//! ```text
//! [team][kind][rank][file] ... [team]
//! ```
//!
//! Team letters are `W` (White) and `b` (Black). Kind letters are fixed:
//! `K` `Q` `R` `b` (bishop) `k` (knight) `P`. Records appear in the
//! position's piece order with no delimiter.

use crate::board::Square;
use crate::error::{ChessError, Result};
use crate::pieces::{Piece, PieceKind, Team};

/// Width of one piece record
pub const RECORD_LEN: usize = 4;

/// Decoded contents of a snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub pieces: Vec<Piece>,
    pub to_move: Team,
}

/// Encode piece placement and side to move
pub fn encode(pieces: &[Piece], to_move: Team) -> String {
    let mut out = String::with_capacity(pieces.len() * RECORD_LEN + 1);
    for piece in pieces {
        out.push(piece.team.letter());
        out.push(piece.kind.letter());
        out.push(digit(piece.square.rank()));
        out.push(digit(piece.square.file()));
    }
    out.push(to_move.letter());
    out
}

/// Decode a snapshot. Nothing is returned unless every record is valid.
pub fn decode(state: &str) -> Result<Snapshot> {
    let state = state.trim_end_matches(['\r', '\n']);
    if !state.is_ascii() {
        return Err(ChessError::MalformedState(format!(
            "snapshot contains non-ASCII characters: {state:?}"
        )));
    }

    let bytes = state.as_bytes();
    let Some((&turn, records)) = bytes.split_last() else {
        return Err(ChessError::MalformedState("empty snapshot".to_string()));
    };

    if records.len() % RECORD_LEN != 0 {
        return Err(ChessError::MalformedState(format!(
            "snapshot length {} is not {RECORD_LEN}n+1",
            bytes.len()
        )));
    }

    let pieces = records
        .chunks_exact(RECORD_LEN)
        .enumerate()
        .map(|(i, record)| decode_record(i, record))
        .collect::<Result<Vec<_>>>()?;

    let to_move = Team::from_letter(turn as char).ok_or_else(|| {
        ChessError::MalformedState(format!("unknown side-to-move letter {:?}", turn as char))
    })?;

    Ok(Snapshot { pieces, to_move })
}

fn decode_record(index: usize, record: &[u8]) -> Result<Piece> {
    let [team, kind, rank, file] = [record[0], record[1], record[2], record[3]].map(char::from);

    let team = Team::from_letter(team).ok_or_else(|| {
        ChessError::MalformedState(format!("record {index}: unknown team letter {team:?}"))
    })?;
    let kind = PieceKind::from_letter(kind).ok_or_else(|| {
        ChessError::MalformedState(format!("record {index}: unknown kind letter {kind:?}"))
    })?;
    let square = Square::new(parse_digit(index, rank)?, parse_digit(index, file)?)?;

    Ok(Piece::new(kind, square, team))
}

fn parse_digit(index: usize, c: char) -> Result<i8> {
    c.to_digit(10)
        .map(|d| d as i8)
        .ok_or_else(|| ChessError::MalformedState(format!("record {index}: {c:?} is not a digit")))
}

fn digit(value: i8) -> char {
    (b'0' + value as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(rank: i8, file: i8) -> Square {
        Square::new(rank, file).unwrap()
    }

    #[test]
    fn test_encode_records() {
        let pieces = vec![
            Piece::new(PieceKind::King, sq(0, 4), Team::White),
            Piece::new(PieceKind::Bishop, sq(7, 2), Team::Black),
            Piece::new(PieceKind::Knight, sq(0, 1), Team::White),
        ];
        assert_eq!(encode(&pieces, Team::Black), "WK04bb72Wk01b");
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(encode(&[], Team::White), "W");
        let snapshot = decode("W").unwrap();
        assert!(snapshot.pieces.is_empty());
        assert_eq!(snapshot.to_move, Team::White);
    }

    #[test]
    fn test_decode_preserves_order() {
        let snapshot = decode("bP63WQ03bK74W").unwrap();
        let kinds: Vec<_> = snapshot.pieces.iter().map(|p| (p.kind, p.team)).collect();
        assert_eq!(
            kinds,
            vec![
                (PieceKind::Pawn, Team::Black),
                (PieceKind::Queen, Team::White),
                (PieceKind::King, Team::Black),
            ]
        );
        assert_eq!(snapshot.pieces[2].square, sq(7, 4));
    }

    #[test]
    fn test_unknown_kind_is_fatal() {
        // Uppercase B/N are not kind letters
        assert!(matches!(decode("WB02W"), Err(ChessError::MalformedState(_))));
        assert!(matches!(decode("WK04WN01W"), Err(ChessError::MalformedState(_))));
    }

    #[test]
    fn test_bad_lengths_and_letters() {
        assert!(matches!(decode(""), Err(ChessError::MalformedState(_))));
        assert!(matches!(decode("WK0W"), Err(ChessError::MalformedState(_))));
        assert!(matches!(decode("XK04W"), Err(ChessError::MalformedState(_))));
        assert!(matches!(decode("WK04x"), Err(ChessError::MalformedState(_))));
        assert!(matches!(decode("WKa4W"), Err(ChessError::MalformedState(_))));
    }

    #[test]
    fn test_out_of_board_digit() {
        assert!(matches!(
            decode("WK84W"),
            Err(ChessError::InvalidSquare { rank: 8, file: 4 })
        ));
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        assert_eq!(decode("WK04W\n").unwrap().pieces.len(), 1);
    }
}
