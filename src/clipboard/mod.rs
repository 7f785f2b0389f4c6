//! Clipboard codec: rectangular ranges ⇄ tab/newline text.
//!
//! Serialization joins cells with tabs and rows with newlines, replacing
//! literal tabs inside a cell with a space so column alignment survives the
//! round trip. Deserialization splits on newlines, routing lines that
//! contain both a quote and a comma through quote-aware splitting (fields
//! still end on tabs outside quotes; quotes are dropped). That CSV/TSV
//! conflation is inherited behavior, kept as-is; see DESIGN.md.

use crate::types::{Range, Sheet};

/// Serialize the normalized `range` of `sheet` to interchange text.
pub fn encode_range(sheet: &Sheet, range: Range) -> String {
    let n = range.normalized();
    let mut out = String::new();
    for row in n.start.row..=n.end.row {
        if row > n.start.row {
            out.push('\n');
        }
        for col in n.start.col..=n.end.col {
            if col > n.start.col {
                out.push('\t');
            }
            if let Some(cell) = sheet.cell(crate::types::CellRef::new(row, col)) {
                let text = cell.display();
                if text.contains('\t') {
                    out.push_str(&text.replace('\t', " "));
                } else {
                    out.push_str(&text);
                }
            }
        }
    }
    out
}

/// Parse external text into a row-major block of field strings.
///
/// A single trailing newline (appended by most spreadsheet apps) is dropped;
/// otherwise rows are taken verbatim, ragged widths and all.
pub fn parse_payload(text: &str) -> Vec<Vec<String>> {
    if text.is_empty() {
        return Vec::new();
    }
    let trimmed = text.strip_suffix('\n').unwrap_or(text);
    trimmed
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.contains('"') && line.contains(',') {
                split_quoted(line)
            } else {
                line.split('\t').map(str::to_string).collect()
            }
        })
        .collect()
}

/// Quote-aware field splitting: a per-character in-quotes toggle, a tab
/// outside quotes ends the field, quote characters are not retained.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\t' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Widest row of a parsed block.
pub fn block_width(block: &[Vec<String>]) -> usize {
    block.iter().map(Vec::len).max().unwrap_or(0)
}

/// Fill a `rows × cols` rectangle by repeating `block` modulo its
/// dimensions (the broadcast-fill paste semantics). Rows shorter than the
/// widest tile modulo their own length.
pub fn tile_block(block: &[Vec<String>], rows: usize, cols: usize) -> Vec<Vec<String>> {
    let height = block.len();
    let width = block_width(block);
    if height == 0 || width == 0 {
        return Vec::new();
    }
    (0..rows)
        .map(|r| {
            let src_row = block.get(r % height);
            (0..cols)
                .map(|c| match src_row {
                    Some(row) if !row.is_empty() => row
                        .get((c % width) % row.len())
                        .cloned()
                        .unwrap_or_default(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{CellRef, Sheet};
    use test_case::test_case;

    #[test]
    fn encode_joins_tabs_and_newlines() {
        let sheet = Sheet::from_text_rows(&[&["a", "b"], &["c", "d"]]);
        let text = encode_range(
            &sheet,
            Range::new(CellRef::new(0, 0), CellRef::new(1, 1)),
        );
        assert_eq!(text, "a\tb\nc\td");
    }

    #[test]
    fn encode_normalizes_inverted_ranges() {
        let sheet = Sheet::from_text_rows(&[&["a", "b"], &["c", "d"]]);
        let text = encode_range(
            &sheet,
            Range::new(CellRef::new(1, 1), CellRef::new(0, 0)),
        );
        assert_eq!(text, "a\tb\nc\td");
    }

    #[test]
    fn literal_tabs_become_spaces() {
        let sheet = Sheet::from_text_rows(&[&["left\tright", "b"]]);
        let text = encode_range(
            &sheet,
            Range::new(CellRef::new(0, 0), CellRef::new(0, 1)),
        );
        assert_eq!(text, "left right\tb");
    }

    #[test]
    fn parse_splits_plain_lines_on_tabs() {
        let block = parse_payload("a\tb\nc\td\n");
        assert_eq!(block, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn parse_handles_crlf() {
        let block = parse_payload("a\tb\r\nc\td");
        assert_eq!(block, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn quote_and_comma_lines_take_the_quoted_path() {
        // Quotes dropped, comma kept, tab outside quotes still splits.
        let block = parse_payload("\"hello, world\"\tb");
        assert_eq!(block, vec![vec!["hello, world", "b"]]);
    }

    #[test]
    fn quoted_tabs_stay_inside_a_field() {
        let block = parse_payload("\"a\tb\",x");
        assert_eq!(block, vec![vec!["a\tb,x"]]);
    }

    #[test]
    fn empty_payload_parses_to_nothing() {
        assert!(parse_payload("").is_empty());
    }

    #[test_case(1, 1, 2, 3; "single value broadcast")]
    #[test_case(2, 2, 4, 4; "block tiled in a grid")]
    fn tiling_repeats_the_source(src_h: usize, src_w: usize, dst_h: usize, dst_w: usize) {
        let block: Vec<Vec<String>> = (0..src_h)
            .map(|r| (0..src_w).map(|c| format!("{r}:{c}")).collect())
            .collect();
        let tiled = tile_block(&block, dst_h, dst_w);
        assert_eq!(tiled.len(), dst_h);
        for (r, row) in tiled.iter().enumerate() {
            assert_eq!(row.len(), dst_w);
            for (c, v) in row.iter().enumerate() {
                assert_eq!(v, &format!("{}:{}", r % src_h, c % src_w));
            }
        }
    }

    #[test]
    fn ragged_rows_tile_modulo_their_own_length() {
        let block = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["x".to_string()],
        ];
        let tiled = tile_block(&block, 2, 3);
        assert_eq!(tiled[0], vec!["a", "b", "c"]);
        // Short row wraps on itself instead of leaving holes.
        assert_eq!(tiled[1], vec!["x", "x", "x"]);
    }
}
