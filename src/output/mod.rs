//! CSV rendering of reconstructed row tables.
//!
//! Two shapes are written per locus:
//!
//! - **split**: `key,token1,token2,...` for every row, header rows included
//! - **combined**: `key,concatenated-tokens` for allele rows only
//!
//! Records are newline-terminated and use minimal quoting.

use std::io::Write;

use crate::core::config::RowOrder;
use crate::core::table::{RowKind, RowTable};

/// Concatenate tokens in order with no delimiter
#[must_use]
pub fn concat_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut joined = String::with_capacity(tokens.iter().map(|t| t.as_ref().len()).sum());
    for token in tokens {
        joined.push_str(token.as_ref());
    }
    joined
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Write every row with one field per token.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_split<W: Write>(table: &RowTable, order: RowOrder, writer: W) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer);
    for (key, row) in table.ordered(order) {
        csv.write_record(std::iter::once(key).chain(row.tokens.iter().map(String::as_str)))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write each allele row with its tokens concatenated into one sequence field.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_combined<W: Write>(
    table: &RowTable,
    order: RowOrder,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv = csv_writer(writer);
    for (key, row) in table.ordered(order) {
        if row.kind == RowKind::Allele {
            csv.write_record([key, row.concatenated().as_str()])?;
        }
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RowTable {
        let mut table = RowTable::new();
        let rows: [(&str, RowKind, &[&str]); 3] = [
            ("Prot", RowKind::Header, &["codon1", "7"]),
            ("B*07:02", RowKind::Allele, &["AC", "GT"]),
            ("A*01:01", RowKind::Allele, &["-T", "TT"]),
        ];
        for (key, kind, tokens) in rows {
            table
                .accumulate(key, kind, tokens.iter().map(ToString::to_string))
                .unwrap();
        }
        table
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), csv::Error>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_concat_tokens_preserves_order() {
        assert_eq!(concat_tokens(&["AC", "GT", "TT"]), "ACGTTT");
        assert_eq!(concat_tokens::<&str>(&[]), "");
    }

    #[test]
    fn test_write_split() {
        let table = table();
        let csv = render(|buf| write_split(&table, RowOrder::FirstSeen, buf));
        assert_eq!(csv, "Prot,codon1,7\nB*07:02,AC,GT\nA*01:01,-T,TT\n");
    }

    #[test]
    fn test_write_combined_excludes_header_rows() {
        let table = table();
        let csv = render(|buf| write_combined(&table, RowOrder::FirstSeen, buf));
        assert_eq!(csv, "B*07:02,ACGT\nA*01:01,-TTT\n");
    }

    #[test]
    fn test_sorted_order() {
        let table = table();
        let csv = render(|buf| write_combined(&table, RowOrder::Sorted, buf));
        assert_eq!(csv, "A*01:01,-TTT\nB*07:02,ACGT\n");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut table = RowTable::new();
        table
            .accumulate("x", RowKind::Header, vec!["a,b".to_string()])
            .unwrap();
        let csv = render(|buf| write_split(&table, RowOrder::FirstSeen, buf));
        assert_eq!(csv, "x,\"a,b\"\n");
    }
}
