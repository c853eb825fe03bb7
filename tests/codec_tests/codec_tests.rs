//! Codec Tests
//!
//! Tests for record encoding/decoding and the streaming record reader.

use std::io::Cursor;

use flatdb::codec::{decode_record, encode_record, write_record, Record, RecordReader};
use flatdb::FlatError;

// =============================================================================
// Helper Functions
// =============================================================================

fn read_all(text: &str) -> Vec<(usize, Record)> {
    RecordReader::new(Cursor::new(text))
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_plain_fields() {
    let record = Record::from(["apple", "red"]);
    assert_eq!(encode_record(&record), "apple,red");
}

#[test]
fn test_encode_quotes_delimiter() {
    let record = Record::from(["Smith, John", "01234567890", "john@gmail.com"]);
    assert_eq!(
        encode_record(&record),
        "\"Smith, John\",01234567890,john@gmail.com"
    );
}

#[test]
fn test_encode_doubles_embedded_quotes() {
    let record = Record::from(["say \"hi\"", "x"]);
    assert_eq!(encode_record(&record), "\"say \"\"hi\"\"\",x");
}

#[test]
fn test_encode_quotes_newline() {
    let record = Record::from(["line1\nline2", "x"]);
    assert_eq!(encode_record(&record), "\"line1\nline2\",x");
}

#[test]
fn test_encode_empty_fields_unquoted() {
    let record = Record::from(["", ""]);
    assert_eq!(encode_record(&record), ",");
}

#[test]
fn test_write_record_appends_newline() {
    let mut out = Vec::new();
    write_record(&mut out, &Record::from(["k", "v"])).unwrap();
    assert_eq!(out, b"k,v\n");
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_plain_line() {
    let record = decode_record("apple,red\n", 2).unwrap();
    assert_eq!(record.fields(), ["apple", "red"]);
    assert_eq!(record.key(), Some("apple"));
}

#[test]
fn test_decode_without_terminator() {
    let record = decode_record("a,b,c", 3).unwrap();
    assert_eq!(record.fields(), ["a", "b", "c"]);
}

#[test]
fn test_decode_keeps_surrounding_spaces() {
    let record = decode_record(" a , b ", 2).unwrap();
    assert_eq!(record.fields(), [" a ", " b "]);
}

#[test]
fn test_decode_wrong_field_count() {
    let err = decode_record("only-one-field", 2).unwrap_err();
    assert!(matches!(err, FlatError::Format { line: 1, .. }));

    let err = decode_record("a,b,c", 2).unwrap_err();
    assert!(matches!(err, FlatError::Format { .. }));
}

#[test]
fn test_decode_unterminated_quote() {
    let err = decode_record("\"open,b", 2).unwrap_err();
    assert!(matches!(err, FlatError::Format { .. }));
}

#[test]
fn test_round_trip_tricky_fields() {
    let records = [
        Record::from(["plain", "value"]),
        Record::from(["with,comma", "with \"quotes\""]),
        Record::from(["multi\nline", "crlf\r\nvalue"]),
        Record::from(["", "trailing empty"]),
        Record::from(["unicode ✓", "日本語"]),
    ];

    for record in records {
        let decoded = decode_record(&encode_record(&record), 2).unwrap();
        assert_eq!(decoded, record);
    }
}

// =============================================================================
// Reader Tests
// =============================================================================

#[test]
fn test_reader_yields_records_in_order() {
    let records = read_all("a,1\nb,2\nc,3\n");

    let keys: Vec<_> = records.iter().map(|(_, r)| r.key().unwrap().to_string()).collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(records[2].0, 3);
}

#[test]
fn test_reader_empty_input() {
    assert!(read_all("").is_empty());
}

#[test]
fn test_reader_skips_blank_lines() {
    let records = read_all("a,1\n\n\r\nb,2\n");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].0, 4);
}

#[test]
fn test_reader_accepts_crlf() {
    let records = read_all("a,1\r\nb,2\r\n");
    assert_eq!(records[0].1.fields(), ["a", "1"]);
    assert_eq!(records[1].1.fields(), ["b", "2"]);
}

#[test]
fn test_reader_last_line_without_newline() {
    let records = read_all("a,1\nb,2");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].1.fields(), ["b", "2"]);
}

#[test]
fn test_reader_joins_multiline_quoted_field() {
    let records = read_all("note,\"first\nsecond\"\nnext,1\n");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].1.fields(), ["note", "first\nsecond"]);
    assert_eq!(records[1].0, 3);
}

#[test]
fn test_reader_lone_quoted_empty_field() {
    let records = read_all("\"\"\n");
    assert_eq!(records[0].1.fields(), [""]);
}

#[test]
fn test_reader_stops_after_error() {
    let mut reader = RecordReader::new(Cursor::new("a,1\n\"bad\"x,2\nc,3\n"));

    assert!(reader.next().unwrap().is_ok());
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, FlatError::Format { line: 2, .. }));
    assert!(reader.next().is_none());
}

#[test]
fn test_reader_unterminated_quote_at_eof() {
    let mut reader = RecordReader::new(Cursor::new("a,1\nb,\"never closed\n"));

    assert!(reader.next().unwrap().is_ok());
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, FlatError::Format { line: 2, .. }));
}

#[test]
fn test_reader_round_trips_written_records() {
    let records = vec![
        Record::from(["Alice", "01234567890", "alice@gmail.com"]),
        Record::from(["Smith, J", "09876543210", "j.smith@gmail.com"]),
        Record::from(["Multi\nLine", "11111111111", "m@gmail.com"]),
    ];

    let mut buf = Vec::new();
    for record in &records {
        write_record(&mut buf, record).unwrap();
    }

    let decoded: Vec<Record> = RecordReader::new(Cursor::new(buf))
        .map(|item| item.unwrap().1)
        .collect();
    assert_eq!(decoded, records);
}
