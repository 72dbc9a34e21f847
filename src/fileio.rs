use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::inventory::Seat;

/// Field separator of the seat file. Fields are written raw; only the holder,
/// being last, can contain it and still read back intact.
pub const DELIMITER: u8 = b',';

/// Maximum number of fields per line; anything past the holder is part of it
const MAX_FIELDS: usize = 4;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed seat number '{value}'")]
    MalformedNumber { line: u64, value: String },
    #[error("line {line}: malformed reservation flag '{value}'")]
    MalformedFlag { line: u64, value: String },
    #[error("line {line}: missing {field} field")]
    MissingField { line: u64, field: &'static str },
    #[error("line {line}: reservation flag does not match holder")]
    HolderMismatch { line: u64 },
    #[error("line {line}: duplicate seat number {number}")]
    DuplicateSeat { line: u64, number: u32 },
    #[error("unreadable record: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("Error parsing seat data: {0}")]
    Parse(#[from] ParseError),
    #[error("Error writing seat data: {0}")]
    Csv(#[from] csv::Error),
}

/// Write one `number,category,reserved,holder` line per seat, in the order given
pub fn write_seats<'a, W, I>(writer: W, seats: I) -> Result<(), FileError>
where
    W: Write,
    I: IntoIterator<Item = &'a Seat>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for seat in seats {
        let number = seat.number().to_string();
        let reserved = if seat.is_reserved() { "true" } else { "false" };
        csv_writer
            .write_record([
                number.as_str(),
                seat.category(),
                reserved,
                seat.reserved_by().unwrap_or(""),
            ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Encode seats into the flat text format
pub fn encode_seats<'a, I>(seats: I) -> Result<String, FileError>
where
    I: IntoIterator<Item = &'a Seat>,
{
    let mut buf = Vec::new();
    write_seats(&mut buf, seats)?;
    String::from_utf8(buf).map_err(|e| FileError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn parse_number(field: &str, line: u64) -> Result<u32, ParseError> {
    match field.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::MalformedNumber { line, value: field.to_string() }),
    }
}

fn parse_flag(field: &str, line: u64) -> Result<bool, ParseError> {
    if field.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if field.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::MalformedFlag { line, value: field.to_string() })
    }
}

/// Decode the flat text format. Blank lines are skipped; the first bad line
/// aborts the whole decode.
pub fn decode_seats(text: &str) -> Result<Vec<Seat>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut seats = Vec::new();
    let mut seen = HashSet::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let line = record.position().map_or(idx as u64 + 1, |p| p.line());

        if record.iter().all(str::is_empty) {
            continue;
        }

        let number = parse_number(&record[0], line)?;
        let category = record
            .get(1)
            .ok_or(ParseError::MissingField { line, field: "category" })?;
        let reserved = record
            .get(2)
            .ok_or(ParseError::MissingField { line, field: "reserved" })
            .and_then(|f| parse_flag(f, line))?;

        let holder = if record.len() >= MAX_FIELDS {
            record.iter().skip(MAX_FIELDS - 1).collect::<Vec<_>>().join(",")
        } else {
            String::new()
        };

        let seat = match (reserved, holder.is_empty()) {
            (true, false) => Seat::reserved(number, category, holder),
            (false, true) => Seat::new(number, category),
            _ => return Err(ParseError::HolderMismatch { line }),
        };

        if !seen.insert(number) {
            return Err(ParseError::DuplicateSeat { line, number });
        }
        seats.push(seat);
    }

    Ok(seats)
}

/// Reads and writes the seat file at a fixed path
pub struct FileIO {
    pub file_path: PathBuf,
}

impl FileIO {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
    }

    pub fn file_name(&self) -> String {
        self.file_path.display().to_string()
    }

    pub fn write<'a, I>(&self, seats: I) -> Result<(), FileError>
    where
        I: IntoIterator<Item = &'a Seat>,
    {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        write_seats(&mut writer, seats)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read(&self) -> Result<Vec<Seat>, FileError> {
        let text = std::fs::read_to_string(&self.file_path)?;
        Ok(decode_seats(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_encode_line_layout() {
        let seats = vec![Seat::new(2, "Economy"), Seat::reserved(1, "VIP", "Alice")];
        let text = encode_seats(&seats).unwrap();
        assert_eq!(text, "2,Economy,false,\n1,VIP,true,Alice\n");
    }

    #[test]
    fn test_decode_restores_seats() {
        let seats = decode_seats("1,VIP,true,Alice\n2,VIP,false,\n3,Economy,false\n").unwrap();
        assert_eq!(
            seats,
            vec![
                Seat::reserved(1, "VIP", "Alice"),
                Seat::new(2, "VIP"),
                Seat::new(3, "Economy"),
            ]
        );
    }

    #[test]
    fn test_roundtrip_preserves_tuples() {
        let seats = vec![
            Seat::reserved(10, "VIP", "Zoë Ångström"),
            Seat::new(11, "VIP"),
            Seat::reserved(12, "Balcony", "Bob"),
        ];
        let decoded = decode_seats(&encode_seats(&seats).unwrap()).unwrap();
        assert_eq!(decoded, seats);
    }

    #[test]
    fn test_decode_skips_blank_lines_and_crlf() {
        let seats = decode_seats("1,VIP,false,\r\n\r\n2,VIP,true,Ann\r\n").unwrap();
        assert_eq!(seats.len(), 2);
        assert_eq!(seats[1].reserved_by(), Some("Ann"));
    }

    #[test]
    fn test_extra_fields_fold_into_holder() {
        let seats = decode_seats("5,VIP,true,Smith, John\n").unwrap();
        assert_eq!(seats[0].reserved_by(), Some("Smith, John"));
    }

    #[test]
    fn test_unknown_category_is_accepted() {
        let seats = decode_seats("1,Mezzanine,false,\n").unwrap();
        assert_eq!(seats[0].category(), "Mezzanine");
    }

    #[test]
    fn test_malformed_number() {
        let err = decode_seats("1,VIP,false,\nabc,VIP,false,\n").unwrap_err();
        match err {
            ParseError::MalformedNumber { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            decode_seats("0,VIP,false,\n"),
            Err(ParseError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_malformed_flag_and_missing_fields() {
        assert!(matches!(
            decode_seats("1,VIP,yes,\n"),
            Err(ParseError::MalformedFlag { .. })
        ));
        assert!(matches!(
            decode_seats("1\n"),
            Err(ParseError::MissingField { field: "category", .. })
        ));
        assert!(matches!(
            decode_seats("1,VIP\n"),
            Err(ParseError::MissingField { field: "reserved", .. })
        ));
    }

    #[test]
    fn test_holder_must_match_flag() {
        assert!(matches!(
            decode_seats("1,VIP,true,\n"),
            Err(ParseError::HolderMismatch { line: 1 })
        ));
        assert!(matches!(
            decode_seats("1,VIP,false,Alice\n"),
            Err(ParseError::HolderMismatch { line: 1 })
        ));
    }

    #[test]
    fn test_duplicate_seat_number() {
        assert!(matches!(
            decode_seats("1,VIP,false,\n1,Economy,false,\n"),
            Err(ParseError::DuplicateSeat { line: 2, number: 1 })
        ));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_keeps_csv_error() {
        // larger than the csv writer's buffer, so the record itself hits the sink
        let seats = vec![Seat::reserved(1, "VIP", "x".repeat(64 * 1024))];
        let err = write_seats(BrokenPipe, &seats).unwrap_err();

        assert!(matches!(err, FileError::Csv(_)));
        assert!(err.to_string().starts_with("Error writing seat data"));
    }

    #[test]
    fn test_file_write_then_read() {
        let file = NamedTempFile::new().unwrap();
        let file_io = FileIO::new(file.path());
        let seats = vec![Seat::reserved(1, "VIP", "Alice"), Seat::new(2, "VIP")];

        file_io.write(&seats).unwrap();
        assert_eq!(file_io.read().unwrap(), seats);
    }

    #[test]
    fn test_read_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "x,VIP,false,").unwrap();

        let file_io = FileIO::new(file.path());
        assert!(matches!(file_io.read(), Err(FileError::Parse(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_io = FileIO::new(dir.path().join("absent.txt"));
        assert!(matches!(file_io.read(), Err(FileError::Io(_))));
    }
}
