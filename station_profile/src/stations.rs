//! Cumulative stations built from a sequence of segment lengths.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};
use crate::io::{parse_number, Table};

/// Length and name of one segment of the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub length: f64,
    pub name: String,
}

impl SegmentSpec {
    pub fn new(length: f64, name: impl Into<String>) -> Self {
        Self {
            length,
            name: name.into(),
        }
    }
}

/// Named cumulative distance along the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub position: f64,
    pub name: String,
}

impl Station {
    pub fn new(position: f64, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// What to do with a segment length that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Treat the length as zero and continue. Every later station keeps the
    /// position of its predecessor plus its own length.
    #[default]
    CoerceToZero,
    /// Abort with [`ProfileError::MalformedValue`].
    Reject,
}

/// Reference to a table column by zero-based position or by header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    /// Parses `2` as an index and anything else as a header name.
    pub fn parse(s: &str) -> Self {
        match s.trim().parse::<usize>() {
            Ok(i) => Self::Index(i),
            Err(_) => Self::Name(s.trim().to_string()),
        }
    }

    fn resolve(&self, table: &Table) -> Option<usize> {
        match self {
            ColumnRef::Index(i) if *i < table.headers().len() => Some(*i),
            ColumnRef::Index(_) => None,
            ColumnRef::Name(name) => table.column_by_name(name),
        }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "column #{i}"),
            ColumnRef::Name(n) => write!(f, "column {n:?}"),
        }
    }
}

/// Column selection for the segment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentColumns {
    pub length: ColumnRef,
    pub name: Option<ColumnRef>,
    /// Fail when the name column cannot be identified instead of using empty names.
    pub require_name: bool,
}

impl Default for SegmentColumns {
    fn default() -> Self {
        Self {
            length: ColumnRef::Index(2),
            name: Some(ColumnRef::Name("name".to_string())),
            require_name: false,
        }
    }
}

/// Extracts segment specifications from a table.
pub fn read_segments(
    table: &Table,
    columns: &SegmentColumns,
    policy: LengthPolicy,
) -> Result<Vec<SegmentSpec>> {
    let len_col = columns.length.resolve(table).ok_or_else(|| {
        ProfileError::Schema(format!(
            "segment length {} not found in {} header columns",
            columns.length,
            table.headers().len()
        ))
    })?;
    let name_col = columns.name.as_ref().and_then(|c| c.resolve(table));
    if name_col.is_none() {
        if columns.require_name {
            let wanted = columns
                .name
                .as_ref()
                .map_or_else(|| "a name column".to_string(), ToString::to_string);
            return Err(ProfileError::Schema(format!("segment name {wanted} not found")));
        }
        log::debug!("no segment name column, stations are unnamed");
    }

    let mut segments = Vec::with_capacity(table.rows().len());
    for row in 0..table.rows().len() {
        let raw = table.cell(row, len_col).unwrap_or("");
        let length = match parse_number(raw).filter(|v| v.is_finite()) {
            Some(v) => v,
            None => match policy {
                LengthPolicy::CoerceToZero => {
                    log::warn!("segment row {}: length {raw:?} is not a number, using 0", row + 1);
                    0.0
                }
                LengthPolicy::Reject => {
                    return Err(ProfileError::MalformedValue {
                        row: row + 1,
                        column: table.headers()[len_col].clone(),
                        value: raw.to_string(),
                    });
                }
            },
        };
        let name = name_col
            .and_then(|c| table.cell(row, c))
            .map(normalize_name)
            .unwrap_or_default();
        segments.push(SegmentSpec { length, name });
    }
    Ok(segments)
}

fn normalize_name(cell: &str) -> String {
    let trimmed = cell.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Running sum of segment lengths, one station per segment.
pub fn build_stations(segments: &[SegmentSpec]) -> Vec<Station> {
    let mut running = 0.0;
    segments
        .iter()
        .map(|seg| {
            running += seg.length;
            Station::new(running, seg.name.clone())
        })
        .collect()
}

/// Total line length, i.e. the position of the last station.
pub fn total_length(stations: &[Station]) -> f64 {
    stations.last().map_or(0.0, |s| s.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Delimiter;

    fn table(lines: &[&str]) -> Table {
        Table::from_lines(lines, Delimiter::Comma)
    }

    #[test]
    fn cumulative_positions() {
        let segs = vec![
            SegmentSpec::new(60.19, "A"),
            SegmentSpec::new(225.0, "B"),
            SegmentSpec::new(310.0, "C"),
        ];
        let st = build_stations(&segs);
        let expected = [60.19, 285.19, 595.19];
        for (s, e) in st.iter().zip(expected) {
            assert!((s.position - e).abs() < 1e-9);
        }
        let names: Vec<&str> = st.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!((total_length(&st) - 595.19).abs() < 1e-9);
    }

    #[test]
    fn empty_segments() {
        assert!(build_stations(&[]).is_empty());
        assert_eq!(total_length(&[]), 0.0);
    }

    #[test]
    fn third_column_and_name_header_by_default() {
        let t = table(&["id,from,length,name", "1,x,60.19,A", "2,y,225,"]);
        let segs = read_segments(&t, &SegmentColumns::default(), LengthPolicy::default()).unwrap();
        assert_eq!(segs, vec![SegmentSpec::new(60.19, "A"), SegmentSpec::new(225.0, "")]);
    }

    #[test]
    fn bad_length_coerced_to_zero() {
        let t = table(&["a,b,len,name", "1,1,10,A", "1,1,oops,B", "1,1,5,C"]);
        let segs = read_segments(&t, &SegmentColumns::default(), LengthPolicy::CoerceToZero).unwrap();
        let st = build_stations(&segs);
        let pos: Vec<f64> = st.iter().map(|s| s.position).collect();
        assert_eq!(pos, vec![10.0, 10.0, 15.0]);
    }

    #[test]
    fn bad_length_rejected() {
        let t = table(&["a,b,len,name", "1,1,10,A", "1,1,oops,B"]);
        let err = read_segments(&t, &SegmentColumns::default(), LengthPolicy::Reject).unwrap_err();
        match err {
            ProfileError::MalformedValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "len");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn length_column_out_of_range() {
        let t = table(&["length", "1"]);
        let err = read_segments(&t, &SegmentColumns::default(), LengthPolicy::default()).unwrap_err();
        assert!(matches!(err, ProfileError::Schema(_)));
    }

    #[test]
    fn columns_by_name() {
        let t = table(&["Label,Length", "P1,12.5", "P2,7.5"]);
        let cols = SegmentColumns {
            length: ColumnRef::parse("length"),
            name: Some(ColumnRef::parse("label")),
            require_name: true,
        };
        let st = build_stations(&read_segments(&t, &cols, LengthPolicy::Reject).unwrap());
        assert_eq!(st, vec![Station::new(12.5, "P1"), Station::new(20.0, "P2")]);
    }

    #[test]
    fn missing_required_name_is_schema_error() {
        let t = table(&["a,b,length", "1,1,1"]);
        let cols = SegmentColumns {
            require_name: true,
            ..SegmentColumns::default()
        };
        let err = read_segments(&t, &cols, LengthPolicy::default()).unwrap_err();
        assert!(matches!(err, ProfileError::Schema(msg) if msg.contains("name")));
    }

    #[test]
    fn missing_optional_name_gives_empty_names() {
        let t = table(&["a,b,length", "1,1,4"]);
        let segs = read_segments(&t, &SegmentColumns::default(), LengthPolicy::default()).unwrap();
        assert_eq!(segs[0].name, "");
    }

    #[test]
    fn nan_and_short_rows_give_empty_names() {
        let t = table(&["a,b,length,name", "1,1,4,NaN", "1,1,4"]);
        let segs = read_segments(&t, &SegmentColumns::default(), LengthPolicy::default()).unwrap();
        assert_eq!(segs[0].name, "");
        assert_eq!(segs[1].name, "");
    }

    #[test]
    fn unicode_names_survive() {
        let t = table(&["a,b,length,name", "1,1,4,Μικροτομή Α"]);
        let segs = read_segments(&t, &SegmentColumns::default(), LengthPolicy::default()).unwrap();
        assert_eq!(segs[0].name, "Μικροτομή Α");
    }

    #[test]
    fn column_ref_parse() {
        assert_eq!(ColumnRef::parse("2"), ColumnRef::Index(2));
        assert_eq!(ColumnRef::parse(" name "), ColumnRef::Name("name".into()));
    }
}
