use crate::core::Rid;
use crate::error::SliqError;
use std::fmt::{Display, Formatter};

/// One `(rid, value)` pair of a numeric attribute list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeEntry {
    pub rid: Rid,
    pub value: f64,
}

impl AttributeEntry {
    pub fn new(rid: Rid, value: f64) -> Self {
        Self { rid, value }
    }

    /// Parses a `"<rid> <value>"` line. `resource` and `line_no` only feed the error.
    pub fn parse(line: &str, resource: &str, line_no: usize) -> Result<Self, SliqError> {
        let mut parts = line.split_whitespace();
        let (Some(rid), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SliqError::parse(
                resource,
                line_no,
                format!("expected '<rid> <value>', got '{line}'"),
            ));
        };
        let rid = rid
            .parse::<Rid>()
            .map_err(|e| SliqError::parse(resource, line_no, format!("bad rid '{rid}': {e}")))?;
        let value = parse_value(value)
            .ok_or_else(|| SliqError::parse(resource, line_no, format!("bad value '{value}'")))?;
        Ok(Self { rid, value })
    }
}

impl Display for AttributeEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.rid, self.value)
    }
}

/// Parses a numeric attribute value. NaN is rejected: missing values are not supported.
pub fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rid_and_value() {
        let e = AttributeEntry::parse("12 3.5", "a.txt", 1).unwrap();
        assert_eq!(e, AttributeEntry::new(12, 3.5));
        let e = AttributeEntry::parse("0\t-1e3", "a.txt", 1).unwrap();
        assert_eq!(e.value, -1000.0);
    }

    #[test]
    fn rejects_malformed_lines_with_location() {
        for bad in ["12", "x 1.0", "1 abc", "1 2 3", "1 NaN"] {
            let err = AttributeEntry::parse(bad, "doors.txt", 9).unwrap_err();
            match err {
                SliqError::Parse { resource, line, .. } => {
                    assert_eq!(resource, "doors.txt");
                    assert_eq!(line, 9);
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn display_matches_on_disk_format() {
        assert_eq!(AttributeEntry::new(4, 2.0).to_string(), "4 2");
        assert_eq!(AttributeEntry::new(4, 2.25).to_string(), "4 2.25");
    }
}
