//! Parsed record type
//!
//! An [`Entry`] is the typed form of one raw line `id name score`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of whitespace-delimited fields in a raw line
const FIELD_COUNT: usize = 3;

/// A validated, three-field parsed record
///
/// Entries are immutable once constructed. Uniqueness within a container is
/// decided by [`Entry::id`] alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    id: String,
    name: String,
    score: f64,
}

impl Entry {
    /// Create a new entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
        }
    }

    /// Parse a raw line into an entry
    ///
    /// # Parameters
    ///
    /// - `line`: The raw line, `id name score` separated by whitespace
    /// - `line_no`: 1-based position of the line, used in error reports
    ///
    /// # Returns
    ///
    /// - `Ok(Entry)`: The parsed entry
    /// - `Err(Error::InvalidRecord)`: Wrong field count, or a score that is
    ///   not a finite number
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(Error::invalid_record(
                line_no,
                format!("expected {} fields, got {}", FIELD_COUNT, fields.len()),
            ));
        }

        let score: f64 = fields[2].parse().map_err(|e| {
            Error::invalid_record(line_no, format!("bad score '{}': {}", fields[2], e))
        })?;
        if !score.is_finite() {
            return Err(Error::invalid_record(
                line_no,
                format!("score '{}' is not finite", fields[2]),
            ));
        }

        Ok(Self::new(fields[0], fields[1], score))
    }

    /// Unique key
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric score compared against the filter threshold
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whether this entry passes a filter at `threshold`
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.score > threshold
    }

    /// Bytes held by this entry, counting string capacity
    pub fn footprint(&self) -> usize {
        self.id.capacity() + self.name.capacity() + std::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let entry = Entry::parse("id7  name7\t7.5", 1).unwrap();
        assert_eq!(entry.id(), "id7");
        assert_eq!(entry.name(), "name7");
        assert_eq!(entry.score(), 7.5);
    }

    #[test]
    fn test_parse_rejects_field_count() {
        for line in ["", "id1 name1", "id1 name1 1.0 extra"] {
            match Entry::parse(line, 4) {
                Err(Error::InvalidRecord { line, .. }) => assert_eq!(line, 4),
                other => panic!("expected InvalidRecord, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_rejects_bad_score() {
        assert!(matches!(
            Entry::parse("id1 name1 abc", 1),
            Err(Error::InvalidRecord { .. })
        ));
        assert!(matches!(
            Entry::parse("id1 name1 NaN", 1),
            Err(Error::InvalidRecord { .. })
        ));
        assert!(matches!(
            Entry::parse("id1 name1 inf", 1),
            Err(Error::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_threshold_is_strict() {
        let entry = Entry::new("a", "b", 5.0);
        assert!(!entry.exceeds(5.0));
        assert!(entry.exceeds(4.999));
    }
}
