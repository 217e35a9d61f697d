use serde::{Serialize, Serializer};
use std::fmt;

use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

/// Page ranges to focus on while reading, written `a-b[,c-d]*`.
/// The empty string means "no focus range".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusPages(Vec<PageRange>);

impl FocusPages {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        raw.split(',')
            .map(parse_range)
            .collect::<Option<Vec<_>>>()
            .map(Self)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Invalid focus_pages '{}', use '1-20' or '1-20,30-40'",
                    raw
                ))
            })
    }

    pub fn ranges(&self) -> &[PageRange] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_range(part: &str) -> Option<PageRange> {
    let (start, end) = part.split_once('-')?;
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    (start <= end).then_some(PageRange { start, end })
}

fn parse_page(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for FocusPages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}-{}", range.start, range.end)?;
        }
        Ok(())
    }
}

impl Serialize for FocusPages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
