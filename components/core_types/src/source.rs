//! Source position and location types shared by the parser and its tooling.
//!
//! Offsets are byte offsets into the UTF-8 source text. Lines are 1-based and
//! columns are 0-based, counted in characters, matching ESTree `loc` objects.

use serde::Serialize;

/// Represents a position in source code.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition::new(2, 4, 17);
/// assert_eq!(pos.line, 2);
/// assert_eq!(pos.column, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourcePosition {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number in characters (0-indexed)
    pub column: u32,
    /// Byte offset from the start of the source file
    #[serde(skip)]
    pub offset: usize,
}

impl SourcePosition {
    /// Creates a position from its line, column and byte offset.
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The position of the first character of a source text.
    pub fn origin() -> Self {
        Self::new(1, 0, 0)
    }
}

/// A `start`..`end` region of source, serialized as an ESTree `loc` object.
///
/// # Examples
///
/// ```
/// use core_types::{SourceLocation, SourcePosition};
///
/// let loc = SourceLocation::new(SourcePosition::new(1, 0, 0), SourcePosition::new(1, 3, 3));
/// assert_eq!(loc.end.offset - loc.start.offset, 3);
/// assert!(loc.source.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    /// Where the region starts
    pub start: SourcePosition,
    /// Where the region ends (exclusive)
    pub end: SourcePosition,
    /// File name or URL of the source, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SourceLocation {
    /// Creates a location without a source name.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start,
            end,
            source: None,
        }
    }

    /// Attaches a source name.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// True when `position` falls within this region.
    pub fn contains(&self, position: &SourcePosition) -> bool {
        self.start.offset <= position.offset && position.offset < self.end.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition::new(10, 5, 150);
        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_origin_is_first_line() {
        let pos = SourcePosition::origin();
        assert_eq!((pos.line, pos.column, pos.offset), (1, 0, 0));
    }

    #[test]
    fn test_location_contains() {
        let loc = SourceLocation::new(SourcePosition::new(1, 2, 2), SourcePosition::new(1, 6, 6));
        assert!(loc.contains(&SourcePosition::new(1, 2, 2)));
        assert!(loc.contains(&SourcePosition::new(1, 5, 5)));
        assert!(!loc.contains(&SourcePosition::new(1, 6, 6)));
    }
}
