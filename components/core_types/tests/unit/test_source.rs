//! Unit tests for SourcePosition and SourceLocation

use core_types::{SourceLocation, SourcePosition};

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_large_values() {
        let pos = SourcePosition::new(u32::MAX, u32::MAX, usize::MAX);
        assert_eq!(pos.line, u32::MAX);
        assert_eq!(pos.column, u32::MAX);
        assert_eq!(pos.offset, usize::MAX);
    }

    #[test]
    fn test_source_position_is_copy() {
        let pos1 = SourcePosition::new(42, 7, 1000);
        let pos2 = pos1;
        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_position_serializes_without_offset() {
        let json = serde_json::to_value(SourcePosition::new(3, 9, 40)).unwrap();
        assert_eq!(json, serde_json::json!({ "line": 3, "column": 9 }));
    }
}

#[cfg(test)]
mod source_location_tests {
    use super::*;

    #[test]
    fn test_location_serializes_as_estree_loc() {
        let loc = SourceLocation::new(SourcePosition::new(1, 0, 0), SourcePosition::new(2, 1, 5));
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start": { "line": 1, "column": 0 },
                "end": { "line": 2, "column": 1 }
            })
        );
    }

    #[test]
    fn test_location_source_name() {
        let loc = SourceLocation::default().with_source(Some("main.js".to_string()));
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["source"], "main.js");
    }
}
