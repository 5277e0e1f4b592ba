//! Cypher query construction for the canned views.
//!
//! Templates stay separate from interpolated values: range bounds are
//! required to parse as numbers before they are substituted, so user input
//! can never alter the query shape. Free-text queries are not templated at
//! all; they only get their line breaks stripped.

use crate::error::QueryError;

/// Result cap applied to every canned query.
pub const RESULT_LIMIT: u32 = 1000;

/// Pagerank threshold used by the default view.
pub const DEFAULT_RANK_THRESHOLD: f64 = 200.0;

/// Path pattern shared by the canned views: projects and the keyphrases
/// they include.
const PROJECT_KEYPHRASE_PATTERN: &str = "MATCH (p:Project)-[r:includes]-(k:Keyphrase)";

/// Build the default view query: keyphrases whose pagerank exceeds the
/// given threshold, together with the projects that include them.
pub fn rank_above(threshold: f64) -> String {
    format!(
        "{} WHERE k.pagerank > {} RETURN p,r,k LIMIT {}",
        PROJECT_KEYPHRASE_PATTERN, threshold, RESULT_LIMIT
    )
}

/// Build the range-filter query: keyphrases whose pagerank lies strictly
/// between the two bounds.
///
/// Both bounds must be non-empty after trimming and must parse as numbers.
/// The trimmed bound text is substituted verbatim, so "100" stays "100"
/// and "0.5" stays "0.5".
pub fn rank_between(start: &str, end: &str) -> Result<String, QueryError> {
    let start = start.trim();
    let end = end.trim();

    if start.is_empty() || end.is_empty() {
        return Err(QueryError::MissingBound);
    }
    for bound in [start, end] {
        if bound.parse::<f64>().is_err() {
            return Err(QueryError::NonNumericBound(bound.to_string()));
        }
    }

    Ok(format!(
        "{} WHERE k.pagerank > {} AND k.pagerank < {} RETURN p,r,k LIMIT {}",
        PROJECT_KEYPHRASE_PATTERN, start, end, RESULT_LIMIT
    ))
}

/// Remove every CR and LF from a free-text query.
///
/// The multi-line input field must never retain line breaks; the stripped
/// text is echoed back to the page and sent to the database verbatim.
pub fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_query() {
        assert_eq!(
            rank_above(DEFAULT_RANK_THRESHOLD),
            "MATCH (p:Project)-[r:includes]-(k:Keyphrase) \
             WHERE k.pagerank > 200 RETURN p,r,k LIMIT 1000"
        );
    }

    #[test]
    fn test_range_query_substitutes_bounds_verbatim() {
        let query = rank_between("100", "300").unwrap();
        assert_eq!(
            query,
            "MATCH (p:Project)-[r:includes]-(k:Keyphrase) \
             WHERE k.pagerank > 100 AND k.pagerank < 300 RETURN p,r,k LIMIT 1000"
        );
    }

    #[test]
    fn test_range_query_accepts_decimal_bounds() {
        let query = rank_between(" 0.5 ", "12.25").unwrap();
        assert!(query.contains("k.pagerank > 0.5 AND k.pagerank < 12.25"));
    }

    #[test]
    fn test_range_query_requires_both_bounds() {
        assert_eq!(rank_between("", "300"), Err(QueryError::MissingBound));
        assert_eq!(rank_between("100", ""), Err(QueryError::MissingBound));
        assert_eq!(rank_between("  ", "300"), Err(QueryError::MissingBound));
    }

    #[test]
    fn test_range_query_rejects_non_numeric_bounds() {
        assert_eq!(
            rank_between("100 OR 1=1", "300"),
            Err(QueryError::NonNumericBound("100 OR 1=1".to_string()))
        );
        assert_eq!(
            rank_between("100", "abc"),
            Err(QueryError::NonNumericBound("abc".to_string()))
        );
    }

    #[test]
    fn test_strip_line_breaks() {
        assert_eq!(
            strip_line_breaks("MATCH (n) RETURN n\n LIMIT 5\r\n"),
            "MATCH (n) RETURN n LIMIT 5"
        );
        assert_eq!(strip_line_breaks("\n"), "");
        assert_eq!(strip_line_breaks("no breaks"), "no breaks");
    }
}
