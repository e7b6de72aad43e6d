//! SPARQL query text for the inscription count lookups.
//!
//! The store models inscriptions with the `epig:` vocabulary: an
//! `epig:Inscription` links to a place either through `epig:pleiadesId`
//! (a string literal) or through `epig:foundLocation` (a custom location
//! resource). Counts are always `COUNT(DISTINCT ?inscription)`.

/// Escape a string for use as a SPARQL literal.
///
/// Place ids are numeric or slug-like, but ids flow in from user-editable
/// datasets, so backslashes and quotes are escaped rather than trusted.
fn escape_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Count query for a single place.
///
/// With a `location_id`, records linked to the custom location resource are
/// counted too (UNION branch).
pub fn single_count_query(place_id: &str, location_id: Option<&str>) -> String {
    let place_id = escape_literal(place_id);
    let union = match location_id {
        Some(location_id) => format!(
            "\n      UNION {{\n        ?inscription epig:foundLocation location:{} .\n      }}",
            escape_literal(location_id)
        ),
        None => String::new(),
    };

    format!(
        r#"PREFIX epig: <http://example.org/epigraphy/>
PREFIX location: <http://example.org/location/>

SELECT (COUNT(DISTINCT ?inscription) as ?count)
WHERE {{
  ?inscription a epig:Inscription .
  {{
    ?inscription epig:pleiadesId "{place_id}" .
  }}{union}
}}
"#
    )
}

/// Batched count query for many places, one `VALUES` row per id.
///
/// The endpoint groups by place id, so ids without any inscription simply
/// produce no row — callers default those to zero.
pub fn batched_counts_query(place_ids: &[String]) -> String {
    let values = place_ids
        .iter()
        .map(|id| format!("\"{}\"", escape_literal(id)))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"PREFIX epig: <http://example.org/epigraphy/>

SELECT ?placeId (COUNT(DISTINCT ?inscription) as ?count)
WHERE {{
  VALUES ?placeId {{ {values} }}
  ?inscription a epig:Inscription ;
               epig:pleiadesId ?placeId .
}}
GROUP BY ?placeId
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_count_query_without_location() {
        let query = single_count_query("579885", None);
        assert!(query.contains(r#"epig:pleiadesId "579885""#));
        assert!(query.contains("COUNT(DISTINCT ?inscription)"));
        assert!(!query.contains("UNION"));
    }

    #[test]
    fn test_single_count_query_with_location_union() {
        let query = single_count_query("579885", Some("loc-042"));
        assert!(query.contains("UNION"));
        assert!(query.contains("epig:foundLocation location:loc-042"));
    }

    #[test]
    fn test_batched_counts_query_values_clause() {
        let ids = vec!["111".to_string(), "222".to_string(), "333".to_string()];
        let query = batched_counts_query(&ids);
        assert!(query.contains(r#"VALUES ?placeId { "111" "222" "333" }"#));
        assert!(query.contains("GROUP BY ?placeId"));
    }

    #[test]
    fn test_literals_escaped() {
        let query = single_count_query(r#"bad"id"#, None);
        assert!(query.contains(r#"epig:pleiadesId "bad\"id""#));

        let query = batched_counts_query(&[r#"a\b"#.to_string()]);
        assert!(query.contains(r#""a\\b""#));
    }
}
