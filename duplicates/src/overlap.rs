//! Structural overlap between two API surfaces.
//!
//! Counts shared endpoint paths, exactly and by a crude fuzzy rule, and
//! describes shared paths and schemas in human-readable form.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use apiscope_openapi::ApiSpec;

/// Exact and fuzzy path matches between two path sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapCount {
    /// Paths present verbatim in both sets.
    pub exact: usize,

    /// Paths of the first set that only match the second set fuzzily.
    pub fuzzy: usize,
}

impl OverlapCount {
    /// Exact plus fuzzy matches.
    pub fn total(&self) -> usize {
        self.exact + self.fuzzy
    }
}

/// Count overlapping paths between `paths_a` and `paths_b`.
///
/// Every path of `a` missing from `b` is checked against each path of `b`
/// with [`paths_similar`] and contributes at most one fuzzy match. The
/// count is not symmetric: swapping the arguments can change `fuzzy`.
pub fn count_overlap(paths_a: &IndexSet<String>, paths_b: &IndexSet<String>) -> OverlapCount {
    let exact = paths_a.intersection(paths_b).count();

    let fuzzy = paths_a
        .iter()
        .filter(|a| !paths_b.contains(*a))
        .filter(|a| paths_b.iter().any(|b| paths_similar(a, b)))
        .count();

    OverlapCount { exact, fuzzy }
}

/// Whether two path templates look alike.
///
/// Both paths lose `{`, `}`, the substring `id` and `_`, then are
/// lowercased; they match if either contains the other. Short segments
/// give false positives.
pub fn paths_similar(path_a: &str, path_b: &str) -> bool {
    let a = normalize_path(path_a);
    let b = normalize_path(path_b);
    a.contains(&b) || b.contains(&a)
}

fn normalize_path(path: &str) -> String {
    path.replace(['{', '}'], "")
        .replace("id", "")
        .replace('_', "")
        .to_lowercase()
}

/// Describe what two specs share.
///
/// At most two facts, endpoints first: identical paths and common schema
/// names. Falls back to a generic line when neither applies.
pub fn overlap_details(spec_a: &ApiSpec, spec_b: &ApiSpec) -> Vec<String> {
    let mut details = Vec::new();

    let common_paths = spec_a.path_set().intersection(&spec_b.path_set()).count();
    if common_paths > 0 {
        details.push(format!("Both expose {common_paths} identical endpoints"));
    }

    let common_schemas = spec_a
        .schema_names()
        .intersection(&spec_b.schema_names())
        .count();
    if common_schemas > 0 {
        details.push(format!("Share {common_schemas} common data models"));
    }

    if details.is_empty() {
        details.push("Similar API functionality".to_string());
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paths(items: &[&str]) -> IndexSet<String> {
        items.iter().map(|p| (*p).to_string()).collect()
    }

    fn spec(paths: &[&str], schemas: &[&str]) -> ApiSpec {
        let paths: serde_json::Map<String, serde_json::Value> =
            paths.iter().map(|p| ((*p).to_string(), json!({}))).collect();
        let schemas: serde_json::Map<String, serde_json::Value> = schemas
            .iter()
            .map(|s| ((*s).to_string(), json!({"type": "object"})))
            .collect();
        ApiSpec::from_value(json!({
            "info": {"title": "t"},
            "paths": paths,
            "components": {"schemas": schemas}
        }))
        .unwrap()
    }

    #[test]
    fn test_users_and_orders_scenario() {
        // "/users/{id}" -> "/users/" and "/user/{userId}" -> "/user/userid":
        // neither contains the other, so only "/orders" counts.
        let a = paths(&["/users/{id}", "/orders"]);
        let b = paths(&["/user/{userId}", "/orders"]);
        assert_eq!(count_overlap(&a, &b), OverlapCount { exact: 1, fuzzy: 0 });
        assert_eq!(count_overlap(&a, &b).total(), 1);
    }

    #[test]
    fn test_fuzzy_match_on_parameter_rename() {
        let a = paths(&["/users/{id}", "/orders"]);
        let b = paths(&["/users/{user_id}", "/orders"]);
        assert_eq!(count_overlap(&a, &b), OverlapCount { exact: 1, fuzzy: 1 });
        assert_eq!(count_overlap(&a, &b).total(), 2);
    }

    #[test]
    fn test_each_path_counts_at_most_once() {
        let a = paths(&["/pets"]);
        let b = paths(&["/pets/{id}", "/pets/{petId}/toys", "/api/pets"]);
        assert_eq!(count_overlap(&a, &b), OverlapCount { exact: 0, fuzzy: 1 });
    }

    #[test]
    fn test_exact_paths_are_not_also_fuzzy() {
        let a = paths(&["/a"]);
        let b = paths(&["/a", "/ab"]);
        assert_eq!(count_overlap(&a, &b), OverlapCount { exact: 1, fuzzy: 0 });
    }

    #[test]
    fn test_count_is_asymmetric() {
        let a = paths(&["/a"]);
        let b = paths(&["/a", "/ab"]);
        assert_eq!(count_overlap(&a, &b).total(), 1);
        assert_eq!(count_overlap(&b, &a).total(), 2);
    }

    #[test]
    fn test_empty_sets() {
        let empty = IndexSet::new();
        assert_eq!(count_overlap(&empty, &paths(&["/x"])).total(), 0);
        assert_eq!(count_overlap(&paths(&["/x"]), &empty).total(), 0);
    }

    #[test]
    fn test_paths_similar_normalization() {
        assert!(paths_similar("/Users/{ID}", "/users/{ID}"));
        assert!(paths_similar("/order_items", "/orderitems"));
        // "id" is stripped before lowercasing, so "Id" survives.
        assert!(!paths_similar("/users/{id}", "/user/{userId}"));
        // Stripping "id" can empty a path, which then matches anything.
        assert!(paths_similar("/{id}", "/invoices"));
    }

    #[test]
    fn test_overlap_details_both_facts() {
        let a = spec(&["/users", "/orders", "/health"], &["User", "Order"]);
        let b = spec(&["/users", "/orders"], &["User", "Invoice"]);
        assert_eq!(
            overlap_details(&a, &b),
            vec![
                "Both expose 2 identical endpoints".to_string(),
                "Share 1 common data models".to_string(),
            ]
        );
    }

    #[test]
    fn test_overlap_details_schemas_only() {
        let a = spec(&["/a"], &["Pet"]);
        let b = spec(&["/b"], &["Pet"]);
        assert_eq!(overlap_details(&a, &b), vec!["Share 1 common data models"]);
    }

    #[test]
    fn test_overlap_details_fallback() {
        let a = spec(&["/a"], &[]);
        let b = spec(&["/b"], &["Pet"]);
        assert_eq!(overlap_details(&a, &b), vec!["Similar API functionality"]);
    }
}
