//! Flattening an API description into text for embedding.

use crate::spec::ApiSpec;

/// Summarize a spec as a single space-separated text blob.
///
/// Order: title, description, then for each path (document order) the path
/// template followed by the summary and description of each operation.
/// Empty fields are skipped. No other normalization is done.
pub fn summarize(spec: &ApiSpec) -> String {
    let mut parts: Vec<String> = vec![spec.info.title.clone(), spec.info.description.clone()];

    for (path, item) in &spec.paths {
        parts.push(path.clone());
        for (_, operation) in item.operations() {
            parts.push(operation.summary);
            parts.push(operation.description);
        }
    }

    parts.retain(|part| !part.is_empty());
    parts.join(" ")
}
