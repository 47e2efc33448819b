//! Route labels for spans and metrics.

/// Collapse numeric path segments so per-resource paths share one label.
pub(super) fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments_become_placeholders() {
        assert_eq!(normalise_route("/products/42"), "/products/{id}");
        assert_eq!(normalise_route("/wishlist/7/add"), "/wishlist/{id}/add");
    }

    #[test]
    fn static_routes_are_unchanged() {
        assert_eq!(normalise_route("/"), "/");
        assert_eq!(normalise_route("/users/cart"), "/users/cart");
        assert_eq!(normalise_route("/products/v2"), "/products/v2");
    }
}
