//! URL helpers

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_duplicate_slashes() {
        assert_eq!(
            join_url("https://api.openai.com/v1/", "/files"),
            "https://api.openai.com/v1/files"
        );
        assert_eq!(
            join_url("https://api.openai.com/v1", "files/file-1"),
            "https://api.openai.com/v1/files/file-1"
        );
        assert_eq!(join_url("http://localhost:8080/", ""), "http://localhost:8080");
    }
}
