/// Report whether the PR title contains any of the skip keywords,
/// case-insensitively. Used to decide whether to run assignment at all.
pub fn includes_skip_keywords(title: &str, skip_keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    skip_keywords
        .iter()
        .any(|keyword| title.contains(&keyword.to_lowercase()))
}
