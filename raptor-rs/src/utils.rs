/// Keeps the first `visible` characters of a secret and appends an ellipsis.
///
/// The ellipsis is always present, so a redacted value never looks like the
/// full secret, even when the secret is shorter than `visible`.
pub fn redact(secret: &str, visible: usize) -> String {
    let kept: String = secret.chars().take(visible).collect();
    format!("{kept}...")
}
