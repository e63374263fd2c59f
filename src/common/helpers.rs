// Helper functions for safe logging

/// Masks tokens for safe logging
/// Shows only the first and last 4 characters
///
/// # Example
/// ```ignore
/// let masked = safe_token_log("1234567.pt.abcdefghijklmnop");
/// // Returns: "1234...mnop"
/// ```
pub fn safe_token_log(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
