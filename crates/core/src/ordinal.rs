//! English ordinal formatting
//!
//! Messages refer to transactions by 1-based ordinal position
//! ("the 1st transaction", "the 12th transaction", "the 22nd transaction").

/// Format a number with its English ordinal suffix
///
/// # Examples
///
/// ```
/// use datamocks_core::ordinal::ordinalize;
///
/// assert_eq!(ordinalize(1), "1st");
/// assert_eq!(ordinalize(12), "12th");
/// assert_eq!(ordinalize(23), "23rd");
/// ```
pub fn ordinalize(n: usize) -> String {
    format!("{}{}", n, suffix(n))
}

/// The ordinal suffix for `n` without the number itself
pub fn suffix(n: usize) -> &'static str {
    // 11, 12 and 13 (and 111, 212, ...) take "th"
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }

    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
