const TOUCH_UA_MARKERS: [&str; 5] = ["mobi", "android", "iphone", "ipad", "ipod"];

/// Whether a user-agent string identifies a touch-first device.
///
/// Touch devices skip hover imagery, the hover cursor, and the tooltip,
/// and navigate on tap instead of click.
pub fn is_touch_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    TOUCH_UA_MARKERS.iter().any(|marker| ua.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_phones_and_tablets() {
        assert!(is_touch_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148"
        ));
        assert!(is_touch_user_agent(
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36"
        ));
        assert!(is_touch_user_agent("Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)"));
        assert!(is_touch_user_agent("Mozilla/5.0 (iPod touch; CPU iPhone OS 12_0)"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_touch_user_agent("SOMETHING MOBILE"));
        assert!(is_touch_user_agent("android"));
    }

    #[test]
    fn desktop_browsers_are_not_touch() {
        assert!(!is_touch_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36"
        ));
        assert!(!is_touch_user_agent(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.1; rv:121.0) Gecko/20100101 Firefox/121.0"
        ));
        assert!(!is_touch_user_agent(""));
    }
}
