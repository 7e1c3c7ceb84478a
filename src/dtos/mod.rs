pub mod blogdtos;
pub mod chatdtos;
pub mod reviewdtos;
pub mod ticketdtos;
pub mod userdtos;

/// Trims a request field and treats blank input as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trims_and_drops_blank() {
        assert_eq!(non_empty(Some("  hi ".to_string())), Some("hi".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
