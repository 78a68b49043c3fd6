/// File-system safe form of a ticker: at most 20 characters, keeping
/// alphanumerics and `-`, `_`, `&` (as in `BAJAJ-AUTO` or `M&M`).
pub fn sanitize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .take(20)
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '&'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_symbol_pass_no_harm() {
        let result = sanitize_symbol("INFY");
        assert_eq!(result, "INFY".to_string());
    }

    #[test]
    fn sanitize_symbol_pass_delimiters() {
        let result = sanitize_symbol("BAJAJ-AUTO_&");
        assert_eq!(result, "BAJAJ-AUTO_&".to_string());
    }

    #[test]
    fn sanitize_symbol_pass_remove_path_separators() {
        let result = sanitize_symbol("../../etc/passwd");
        assert_eq!(result, "etcpasswd".to_string());
    }

    #[test]
    fn sanitize_symbol_pass_max_len() {
        let result = sanitize_symbol("123123123123123123123");
        assert_eq!(result, "12312312312312312312".to_string());
    }

    #[test]
    fn sanitize_symbol_pass_keeps_case() {
        let result = sanitize_symbol("M&M");
        assert_eq!(result, "M&M".to_string());
    }
}
