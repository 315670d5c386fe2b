pub fn sanitize_symbol(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .take(20)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_symbol_pass_no_harm() {
        assert_eq!(sanitize_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn sanitize_symbol_pass_exchange_suffix() {
        assert_eq!(sanitize_symbol("shop.trt"), "SHOP.TRT");
        assert_eq!(sanitize_symbol("BRK-B"), "BRK-B");
    }

    #[test]
    fn sanitize_symbol_pass_trailing_newline() {
        assert_eq!(sanitize_symbol("msft\n"), "MSFT");
    }

    #[test]
    fn sanitize_symbol_pass_remove_unsafe() {
        assert_eq!(sanitize_symbol("ib&m;apikey=x"), "IBMAPIKEYX");
    }

    #[test]
    fn sanitize_symbol_pass_max_len() {
        let result = sanitize_symbol("ABCDEFGHIJABCDEFGHIJK");
        assert_eq!(result, "ABCDEFGHIJABCDEFGHIJ");
    }

    #[test]
    fn sanitize_symbol_pass_to_uppercase() {
        assert_eq!(sanitize_symbol("tsla"), "TSLA");
    }

    #[test]
    fn sanitize_symbol_fail_empty() {
        assert!(sanitize_symbol("  ?! ").is_empty());
    }
}
