use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse one seed: decimal, or hexadecimal with a `0x` prefix.
pub fn parse_seed(token: &str) -> Result<u64> {
    let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => token.replace('_', "").parse(),
    };
    parsed.with_context(|| format!("invalid seed '{token}'"))
}

pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    tokens.iter().map(|t| parse_seed(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn seeds_accept_decimal_and_hex() {
        assert_eq!(parse_seed("1337").unwrap(), 1337);
        assert_eq!(parse_seed("0xB10C").unwrap(), 0xB10C);
        assert_eq!(parse_seed("1_000").unwrap(), 1_000);
        assert!(parse_seed("creeper").is_err());
    }

    #[test]
    fn resolve_stops_at_first_bad_seed() {
        let tokens = split_csv("1,2,x");
        let err = resolve_seeds(&tokens).unwrap_err();
        assert!(format!("{err:#}").contains("invalid seed 'x'"));
    }
}
