use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
    pub host: String,
    pub port: u16,
    /// Mounted in front of every auth and post route. Empty means no prefix.
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            jwt_secret: get("SECRET_KEY")
                .ok_or_else(|| anyhow::anyhow!("Missing required env var: SECRET_KEY"))?,
            access_token_ttl_seconds: parse_duration(
                &get("ACCESS_TOKEN_EXPIRATION").unwrap_or_else(|| "15m".into()),
            )
            .map_err(|e| anyhow::anyhow!("ACCESS_TOKEN_EXPIRATION: {e}"))?,
            refresh_token_ttl_seconds: parse_duration(
                &get("REFRESH_TOKEN_EXPIRATION").unwrap_or_else(|| "7d".into()),
            )
            .map_err(|e| anyhow::anyhow!("REFRESH_TOKEN_EXPIRATION: {e}"))?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: get("PORT").unwrap_or_else(|| "3000".into()).parse()?,
            api_prefix: normalize_prefix(&lookup("API_PREFIX").unwrap_or_else(|| "/api".into())),
        })
    }
}

/// Longest accepted token lifetime: 100 years.
pub const MAX_DURATION_SECONDS: u64 = 100 * 365 * 86_400;

/// Parses `90`, `30s`, `15m`, `12h`, `7d` or `2w` into seconds.
pub fn parse_duration(raw: &str) -> anyhow::Result<u64> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid duration '{raw}'"))?;
    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        other => anyhow::bail!("unknown duration unit '{other}' in '{raw}'"),
    };
    if amount == 0 {
        anyhow::bail!("duration must be positive, got '{raw}'");
    }

    amount
        .checked_mul(multiplier)
        .filter(|secs| *secs <= MAX_DURATION_SECONDS)
        .ok_or_else(|| anyhow::anyhow!("duration '{raw}' exceeds 100 years"))
}

/// `api`, `/api` and `/api/` all become `/api`; blank becomes the empty prefix.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup(&[("SECRET_KEY", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.access_token_ttl_seconds, 15 * 60);
        assert_eq!(config.refresh_token_ttl_seconds, 7 * 86_400);
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn missing_or_blank_secret_is_rejected() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("SECRET_KEY", "  ")])).is_err());
    }

    #[test]
    fn custom_lifetimes_and_empty_prefix() {
        let config = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "k"),
            ("ACCESS_TOKEN_EXPIRATION", "30s"),
            ("REFRESH_TOKEN_EXPIRATION", "2h"),
            ("API_PREFIX", ""),
        ]))
        .unwrap();

        assert_eq!(config.access_token_ttl_seconds, 30);
        assert_eq!(config.refresh_token_ttl_seconds, 7_200);
        assert_eq!(config.api_prefix, "");
    }

    #[test]
    fn malformed_lifetime_is_a_startup_error() {
        let result = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "k"),
            ("ACCESS_TOKEN_EXPIRATION", "soon"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn duration_units() {
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert_eq!(parse_duration("15m").unwrap(), 900);
        assert_eq!(parse_duration("1w").unwrap(), 604_800);
        assert!(parse_duration("0m").is_err());
        assert!(parse_duration("-5m").is_err());
        assert!(parse_duration("5y").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn oversized_lifetime_is_a_startup_error() {
        let result = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "k"),
            ("REFRESH_TOKEN_EXPIRATION", "18446744073709551615"),
        ]));
        assert!(result.is_err());

        assert!(parse_duration("5300w").is_err());
        assert_eq!(parse_duration("36500d").unwrap(), MAX_DURATION_SECONDS);
    }

    #[test]
    fn prefix_normalization() {
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/"), "/api");
        assert_eq!(normalize_prefix("/"), "");
    }
}
