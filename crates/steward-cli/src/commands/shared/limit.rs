use steward_config::GeneralConfig;

/// Compute effective limit with precedence: subcommand arg, then global flag,
/// then `general.default_limit`. Zero means "unset".
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, general: &GeneralConfig) -> u32 {
    local
        .or(global)
        .filter(|limit| *limit > 0)
        .unwrap_or(general.default_limit)
}

#[cfg(test)]
mod tests {
    use steward_config::GeneralConfig;

    use super::effective_limit;

    fn general() -> GeneralConfig {
        GeneralConfig { default_limit: 20 }
    }

    #[test]
    fn local_takes_precedence() {
        assert_eq!(effective_limit(Some(5), Some(10), &general()), 5);
    }

    #[test]
    fn global_used_when_local_missing() {
        assert_eq!(effective_limit(None, Some(10), &general()), 10);
    }

    #[test]
    fn config_default_used_when_none_set() {
        assert_eq!(effective_limit(None, None, &general()), 20);
    }

    #[test]
    fn zero_falls_back_to_config_default() {
        assert_eq!(effective_limit(Some(0), None, &general()), 20);
    }
}
