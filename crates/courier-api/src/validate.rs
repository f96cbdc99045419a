use courier_types::Message;

use crate::error::ApiError;
use crate::store::{MessageStore, TokenRegistry};

/// A poll request that passed every check, ready for windowing.
#[derive(Debug)]
pub struct Validated {
    pub limit: usize,
    pub log: Vec<Message>,
}

/// Parse the raw limit segment. Anything that is not a positive integer is
/// rejected with the raw text echoed back.
pub fn parse_limit(raw: &str) -> Result<usize, ApiError> {
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => {
            usize::try_from(n).map_err(|_| ApiError::InvalidLimit(raw.to_string()))
        }
        _ => Err(ApiError::InvalidLimit(raw.to_string())),
    }
}

/// Check a poll request in order: limit, then token, then provider.
///
/// A request failing several checks reports the first one, so a bad limit
/// wins over a bad token and a bad token wins over a missing provider.
pub fn validate(
    store: &dyn MessageStore,
    tokens: &dyn TokenRegistry,
    provider_id: &str,
    limit: &str,
    token: &str,
) -> Result<Validated, ApiError> {
    let limit = parse_limit(limit)?;

    if token.is_empty() || !tokens.contains(token)? {
        return Err(ApiError::InvalidToken);
    }

    let log = store
        .get_log(provider_id)?
        .ok_or_else(|| ApiError::NoSuchProvider(provider_id.to_string()))?;

    Ok(Validated { limit, log })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStore {
        logs: HashMap<String, Vec<Message>>,
        lookups: AtomicUsize,
    }

    impl MessageStore for FixedStore {
        fn get_log(&self, provider_id: &str) -> anyhow::Result<Option<Vec<Message>>> {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            Ok(self.logs.get(provider_id).cloned())
        }

        fn append(&self, _: &str, _: &Message, _: Option<i64>) -> anyhow::Result<()> {
            anyhow::bail!("read-only")
        }

        fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct OneToken(&'static str);

    impl TokenRegistry for OneToken {
        fn contains(&self, token: &str) -> anyhow::Result<bool> {
            Ok(token == self.0)
        }
    }

    fn store() -> FixedStore {
        let mut logs = HashMap::new();
        logs.insert(
            "p".to_string(),
            vec![Message {
                id: "A".into(),
                message: "m1".into(),
                access: "*".into(),
                created_at: 1,
            }],
        );
        logs.insert("empty".to_string(), vec![]);
        FixedStore {
            logs,
            lookups: AtomicUsize::new(0),
        }
    }

    #[test]
    fn limit_must_be_a_positive_integer() {
        assert_eq!(parse_limit("3").unwrap(), 3);
        for raw in ["0", "-1", "", "abc", "2.5", "99999999999999999999"] {
            match parse_limit(raw) {
                Err(ApiError::InvalidLimit(echo)) => assert_eq!(echo, raw),
                other => panic!("{raw:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn valid_request_returns_log() {
        let store = store();
        let v = validate(&store, &OneToken("t"), "p", "5", "t").unwrap();
        assert_eq!(v.limit, 5);
        assert_eq!(v.log.len(), 1);

        let v = validate(&store, &OneToken("t"), "empty", "5", "t").unwrap();
        assert!(v.log.is_empty());
    }

    #[test]
    fn limit_is_checked_before_token() {
        let err = validate(&store(), &OneToken("t"), "missing", "0", "bad").unwrap_err();
        assert!(matches!(err, ApiError::InvalidLimit(_)));
    }

    #[test]
    fn token_is_checked_before_provider() {
        let store = store();
        let err = validate(&store, &OneToken("t"), "missing", "2", "bad").unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));

        let err = validate(&store, &OneToken(""), "p", "2", "").unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));

        assert_eq!(store.lookups.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn missing_provider_is_reported() {
        let err = validate(&store(), &OneToken("t"), "missing", "2", "t").unwrap_err();
        assert!(matches!(err, ApiError::NoSuchProvider(id) if id == "missing"));
    }
}
