//! Expiration stamping and checking for token payloads.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::claims::{EXPIRATION, ISSUED_AT};
use crate::error::{JwtError, JwtResult};

/// Source of the current UTC instant.
///
/// Injectable so expiration behavior is deterministic under test.
pub trait Clock: Send + Sync {
    /// Current wall-clock time, normalized to UTC.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the process wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Stamps and checks the `exp`/`iat` claims.
pub struct ExpirationPolicy {
    clock: Arc<dyn Clock>,
}

impl ExpirationPolicy {
    /// Policy over the given clock collaborator.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Append `exp` (the expiry, floored to whole UTC seconds since
    /// epoch) and then `iat` (now) to the payload. `None` leaves the
    /// payload untouched; no `exp`/`iat` are added.
    pub fn stamp(&self, payload: &mut Map<String, Value>, expire_at: Option<DateTime<Utc>>) {
        if let Some(at) = expire_at {
            payload.insert(EXPIRATION.to_string(), Value::from(at.timestamp()));
            payload.insert(
                ISSUED_AT.to_string(),
                Value::from(self.clock.now_utc().timestamp()),
            );
        }
    }

    /// Fail with [`JwtError::TokenExpired`] when the payload carries an
    /// `exp` strictly in the past. Payloads without `exp` never expire.
    pub fn check_not_expired(&self, payload: &Map<String, Value>) -> JwtResult<()> {
        let Some(exp) = payload.get(EXPIRATION) else {
            return Ok(());
        };

        let seconds = parse_exp_seconds(exp)?;
        let expire_at = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| JwtError::MalformedExpiration(exp.to_string()))?;

        if self.clock.now_utc() > expire_at {
            return Err(JwtError::TokenExpired);
        }
        Ok(())
    }
}

/// Interpret `exp` as an integer second count. Accepts a JSON integer
/// or a string holding one (matching the original system's lenient
/// parse); everything else is malformed.
fn parse_exp_seconds(value: &Value) -> JwtResult<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| JwtError::MalformedExpiration(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn policy_at(now: i64) -> ExpirationPolicy {
        let now = Utc.timestamp_opt(now, 0).single().expect("valid instant");
        ExpirationPolicy::new(Arc::new(FixedClock(now)))
    }

    #[test]
    fn stamp_appends_exp_then_iat() {
        let policy = policy_at(1_000);
        let mut payload = Map::new();
        payload.insert("hello".into(), "world".into());

        let expire_at = Utc.timestamp_opt(1_060, 0).single().expect("valid instant");
        policy.stamp(&mut payload, Some(expire_at));

        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, ["hello", "exp", "iat"]);
        assert_eq!(payload["exp"], 1_060);
        assert_eq!(payload["iat"], 1_000);
    }

    #[test]
    fn stamp_without_expiry_leaves_payload_untouched() {
        let policy = policy_at(1_000);
        let mut payload = Map::new();
        payload.insert("hello".into(), "world".into());

        policy.stamp(&mut payload, None);

        assert_eq!(payload.len(), 1);
        assert!(!payload.contains_key("exp"));
        assert!(!payload.contains_key("iat"));
    }

    #[test]
    fn absent_exp_passes() {
        let policy = policy_at(i64::from(i32::MAX));
        let mut payload = Map::new();
        payload.insert("hello".into(), "world".into());
        policy.check_not_expired(&payload).expect("no exp, no expiry");
    }

    #[test]
    fn past_exp_is_expired() {
        let policy = policy_at(2_000);
        let mut payload = Map::new();
        payload.insert("exp".into(), 1_999.into());
        let err = policy.check_not_expired(&payload).unwrap_err();
        assert!(matches!(err, JwtError::TokenExpired));
    }

    #[test]
    fn exact_exp_instant_is_not_expired() {
        // expiry is strict: now must be past exp, not equal to it
        let policy = policy_at(2_000);
        let mut payload = Map::new();
        payload.insert("exp".into(), 2_000.into());
        policy.check_not_expired(&payload).expect("boundary instant");
    }

    #[test]
    fn string_exp_is_accepted() {
        let policy = policy_at(1_000);
        let mut payload = Map::new();
        payload.insert("exp".into(), "2000".into());
        policy.check_not_expired(&payload).expect("numeric string exp");
    }

    #[test]
    fn non_integer_exp_is_malformed() {
        let policy = policy_at(1_000);
        for bad in [Value::from("soon"), Value::from(true), Value::from(1.5)] {
            let mut payload = Map::new();
            payload.insert("exp".into(), bad);
            let err = policy.check_not_expired(&payload).unwrap_err();
            assert!(matches!(err, JwtError::MalformedExpiration(_)));
        }
    }
}
