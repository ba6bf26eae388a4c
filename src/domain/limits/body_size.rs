//! Declared body size pre-check.

use super::Decision;

/// Default maximum request body size: 2 MiB.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 2 * 1024 * 1024;

/// Rejects requests whose declared `Content-Length` exceeds a maximum.
///
/// This only inspects the declared length. Bodies sent without one (or with
/// a false one) are capped separately when the body is extracted.
#[derive(Debug, Clone, Copy)]
pub struct BodySizeGuard {
    max_body_bytes: u64,
}

impl BodySizeGuard {
    pub fn new(max_body_bytes: u64) -> Self {
        Self { max_body_bytes }
    }

    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }

    pub fn check(&self, declared_length: Option<u64>) -> Decision {
        match declared_length {
            Some(length) if length > self.max_body_bytes => Decision::Rejected {
                reason: self.rejection_reason(),
            },
            _ => Decision::Allowed,
        }
    }

    /// Diagnostic returned for oversized bodies.
    pub fn rejection_reason(&self) -> String {
        format!(
            "Payload too large: request body exceeds {} bytes",
            self.max_body_bytes
        )
    }

    /// Checks a raw `Content-Length` header value.
    ///
    /// Values that are not a plain non-negative integer count as absent; an
    /// integer too large for `u64` saturates and is therefore rejected.
    pub fn check_header(&self, value: Option<&str>) -> Decision {
        self.check(value.and_then(parse_declared_length))
    }
}

impl Default for BodySizeGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_BYTES)
    }
}

fn parse_declared_length(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(value.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_boundaries() {
        let guard = BodySizeGuard::new(1024);

        assert!(guard.check(Some(1025)).is_rejected());
        assert_eq!(guard.check(Some(1024)), Decision::Allowed);
        assert_eq!(guard.check(Some(0)), Decision::Allowed);
        assert_eq!(guard.check(None), Decision::Allowed);
    }

    #[test]
    fn test_rejection_message_names_limit() {
        let guard = BodySizeGuard::new(1024);

        match guard.check(Some(4096)) {
            Decision::Rejected { reason } => {
                assert!(reason.to_lowercase().contains("too large"));
                assert!(reason.contains("1024"));
            }
            Decision::Allowed => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_default_is_two_mebibytes() {
        let guard = BodySizeGuard::default();

        assert_eq!(guard.max_body_bytes(), 2_097_152);
        assert!(guard.check(Some(2_097_153)).is_rejected());
    }

    #[test]
    fn test_check_header_ignores_malformed_values() {
        let guard = BodySizeGuard::new(10);

        assert!(guard.check_header(Some("11")).is_rejected());
        assert!(guard.check_header(Some("-5")).is_allowed());
        assert!(guard.check_header(Some("1e9")).is_allowed());
        assert!(guard.check_header(Some("")).is_allowed());
        assert!(guard.check_header(None).is_allowed());
    }

    #[test]
    fn test_check_header_overflowing_value_is_rejected() {
        let guard = BodySizeGuard::new(10);

        assert!(
            guard
                .check_header(Some("99999999999999999999999999"))
                .is_rejected()
        );
    }
}
