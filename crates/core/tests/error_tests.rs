// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use fund_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn http() {
        let err = CoreError::Http {
            status: 503,
            message: "upstream unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "Subgraph returned HTTP 503: upstream unavailable"
        );
    }

    #[test]
    fn graphql_single_message() {
        let err = CoreError::GraphQl(vec!["Unknown field 'foo'".into()]);
        assert_eq!(err.to_string(), "GraphQL error: Unknown field 'foo'");
    }

    #[test]
    fn graphql_messages_joined() {
        let err = CoreError::GraphQl(vec!["first".into(), "second".into()]);
        assert_eq!(err.to_string(), "GraphQL error: first; second");
    }

    #[test]
    fn missing_data() {
        let err = CoreError::MissingData("data".into());
        assert_eq!(err.to_string(), "Subgraph response is missing 'data'");
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound {
            entity: "Fund".into(),
            id: "0xabc".into(),
        };
        assert_eq!(err.to_string(), "Fund not found: 0xabc");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("Address must not be empty".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Address must not be empty"
        );
    }

    #[test]
    fn configuration() {
        let err = CoreError::Configuration("MELON_SUBGRAPH_HTTP must be set".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: MELON_SUBGRAPH_HTTP must be set"
        );
    }
}

// ── Classification ──────────────────────────────────────────────────

mod upstream {
    use super::*;

    #[test]
    fn subgraph_failures_are_upstream() {
        assert!(CoreError::Network("x".into()).is_upstream());
        assert!(CoreError::Http {
            status: 500,
            message: String::new()
        }
        .is_upstream());
        assert!(CoreError::GraphQl(vec![]).is_upstream());
        assert!(CoreError::Deserialization("x".into()).is_upstream());
        assert!(CoreError::MissingData("data".into()).is_upstream());
    }

    #[test]
    fn input_and_lookup_failures_are_not_upstream() {
        assert!(!CoreError::ValidationError("x".into()).is_upstream());
        assert!(!CoreError::Configuration("x".into()).is_upstream());
        assert!(!CoreError::NotFound {
            entity: "Fund".into(),
            id: "0x1".into()
        }
        .is_upstream());
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts_serde_errors() {
        fn parse(input: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(input)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(matches!(parse("[1,").unwrap_err(), CoreError::Deserialization(_)));
    }
}
