use muninn::{MuninnError, Result};

#[test]
fn test_error_display() {
    let err = MuninnError::Api {
        status: 422,
        message: "Summary must be at least 10 characters".into(),
    };
    assert!(err.to_string().contains("422"));
    assert!(err.to_string().contains("at least 10 characters"));
}

#[test]
fn timeout_message_is_distinct_from_network() {
    let timeout = MuninnError::Timeout {
        operation: "process_meeting",
    };
    let network = MuninnError::Network("connection reset".into());

    assert!(timeout.to_string().contains("taking longer than expected"));
    assert!(!network.to_string().contains("taking longer than expected"));
    assert_eq!(timeout.timed_out_operation(), Some("process_meeting"));
    assert_eq!(network.timed_out_operation(), None);
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(MuninnError::InvalidInput("empty".into()))
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// Recovery classification
// ============================================================================

#[test]
fn recoverable_errors() {
    assert!(
        MuninnError::Timeout {
            operation: "process_meeting"
        }
        .is_recoverable()
    );
    assert!(MuninnError::Network("reset".into()).is_recoverable());
    assert!(
        MuninnError::Api {
            status: 500,
            message: "internal".into()
        }
        .is_recoverable()
    );
    assert!(MuninnError::InvalidInput("empty".into()).is_recoverable());
    assert!(MuninnError::UnsupportedFormat("xlsx".into()).is_recoverable());
}

#[test]
fn connectivity_is_session_fatal() {
    assert!(!MuninnError::Connectivity("probe failed".into()).is_recoverable());
}
