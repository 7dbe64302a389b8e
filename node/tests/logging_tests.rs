//! Global subscriber installation. Kept in its own test binary since the
//! subscriber can only be set once per process.

use bido_node::{BidoConfig, LogFormat, NodeError};

#[test]
fn subscriber_installs_once() {
    let config = BidoConfig {
        log_format: LogFormat::Json,
        log_level: "debug".into(),
        ..BidoConfig::default()
    };
    assert_eq!(config.init_logging(), Ok(()));
    assert!(matches!(
        config.init_logging(),
        Err(NodeError::Config(_))
    ));
}
