use async_trait::async_trait;

use failover_core::connector::{Connector, ConnectorId};

/// Worked example of a realistic `is_system_abnormal` classifier, carrying
/// Binance's actual infrastructure-error code table. Not part of
/// `failover-core`'s contract — the core only needs *some* predicate,
/// business-specific tables like this one belong at the call site.
pub struct BinanceConnector;

/// `-1000..-1016`, `-1020..-1022`, `-1102`, `-1111`, `-1121`, `-1136`: Binance's
/// own "unknown/disconnected/timeout/unauthorized/IP banned" bucket, as
/// opposed to codes like `-2010` (insufficient balance) or `-1013` sibling
/// codes that reject a specific order for business reasons.
const SYSTEM_ABNORMAL_CODES: &[&str] = &[
    "-1000", "-1001", "-1002", "-1003", "-1004", "-1005", "-1006", "-1007", "-1008", "-1010",
    "-1011", "-1012", "-1013", "-1014", "-1015", "-1016", "-1020", "-1021", "-1022", "-1102",
    "-1111", "-1121", "-1136",
];

#[async_trait]
impl Connector for BinanceConnector {
    fn id(&self) -> ConnectorId {
        ConnectorId::Primary
    }

    fn is_system_abnormal(&self, failure_code: &str) -> bool {
        SYSTEM_ABNORMAL_CODES.contains(&failure_code)
    }
}

/// Illustrative standby classifier. `original_source/` never implements an
/// `OKX` connector (only the interface is referenced), so this table is this
/// demo's own invention rather than grounded in a real OKX error code list —
/// it exists only to give the standby leg of the demo a plausible classifier.
pub struct OkxConnector;

const OKX_SYSTEM_ABNORMAL_CODES: &[&str] = &["50001", "50004", "50011", "50013", "50026"];

#[async_trait]
impl Connector for OkxConnector {
    fn id(&self) -> ConnectorId {
        ConnectorId::Standby
    }

    fn is_system_abnormal(&self, failure_code: &str) -> bool {
        OKX_SYSTEM_ABNORMAL_CODES.contains(&failure_code)
    }
}
