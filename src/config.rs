use derive_builder::Builder;

use crate::cancellation::CancellationToken;

/// Per-call options threaded through every inspection entry point.
#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned", setter(into, strip_option), default)]
pub struct InspectionConfig {
    /// Locale used by downstream formatting of any literal text surfaced in
    /// results; the core itself does not localize anything yet.
    pub locale: String,
    pub cancellation_token: Option<CancellationToken>,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            cancellation_token: None,
        }
    }
}
