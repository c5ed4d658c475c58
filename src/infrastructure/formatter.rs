use crate::domain::ports::ErrorFormatter;
use crate::error::SubmitError;

/// Renders submission failures the way the wallet shows them.
///
/// Horizon problems with result codes become `"<title>: <tx code> (<op codes>)"`.
/// Problems without codes fall back to title and detail, and every other error
/// uses its `Display` text.
#[derive(Debug, Default, Clone, Copy)]
pub struct HorizonErrorFormatter;

impl ErrorFormatter for HorizonErrorFormatter {
    fn format(&self, error: &SubmitError) -> String {
        match error {
            SubmitError::Horizon {
                title,
                result_codes: Some(codes),
                ..
            } => {
                if codes.operations.is_empty() {
                    format!("{title}: {}", codes.transaction)
                } else {
                    format!(
                        "{title}: {} ({})",
                        codes.transaction,
                        codes.operations.join(", ")
                    )
                }
            }
            SubmitError::Horizon {
                title,
                detail: Some(detail),
                ..
            } => format!("{title}: {detail}"),
            SubmitError::Horizon { title, .. } => title.clone(),
            other => other.to_string(),
        }
    }
}
