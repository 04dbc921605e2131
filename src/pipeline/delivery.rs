//! Handing finished cards to a [`DeliverySink`].
//!
//! Delivery is the last step of a request and happens after the final await
//! point, so a request that is dropped before completion never reaches the
//! sink.

use super::generator::CardGenerator;
use crate::error::CardError;
use cardpress_traits::DeliverySink;
use cardpress_types::CardRequest;

pub const FILE_NAME_PREFIX: &str = "business-card";

/// `business-card-<unix-millis>.<extension>`
pub fn suggested_file_name(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        FILE_NAME_PREFIX,
        chrono::Utc::now().timestamp_millis(),
        extension
    )
}

impl CardGenerator {
    /// Generates the card and delivers it, returning the delivered file name.
    ///
    /// A sink failure returns [`CardError::Delivery`] carrying the built bytes.
    pub async fn generate_and_deliver(
        &self,
        request: CardRequest,
        sink: &dyn DeliverySink,
    ) -> Result<String, CardError> {
        let bytes = self.generate(request).await?;
        let name = suggested_file_name(&self.config().artifact_extension);
        if let Err(source) = sink.deliver(&bytes, &name) {
            return Err(CardError::Delivery { source, name, bytes });
        }
        log::info!("Delivered {} through {} ({} bytes)", name, sink.name(), bytes.len());
        Ok(name)
    }

    /// Boolean boundary for UI callers. Failures are logged with the template
    /// id and the names of the populated fields; field values are never logged.
    pub async fn generate_and_download(&self, request: CardRequest, sink: &dyn DeliverySink) -> bool {
        let template = request
            .template_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<none>".to_string());
        let populated = request
            .fields
            .as_ref()
            .map(|fields| fields.populated_field_names())
            .unwrap_or_default();

        match self.generate_and_deliver(request, sink).await {
            Ok(_) => true,
            Err(e) => {
                log::error!(
                    "Card generation for template {} failed (fields: {:?}): {}",
                    template,
                    populated,
                    e
                );
                false
            }
        }
    }
}
