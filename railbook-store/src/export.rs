use async_trait::async_trait;
use railbook_core::{ExportError, TicketRenderer};
use railbook_shared::{Booking, TicketDocument};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Deserialize)]
struct ExportEnvelope {
    success: bool,
    #[serde(default, rename = "pdfData")]
    pdf_data: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the hosted ticket rendering function. The booking is posted
/// as-is and the document comes back as an opaque payload; rendering itself
/// happens entirely on the other side.
pub struct TicketExportClient {
    http: reqwest::Client,
    function_url: String,
}

impl TicketExportClient {
    pub fn new(function_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            function_url: function_url.to_string(),
        }
    }
}

#[async_trait]
impl TicketRenderer for TicketExportClient {
    async fn render(&self, booking: &Booking) -> Result<TicketDocument, ExportError> {
        let response = self
            .http
            .post(&self.function_url)
            .json(booking)
            .send()
            .await
            .map_err(|e| {
                error!(pnr = %booking.pnr, error = %e, "ticket export request failed");
                ExportError::Remote(e.to_string())
            })?;

        let envelope: ExportEnvelope = response.json().await.map_err(|e| {
            error!(pnr = %booking.pnr, error = %e, "ticket export returned an unreadable payload");
            ExportError::Remote(e.to_string())
        })?;

        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| "ticket export reported failure".to_string());
            error!(pnr = %booking.pnr, message = %message, "ticket export rejected the booking");
            return Err(ExportError::Remote(message));
        }

        match (envelope.pdf_data, envelope.filename) {
            (Some(pdf_data), Some(filename)) => Ok(TicketDocument { pdf_data, filename }),
            _ => Err(ExportError::Remote(
                "ticket export succeeded without a document".to_string(),
            )),
        }
    }
}
