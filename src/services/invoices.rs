//! Invoice and manual entry call-sites.
//!
//! Invoice creation is the one multipart call: the attachment travels as a
//! file part and the transport picks the boundary.

use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::failure::{FailureKind, GatewayResult, NormalizedFailure};
use crate::http::Gateway;
use crate::models::{
    CreateInvoiceRequest, CreateManualEntryRequest, Invoice, InvoiceOverview, ManualEntry,
};
use crate::services::call_site::{month_query, segment, CallSite};

#[derive(Debug, Clone)]
pub struct InvoiceService {
    call: CallSite,
}

impl InvoiceService {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            call: CallSite::new(gateway),
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            call: self.call.with_token(token),
        }
    }

    pub async fn list(&self, month: &str) -> GatewayResult<Vec<Invoice>> {
        self.call
            .get_json(&format!("/invoices{}", month_query(month)))
            .await
    }

    pub async fn get(&self, id: &str) -> GatewayResult<Invoice> {
        self.call.get_json(&format!("/invoices/{}", segment(id))).await
    }

    pub async fn create(&self, request: CreateInvoiceRequest) -> GatewayResult<Invoice> {
        let form = invoice_form(request)?;
        self.call.post_multipart("/invoices", form).await
    }

    pub async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.call.delete(&format!("/invoices/{}", segment(id))).await
    }

    pub async fn overview(&self, month: &str) -> GatewayResult<InvoiceOverview> {
        self.call
            .get_json(&format!("/invoices/{}/overview", segment(month)))
            .await
    }

    /// Ask the backend to pair invoices with manual entries for `month`.
    ///
    /// `None` when the backend answers 204.
    pub async fn match_invoices(&self, month: &str) -> GatewayResult<Option<InvoiceOverview>> {
        self.call
            .post_optional_json(&format!("/invoices/{}/match", segment(month)), &json!({}))
            .await
    }

    pub async fn list_manual_entries(&self, month: &str) -> GatewayResult<Vec<ManualEntry>> {
        self.call
            .get_json(&format!("/manual-entries{}", month_query(month)))
            .await
    }

    pub async fn create_manual_entry(
        &self,
        request: &CreateManualEntryRequest,
    ) -> GatewayResult<ManualEntry> {
        self.call.post_json("/manual-entries", request).await
    }

    pub async fn delete_manual_entry(&self, id: &str) -> GatewayResult<()> {
        self.call
            .delete(&format!("/manual-entries/{}", segment(id)))
            .await
    }
}

fn invoice_form(request: CreateInvoiceRequest) -> GatewayResult<Form> {
    let form = Form::new()
        .text("month", request.month)
        .text("description", request.description)
        .text("amount", request.amount.to_string())
        .text("date", request.date)
        .text("category", request.category);

    let Some(file) = request.file else {
        return Ok(form);
    };

    let part = Part::bytes(file.contents)
        .file_name(file.file_name)
        .mime_str(&file.mime_type)
        .map_err(|e| {
            NormalizedFailure::new(
                0,
                format!("Invalid attachment type '{}': {e}", file.mime_type),
                FailureKind::MalformedResponse,
            )
        })?;
    Ok(form.part("file", part))
}
