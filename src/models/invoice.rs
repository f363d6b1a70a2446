//! Invoice and manual entry DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub matched: bool,
    #[serde(default)]
    pub matched_invoice_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An attachment uploaded alongside an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: Vec<u8>,
}

/// Sent as multipart form data, not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvoiceRequest {
    pub month: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub file: Option<InvoiceFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateManualEntryRequest {
    pub month: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceMatch {
    pub invoice_id: String,
    pub manual_entry_id: String,
    pub match_confidence: f64,
    pub matched_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceOverview {
    pub month: String,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub manual_entries: Vec<ManualEntry>,
    #[serde(default)]
    pub matches: Vec<InvoiceMatch>,
    pub total_invoices: f64,
    pub total_manual: f64,
    pub matched_count: u32,
    pub unmatched_invoices: u32,
    pub unmatched_manual: u32,
}
