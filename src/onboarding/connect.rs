//! Links sent to a business owner to connect their profile.

use serde::{Deserialize, Serialize};

use super::payment::encode_component;
use crate::error::{GbpError, Result};

/// Base URL used when none is configured
pub const DEFAULT_APP_URL: &str = "https://tribly.ai";

/// Report and connect links plus the WhatsApp message carrying both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectLinks {
    pub report_url: String,
    pub connect_url: String,
    pub message: String,
    pub whatsapp_url: String,
}

/// Build the links for `business_name`, addressed to `phone`.
///
/// The WhatsApp number keeps only the digits of `phone`; a phone with no
/// digits is rejected.
pub fn connect_links(app_url: &str, business_name: &str, phone: &str) -> Result<ConnectLinks> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(GbpError::missing_input("business phone number is required"));
    }

    let base = app_url.trim_end_matches('/');
    let query = format!(
        "business={}&phone={}",
        encode_component(business_name.trim()),
        encode_component(phone.trim())
    );
    let connect_url = format!("{base}/google-business-auth?{query}");
    let report_url = format!("{base}/report?{query}");
    let message = format!(
        "Hi! Please connect your Google Business Profile with Tribly.\n\n\
         1. Google Report Link: {report_url}\n\n\
         2. Tribly GBP Connect URL: {connect_url}"
    );
    let whatsapp_url = format!("https://wa.me/{digits}?text={}", encode_component(&message));

    Ok(ConnectLinks {
        report_url,
        connect_url,
        message,
        whatsapp_url,
    })
}
