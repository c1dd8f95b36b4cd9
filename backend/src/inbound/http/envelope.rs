//! `{"success": true, ...}` response envelopes shared by the handlers.

use actix_web::HttpResponse;
use serde::Serialize;

/// Success envelope wrapping a payload with an optional message and count.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope carrying a message and the affected record.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: Some(data),
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Envelope carrying a listing and its length.
    pub fn listing(data: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            count: Some(data.len()),
            data: Some(data),
        }
    }
}

/// `201 Created` with a message envelope.
pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Created().json(Envelope::with_message(message, data))
}

/// `200 OK` with a listing envelope.
pub fn listing<T: Serialize>(data: Vec<T>) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::listing(data))
}
