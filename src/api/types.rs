use serde::Serialize;

/// Success envelope shared by every `/api/treasures` endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
