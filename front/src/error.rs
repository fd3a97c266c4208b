/// Everything that can go wrong with an upload attempt. Each variant's
/// `Display` is the exact text shown to the user.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("❌ Invalid file type. {hint}")]
    InvalidType { hint: &'static str },

    #[error("❌ File size exceeds {limit_mb} MB. Your file is {size_mb:.2} MB.")]
    TooLarge { limit_mb: u64, size_mb: f64 },

    // A non-200 answer. `message` is the server's own wording when its body
    // parsed as json, otherwise we fall back to a generic text.
    #[error("{}", .message.as_deref().unwrap_or("Server error occurred."))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error. Please check your connection.")]
    Network,
}

#[cfg(test)]
mod tests {
    use super::UploadError;

    #[test]
    fn server_error_uses_the_server_wording_when_available() {
        let error = UploadError::Server {
            status: 400,
            message: Some(String::from("File is corrupted.")),
        };
        assert_eq!(error.to_string(), "File is corrupted.");
    }

    #[test]
    fn server_error_degrades_to_a_generic_text() {
        let error = UploadError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(error.to_string(), "Server error occurred.");
    }

    #[test]
    fn network_error_text() {
        assert_eq!(
            UploadError::Network.to_string(),
            "Network error. Please check your connection."
        );
    }
}
