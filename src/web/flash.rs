use serde::Deserialize;

/// One-shot status carried on a redirect as `?status=..` or `?error=..`.
#[derive(Default, Deserialize)]
pub struct FlashQuery {
    pub status: Option<String>,
    pub error: Option<String>,
}

impl FlashQuery {
    pub fn render(&self) -> String {
        compose_flash_message(self.status.as_deref(), self.error.as_deref())
    }
}

/// Compose a flash message HTML snippet for known status or error codes.
pub fn compose_flash_message(status: Option<&str>, error: Option<&str>) -> String {
    if let Some(status) = status {
        let flash = match status {
            "registered" => Some(("success", "Registration successful! Please log in.")),
            "logged_in" => Some(("success", "Login successful!")),
            "logged_out" => Some(("success", "You have been logged out.")),
            "login_required" => Some(("info", "Please log in to access the dashboard.")),
            _ => None,
        };

        if let Some((category, message)) = flash {
            return format!(r#"<div class="flash-message {category}">{message}</div>"#);
        }
    }

    if let Some(error) = error {
        let (category, message) = match error {
            "missing_fields" => ("danger", "All fields are required for registration."),
            "missing_credentials" => ("danger", "Username and password are required."),
            "duplicate_username" => (
                "warning",
                "Username already exists. Please choose a different one.",
            ),
            "duplicate_email" => (
                "warning",
                "Email address already registered. Please use a different one or login.",
            ),
            "invalid_credentials" => (
                "danger",
                "Invalid username or password. Please try again.",
            ),
            "persistence" => (
                "danger",
                "An error occurred while saving your account. Please try again.",
            ),
            _ => ("danger", "An unexpected error occurred. Please try again."),
        };

        return format!(r#"<div class="flash-message {category}">{message}</div>"#);
    }

    String::new()
}
