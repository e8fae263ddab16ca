use crate::models::WifiRequest;
use crate::utils::validation::ValidationError;

/// Builds the `WIFI:T:<encryption>;S:<ssid>;P:<password>;;` payload.
///
/// Field values are inserted verbatim: `;`, `:` and `\` are not escaped.
pub fn format_wifi_payload(req: &WifiRequest) -> Result<String, ValidationError> {
    if req.ssid.trim().is_empty() {
        return Err(ValidationError {
            code: "EMPTY_SSID",
            message: "Please enter WiFi SSID".to_string(),
        });
    }

    Ok(format!(
        "WIFI:T:{};S:{};P:{};;",
        req.encryption, req.ssid, req.password
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ssid: &str, password: &str, encryption: &str) -> WifiRequest {
        WifiRequest {
            ssid: ssid.to_string(),
            password: password.to_string(),
            encryption: encryption.to_string(),
        }
    }

    #[test]
    fn test_standard_payload() {
        let text = format_wifi_payload(&request("MyNet", "secret123", "WPA")).unwrap();
        assert_eq!(text, "WIFI:T:WPA;S:MyNet;P:secret123;;");
    }

    #[test]
    fn test_empty_password() {
        let text = format_wifi_payload(&request("Cafe", "", "nopass")).unwrap();
        assert_eq!(text, "WIFI:T:nopass;S:Cafe;P:;;");
    }

    #[test]
    fn test_empty_ssid_rejected() {
        assert_eq!(
            format_wifi_payload(&request("", "pw", "WPA")).unwrap_err().code,
            "EMPTY_SSID"
        );
        assert!(format_wifi_payload(&request("   ", "pw", "WPA")).is_err());
    }

    #[test]
    fn test_special_characters_are_not_escaped() {
        // Readers following the WiFi QR convention would expect `\;` and `\:` here
        let text = format_wifi_payload(&request("a;b:c", "p\\w;", "WPA")).unwrap();
        assert_eq!(text, "WIFI:T:WPA;S:a;b:c;P:p\\w;;;");
    }
}
