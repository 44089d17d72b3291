//! Shared response handling for tracker requests.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing,
//! non-success → [`DevOpsError::Api`]) and body decoding so the endpoint
//! methods stay focused on URL construction and mapping.

use serde::de::DeserializeOwned;

use crate::error::DevOpsError;

/// Check an HTTP response for error statuses.
///
/// - **429 Too Many Requests** → [`DevOpsError::RateLimited`], with the
///   `Retry-After` header in seconds (60 s when absent or unparseable).
/// - **Non-success status** → [`DevOpsError::Api`] carrying the body.
pub async fn check_response(
    resp: reqwest::Response,
    endpoint: &'static str,
) -> Result<reqwest::Response, DevOpsError> {
    if resp.status() == 429 {
        return Err(DevOpsError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(DevOpsError::Api {
            status: resp.status().as_u16(),
            endpoint,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a checked response body, reporting shape problems as
/// [`DevOpsError::Parse`] with the endpoint name.
pub async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    endpoint: &'static str,
) -> Result<T, DevOpsError> {
    let body = check_response(resp, endpoint).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| DevOpsError::Parse(format!("{endpoint}: {e}")))
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        assert_eq!(parse_retry_after(&mock_response_with_retry_after("120")), 120);
    }

    #[test]
    fn parse_retry_after_falls_back() {
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        assert_eq!(
            parse_retry_after(&mock_response_with_retry_after("soon")),
            60
        );
    }

    #[tokio::test]
    async fn rate_limited_maps_to_error() {
        let err = check_response(mock_response_with_retry_after("30"), "wiql")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DevOpsError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn api_error_keeps_status_and_body() {
        let err = check_response(mock_response(401, "bad pat"), "workitemtypes")
            .await
            .unwrap_err();
        match err {
            DevOpsError::Api {
                status,
                endpoint,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(endpoint, "workitemtypes");
                assert_eq!(message, "bad pat");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn decode_reports_shape_errors() {
        #[derive(serde::Deserialize, Debug)]
        struct Shape {
            #[allow(dead_code)]
            value: Vec<u64>,
        }

        let err = decode::<Shape>(mock_response(200, r#"{"count": 1}"#), "workitems")
            .await
            .unwrap_err();
        assert!(matches!(err, DevOpsError::Parse(msg) if msg.starts_with("workitems:")));
    }
}
