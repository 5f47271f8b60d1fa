//! Response helpers shared by the transport.

use serde_json::Value;

use crate::error::ClientError;

/// Map a non-success response to [`ClientError::Api`] carrying the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read a success body as JSON; `204` and empty bodies decode to `Null`.
pub async fn decode_body(resp: reqwest::Response) -> Result<Value, ClientError> {
    if resp.status() == reqwest::StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    let bytes = resp.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(format!("response body: {e}")))
}
