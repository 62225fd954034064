use super::client::HttpClient;
use crate::error::FetchError;
use serde::Deserialize;

const KEY_HEADER: &str = "X-Linkpreview-Api-Key";

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    #[serde(default)]
    title: Option<String>,
}

/// Ask a link-preview style service for the title of `url`.
///
/// Returns `Ok(None)` when the service answers without a usable title.
pub async fn lookup_title<C: HttpClient + ?Sized>(
    client: &C,
    endpoint: &str,
    api_key: &str,
    url: &str,
) -> Result<Option<String>, FetchError> {
    let query: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    let request_url = format!("{}/?q={query}", endpoint.trim_end_matches('/'));

    let response = client.get(&request_url, &[(KEY_HEADER, api_key)]).await?;
    if !response.is_success() {
        return Err(FetchError::Status {
            url: endpoint.to_string(),
            status: response.status,
        });
    }

    let preview: PreviewResponse =
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(preview
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()))
}
