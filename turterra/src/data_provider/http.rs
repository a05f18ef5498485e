use bytes::Bytes;
use log::info;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::MapError;

#[cfg(not(target_arch = "wasm32"))]
const USER_AGENT: &str = concat!("turterra/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around an HTTP client that turns non-success responses into errors.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    http_client: reqwest::Client,
}

impl HttpLoader {
    /// Creates a loader with a new HTTP client.
    pub fn new() -> Result<Self, MapError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.user_agent(USER_AGENT);

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    /// Creates a loader using the given client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Loads the body of the given url.
    pub async fn load_bytes(&self, url: &str) -> Result<Bytes, MapError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|err| MapError::Network(format!("{url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            info!("Failed to load {url}: {status}");
            return Err(MapError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }

    /// Loads a JSON document from the given url.
    pub async fn load_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MapError> {
        let bytes = self.load_bytes(url).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| MapError::DataShape(format!("{url}: {err}")))
    }
}

/// Appends path segments to the base url. Segments are percent-encoded, a trailing slash of the
/// base is dropped.
pub(crate) fn join_segments<'a>(
    base: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, MapError> {
    let mut url = parse_url(base)?;
    url.path_segments_mut()
        .map_err(|_| MapError::InvalidUrl(format!("{base} cannot be a base url")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn parse_url(url: &str) -> Result<Url, MapError> {
    Url::parse(url).map_err(|err| MapError::InvalidUrl(format!("{url}: {err}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn segments_are_encoded() {
        let url = join_segments("http://localhost:3000/", ["cloudinary", "Trachemys scripta", "é"])
            .expect("valid base");
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/cloudinary/Trachemys%20scripta/%C3%A9"
        );

        let url = join_segments("https://proxy.org/api", ["data", "a/b"]).expect("valid base");
        assert_eq!(url.as_str(), "https://proxy.org/api/data/a%2Fb");
    }

    #[test]
    fn invalid_base_is_reported() {
        assert_matches!(join_segments("not a url", ["x"]), Err(MapError::InvalidUrl(_)));
        assert_matches!(
            join_segments("mailto:someone@example.com", ["x"]),
            Err(MapError::InvalidUrl(_))
        );
    }
}
