//! Server API client using reqwest.
//!
//! This adapter implements the `ListsApi` port over HTTP. Every method sends
//! exactly one request; non-success responses become
//! [`TransportError::Status`] carrying the response body.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use recordlists_application::{
    ConnectionError, ListTransition, ListsApi, RecordVersionRequest, TransportError,
    TransportResult,
};
use recordlists_domain::dto::{
    AuditLogItemDto, AuditLogSearchRequestDto, CreateRecordListDto, CreateRecordListItemsInfoDto,
    DatabasesInfoDto, DeleteRecordListItemsDto, MiVersionDto, RecordHistoryDto,
    RecordListHeaderDto, RecordListHeadersInfoDto, RecordListItemsInfoDto,
    RecordListSearchRequestDto, RecordListSearchResultsInfoDto, RecordVersionDto, SearchInfoDto,
    UpdateRecordListPropertiesDto,
};

use crate::auth::{AuthSession, Authentication};
use crate::config::SessionConfiguration;

/// Path of the Server API below the service layer.
const PROXY_PATH: [&str; 3] = ["proxy", "v1.svc", "mi"];

/// Path of the Server API definition below the Server API root.
const API_DEFINITION_PATH: [&str; 3] = ["swagger", "v1", "swagger.json"];

/// Header naming the calling application.
pub const APPLICATION_NAME_HEADER: &str = "X-Granta-ApplicationName";

/// Server API client over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestListsApi {
    client: Client,
    api_root: Url,
    auth: AuthSession,
    timeout_ms: u64,
    max_redirects: usize,
}

impl ReqwestListsApi {
    /// Creates a client for the service layer at `service_layer_url`, e.g.
    /// `https://my.server.name/mi_servicelayer`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::InvalidUrl`] if the URL is not an absolute
    /// `http` or `https` URL, [`ConnectionError::UnsupportedAuthentication`]
    /// for [`Authentication::Autologon`], or
    /// [`ConnectionError::UnexpectedFailure`] if the HTTP client cannot be
    /// built from `config`.
    pub fn new(
        service_layer_url: &str,
        auth: Authentication,
        config: &SessionConfiguration,
    ) -> Result<Self, ConnectionError> {
        let api_root = api_root(service_layer_url)?;
        let kind = auth.kind();
        let auth = AuthSession::try_from(auth)?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers(config)?)
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| {
                ConnectionError::UnexpectedFailure(TransportError::Other(e.to_string()))
            })?;

        debug!(api_root = %api_root, auth = kind, "Created Server API client");

        Ok(Self {
            client,
            api_root,
            auth,
            timeout_ms: config.request_timeout_ms,
            max_redirects: config.max_redirects,
        })
    }

    /// Root of the Server API, ending in `/proxy/v1.svc/mi`.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// URL of `segments` below the Server API root.
    ///
    /// Each segment is percent-encoded on its own, so identifiers cannot
    /// change the path structure.
    fn url(&self, segments: &[&str]) -> TransportResult<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::Other(format!("cannot extend URL '{}'", self.api_root)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn lists_url(&self, segments: &[&str]) -> TransportResult<Url> {
        let mut path = vec!["api", "v1", "lists"];
        path.extend_from_slice(segments);
        self.url(&path)
    }

    fn list_url(&self, identifier: &str, segments: &[&str]) -> TransportResult<Url> {
        let mut path = vec!["list", identifier];
        path.extend_from_slice(segments);
        self.lists_url(&path)
    }

    fn records_url(&self, segments: &[&str], read_mode: bool) -> TransportResult<Url> {
        let mut path = vec!["api", "v1alpha"];
        path.extend_from_slice(segments);
        let mut url = self.url(&path)?;
        if read_mode {
            url.query_pairs_mut().append_pair("mode", "read");
        }
        Ok(url)
    }

    /// Sends a request with credentials attached; fails on non-success
    /// statuses.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        builder: RequestBuilder,
    ) -> TransportResult<Response> {
        debug!(%method, %url, "Sending Server API request");
        let builder = self.auth.apply(builder, &self.client).await?;
        let response = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("Unknown status");
        let message = match response.text().await {
            Ok(body) if body.trim().is_empty() => reason.to_string(),
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, %url, "Failed to read error response body");
                format!("{reason} (response body unreadable: {e})")
            }
        };
        debug!(status = status.as_u16(), %url, "Server API request failed");
        Err(TransportError::status(status.as_u16(), message))
    }

    async fn send(&self, method: Method, url: Url) -> TransportResult<Response> {
        let builder = self.client.request(method.clone(), url.clone());
        self.execute(method, url, builder).await
    }

    async fn send_json<B>(&self, method: Method, url: Url, body: &B) -> TransportResult<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        let builder = self.client.request(method.clone(), url.clone()).json(body);
        self.execute(method, url, builder).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TransportResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> TransportResult<T> {
        let response = self.send(Method::GET, url).await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> TransportResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_json(Method::POST, url, body).await?;
        Self::decode(response).await
    }

    /// Maps reqwest errors to [`TransportError`].
    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }

        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            return TransportError::Connection(format!("{host}: {error}"));
        }

        if error.is_redirect() {
            return TransportError::Other(format!(
                "too many redirects (max {})",
                self.max_redirects
            ));
        }

        if error.is_decode() || error.is_body() {
            return TransportError::Decode(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

/// Parses the service layer URL and appends the proxy path.
fn api_root(service_layer_url: &str) -> Result<Url, ConnectionError> {
    let invalid = |message: String| ConnectionError::InvalidUrl {
        url: service_layer_url.to_string(),
        message,
    };

    let mut url = Url::parse(service_layer_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(PROXY_PATH);
    Ok(url)
}

/// Headers sent with every request.
fn default_headers(config: &SessionConfiguration) -> Result<HeaderMap, ConnectionError> {
    let invalid = |name: &str, message: String| {
        ConnectionError::UnexpectedFailure(TransportError::Other(format!(
            "invalid header '{name}': {message}"
        )))
    };

    let mut headers = HeaderMap::new();
    let application = HeaderValue::from_str(&config.application_name)
        .map_err(|e| invalid(APPLICATION_NAME_HEADER, e.to_string()))?;
    headers.insert(APPLICATION_NAME_HEADER, application);

    for (name, value) in &config.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(name, e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(name, e.to_string()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

impl ListsApi for ReqwestListsApi {
    async fn get_api_definition(&self) -> TransportResult<()> {
        let url = self.url(&API_DEFINITION_PATH)?;
        self.send(Method::GET, url).await.map(drop)
    }

    async fn get_mi_version(&self) -> TransportResult<MiVersionDto> {
        let url = self.records_url(&["schema", "mi-version"], false)?;
        self.get_json(url).await
    }

    async fn get_all_lists(&self) -> TransportResult<RecordListHeadersInfoDto> {
        let url = self.lists_url(&[])?;
        self.get_json(url).await
    }

    async fn get_list(&self, identifier: &str) -> TransportResult<RecordListHeaderDto> {
        let url = self.list_url(identifier, &[])?;
        self.get_json(url).await
    }

    async fn create_list(
        &self,
        body: &CreateRecordListDto,
    ) -> TransportResult<RecordListHeaderDto> {
        let url = self.lists_url(&[])?;
        self.post_json(url, body).await
    }

    async fn update_list(
        &self,
        identifier: &str,
        body: &UpdateRecordListPropertiesDto,
    ) -> TransportResult<RecordListHeaderDto> {
        let url = self.list_url(identifier, &[])?;
        let response = self.send_json(Method::PATCH, url, body).await?;
        Self::decode(response).await
    }

    async fn delete_list(&self, identifier: &str) -> TransportResult<()> {
        let url = self.list_url(identifier, &[])?;
        self.send(Method::DELETE, url).await.map(drop)
    }

    async fn transition_list(
        &self,
        identifier: &str,
        transition: ListTransition,
    ) -> TransportResult<RecordListHeaderDto> {
        let url = self.list_url(identifier, &[transition.path_segment()])?;
        let response = self.send(Method::POST, url).await?;
        Self::decode(response).await
    }

    async fn get_list_items(&self, identifier: &str) -> TransportResult<RecordListItemsInfoDto> {
        let url = self.list_url(identifier, &["items"])?;
        self.get_json(url).await
    }

    async fn add_items(
        &self,
        identifier: &str,
        body: &CreateRecordListItemsInfoDto,
    ) -> TransportResult<RecordListItemsInfoDto> {
        let url = self.list_url(identifier, &["items", "add"])?;
        self.post_json(url, body).await
    }

    async fn remove_items(
        &self,
        identifier: &str,
        body: &DeleteRecordListItemsDto,
    ) -> TransportResult<RecordListItemsInfoDto> {
        let url = self.list_url(identifier, &["items", "remove"])?;
        self.post_json(url, body).await
    }

    async fn subscribe(&self, identifier: &str) -> TransportResult<()> {
        let url = self.list_url(identifier, &["permissions", "subscribe"])?;
        self.send(Method::POST, url).await.map(drop)
    }

    async fn unsubscribe(&self, identifier: &str) -> TransportResult<()> {
        let url = self.list_url(identifier, &["permissions", "unsubscribe"])?;
        self.send(Method::POST, url).await.map(drop)
    }

    async fn run_search(
        &self,
        body: &RecordListSearchRequestDto,
    ) -> TransportResult<SearchInfoDto> {
        let url = self.lists_url(&["search"])?;
        self.post_json(url, body).await
    }

    async fn get_search_results(
        &self,
        result_identifier: &str,
    ) -> TransportResult<RecordListSearchResultsInfoDto> {
        let url = self.lists_url(&["search", "results", result_identifier])?;
        self.get_json(url).await
    }

    async fn run_audit_search(
        &self,
        body: &AuditLogSearchRequestDto,
    ) -> TransportResult<SearchInfoDto> {
        let url = self.lists_url(&["audit", "search"])?;
        self.post_json(url, body).await
    }

    async fn get_audit_search_results(
        &self,
        result_identifier: &str,
    ) -> TransportResult<Vec<AuditLogItemDto>> {
        let url = self.lists_url(&["audit", "search", "results", result_identifier])?;
        self.get_json(url).await
    }

    async fn get_databases(&self) -> TransportResult<DatabasesInfoDto> {
        let url = self.records_url(&["databases"], false)?;
        self.get_json(url).await
    }

    async fn get_record_history(
        &self,
        database_key: &str,
        record_history_guid: &str,
        read_mode: bool,
    ) -> TransportResult<RecordHistoryDto> {
        let url = self.records_url(
            &["db", database_key, "record-histories", record_history_guid],
            read_mode,
        )?;
        self.get_json(url).await
    }

    async fn get_record_version(
        &self,
        request: RecordVersionRequest<'_>,
    ) -> TransportResult<RecordVersionDto> {
        let url = self.records_url(
            &[
                "db",
                request.database_key,
                "tables",
                request.table_guid,
                "record-histories",
                request.record_history_guid,
                "record-versions",
                request.record_version_guid,
            ],
            request.read_mode,
        )?;
        self.get_json(url).await
    }
}
