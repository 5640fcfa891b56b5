use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::entities::sheet::SheetValues;
use crate::infra::sheets::service_account::TokenSource;
use crate::usecase::ports::sheet_client::{
    validate_append, validate_update, SheetClient, SheetError,
};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const VALUE_INPUT_OPTION: (&str, &str) = ("valueInputOption", "USER_ENTERED");

pub enum SheetsAuth {
    /// Read and write through an OAuth token minted for a service account.
    ServiceAccount(TokenSource),
    /// Public API key. Google accepts it for reads only.
    ApiKey(String),
}

/// Google Sheets v4 `values` endpoints for one tab of one spreadsheet.
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    tab: String,
    auth: SheetsAuth,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: SheetValues,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValuesBody<'a> {
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

impl<'a> ValuesBody<'a> {
    fn rows(values: &'a [Vec<String>]) -> Self {
        Self {
            major_dimension: "ROWS",
            values,
        }
    }
}

impl GoogleSheetsClient {
    pub fn new(
        http: reqwest::Client,
        spreadsheet_id: impl Into<String>,
        tab: impl Into<String>,
        auth: SheetsAuth,
    ) -> Self {
        Self {
            http,
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            tab: tab.into(),
            auth,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn read_url(&self) -> String {
        self.values_url(&self.tab)
    }

    pub fn append_url(&self) -> String {
        format!("{}:append", self.values_url(&self.tab))
    }

    pub fn update_url(&self, row_index: usize) -> String {
        self.values_url(&format!("{}!A{row_index}", self.tab))
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range)
        )
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, SheetError> {
        match &self.auth {
            SheetsAuth::ServiceAccount(tokens) => Ok(request.bearer_auth(tokens.access_token().await?)),
            SheetsAuth::ApiKey(key) => Ok(request.query(&[("key", key.as_str())])),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SheetError> {
        let response = self.authorize(request).await?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let details = response.text().await.unwrap_or_default();
        Err(SheetError::Api {
            status: status.as_u16(),
            details,
        })
    }
}

#[async_trait]
impl SheetClient for GoogleSheetsClient {
    async fn read(&self) -> Result<SheetValues, SheetError> {
        let response = self.send(self.http.get(self.read_url())).await?;
        let range: ValueRange = response
            .json()
            .await
            .map_err(|err| SheetError::Decode(format!("values response: {err}")))?;
        debug!(rows = range.values.len(), tab = %self.tab, "read values");
        Ok(range.values)
    }

    async fn append(&self, rows: SheetValues) -> Result<(), SheetError> {
        validate_append(&rows)?;
        let request = self
            .http
            .post(self.append_url())
            .query(&[VALUE_INPUT_OPTION])
            .json(&ValuesBody::rows(&rows));
        self.send(request).await?;
        info!(rows = rows.len(), tab = %self.tab, "appended rows");
        Ok(())
    }

    async fn update(&self, row_index: usize, values: Vec<String>) -> Result<(), SheetError> {
        validate_update(row_index, &values)?;
        let rows = [values];
        let request = self
            .http
            .put(self.update_url(row_index))
            .query(&[VALUE_INPUT_OPTION])
            .json(&ValuesBody::rows(&rows));
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleSheetsClient {
        GoogleSheetsClient::new(
            reqwest::Client::new(),
            "sheet-123",
            "pacientes",
            SheetsAuth::ApiKey("test-key".to_string()),
        )
    }

    #[test]
    fn builds_values_urls() {
        let client = client();

        assert_eq!(
            client.read_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/pacientes"
        );
        assert_eq!(
            client.append_url(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/pacientes:append"
        );
        assert_eq!(
            client.update_url(7),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/pacientes%21A7"
        );
    }

    #[test]
    fn tab_names_are_percent_encoded() {
        let client = GoogleSheetsClient::new(
            reqwest::Client::new(),
            "abc",
            "Pacientes 2024",
            SheetsAuth::ApiKey(String::new()),
        )
        .with_base_url("http://localhost:9/");

        assert_eq!(client.read_url(), "http://localhost:9/abc/values/Pacientes%202024");
    }

    #[test]
    fn body_uses_row_major_values() {
        let rows = vec![vec!["Ana".to_string(), "Pendente".to_string()]];

        let body = serde_json::to_value(ValuesBody::rows(&rows)).expect("body should serialize");

        assert_eq!(
            body,
            serde_json::json!({ "majorDimension": "ROWS", "values": [["Ana", "Pendente"]] })
        );
    }

    #[test]
    fn value_range_without_values_is_empty() {
        let range: ValueRange =
            serde_json::from_str(r#"{"range":"pacientes!A1:Z1000","majorDimension":"ROWS"}"#)
                .expect("range should parse");

        assert!(range.values.is_empty());
    }

    #[tokio::test]
    async fn update_rejects_row_zero_before_any_request() {
        let client = client().with_base_url("http://127.0.0.1:9");

        let result = client.update(0, vec!["Ana".to_string()]).await;

        assert!(matches!(result, Err(SheetError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn append_rejects_empty_rows_before_any_request() {
        let client = client().with_base_url("http://127.0.0.1:9");

        let result = client.append(Vec::new()).await;

        assert!(matches!(result, Err(SheetError::InvalidRequest(_))));
    }
}
