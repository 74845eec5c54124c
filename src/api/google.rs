//! Reads sheets from a Google spreadsheet using the `sheets::Client`, authenticated as a service
//! account.

use crate::api::OAUTH_SCOPES;
use crate::Result;
use anyhow::{bail, Context};
use serde::Deserialize;
use sheets::types::{DateTimeRenderOption, Dimension, ValueRenderOption};
use sheets::ClientError;
use std::path::Path;
use tracing::{debug, trace};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::ServiceAccountAuthenticator;

/// A Google spreadsheet. The authenticator caches the service account's access token and renews
/// it when it expires, so one `GoogleSheet` can live for the whole process.
pub(crate) struct GoogleSheet {
    spreadsheet_id: String,
    auth: DefaultAuthenticator,
}

impl GoogleSheet {
    /// Loads the service account key at `key_path` and obtains a first access token, so that bad
    /// credentials are reported when the source is opened rather than on the first read.
    pub(crate) async fn new(spreadsheet_id: &str, key_path: &Path) -> Result<Self> {
        if spreadsheet_id.is_empty() {
            bail!("No spreadsheet ID has been configured");
        }
        let key = yup_oauth2::read_service_account_key(key_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read the service account key at {}",
                    key_path.display()
                )
            })?;
        debug!("Using service account {}", key.client_email);
        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .context("Failed to create the service account authenticator")?;
        let sheet = Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            auth,
        };
        let _ = sheet.access_token().await?;
        Ok(sheet)
    }

    /// Returns a current access token, refreshing it if needed.
    async fn access_token(&self) -> Result<String> {
        let token = self
            .auth
            .token(OAUTH_SCOPES)
            .await
            .context("Failed to obtain an access token for the service account")?;
        token
            .token()
            .map(str::to_string)
            .context("The access token returned for the service account was empty")
    }

    /// Creates a sheets client that uses a current access token.
    async fn client(&self) -> Result<sheets::Client> {
        let access_token = self.access_token().await?;

        // The sheets crate requires client_id, client_secret, and redirect_uri, but we don't need
        // them for API calls, only the access token
        Ok(sheets::Client::new(
            String::new(),
            String::new(),
            String::new(),
            access_token,
            String::new(),
        ))
    }

    pub(crate) async fn sheet_names(&self) -> Result<Vec<String>> {
        let access_token = self.access_token().await?;
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}?fields=sheets.properties.title",
            self.spreadsheet_id
        );

        let response = reqwest::Client::new()
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to send the spreadsheet metadata request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("Google Sheets API metadata request failed with status {status}: {body}");
        }

        let metadata: SpreadsheetMetadata = response
            .json()
            .await
            .context("Failed to parse the spreadsheet metadata")?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    pub(crate) async fn get(&self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        trace!("get for {sheet_name}");
        let client = self.client().await?;
        let range = a1_range(sheet_name);
        let response = client
            .spreadsheets()
            .values_get(
                &self.spreadsheet_id,
                &range,
                DateTimeRenderOption::FormattedString,
                Dimension::Rows,
                ValueRenderOption::FormattedValue,
            )
            .await
            .map_err(map_client_error)
            .with_context(|| format!("Failed to fetch {sheet_name} sheet data"))?;
        Ok(response.body.values)
    }
}

/// The parts of the `spreadsheets.get` response requested with
/// `fields=sheets.properties.title`.
#[derive(Debug, Default, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetMetadata>,
}

#[derive(Debug, Deserialize)]
struct SheetMetadata {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// The A1 range covering every used column of `sheet_name`. The name is quoted because sheet
/// names such as `category total` contain spaces.
fn a1_range(sheet_name: &str) -> String {
    format!("'{}'!A:ZZ", sheet_name.replace('\'', "''"))
}

fn map_client_error(e: ClientError) -> anyhow::Error {
    let error_name = match &e {
        ClientError::EmptyRefreshToken => "EmptyRefreshToken".to_string(),
        ClientError::FromUtf8Error(inner) => format!("FromUtf8Error {inner}"),
        ClientError::UrlParserError(inner) => format!("UrlParserError {inner}"),
        ClientError::SerdeJsonError(inner) => format!("SerdeJsonError {inner}"),
        ClientError::ReqwestError(inner) => format!("ReqwestError {inner}"),
        ClientError::InvalidHeaderValue(inner) => format!("InvalidHeaderValue {inner}"),
        ClientError::ReqwestMiddleWareError(inner) => format!("ReqwestMiddleWareError {inner}"),
        ClientError::HttpError { .. } => "HttpError".to_string(),
        ClientError::Other(_) => "Other".to_string(),
    };
    anyhow::Error::new(e).context(error_name)
}
