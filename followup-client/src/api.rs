use common::{
    models::{BasicRemarksRequest, Customer, ExtendedRemarksRequest, SaveRemarksResponse},
    reasons::ReasonSet,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remarks service responded with {0}")]
    Status(StatusCode),

    #[error("Remarks service did not confirm the save")]
    Rejected,

    #[error("No customer selected")]
    NoCustomer,
}

/// Body of `POST /saveRemarks`, shaped by the configured save variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SavePayload {
    Basic(BasicRemarksRequest),
    Extended(ExtendedRemarksRequest),
}

/// The calls the follow-up client makes against the remarks service.
pub trait RemarksApi {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ClientError>;

    async fn save_remarks(&self, payload: &SavePayload) -> Result<SaveRemarksResponse, ClientError>;

    async fn fetch_reasons(&self) -> Result<ReasonSet, ClientError>;
}

#[derive(Debug, Clone)]
pub struct RemarksClient {
    client: Client,
    base_url: String,
}

impl RemarksClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        RemarksClient {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

impl RemarksApi for RemarksClient {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.get_json("customers").await
    }

    async fn save_remarks(&self, payload: &SavePayload) -> Result<SaveRemarksResponse, ClientError> {
        debug!("Posting remarks: {:?}", payload);
        let response = self
            .client
            .post(self.url("saveRemarks"))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let body: SaveRemarksResponse = response.json().await?;
        if !body.success {
            return Err(ClientError::Rejected);
        }
        Ok(body)
    }

    async fn fetch_reasons(&self) -> Result<ReasonSet, ClientError> {
        self.get_json("reasons").await
    }
}
