use railbook_core::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// One predicate in a record query.
#[derive(Debug, Clone, Serialize)]
pub struct WhereClause {
    #[serde(rename = "FieldName")]
    pub field_name: String,
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "Values")]
    pub values: Vec<String>,
}

impl WhereClause {
    pub fn equal_to(field: &str, value: impl ToString) -> Self {
        Self {
            field_name: field.to_string(),
            operator: "EqualTo".to_string(),
            values: vec![value.to_string()],
        }
    }
}

/// Field selection plus predicates for a fetch.
#[derive(Debug, Clone, Serialize, Default)]
pub struct FetchParams {
    pub fields: Vec<String>,
    #[serde(rename = "where")]
    pub predicates: Vec<WhereClause>,
}

impl FetchParams {
    pub fn fields(names: &[&str]) -> Self {
        Self {
            fields: names.iter().map(|n| n.to_string()).collect(),
            predicates: Vec::new(),
        }
    }

    pub fn and_where(mut self, clause: WhereClause) -> Self {
        self.predicates.push(clause);
        self
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    results: Option<Vec<RecordResult>>,
}

/// Per-record outcome inside a bulk write response.
#[derive(Debug, Deserialize)]
struct RecordResult {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Debug, Serialize)]
struct RecordsBody {
    records: Vec<Value>,
}

/// Thin client for the hosted record store. The store is opaque to the rest
/// of the workspace: named collections, a field list, and where-clause
/// triples in; `{success, message, data, results}` envelopes out. No retry
/// and no idempotency key; a reported failure is surfaced as
/// `StoreError::Remote` after logging.
pub struct RecordClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl RecordClient {
    pub fn new(base_url: &str, project_id: &str, public_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            public_key: public_key.to_string(),
        }
    }

    /// Records matching the predicates, in store order.
    pub async fn fetch_records(
        &self,
        collection: &str,
        params: &FetchParams,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/api/records/{}/fetch", self.base_url, collection);
        let envelope = self.post(&url, params).await?;
        match envelope.data {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Ok(vec![other]),
            None => Ok(Vec::new()),
        }
    }

    /// Exact-id lookup, `None` when absent.
    pub async fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        fields: &[&str],
    ) -> Result<Option<Value>, StoreError> {
        let params = FetchParams::fields(fields).and_where(WhereClause::equal_to("Id", id));
        let mut records = self.fetch_records(collection, &params).await?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }

    /// Bulk create; returns the stored records (with store-assigned ids).
    pub async fn create_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/api/records/{}", self.base_url, collection);
        let envelope = self.post(&url, &RecordsBody { records }).await?;
        Self::collect_results(collection, envelope)
    }

    /// Bulk update by record id; returns the updated records.
    pub async fn update_records(
        &self,
        collection: &str,
        records: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/api/records/{}/update", self.base_url, collection);
        let envelope = self.post(&url, &RecordsBody { records }).await?;
        Self::collect_results(collection, envelope)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Envelope, StoreError> {
        let response = self
            .http
            .post(url)
            .header("x-project-id", &self.project_id)
            .header("x-public-key", &self.public_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(url, error = %e, "record store request failed");
                StoreError::Remote(e.to_string())
            })?;

        let envelope: Envelope = response.json().await.map_err(|e| {
            error!(url, error = %e, "record store response was not a valid envelope");
            StoreError::Remote(e.to_string())
        })?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "record store reported failure".to_string());
            error!(url, message = %message, "record store rejected the call");
            return Err(StoreError::Remote(message));
        }
        Ok(envelope)
    }

    fn collect_results(collection: &str, envelope: Envelope) -> Result<Vec<Value>, StoreError> {
        let results = envelope.results.unwrap_or_default();
        let mut records = Vec::with_capacity(results.len());
        for result in results {
            if !result.success {
                let detail = result
                    .errors
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown record error".to_string());
                error!(collection, detail = %detail, "record write rejected");
                return Err(StoreError::Remote(detail));
            }
            if let Some(data) = result.data {
                records.push(data);
            }
        }
        Ok(records)
    }
}
