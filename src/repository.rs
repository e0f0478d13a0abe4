//! Repositories over the remote API: typed records in, JSON envelopes out.

use crate::api::{ApiClient, ApiError, Envelope, Paged};
use crate::models::{
    Credentials, Gerbang, GerbangPatch, Lalin, LalinFilter, LoginResponse, NewGerbang, Page,
    Pagination,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page size used when the whole gate list is needed.
pub const ALL_GATES_LIMIT: u32 = 1000;

#[async_trait]
pub trait GerbangRepository: Send + Sync {
    async fn list(&self, pagination: Pagination) -> Result<Page<Gerbang>, ApiError>;

    async fn get(&self, id: i64) -> Result<Option<Gerbang>, ApiError>;

    async fn create(&self, gerbang: &NewGerbang) -> Result<Gerbang, ApiError>;

    async fn update(&self, id: i64, patch: &GerbangPatch) -> Result<Gerbang, ApiError>;

    async fn delete(&self, id: i64, branch_id: i64) -> Result<(), ApiError>;

    /// Case-insensitive match on gate or branch name, paginated locally.
    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Gerbang>, ApiError> {
        let all = self.list(Pagination::new(1, ALL_GATES_LIMIT)).await?;
        let needle = query.to_lowercase();
        let matches: Vec<Gerbang> = all
            .data
            .into_iter()
            .filter(|gate| {
                gate.gate_name.to_lowercase().contains(&needle)
                    || gate.branch_name.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(pagination.slice(&matches))
    }
}

#[async_trait]
pub trait LalinRepository: Send + Sync {
    async fn list(&self, filter: &LalinFilter, pagination: Pagination) -> Result<Page<Lalin>, ApiError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
}

fn into_page<T>(envelope: Envelope<Paged<T>>, context: &str) -> Result<Page<T>, ApiError> {
    let paged = envelope.into_data(context)?;
    Ok(Page {
        data: paged.rows.rows,
        total_pages: paged.total_pages,
        current_page: paged.current_page,
        total_records: paged.total_records,
    })
}

fn pagination_query(pagination: Pagination) -> Vec<(&'static str, String)> {
    vec![
        ("page", pagination.page.to_string()),
        ("limit", pagination.limit.to_string()),
    ]
}

/// Single-gate responses come either wrapped in the envelope or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GerbangReply {
    Bare(Gerbang),
    Wrapped(Envelope<Gerbang>),
}

impl GerbangReply {
    fn into_gerbang(self, context: &str) -> Result<Option<Gerbang>, ApiError> {
        match self {
            GerbangReply::Bare(gerbang) => Ok(Some(gerbang)),
            GerbangReply::Wrapped(envelope) if !envelope.status => {
                envelope.into_data(context).map(Some)
            }
            GerbangReply::Wrapped(envelope) => Ok(envelope.data),
        }
    }
}

#[derive(Debug, Serialize)]
struct GerbangBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(rename = "IdCabang", skip_serializing_if = "Option::is_none")]
    branch_id: Option<i64>,
    #[serde(rename = "NamaGerbang", skip_serializing_if = "Option::is_none")]
    gate_name: Option<&'a str>,
    #[serde(rename = "NamaCabang", skip_serializing_if = "Option::is_none")]
    branch_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeleteBody {
    id: i64,
    #[serde(rename = "IdCabang")]
    branch_id: i64,
}

#[derive(Clone)]
pub struct HttpGerbangRepository {
    client: ApiClient,
}

impl HttpGerbangRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GerbangRepository for HttpGerbangRepository {
    async fn list(&self, pagination: Pagination) -> Result<Page<Gerbang>, ApiError> {
        let envelope: Envelope<Paged<Gerbang>> = self
            .client
            .get("/gerbangs", &pagination_query(pagination))
            .await?;
        into_page(envelope, "fetch gerbangs")
    }

    async fn get(&self, id: i64) -> Result<Option<Gerbang>, ApiError> {
        match self
            .client
            .get_optional::<GerbangReply>(&format!("/gerbangs/{id}"))
            .await?
        {
            Some(reply) => reply.into_gerbang("fetch gerbang"),
            None => Ok(None),
        }
    }

    async fn create(&self, gerbang: &NewGerbang) -> Result<Gerbang, ApiError> {
        let body = GerbangBody {
            id: gerbang.id,
            branch_id: Some(gerbang.branch_id),
            gate_name: Some(&gerbang.gate_name),
            branch_name: Some(&gerbang.branch_name),
        };
        let reply: GerbangReply = self.client.post("/gerbangs/", &body).await?;
        let created = reply.into_gerbang("create gerbang")?;
        debug!(returned = created.is_some(), "gerbang created");
        Ok(created.unwrap_or_else(|| Gerbang {
            id: gerbang.id.unwrap_or_default(),
            branch_id: gerbang.branch_id,
            gate_name: gerbang.gate_name.clone(),
            branch_name: gerbang.branch_name.clone(),
        }))
    }

    async fn update(&self, id: i64, patch: &GerbangPatch) -> Result<Gerbang, ApiError> {
        let body = GerbangBody {
            id: Some(id),
            branch_id: patch.branch_id,
            gate_name: patch.gate_name.as_deref(),
            branch_name: patch.branch_name.as_deref(),
        };
        let reply: GerbangReply = self.client.put("/gerbangs/", &body).await?;
        match reply.into_gerbang("update gerbang")? {
            Some(updated) => Ok(updated),
            // The API acknowledged without echoing the record: read it back.
            None => self
                .get(id)
                .await?
                .ok_or_else(|| ApiError::Decode(format!("gerbang {id} missing after update"))),
        }
    }

    async fn delete(&self, id: i64, branch_id: i64) -> Result<(), ApiError> {
        let reply: serde_json::Value = self
            .client
            .delete("/gerbangs/", &DeleteBody { id, branch_id })
            .await?;
        if reply.get("status") == Some(&serde_json::Value::Bool(false)) {
            let message = reply
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Failed to delete gerbang");
            return Err(ApiError::Rejected(message.to_string()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct HttpLalinRepository {
    client: ApiClient,
}

impl HttpLalinRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LalinRepository for HttpLalinRepository {
    async fn list(&self, filter: &LalinFilter, pagination: Pagination) -> Result<Page<Lalin>, ApiError> {
        let mut query = pagination_query(pagination);
        if let Some(tanggal) = filter.tanggal.as_ref().filter(|value| !value.is_empty()) {
            query.push(("tanggal", tanggal.clone()));
        }
        if let Some(search) = filter.search.as_ref().filter(|value| !value.is_empty()) {
            query.push(("search", search.clone()));
        }
        let envelope: Envelope<Paged<Lalin>> = self.client.get("/lalins", &query).await?;
        into_page(envelope, "fetch lalin data")
    }
}

#[derive(Clone)]
pub struct HttpUserRepository {
    client: ApiClient,
}

impl HttpUserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let body = LoginBody {
            username: &credentials.username,
            password: &credentials.password,
        };
        self.client.post("/auth/login", &body).await
    }
}
