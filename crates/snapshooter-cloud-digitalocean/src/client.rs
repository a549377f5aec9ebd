//! DigitalOcean API v2 client
//!
//! Direct REST implementation using Bearer token authentication. Responses
//! are converted into the provider-neutral model of `snapshooter-cloud`.

use crate::error::{DigitalOceanError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snapshooter_cloud::{Action, ActionStatus, CreateDroplet, Droplet, PowerStatus, Size, Snapshot};

pub const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// Environment variable holding the personal access token
pub const TOKEN_ENV_VAR: &str = "DIGITALOCEAN_ACCESS_TOKEN";

const PER_PAGE: u32 = 200;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct DigitalOceanConfig {
    pub api_token: String,
    pub base_url: String,
}

impl DigitalOceanConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DIGITALOCEAN_API_BASE.to_string(),
        }
    }

    /// Create DigitalOceanConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| DigitalOceanError::MissingEnvVar(TOKEN_ENV_VAR.to_string()))?;

        Ok(Self::new(api_token))
    }

    /// Point the client at another API endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// DigitalOcean API client
pub struct DigitalOceanClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl DigitalOceanClient {
    /// Create a new API client
    pub fn new(config: DigitalOceanConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: config.api_token,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);

        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        read_json(response, path).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!("POST {}", path);

        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await?;

        read_json(response, path).await
    }

    /// Collect every item of a paginated listing
    async fn get_all<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            tracing::debug!("GET {} (page {})", path, page);

            let response = self
                .client
                .get(self.url(path))
                .bearer_auth(&self.api_token)
                .query(&[("page", page), ("per_page", PER_PAGE)])
                .send()
                .await?;

            let mut body: serde_json::Value = read_json(response, path).await?;
            let batch = body
                .get_mut(key)
                .map(serde_json::Value::take)
                .ok_or_else(|| {
                    DigitalOceanError::UnexpectedResponse(format!("missing `{}` in {}", key, path))
                })?;
            items.extend(serde_json::from_value::<Vec<T>>(batch)?);

            let has_next = body
                .pointer("/links/pages/next")
                .is_some_and(|next| next.is_string());
            if !has_next {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// Submit an action against a droplet
    async fn droplet_action(&self, droplet_id: &str, request: &ActionRequest) -> Result<Action> {
        let path = format!("/droplets/{}/actions", droplet_id);
        let envelope: ActionEnvelope = self.post(&path, request).await?;
        Ok(envelope.action.into())
    }

    /// List all droplets on the account
    pub async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        let droplets: Vec<ApiDroplet> = self.get_all("/droplets", "droplets").await?;
        Ok(droplets.into_iter().map(Droplet::from).collect())
    }

    /// Get a droplet by ID
    pub async fn get_droplet(&self, droplet_id: &str) -> Result<Droplet> {
        let envelope: DropletEnvelope = self.get(&format!("/droplets/{}", droplet_id)).await?;
        Ok(envelope.droplet.into())
    }

    /// Get an image (snapshot) by ID
    pub async fn get_image(&self, image_id: &str) -> Result<Snapshot> {
        let envelope: ImageEnvelope = self.get(&format!("/images/{}", image_id)).await?;
        Ok(envelope.image.into())
    }

    /// List all droplet sizes
    pub async fn list_sizes(&self) -> Result<Vec<Size>> {
        let sizes: Vec<ApiSize> = self.get_all("/sizes", "sizes").await?;
        Ok(sizes.into_iter().map(Size::from).collect())
    }

    /// Get an action by ID
    pub async fn get_action(&self, action_id: &str) -> Result<Action> {
        let envelope: ActionEnvelope = self.get(&format!("/actions/{}", action_id)).await?;
        Ok(envelope.action.into())
    }

    pub async fn shutdown(&self, droplet_id: &str) -> Result<Action> {
        self.droplet_action(droplet_id, &ActionRequest::new("shutdown"))
            .await
    }

    pub async fn power_on(&self, droplet_id: &str) -> Result<Action> {
        self.droplet_action(droplet_id, &ActionRequest::new("power_on"))
            .await
    }

    pub async fn snapshot(&self, droplet_id: &str, name: &str) -> Result<Action> {
        let request = ActionRequest {
            name: Some(name.to_string()),
            ..ActionRequest::new("snapshot")
        };
        self.droplet_action(droplet_id, &request).await
    }

    pub async fn restore(&self, droplet_id: &str, image_id: &str) -> Result<Action> {
        let request = ActionRequest {
            image: Some(image_ref(image_id)),
            ..ActionRequest::new("restore")
        };
        self.droplet_action(droplet_id, &request).await
    }

    pub async fn rebuild(&self, droplet_id: &str, image_id: &str) -> Result<Action> {
        let request = ActionRequest {
            image: Some(image_ref(image_id)),
            ..ActionRequest::new("rebuild")
        };
        self.droplet_action(droplet_id, &request).await
    }

    /// Create a droplet, returning it with the ID of its create action
    pub async fn create_droplet(&self, request: &CreateDroplet) -> Result<(Droplet, String)> {
        let body = CreateDropletRequest {
            name: &request.name,
            region: &request.region,
            size: &request.size,
            image: image_ref(&request.image),
            monitoring: request.monitoring,
            tags: &request.tags,
        };

        let response: CreateDropletResponse = self.post("/droplets", &body).await?;

        let action_id = response
            .links
            .actions
            .first()
            .map(|link| link.id.to_string())
            .ok_or_else(|| {
                DigitalOceanError::MissingAction(format!("droplet {}", request.name))
            })?;

        Ok((response.droplet.into(), action_id))
    }

    /// Delete a droplet
    pub async fn delete_droplet(&self, droplet_id: &str) -> Result<()> {
        let path = format!("/droplets/{}", droplet_id);
        tracing::debug!("DELETE {}", path);

        let response = self
            .client
            .delete(self.url(&path))
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(error_from(response, &path).await)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<T> {
    if response.status().is_success() {
        return Ok(response.json().await?);
    }
    Err(error_from(response, path).await)
}

async fn error_from(response: reqwest::Response, path: &str) -> DigitalOceanError {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return DigitalOceanError::NotFound(path.to_string());
    }

    let message = match response.json::<ApiError>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    DigitalOceanError::ApiError {
        status: status.as_u16(),
        message,
    }
}

/// Images are addressed by numeric ID, or by slug for public images
fn image_ref(image: &str) -> serde_json::Value {
    match image.parse::<u64>() {
        Ok(id) => serde_json::json!(id),
        Err(_) => serde_json::json!(image),
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DropletEnvelope {
    droplet: ApiDroplet,
}

#[derive(Debug, Deserialize)]
struct ImageEnvelope {
    image: ApiImage,
}

#[derive(Debug, Deserialize)]
struct ActionEnvelope {
    action: ApiAction,
}

#[derive(Debug, Deserialize)]
struct ApiDroplet {
    id: u64,
    name: String,
    status: PowerStatus,
    #[serde(default)]
    networks: ApiNetworks,
    #[serde(default)]
    snapshot_ids: Vec<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiNetworks {
    #[serde(default)]
    v4: Vec<ApiNetworkV4>,
}

#[derive(Debug, Deserialize)]
struct ApiNetworkV4 {
    ip_address: String,
    #[serde(rename = "type")]
    r#type: String,
}

impl From<ApiDroplet> for Droplet {
    fn from(d: ApiDroplet) -> Self {
        let ip_address = d
            .networks
            .v4
            .into_iter()
            .find(|n| n.r#type == "public")
            .map(|n| n.ip_address);

        Self {
            id: d.id.to_string(),
            name: d.name,
            status: d.status,
            ip_address,
            snapshot_ids: d.snapshot_ids.iter().map(u64::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    id: u64,
    name: String,
    #[serde(default)]
    min_disk_size: Option<u64>,
    #[serde(default)]
    size_gigabytes: Option<f64>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    regions: Vec<String>,
}

impl From<ApiImage> for Snapshot {
    fn from(i: ApiImage) -> Self {
        Self {
            id: i.id.to_string(),
            name: i.name,
            size_gigabytes: i.size_gigabytes.unwrap_or_default(),
            min_disk_size: i.min_disk_size.unwrap_or_default(),
            status: i.status.unwrap_or_else(|| "unknown".to_string()),
            regions: i.regions,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiAction {
    id: u64,
    status: ActionStatus,
    #[serde(rename = "type")]
    r#type: String,
}

impl From<ApiAction> for Action {
    fn from(a: ApiAction) -> Self {
        Self {
            id: a.id.to_string(),
            status: a.status,
            kind: a.r#type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiSize {
    slug: String,
    disk: u64,
    price_hourly: f64,
    #[serde(default)]
    regions: Vec<String>,
}

impl From<ApiSize> for Size {
    fn from(s: ApiSize) -> Self {
        Self {
            slug: s.slug,
            disk: s.disk,
            price_hourly: s.price_hourly,
            regions: s.regions,
        }
    }
}

#[derive(Debug, Serialize)]
struct ActionRequest {
    #[serde(rename = "type")]
    r#type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<serde_json::Value>,
}

impl ActionRequest {
    fn new(r#type: &'static str) -> Self {
        Self {
            r#type,
            name: None,
            image: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateDropletRequest<'a> {
    name: &'a str,
    region: &'a str,
    size: &'a str,
    image: serde_json::Value,
    monitoring: bool,
    tags: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CreateDropletResponse {
    droplet: ApiDroplet,
    #[serde(default)]
    links: ApiLinks,
}

#[derive(Debug, Default, Deserialize)]
struct ApiLinks {
    #[serde(default)]
    actions: Vec<ApiActionLink>,
}

#[derive(Debug, Deserialize)]
struct ApiActionLink {
    id: u64,
}
