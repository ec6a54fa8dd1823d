//! In-memory stand-in for the clothing REST collection.
//!
//! Behaves like a json-server collection: numeric ids assigned from 1 in
//! creation order, `PUT` replaces the whole record (the path id wins over any
//! id in the body), `DELETE` answers 204, and unknown or non-numeric ids are
//! 404.

use std::{collections::BTreeMap, env, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const DEFAULT_RESOURCE: &str = "roupas";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tamanho")]
    pub size: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

/// Body of `POST` and `PUT`. Any `id` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct ItemInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tamanho")]
    pub size: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

impl ItemInput {
    fn into_item(self, id: u64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            size: self.size,
            price: self.price,
            image: self.image,
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    last_id: u64,
    items: BTreeMap<u64, Item>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
}

/// Listen port and collection name, from `PORT` and `WARDROBE_RESOURCE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub resource: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let resource = env::var("WARDROBE_RESOURCE")
            .ok()
            .map(|r| r.trim_matches('/').to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_RESOURCE.to_string());
        Ok(Self { port, resource })
    }
}

pub fn app() -> Router {
    app_for(DEFAULT_RESOURCE)
}

pub fn app_for(resource: &str) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let collection = format!("/{}", resource.trim_matches('/'));
    let member = format!("{collection}/{{id}}");
    Router::new()
        .route(&collection, get(list_items).post(create_item))
        .route(&member, get(get_item).put(replace_item).delete(delete_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_for(listener, DEFAULT_RESOURCE).await
}

pub async fn run_for(listener: TcpListener, resource: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_for(resource)).await
}

fn parse_id(raw: &str) -> Result<u64, StatusCode> {
    raw.parse().map_err(|_| StatusCode::NOT_FOUND)
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn create_item(State(db): State<Db>, Json(input): Json<ItemInput>) -> (StatusCode, Json<Item>) {
    let mut store = db.write().await;
    store.last_id += 1;
    let item = input.into_item(store.last_id);
    store.items.insert(item.id, item.clone());
    info!(id = item.id, "created item");
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Item>, StatusCode> {
    let id = parse_id(&id)?;
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_item(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, StatusCode> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    let slot = store.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_item(id);
    info!(id, "replaced item");
    Ok(Json(slot.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    store
        .items
        .remove(&id)
        .map(|_| {
            info!(id, "deleted item");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
