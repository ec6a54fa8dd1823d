use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_for, Item};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const SHIRT: &str = r#"{"nome":"Camisa","descricao":"Linho branco","tamanho":"M","preco":120.5}"#;

// --- list ---

#[tokio::test]
async fn list_items_empty() {
    let resp = app().oneshot(empty_request("GET", "/roupas")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Item> = body_json(resp).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn custom_resource_name_is_routed() {
    let resp = app_for("clothes")
        .oneshot(empty_request("GET", "/clothes"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- create ---

#[tokio::test]
async fn create_item_returns_201_with_first_id() {
    let resp = app().oneshot(json_request("POST", "/roupas", SHIRT)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "Camisa");
    assert_eq!(item.price, 120.5);
    assert!(item.image.is_none());
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/roupas", r#"{"not_nome":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_item_not_found() {
    let resp = app().oneshot(empty_request("GET", "/roupas/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_item_non_numeric_id_is_not_found() {
    let resp = app().oneshot(empty_request("GET", "/roupas/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- replace ---

#[tokio::test]
async fn replace_item_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/roupas/1", SHIRT))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_item_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/roupas/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = app().into_service();

    // create two
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/roupas", SHIRT))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Item = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/roupas",
            r#"{"nome":"Calça","descricao":"Jeans escuro","tamanho":"G","preco":199,"imagem":"https://img.example/c.png"}"#,
        ))
        .await
        .unwrap();
    let second: Item = body_json(resp).await;
    assert_eq!(second.id, first.id + 1);

    // list keeps creation order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/roupas"))
        .await
        .unwrap();
    let items: Vec<Item> = body_json(resp).await;
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![first.id, second.id]);

    // replace is a full replace; the body id is ignored
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/roupas/{}", first.id),
            r#"{"id":999,"nome":"Camisa Slim","descricao":"Linho azul","tamanho":"P","preco":99}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: Item = body_json(resp).await;
    assert_eq!(replaced.id, first.id);
    assert_eq!(replaced.name, "Camisa Slim");
    assert_eq!(replaced.size, "P");

    // get reflects the replace
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/roupas/{}", first.id)))
        .await
        .unwrap();
    let fetched: Item = body_json(resp).await;
    assert_eq!(fetched, replaced);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/roupas/{}", first.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/roupas/{}", first.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ids are not reused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/roupas", SHIRT))
        .await
        .unwrap();
    let third: Item = body_json(resp).await;
    assert_eq!(third.id, second.id + 1);
}
