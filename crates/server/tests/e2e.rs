use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::build_app;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated data file per test run
    let data_file = format!("target/test-data/{}/data.json", Uuid::new_v4());
    let app = build_app(data_file).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_root_is_plain_text() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "API");
    Ok(())
}

#[tokio::test]
async fn e2e_submit_and_list_booking() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let booking = json!({"name": "Ana", "phone_number": "555-1234", "date": "2024-05-01", "time": "10:00"});

    let res = c.post(format!("{}/submit", app.base_url)).json(&booking).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["message"], "Data saved successfully!");

    let res = c
        .get(format!("{}/data", app.base_url))
        .header("Origin", "https://frontend.example.com")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers().get("access-control-allow-origin").map(|v| v.as_bytes()), Some(&b"*"[..]));
    assert_eq!(res.json::<Value>().await?, json!([booking]));
    Ok(())
}

#[tokio::test]
async fn e2e_missing_field_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let res = c
        .post(format!("{}/submit", app.base_url))
        .json(&json!({"name": "Ana", "phone_number": "555-1234", "date": "2024-05-01"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Missing data!"}));

    let res = c.get(format!("{}/data", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}
