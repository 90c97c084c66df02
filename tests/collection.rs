use std::fs;
use std::path::Path;

use anyhow::Result;
use ghostman::{
    build, build_catalog, load_collection, DispatchConfig, Dispatcher, Error, LoadError, Session,
    VariableMap,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const COLLECTION: &str = r#"{
  "info": {"name": "Shop API", "_postman_id": "ignored"},
  "item": [
    {
      "name": "Create order",
      "request": {
        "method": "POST",
        "description": "Places a new order",
        "header": [
          {"key": "Content-Type", "value": "application/json"},
          {"key": "Authorization", "value": "Bearer {{token}}"}
        ],
        "body": {"mode": "raw", "raw": "{\"sku\": \"{{sku}}\"}"},
        "url": {"raw": "{{baseUrl}}/api/orders", "host": ["{{baseUrl}}"], "path": ["api", "orders"]}
      }
    },
    {
      "name": "Health",
      "request": {
        "method": "GET",
        "url": {"raw": "{{baseUrl}}/health", "host": ["{{baseUrl}}"], "path": ["health"]}
      }
    },
    {
      "name": "List orders",
      "request": {
        "method": "GET",
        "url": {"raw": "{{baseUrl}}/v2/orders", "host": ["{{baseUrl}}"], "path": ["v2", "orders"]}
      }
    }
  ],
  "variable": [
    {"key": "baseUrl", "value": "http://placeholder.invalid", "type": "string"},
    {"key": "token", "value": "secret", "type": "string"},
    {"key": "sku", "value": "A-1", "type": "string"}
  ]
}"#;

fn write_collection(dir: &Path, base_url: &str) -> Result<std::path::PathBuf> {
    let path = dir.join("col.postman_collection.json");
    fs::write(&path, COLLECTION.replace("http://placeholder.invalid", base_url))?;
    Ok(path)
}

#[test]
fn catalog_from_file_keeps_order_and_skips_short_paths() -> Result<()> {
    let temp = tempdir()?;
    let path = write_collection(temp.path(), "http://localhost")?;

    let collection = load_collection(&path)?;
    assert_eq!(collection.name(), "Shop API");

    let catalog = build_catalog(&collection);
    let listing: Vec<_> = catalog
        .iter()
        .map(|e| (e.id.as_str(), e.title.as_str()))
        .collect();
    assert_eq!(listing, vec![("orders", "Create order"), ("orders", "List orders")]);
    assert_eq!(catalog.skipped.len(), 1);
    assert_eq!(catalog.skipped[0].name, "Health");

    // shared id: lookup resolves to the first entry in document order
    assert_eq!(catalog.get("orders").unwrap().title, "Create order");
    assert_eq!(catalog.get("orders").unwrap().intro, "Places a new order");
    Ok(())
}

#[test]
fn build_resolves_collection_variables() -> Result<()> {
    let temp = tempdir()?;
    let path = write_collection(temp.path(), "http://localhost:8080")?;
    let collection = load_collection(&path)?;
    let catalog = build_catalog(&collection);

    let entry = catalog.get("orders").unwrap();
    let built = build(&entry.template, &catalog.variables)?;

    assert_eq!(built.method.as_str(), "POST");
    assert_eq!(built.url, "http://localhost:8080/api/orders");
    assert_eq!(built.body, r#"{"sku": "A-1"}"#);
    assert_eq!(
        built.headers,
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), "Bearer secret".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn build_without_variables_fails_on_placeholder_url() -> Result<()> {
    let temp = tempdir()?;
    let path = write_collection(temp.path(), "http://localhost")?;
    let collection = load_collection(&path)?;
    let catalog = build_catalog(&collection);

    let entry = catalog.get("orders").unwrap();
    assert!(build(&entry.template, &VariableMap::new()).is_err());
    Ok(())
}

#[test]
fn session_reports_load_errors() {
    let temp = tempdir().unwrap();
    let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();

    let missing = Session::load(&temp.path().join("none.json"), dispatcher.clone());
    assert!(matches!(missing, Err(Error::Load(LoadError::Io { .. }))));

    let bad = temp.path().join("bad.json");
    fs::write(&bad, "{invalid json}").unwrap();
    let malformed = Session::load(&bad, dispatcher);
    assert!(matches!(malformed, Err(Error::Load(LoadError::Parse { .. }))));
}

#[tokio::test]
async fn session_sends_a_template_end_to_end() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/orders")
                .header("authorization", "Bearer secret")
                .body(r#"{"sku": "A-1"}"#);
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":7,"sku":"A-1"}"#);
        })
        .await;

    let temp = tempdir()?;
    let path = write_collection(temp.path(), &server.base_url())?;
    let session = Session::load(&path, Dispatcher::new(DispatchConfig::default())?)?;

    let form = session.form("orders")?;
    assert_eq!(form.url, format!("{}/api/orders", server.base_url()));
    assert_eq!(
        form.headers,
        "Content-Type: application/json\nAuthorization: Bearer secret\n"
    );

    let request = session.build(&form)?;
    let result = session.spawn(request, None).await?;

    mock.assert_async().await;
    assert!(!result.is_error);
    assert_eq!(result.status_line, "HTTP/1.1 201 Created");
    assert_eq!(result.body, "{\n    \"id\": 7,\n    \"sku\": \"A-1\"\n}");
    Ok(())
}

#[test]
fn unknown_template_is_reported() -> Result<()> {
    let temp = tempdir()?;
    let path = write_collection(temp.path(), "http://localhost")?;
    let session = Session::load(&path, Dispatcher::new(DispatchConfig::default())?)?;

    assert!(matches!(session.form("health"), Err(Error::UnknownTemplate(id)) if id == "health"));
    Ok(())
}
