use library_service::config::LibraryConfig;
use library_service::dtos::DocumentResponse;
use library_service::services::LibraryIndex;
use library_service::startup::Application;
use reqwest::multipart;

pub const TEST_SESSION_KEY: &str = "test-code-1234";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: LibraryIndex,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = LibraryConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            client,
        }
    }

    /// Open a library session for the given access code.
    pub async fn open_session(&self, access_code: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/sessions", self.address))
            .json(&serde_json::json!({ "access_code": access_code }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Spawn helper that also opens the default test session.
    pub async fn spawn_with_session() -> Self {
        let app = Self::spawn().await;
        let response = app.open_session(TEST_SESSION_KEY).await;
        assert_eq!(reqwest::StatusCode::CREATED, response.status());
        app
    }

    /// Upload a document with metadata, asserting success.
    #[allow(clippy::too_many_arguments)]
    pub async fn upload_document(
        &self,
        session_key: &str,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
        title: &str,
        category: &str,
        tags: &str,
    ) -> DocumentResponse {
        let response = self
            .try_upload_document(session_key, filename, mime_type, data, title, category, tags)
            .await;

        assert_eq!(reqwest::StatusCode::CREATED, response.status());
        response.json().await.expect("Failed to parse JSON")
    }

    /// Upload without asserting, for validation-failure tests.
    #[allow(clippy::too_many_arguments)]
    pub async fn try_upload_document(
        &self,
        session_key: &str,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
        title: &str,
        category: &str,
        tags: &str,
    ) -> reqwest::Response {
        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(data)
                    .file_name(filename.to_string())
                    .mime_str(mime_type)
                    .unwrap(),
            )
            .text("title", title.to_string())
            .text("subject", String::new())
            .text("description", String::new())
            .text("category", category.to_string())
            .text("tags", tags.to_string());

        self.client
            .post(format!("{}/documents", self.address))
            .header("X-Session-Key", session_key)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// List documents with a raw query string ("" for no filters).
    pub async fn list_documents(&self, session_key: &str, query: &str) -> reqwest::Response {
        let url = if query.is_empty() {
            format!("{}/documents", self.address)
        } else {
            format!("{}/documents?{}", self.address, query)
        };
        self.client
            .get(url)
            .header("X-Session-Key", session_key)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
