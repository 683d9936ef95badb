use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AccessGate;
use auth::AccountId;
use auth::AdminSecret;
use auth::Authenticator;
use auth::TokenService;
use chrono::Utc;
use school_service::inbound::http::router::create_router;
use school_service::school::errors::SchoolError;
use school_service::school::models::ApplyEditCommand;
use school_service::school::models::EditRequest;
use school_service::school::models::EditRequestId;
use school_service::school::models::NewSchool;
use school_service::school::models::RequestEditCommand;
use school_service::school::models::School;
use school_service::school::models::SchoolId;
use school_service::school::models::SchoolName;
use school_service::school::ports::EditRequestRepository;
use school_service::school::ports::SchoolRepository;
use school_service::school::service::SchoolService;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_SECRET: &str = "Operator-Secret";
pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
    pub store: Arc<Mutex<Store>>,
}

/// Shared backing state for the in-memory repositories
#[derive(Default)]
pub struct Store {
    schools: Vec<School>,
    edit_requests: Vec<EditRequest>,
    next_school_id: i64,
    next_edit_request_id: i64,
}

impl Store {
    pub fn school(&self, id: i64) -> Option<School> {
        self.schools.iter().find(|s| s.id.0 == id).cloned()
    }

    pub fn edit_request(&self, id: i64) -> Option<EditRequest> {
        self.edit_requests.iter().find(|e| e.id.0 == id).cloned()
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(Mutex::new(Store::default()));
        let school_repo = Arc::new(InMemorySchoolRepository {
            store: Arc::clone(&store),
        });
        let edit_request_repo = Arc::new(InMemoryEditRequestRepository {
            store: Arc::clone(&store),
        });

        let tokens = Arc::new(TokenService::new(JWT_SECRET));
        let authenticator = Arc::new(Authenticator::new(Arc::clone(&tokens)));
        let access_gate = Arc::new(AccessGate::new(
            tokens,
            AdminSecret::new(ADMIN_SECRET.to_string()),
        ));

        let school_service = Arc::new(SchoolService::new(
            school_repo,
            edit_request_repo,
            authenticator,
        ));

        let router = create_router(school_service, access_gate);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service: TokenService::new(JWT_SECRET),
            store,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a school with the standard test password and return its id
    pub async fn register(&self, name: &str) -> i64 {
        let response = self
            .post("/reg")
            .json(&json!({
                "name": name,
                "address": "1 Main Street",
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        self.store
            .lock()
            .unwrap()
            .schools
            .iter()
            .find(|s| s.name.as_str() == name)
            .map(|s| s.id.0)
            .expect("Registered school missing from store")
    }

    /// Log in with the standard test password and return the token
    pub async fn login(&self, id: i64) -> String {
        let body: Value = self
            .post("/login")
            .json(&json!({ "id": id, "password": PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// Issue a token directly, bypassing login
    pub fn token_for(&self, id: i64) -> String {
        self.token_service.issue(AccountId(id)).unwrap()
    }
}

pub struct InMemorySchoolRepository {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn create(&self, school: NewSchool) -> Result<School, SchoolError> {
        let mut store = self.store.lock().unwrap();
        if store.schools.iter().any(|s| s.name == school.name) {
            return Err(SchoolError::DuplicateName(school.name.to_string()));
        }

        store.next_school_id += 1;
        let created = School {
            id: SchoolId(store.next_school_id),
            name: school.name,
            address: school.address,
            password_hash: school.password_hash,
            verified: false,
            created_at: Utc::now(),
        };
        store.schools.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: SchoolId) -> Result<Option<School>, SchoolError> {
        Ok(self.store.lock().unwrap().school(id.0))
    }

    async fn find_by_name(&self, name: &SchoolName) -> Result<Option<School>, SchoolError> {
        let store = self.store.lock().unwrap();
        Ok(store.schools.iter().find(|s| &s.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<School>, SchoolError> {
        Ok(self.store.lock().unwrap().schools.clone())
    }

    async fn set_verified(&self, id: SchoolId, verified: bool) -> Result<(), SchoolError> {
        let mut store = self.store.lock().unwrap();
        let school = store
            .schools
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SchoolError::NotFound(id))?;
        school.verified = verified;
        Ok(())
    }

    async fn delete(&self, id: SchoolId) -> Result<(), SchoolError> {
        let mut store = self.store.lock().unwrap();
        let before = store.schools.len();
        store.schools.retain(|s| s.id != id);
        if store.schools.len() == before {
            return Err(SchoolError::NotFound(id));
        }
        store.edit_requests.retain(|e| e.school_id != id);
        Ok(())
    }
}

pub struct InMemoryEditRequestRepository {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl EditRequestRepository for InMemoryEditRequestRepository {
    async fn create(&self, command: RequestEditCommand) -> Result<EditRequest, SchoolError> {
        let mut store = self.store.lock().unwrap();
        if store.school(command.school_id.0).is_none() {
            return Err(SchoolError::NotFound(command.school_id));
        }

        store.next_edit_request_id += 1;
        let created = EditRequest {
            id: EditRequestId(store.next_edit_request_id),
            school_id: command.school_id,
            new_name: command.new_name,
            new_address: command.new_address,
            done: false,
            created_at: Utc::now(),
        };
        store.edit_requests.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<EditRequest>, SchoolError> {
        Ok(self.store.lock().unwrap().edit_requests.clone())
    }

    async fn apply(&self, command: ApplyEditCommand) -> Result<(), SchoolError> {
        let mut store = self.store.lock().unwrap();
        if store.school(command.school_id.0).is_none() {
            return Err(SchoolError::NotFound(command.school_id));
        }
        if store.edit_request(command.edit_request_id.0).is_none() {
            return Err(SchoolError::EditRequestNotFound(command.edit_request_id));
        }
        if store
            .schools
            .iter()
            .any(|s| s.id != command.school_id && s.name == command.new_name)
        {
            return Err(SchoolError::DuplicateName(command.new_name.to_string()));
        }

        for school in store.schools.iter_mut().filter(|s| s.id == command.school_id) {
            school.name = command.new_name.clone();
            school.address = command.new_address.clone();
        }
        for edit in store
            .edit_requests
            .iter_mut()
            .filter(|e| e.id == command.edit_request_id)
        {
            edit.done = true;
        }
        Ok(())
    }

    async fn delete(&self, id: EditRequestId) -> Result<(), SchoolError> {
        let mut store = self.store.lock().unwrap();
        let before = store.edit_requests.len();
        store.edit_requests.retain(|e| e.id != id);
        if store.edit_requests.len() == before {
            return Err(SchoolError::EditRequestNotFound(id));
        }
        Ok(())
    }
}
