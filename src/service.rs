//! Service
//!
//! Executes routed requests against the message store, the scratch
//! resource and the static index page.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{BoardError, Result};
use crate::http::{ContentType, Request, Response, StatusCode};
use crate::router::{message_id, Route, Router};
use crate::store::{validate_body, MessageStore, ScratchResource};

/// Request handler shared by all connections
pub struct Service {
    router: Router,
    store: MessageStore,
    scratch: ScratchResource,
    index_path: PathBuf,
    server_name: String,
}

impl Service {
    /// Name of the record file inside the data directory
    pub const MESSAGES_FILENAME: &'static str = "messages.txt";

    /// Open the store and collaborators described by `config`
    ///
    /// Opening the store creates `data_dir`, which also holds the scratch file.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let store = MessageStore::open(&config.data_dir.join(Self::MESSAGES_FILENAME))?;
        let scratch = ScratchResource::new(config.scratch_path());

        Ok(Self {
            router: Router::from_config(config),
            store,
            scratch,
            index_path: config.index_path.clone(),
            server_name: config.server_name.clone(),
        })
    }

    /// Handle one request; every failure becomes a response
    pub fn handle(&self, request: &Request) -> Response {
        let route = self.router.route(request);
        tracing::debug!("{} {} → {:?}", request.method, request.uri, route);

        match self.execute(route, request) {
            Ok(response) => response,
            Err(e) => {
                match e.status() {
                    StatusCode::InternalServerError => tracing::error!("{:?} failed: {}", route, e),
                    _ => tracing::debug!("{:?} rejected: {}", route, e),
                }
                Response::from_error(&e)
            }
        }
    }

    fn execute(&self, route: Route, request: &Request) -> Result<Response> {
        match route {
            Route::Index => self.index(),
            Route::ListMessages => Ok(self.list_messages()),
            Route::CreateMessage => self.create_message(request),
            Route::ReplaceMessage => self.replace_message(request),
            Route::DeleteMessage => self.delete_message(request),
            Route::ScratchAppend => {
                let content = self.scratch.append(&request.body)?;
                Ok(Response::ok(ContentType::Text, content))
            }
            Route::Forbidden => Ok(Response::new(StatusCode::Forbidden)),
            Route::NotFound => Ok(Response::new(StatusCode::NotFound)),
            Route::NotImplemented => Ok(Response::new(StatusCode::NotImplemented)),
            Route::InvalidMethod => {
                Ok(Response::new(StatusCode::BadRequest).with_reason("Invalid Method"))
            }
        }
    }

    fn index(&self) -> Result<Response> {
        match fs::read(&self.index_path) {
            Ok(bytes) => Ok(Response::ok(ContentType::Html, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Index page missing at {}", self.index_path.display());
                Ok(Response::new(StatusCode::NotFound))
            }
            Err(e) => Err(BoardError::Io(e)),
        }
    }

    fn list_messages(&self) -> Response {
        let listing = self.store.list();
        let reason = if listing.is_empty() {
            "No Messages Found"
        } else {
            StatusCode::Ok.reason()
        };
        Response::ok(ContentType::Json, listing.body).with_reason(reason)
    }

    fn create_message(&self, request: &Request) -> Result<Response> {
        let record = self.store.create(&request.body)?;
        Ok(Response::new(StatusCode::Created).with_body(ContentType::Json, record))
    }

    fn replace_message(&self, request: &Request) -> Result<Response> {
        validate_body(&request.body)?;
        let id = message_id(request)?;
        let record = self.store.replace(id, &request.body)?;
        Ok(Response::ok(ContentType::Json, record))
    }

    fn delete_message(&self, request: &Request) -> Result<Response> {
        let id = message_id(request)?;
        self.store.delete(id)?;
        Ok(Response::new(StatusCode::Ok))
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn scratch(&self) -> &ScratchResource {
        &self.scratch
    }

    /// Value of the `Server` response header
    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}
