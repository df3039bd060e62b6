//! HTTP server for the availability page.
//!
//! A `tiny_http` listener shared by a fixed pool of worker threads. Each
//! worker accepts with a timeout so it can observe the shutdown flag.

use crate::handler::{PageResponse, PageService};
use crate::routes::{route, Route};
use efa_common::{Error, Result};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Handle to the running page server.
pub struct PageServer {
    server: Arc<tiny_http::Server>,
    shutdown: Arc<AtomicBool>,
    workers: Vec<thread::JoinHandle<()>>,
    addr: SocketAddr,
}

impl PageServer {
    /// Bind `addr` and start `workers` request threads.
    pub fn start(addr: &str, workers: usize, service: Arc<PageService>) -> Result<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address '{}': {}", addr, e)))?;

        let server = tiny_http::Server::http(addr).map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("failed to start server on {}: {}", addr, e),
            ))
        })?;
        let addr = server.server_addr().to_ip().unwrap_or(addr);
        let server = Arc::new(server);
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(workers.max(1));
        for idx in 0..workers.max(1) {
            let server = server.clone();
            let shutdown = shutdown.clone();
            let service = service.clone();
            let handle = thread::Builder::new()
                .name(format!("efa-worker-{}", idx))
                .spawn(move || serve_loop(&server, &service, &shutdown))?;
            handles.push(handle);
        }

        info!(addr = %addr, workers = handles.len(), "page server started");

        Ok(Self {
            server,
            shutdown,
            workers: handles,
            addr,
        })
    }

    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until every worker exits.
    pub fn wait(mut self) {
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }

    /// Shut down the server and join the workers.
    pub fn shutdown(mut self) {
        self.stop();
        info!("page server stopped");
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for _ in 0..self.workers.len() {
            self.server.unblock();
        }
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for PageServer {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.stop();
        }
    }
}

/// Worker loop: accept requests and dispatch them until shutdown.
fn serve_loop(server: &tiny_http::Server, service: &PageService, shutdown: &AtomicBool) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        let request = match server.recv_timeout(Duration::from_secs(1)) {
            Ok(Some(req)) => req,
            Ok(None) => continue,
            Err(e) => {
                if !shutdown.load(Ordering::SeqCst) {
                    error!(error = %e, "page server accept error");
                }
                break;
            }
        };

        if shutdown.load(Ordering::SeqCst) {
            let _ = request.respond(
                tiny_http::Response::from_string("shutting down").with_status_code(503),
            );
            break;
        }

        let started = Instant::now();
        let method = request.method().to_string();
        let url = request.url().to_string();
        let response = dispatch(service, &method, &url);

        debug!(
            method = %method,
            url = %url,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );

        if let Err(e) = request.respond(into_http(response)) {
            warn!(error = %e, "failed to send response");
        }
    }
}

/// Route a request line to a response.
pub fn dispatch(service: &PageService, method: &str, url: &str) -> PageResponse {
    match route(method, url) {
        Route::Page(req) => service.respond(&req),
        Route::Health => PageResponse::text(200, "ok"),
        Route::MethodNotAllowed => service.status_page(405, "Only GET and HEAD are supported."),
        Route::NotFound => service.status_page(404, "No page at this address."),
    }
}

fn into_http(response: PageResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut http = tiny_http::Response::from_string(response.body).with_status_code(response.status);
    if let Ok(header) =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], response.content_type.as_bytes())
    {
        http = http.with_header(header);
    }
    http
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::AvailabilityProvider;
    use crate::source::StaticSource;
    use efa_common::{CategoryMap, OperationDescriptor, VersionedAvailability};
    use efa_config::SiteConfig;

    fn service() -> PageService {
        let data = VersionedAvailability::new().with_version(
            "v1",
            CategoryMap::new().with_category(
                "apps",
                vec![OperationDescriptor::new("list", "get", "/app")],
            ),
        );
        PageService::new(
            AvailabilityProvider::new(StaticSource::new(data)),
            &SiteConfig::default(),
        )
    }

    #[test]
    fn test_dispatch_page() {
        let response = dispatch(
            &service(),
            "GET",
            "/en/v1/rest/overview/endpoints-available-for-github-apps",
        );
        assert_eq!(response.status, 200);
        assert!(response.body.contains("/en/rest/reference/apps#list"));
    }

    #[test]
    fn test_dispatch_encoded_version() {
        let data = VersionedAvailability::new().with_version(
            "free-pro-team@latest",
            CategoryMap::new().with_category(
                "apps",
                vec![OperationDescriptor::new("list", "get", "/app")],
            ),
        );
        let service = PageService::new(
            AvailabilityProvider::new(StaticSource::new(data)),
            &SiteConfig::default(),
        );
        let response = dispatch(
            &service,
            "GET",
            "/en/free-pro-team%40latest/rest/overview/endpoints-available-for-github-apps",
        );
        assert_eq!(response.status, 200);
        assert!(response.body.contains("/en/rest/reference/apps#list"));
    }

    #[test]
    fn test_dispatch_health_and_errors() {
        let service = service();
        assert_eq!(dispatch(&service, "GET", "/healthz").body, "ok");
        assert_eq!(dispatch(&service, "GET", "/nope").status, 404);
        assert_eq!(dispatch(&service, "DELETE", "/healthz").status, 405);
        assert_eq!(
            dispatch(
                &service,
                "GET",
                "/v9/rest/overview/endpoints-available-for-github-apps"
            )
            .status,
            404
        );
    }
}
