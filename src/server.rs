use crate::location_feed::{CoordinateSource, LocationFeed};
use actix_web::dev::{Service, ServerHandle};
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use tokio::runtime::Runtime;

/// Hands out a fresh coordinate source for every request, so requests never
/// share generator state.
pub type SourceFactory = Arc<dyn Fn() -> Box<dyn CoordinateSource> + Send + Sync>;

pub fn thread_rng_source() -> SourceFactory {
    Arc::new(|| -> Box<dyn CoordinateSource> { Box::new(rand::rng()) })
}

struct AppState {
    source_factory: SourceFactory,
}

// Method, query string and body are all ignored.
async fn serve_feed(data: web::Data<AppState>) -> HttpResponse {
    let mut source = (data.source_factory)();
    let feed = LocationFeed::generate(source.as_mut());
    HttpResponse::Ok().json(feed)
}

/// Mounts the feed endpoint at `path`, answering every HTTP method.
pub fn configure(cfg: &mut web::ServiceConfig, path: &str, source_factory: SourceFactory) {
    cfg.app_data(web::Data::new(AppState { source_factory }))
        .service(web::resource(path).to(serve_feed));
}

pub struct FeedServer {
    host: String,
    port: u16,
    path: String,
    workers: Option<usize>,
    source_factory: SourceFactory,
    server_handle: Option<ServerHandle>,
    // cleared by the server thread once the server future returns
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl FeedServer {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: "/".into(),
            workers: None,
            source_factory: thread_rng_source(),
            server_handle: None,
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_source(mut self, source_factory: SourceFactory) -> Self {
        self.source_factory = source_factory;
        self
    }

    /// The bound port once started (port 0 is resolved to the real one).
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }

    /// Whether the server is still serving. Turns false on `stop` and also
    /// when the server exits on its own.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Handle for stopping the server from elsewhere, e.g. another thread.
    pub fn server_handle(&self) -> Option<ServerHandle> {
        self.server_handle.clone()
    }

    // Start the server in a separate thread. Returns once it is listening.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            bail!("feed server is already running on {}", self.url());
        }
        // reap a server that exited on its own
        self.stop();

        let host = self.host.clone();
        let port = self.port;
        let path = self.path.clone();
        let workers = self.workers;
        let source_factory = self.source_factory.clone();
        let running = Arc::new(AtomicBool::new(false));
        let server_running = running.clone();

        // the thread reports either the bound port or why it could not bind
        let (tx, rx) = mpsc::channel::<Result<(u16, ServerHandle)>>();

        let handle = thread::Builder::new()
            .name("location-feed-server".into())
            .spawn(move || {
                let runtime = match Runtime::new() {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = tx.send(Err(anyhow!(e).context("failed to create tokio runtime")));
                        return;
                    }
                };
                runtime.block_on(async move {
                    info!("Setting up server routes...");
                    let mut server = HttpServer::new(move || {
                        let source_factory = source_factory.clone();
                        let path = path.clone();
                        App::new()
                            .wrap_fn(|req, srv| {
                                info!("Incoming request: {} {}", req.method(), req.uri());
                                srv.call(req)
                            })
                            .configure(move |cfg| configure(cfg, &path, source_factory))
                    });
                    if let Some(workers) = workers {
                        server = server.workers(workers);
                    }
                    let server = match server.bind((host.as_str(), port)) {
                        Ok(server) => server,
                        Err(e) => {
                            let _ = tx.send(Err(
                                anyhow!(e).context(format!("failed to bind {host}:{port}"))
                            ));
                            return;
                        }
                    };

                    let bound_port = server
                        .addrs()
                        .first()
                        .map(|addr| addr.port())
                        .unwrap_or(port);
                    let server = server.run();
                    server_running.store(true, Ordering::SeqCst);
                    if tx.send(Ok((bound_port, server.handle()))).is_err() {
                        server_running.store(false, Ordering::SeqCst);
                        return;
                    }

                    info!("Server bound successfully to {}:{}", host, bound_port);
                    if let Err(e) = server.await {
                        error!("feed server stopped with error: {e}");
                    }
                    server_running.store(false, Ordering::SeqCst);
                });
            })
            .context("failed to spawn server thread")?;

        let (bound_port, server_handle) = rx
            .recv()
            .context("server thread exited before reporting its status")??;

        self.port = bound_port;
        self.server_handle = Some(server_handle);
        self.running = running;
        self.thread = Some(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(server_handle) = self.server_handle.take() {
            info!("Stopping server on port {}", self.port);
            pollster::block_on(server_handle.stop(true));
        }
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                error!("feed server thread panicked");
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for FeedServer {
    fn drop(&mut self) {
        self.stop();
    }
}
