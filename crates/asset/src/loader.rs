//! OBJ loading: fetch the text, then parse it in one synchronous pass.

use std::sync::{Arc, mpsc};

use crate::{
    error::LoadError,
    fetch::{AnyFetcher, TextFetcher},
    mesh::ObjMesh,
    obj::load_obj_from_str,
};

/// Fetch and parse. The fetch is the only suspension point.
pub async fn load_obj<F: TextFetcher>(fetcher: &F, url: &str) -> Result<ObjMesh, LoadError> {
    log::info!("Loading OBJ from {}", url);
    let text = fetcher.fetch_text(url).await?;
    let mesh = load_obj_from_str(&text);
    log::info!(
        "Loaded OBJ {}: {} vertices, {} triangles, {} normals, {} texture coords",
        url,
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.normal_count(),
        mesh.texture_coord_count()
    );
    Ok(mesh)
}

/// Callback form: `callback(vertices, indices, normals, texture_coords)` runs
/// exactly once on success. On failure the error is logged and the callback
/// is never called; use [`load_obj`] to observe failures.
pub async fn load_obj_with<F, C>(fetcher: &F, url: &str, callback: C)
where
    F: TextFetcher,
    C: FnOnce(Vec<f32>, Vec<u32>, Vec<f32>, Vec<f32>),
{
    match load_obj(fetcher, url).await {
        Ok(mesh) => {
            let (vertices, indices, normals, texture_coords) = mesh.into_parts();
            callback(vertices, indices, normals, texture_coords);
        }
        Err(err) => log::error!("Error loading OBJ: {}", err),
    }
}

/// A non-blocking handle to an in-flight load.
/// Call `try_recv()` each frame to poll without blocking the render loop.
pub struct PendingLoad {
    receiver: mpsc::Receiver<Result<ObjMesh, LoadError>>,
}

impl PendingLoad {
    /// Non-blocking check. `None` while the load is still running; a task
    /// that was dropped (loader or runtime gone) reports an error.
    pub fn try_recv(&self) -> Option<Result<ObjMesh, LoadError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(task_dropped())),
        }
    }

    /// Blocking wait for the result.
    pub fn wait(self) -> Result<ObjMesh, LoadError> {
        self.receiver
            .recv()
            .map_err(|_| task_dropped())?
    }
}

fn task_dropped() -> LoadError {
    LoadError::Runtime("Load task dropped before finishing".into())
}

/// Owns a background tokio runtime and runs loads on it.
pub struct ObjLoader<F = AnyFetcher> {
    runtime: tokio::runtime::Runtime,
    fetcher: Arc<F>,
}

impl ObjLoader<AnyFetcher> {
    /// Loader for `http(s)://` URLs, `file://` URLs and plain paths.
    pub fn new() -> Result<Self, LoadError> {
        Self::with_fetcher(AnyFetcher::new()?)
    }
}

impl<F> ObjLoader<F>
where
    F: TextFetcher + Send + Sync + 'static,
{
    pub fn with_fetcher(fetcher: F) -> Result<Self, LoadError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("obj-loader")
            .enable_all()
            .build()
            .map_err(|e| LoadError::Runtime(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            runtime,
            fetcher: Arc::new(fetcher),
        })
    }

    /// Start loading `url` in the background.
    pub fn load(&self, url: impl Into<String>) -> PendingLoad {
        let (tx, rx) = mpsc::channel();
        let fetcher = Arc::clone(&self.fetcher);
        let url = url.into();

        self.runtime.spawn(async move {
            let result = load_obj(fetcher.as_ref(), &url).await;
            if let Err(err) = &result {
                log::error!("Error loading OBJ: {}", err);
            }
            let _ = tx.send(result);
        });

        PendingLoad { receiver: rx }
    }

    /// Load on the calling thread. Only use outside async contexts.
    pub fn load_blocking(&self, url: &str) -> Result<ObjMesh, LoadError> {
        self.runtime.block_on(load_obj(self.fetcher.as_ref(), url))
    }
}
