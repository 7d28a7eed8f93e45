use crate::backend::Backend;
use crate::nv_tree::PatchError;
use crate::store::{StoreKey, StoreValue, ViewStore};
use crate::view::Node;
use crate::view_tree::{RenderSummary, ViewTree};
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::sync::Arc;

/// Requests render passes; may be cloned and sent to other threads.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    sender: Sender<()>,
}

impl RenderHandle {
    /// Requests a render pass on the next [`Host::poll`].
    pub fn request_render(&self) {
        if self.sender.send(()).is_err() {
            rdebug!("render requested after host was dropped");
        }
    }
}

/// The root store shared by all render passes.
///
/// Changing it requests a render.
#[derive(Debug, Clone)]
pub struct Environment {
    store: Arc<Mutex<ViewStore>>,
    handle: RenderHandle,
}

impl Environment {
    pub fn set(&self, key: StoreKey, value: impl Into<StoreValue>) {
        self.store.lock().set(key, value);
        self.handle.request_render();
    }

    pub fn remove(&self, key: StoreKey) {
        if self.store.lock().remove(key).is_some() {
            self.handle.request_render();
        }
    }

    /// Returns the current store.
    pub fn snapshot(&self) -> ViewStore {
        self.store.lock().clone()
    }
}

/// Connects root content to a backend and re-renders it on request.
///
/// Must be polled on the thread that owns the backend. A request that arrives while a pass is
/// running stays queued for the next poll.
pub struct Host<B: Backend> {
    pub tree: ViewTree<B>,
    content: Box<dyn Fn() -> Vec<Node>>,
    environment: Environment,
    requests: Receiver<()>,
    handle: RenderHandle,
}

impl<B: Backend> Host<B> {
    /// Creates a new Host.
    ///
    /// The content will be rendered on the first call to `poll`.
    pub fn new<F>(backend: B, content: F) -> Result<Host<B>, PatchError<B>>
    where
        F: Fn() -> Vec<Node> + 'static,
    {
        let (sender, requests) = channel::unbounded();
        let handle = RenderHandle { sender };
        handle.request_render();

        Ok(Host {
            tree: ViewTree::new(backend)?,
            content: Box::new(content),
            environment: Environment {
                store: Arc::new(Mutex::new(ViewStore::new())),
                handle: handle.clone(),
            },
            requests,
            handle,
        })
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle.clone()
    }

    pub fn environment(&self) -> Environment {
        self.environment.clone()
    }

    /// Receives all pending render requests and runs one render pass if there were any.
    pub fn poll(&mut self) -> Result<Option<RenderSummary>, PatchError<B>> {
        let mut pending = 0;
        loop {
            match self.requests.try_recv() {
                Ok(()) => pending += 1,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if pending == 0 {
            return Ok(None);
        }
        rtrace!(pending, "render requested");

        let store = self.environment.snapshot();
        let content = (self.content)();
        self.tree.render(&content, &store).map(Some)
    }
}
