use std::{ffi::OsString, marker::PhantomData, path::Path, sync::Arc};

use serde_json::Value;

use crate::{
    args,
    config::Config,
    error::AppError,
    model::{Node, Pod, ReplicationController, ResourceKind, Selector, Service},
    runner::run,
    utils::{decode, decode_items, parse_json},
};

/// One handle per resource kind, all sharing the same connection profile.
#[derive(Debug, Clone)]
pub struct Kubectl {
    pub pod: Handle<Pod>,
    pub rc: Handle<ReplicationController>,
    pub service: Handle<Service>,
    pub node: Handle<Node>,
}

impl Kubectl {
    pub fn new(cfg: Config) -> Self {
        let cfg = Arc::new(cfg);
        Self {
            pod: Handle::new(cfg.clone()),
            rc: Handle::new(cfg.clone()),
            service: Handle::new(cfg.clone()),
            node: Handle::new(cfg),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Config::from_env().map(Self::new)
    }
}

/// Resource handle bound to kind `K`.
///
/// Verbs that only make sense for one kind live on that kind's handle:
///
/// ```compile_fail
/// # async fn f(kubectl: kubectl_adapter::Kubectl) {
/// kubectl.pod.scale("web", 3).await;
/// # }
/// ```
///
/// ```compile_fail
/// # async fn f(kubectl: kubectl_adapter::Kubectl) {
/// kubectl.rc.logs("web-0").await;
/// # }
/// ```
///
/// ```compile_fail
/// # async fn f(kubectl: kubectl_adapter::Kubectl) {
/// kubectl.service.port_forward("frontend", "8080:80").await;
/// # }
/// ```
///
/// ```compile_fail
/// # async fn f(kubectl: kubectl_adapter::Kubectl) {
/// kubectl.node.rolling_update("worker-1", "nginx:1.27").await;
/// # }
/// ```
///
/// ```compile_fail
/// # async fn f(kubectl: kubectl_adapter::Kubectl) {
/// kubectl.pod.rolling_update_by_file("web-0", "/tmp/web.yaml").await;
/// # }
/// ```
///
/// The same calls on the right handles compile:
///
/// ```no_run
/// # async fn f(kubectl: kubectl_adapter::Kubectl) {
/// let _ = kubectl.rc.scale("web", 3).await;
/// let _ = kubectl.pod.logs("web-0").await;
/// let _ = kubectl.pod.port_forward("web-0", "8080:80").await;
/// let _ = kubectl.rc.rolling_update("web", "nginx:1.27").await;
/// let _ = kubectl.rc.rolling_update_by_file("web", "/tmp/web.yaml").await;
/// # }
/// ```
pub struct Handle<K> {
    cfg: Arc<Config>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        Self {
            cfg: self.cfg.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> std::fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &K::NAME)
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl<K: ResourceKind> Handle<K> {
    pub fn new(cfg: Arc<Config>) -> Self {
        Self {
            cfg,
            kind: PhantomData,
        }
    }

    pub fn kind(&self) -> &'static str {
        K::NAME
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    async fn exec(&self, args: Vec<OsString>) -> Result<String, AppError> {
        run(&self.cfg, &args).await
    }

    /// `get <kind> [selector] --output=json`
    pub async fn list(&self, selector: Option<&Selector>) -> Result<Value, AppError> {
        let raw = self.exec(args::list(K::NAME, selector)).await?;
        parse_json("list", raw)
    }

    pub async fn list_objects(&self, selector: Option<&Selector>) -> Result<Vec<K>, AppError> {
        let list = self.list(selector).await?;
        decode_items("list", list)
    }

    pub async fn get(&self, name: &str) -> Result<Value, AppError> {
        let raw = self.exec(args::get(K::NAME, name)).await?;
        parse_json("get", raw)
    }

    pub async fn get_object(&self, name: &str) -> Result<K, AppError> {
        let value = self.get(name).await?;
        decode("get", value)
    }

    pub async fn describe(&self, name: &str) -> Result<String, AppError> {
        self.exec(args::describe(K::NAME, name)).await
    }

    pub async fn create(&self, filepath: impl AsRef<Path>) -> Result<String, AppError> {
        self.exec(args::create(filepath.as_ref())).await
    }

    pub async fn delete(&self, id: &str) -> Result<String, AppError> {
        self.exec(args::delete(K::NAME, id)).await
    }

    pub async fn update(&self, filepath: impl AsRef<Path>) -> Result<String, AppError> {
        self.exec(args::update(filepath.as_ref())).await
    }

    /// Patches `name` with `patch`, serialized as compact JSON.
    pub async fn apply(&self, name: &str, patch: &Value) -> Result<String, AppError> {
        self.exec(args::apply(K::NAME, name, patch)).await
    }

    pub async fn use_context(&self, context: &str) -> Result<String, AppError> {
        self.exec(args::use_context(context)).await
    }

    pub async fn view_context(&self) -> Result<Value, AppError> {
        let raw = self.exec(args::view_context()).await?;
        parse_json("config view", raw)
    }
}

impl Handle<ReplicationController> {
    pub async fn rolling_update_by_file(
        &self,
        name: &str,
        filepath: impl AsRef<Path>,
    ) -> Result<String, AppError> {
        self.exec(args::rolling_update_by_file(name, filepath.as_ref()))
            .await
    }

    pub async fn rolling_update(&self, name: &str, image: &str) -> Result<String, AppError> {
        self.exec(args::rolling_update(name, image)).await
    }

    pub async fn scale(&self, name: &str, replicas: u32) -> Result<String, AppError> {
        self.exec(args::scale(name, replicas)).await
    }
}

impl Handle<Pod> {
    /// `name` is either `"<pod>"` or `"<pod> <container>"`.
    pub async fn logs(&self, name: &str) -> Result<String, AppError> {
        self.exec(args::logs(name)).await
    }

    /// Runs until the forwarding process exits.
    pub async fn port_forward(&self, name: &str, port_spec: &str) -> Result<String, AppError> {
        self.exec(args::port_forward(name, port_spec)).await
    }
}
