use std::{ffi::OsString, path::PathBuf};

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::{app_err, error::AppError};

pub const DEFAULT_BINARY: &str = "kubectl";

/// Connection profile shared by every resource handle.
///
/// When both `kubeconfig` and `endpoint` are set, the kubeconfig wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "binary_or_default")]
    pub binary: PathBuf,
    #[serde(deserialize_with = "non_empty")]
    pub kubeconfig: Option<PathBuf>,
    #[serde(deserialize_with = "non_empty")]
    pub endpoint: Option<String>,
}

fn binary_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
    Ok(binary_path(
        Option::<PathBuf>::deserialize(deserializer)?.unwrap_or_default(),
    ))
}

/// Empty strings and `null` both mean unset.
fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + AsRef<std::ffi::OsStr>,
{
    Ok(Option::<T>::deserialize(deserializer)?.filter(|v| !v.as_ref().is_empty()))
}

fn binary_path(binary: PathBuf) -> PathBuf {
    if binary.as_os_str().is_empty() {
        PathBuf::from(DEFAULT_BINARY)
    } else {
        binary
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            kubeconfig: None,
            endpoint: None,
        }
    }
}

impl Config {
    /// Reads `KUBECTL_BINARY`, `KUBECONFIG` and `KUBE_ENDPOINT`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut cfg = Config::default();
        if let Some(binary) = var("KUBECTL_BINARY") {
            cfg.binary = PathBuf::from(binary);
        }
        cfg.kubeconfig = var("KUBECONFIG").map(PathBuf::from);
        if let Some(endpoint) = var("KUBE_ENDPOINT") {
            if let Err(e) = Url::parse(&endpoint) {
                return app_err!("KUBE_ENDPOINT is not a valid URL ({endpoint}): {e}");
            }
            cfg.endpoint = Some(endpoint);
        }

        Ok(cfg)
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary_path(binary.into());
        self
    }

    pub fn with_kubeconfig(mut self, kubeconfig: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(kubeconfig.into()).filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into()).filter(|e| !e.is_empty());
        self
    }

    /// Global flags prepended to every invocation.
    pub fn connection_flags(&self) -> Vec<OsString> {
        match &self.kubeconfig {
            Some(path) => vec!["--kubeconfig".into(), path.into()],
            None => vec!["-s".into(), self.endpoint.clone().unwrap_or_default().into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn kubeconfig_takes_precedence_over_endpoint() {
        let cfg = Config::default()
            .with_endpoint("https://10.0.0.1:6443")
            .with_kubeconfig("/etc/kube/admin.conf");
        assert_eq!(
            cfg.connection_flags(),
            vec!["--kubeconfig", "/etc/kube/admin.conf"]
        );
    }

    #[test]
    fn endpoint_is_used_without_kubeconfig() {
        let cfg = Config::default().with_endpoint("http://localhost:8080");
        assert_eq!(cfg.connection_flags(), vec!["-s", "http://localhost:8080"]);
    }

    #[test]
    fn empty_kubeconfig_falls_back_to_endpoint() {
        let cfg = Config::default()
            .with_kubeconfig("")
            .with_endpoint("http://localhost:8080");
        assert_eq!(cfg.connection_flags(), vec!["-s", "http://localhost:8080"]);
    }

    #[test]
    fn unset_profile_passes_empty_server() {
        assert_eq!(Config::default().connection_flags(), vec!["-s", ""]);
    }

    #[test]
    fn deserialize_partial_options() {
        let cfg: Config =
            serde_json::from_str(r#"{"kubeconfig": "/home/me/.kube/config"}"#).unwrap();
        assert_eq!(cfg.binary, PathBuf::from("kubectl"));
        assert_eq!(cfg.kubeconfig, Some(PathBuf::from("/home/me/.kube/config")));
        assert_eq!(cfg.endpoint, None);
    }

    #[test]
    fn empty_or_null_binary_means_default() {
        for options in [r#"{"binary": ""}"#, r#"{"binary": null}"#] {
            let cfg: Config = serde_json::from_str(options).unwrap();
            assert_eq!(cfg.binary, PathBuf::from(DEFAULT_BINARY), "{options}");
        }
        assert_eq!(Config::default().with_binary("").binary, PathBuf::from(DEFAULT_BINARY));
    }

    #[test]
    fn empty_or_null_connection_options_are_unset() {
        let cfg: Config = serde_json::from_str(
            r#"{"binary": "", "kubeconfig": null, "endpoint": "http://localhost:8080"}"#,
        )
        .unwrap();
        assert_eq!(cfg.kubeconfig, None);
        assert_eq!(cfg.connection_flags(), vec!["-s", "http://localhost:8080"]);

        let cfg: Config =
            serde_json::from_str(r#"{"kubeconfig": "", "endpoint": null}"#).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn from_lookup_reads_variables() {
        let env = HashMap::from([
            ("KUBECTL_BINARY", "/opt/bin/kubectl"),
            ("KUBECONFIG", ""),
            ("KUBE_ENDPOINT", "https://cluster.local:6443"),
        ]);
        let cfg = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.binary, PathBuf::from("/opt/bin/kubectl"));
        assert_eq!(cfg.kubeconfig, None);
        assert_eq!(cfg.endpoint.as_deref(), Some("https://cluster.local:6443"));
    }

    #[test]
    fn from_lookup_rejects_bad_endpoint() {
        let err = Config::from_lookup(|k| (k == "KUBE_ENDPOINT").then(|| "not a url".to_string()))
            .unwrap_err();
        assert!(err.message.contains("KUBE_ENDPOINT"));
    }
}
