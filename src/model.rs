pub use k8s_openapi::api::core::v1::{Node, Pod, ReplicationController, Service};
use serde::de::DeserializeOwned;

/// A resource kind a handle can be bound to. The associated object type is
/// what `get_object` and `list_objects` decode into.
pub trait ResourceKind: DeserializeOwned + Send + Sync + 'static {
    /// Resource name as passed to `kubectl`.
    const NAME: &'static str;
}

impl ResourceKind for Pod {
    const NAME: &'static str = "pods";
}

impl ResourceKind for ReplicationController {
    const NAME: &'static str = "rc";
}

impl ResourceKind for Service {
    const NAME: &'static str = "service";
}

impl ResourceKind for Node {
    const NAME: &'static str = "node";
}

/// Label selector for `list`. Pairs keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector(Vec<(String, String)>);

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders `--selector=k1=v1k2=v2`. Pairs are concatenated with no
    /// separator, which existing callers rely on.
    pub fn to_arg(&self) -> String {
        self.0
            .iter()
            .fold("--selector=".to_string(), |mut acc, (key, value)| {
                acc.push_str(key);
                acc.push('=');
                acc.push_str(value);
                acc
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selector {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn selector_pairs_are_concatenated() {
        let selector = Selector::new().with("a", "1").with("b", "2");
        assert_eq!(selector.to_arg(), "--selector=a=1b=2");
    }

    #[test]
    fn selector_from_map() {
        let labels = BTreeMap::from([("app", "web"), ("tier", "frontend")]);
        let selector: Selector = labels.into_iter().collect();
        assert_eq!(selector.to_arg(), "--selector=app=webtier=frontend");
    }

    #[test]
    fn empty_selector_has_no_pairs() {
        assert!(Selector::new().is_empty());
        assert_eq!(Selector::new().to_arg(), "--selector=");
    }

    #[test]
    fn kind_names() {
        assert_eq!(Pod::NAME, "pods");
        assert_eq!(ReplicationController::NAME, "rc");
        assert_eq!(Service::NAME, "service");
        assert_eq!(Node::NAME, "node");
    }
}
