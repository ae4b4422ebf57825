// src/config/mod.rs
mod models;

pub use models::*;

use std::ffi::OsString;
use std::path::PathBuf;

/// Resolve the kubeconfig path: explicit override, then `$HOME/.kube/config`,
/// then a relative `.kube/config` when no home directory is known.
pub fn resolve_kubeconfig(explicit: Option<&str>) -> PathBuf {
    resolve_kubeconfig_with(explicit, std::env::var_os("HOME"))
}

/// Same as `resolve_kubeconfig` with the home directory passed in.
pub fn resolve_kubeconfig_with(explicit: Option<&str>, home: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    match home.filter(|home| !home.is_empty()) {
        Some(home) => PathBuf::from(home).join(".kube").join("config"),
        None => {
            tracing::warn!("Error getting user home directory, using relative .kube/config");
            PathBuf::from(".kube").join("config")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_kubeconfig_wins() {
        let path = resolve_kubeconfig(Some("/etc/rancher/k3s/k3s.yaml"));
        assert_eq!(path, PathBuf::from("/etc/rancher/k3s/k3s.yaml"));

        let path = resolve_kubeconfig_with(Some("/tmp/kc"), Some(OsString::from("/home/ops")));
        assert_eq!(path, PathBuf::from("/tmp/kc"));
    }

    #[test]
    fn test_home_kubeconfig_used_when_no_override() {
        let path = resolve_kubeconfig_with(None, Some(OsString::from("/home/ops")));
        assert_eq!(path, PathBuf::from("/home/ops/.kube/config"));

        let empty_override = resolve_kubeconfig_with(Some(""), Some(OsString::from("/home/ops")));
        assert_eq!(empty_override, path);
    }

    #[test]
    fn test_missing_home_falls_back_to_relative_path() {
        let relative = PathBuf::from(".kube").join("config");

        assert_eq!(resolve_kubeconfig_with(None, None), relative);
        assert_eq!(resolve_kubeconfig_with(None, Some(OsString::new())), relative);
        assert!(resolve_kubeconfig_with(Some(""), None).is_relative());
    }
}
