//! Resource resolution context.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable listing extra resource roots for [`LoadContext::ambient`].
pub const CONFIG_PATH_ENV: &str = "ORDINAL_CONFIG_PATH";

/// The set of resource roots bundled configuration resources are looked up in.
///
/// A resource name such as `META-INF/microprofile-config.properties` is resolved
/// against every root in order; each root that holds the resource contributes one
/// match, so the same resource can be picked up from several roots.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::context::LoadContext;
///
/// let context = LoadContext::new()
///     .with_root("/etc/myapp")
///     .with_root("/opt/myapp/share");
/// assert_eq!(context.roots().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadContext {
    roots: Vec<PathBuf>,
}

impl LoadContext {
    /// Create a context with no roots.
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// The caller's ambient context: the current directory, followed by every
    /// entry of `ORDINAL_CONFIG_PATH`.
    pub fn ambient() -> Self {
        let mut context = Self::new();
        if let Ok(cwd) = env::current_dir() {
            context.roots.push(cwd);
        }
        if let Some(paths) = env::var_os(CONFIG_PATH_ENV) {
            context
                .roots
                .extend(env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
        }
        context
    }

    /// Append a resource root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// The resource roots in lookup order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Every existing file named `resource` under the roots, in root order.
    pub fn resolve(&self, resource: impl AsRef<Path>) -> Vec<PathBuf> {
        let resource = resource.as_ref();
        self.roots
            .iter()
            .map(|root| root.join(resource))
            .filter(|candidate| candidate.is_file())
            .inspect(|found| tracing::trace!(path = %found.display(), "resolved resource"))
            .collect()
    }
}
