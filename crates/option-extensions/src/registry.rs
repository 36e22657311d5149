use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::{InstallExtension, OptionExtension, OptionKind};

/// Frozen mapping from option kind to the extension handling it.
///
/// Built once at startup through [`ExtensionRegistry::builder`]. `build`
/// consumes the builder, so the frozen table has no mutation API and can be
/// read concurrently by any number of test threads.
pub struct ExtensionRegistry {
    extensions: HashMap<OptionKind, Arc<dyn OptionExtension>>,
}

impl ExtensionRegistry {
    pub fn builder() -> ExtensionRegistryBuilder {
        ExtensionRegistryBuilder {
            extensions: HashMap::new(),
        }
    }

    /// The fixed table used by the replication test suites.
    pub fn with_defaults() -> Self {
        Self::builder()
            .register(OptionKind::Install, Arc::new(InstallExtension))
            .build()
    }

    /// Looks up the extension registered for `kind`. Kinds without an
    /// extension resolve to `None` and the option is treated as inert.
    pub fn resolve(&self, kind: OptionKind) -> Option<Arc<dyn OptionExtension>> {
        let extension = self.extensions.get(&kind).cloned();
        trace!(?kind, registered = extension.is_some(), "resolved option extension");
        extension
    }
}

#[must_use]
pub struct ExtensionRegistryBuilder {
    extensions: HashMap<OptionKind, Arc<dyn OptionExtension>>,
}

impl ExtensionRegistryBuilder {
    /// Registers `extension` for `kind`, replacing any previous entry.
    pub fn register(mut self, kind: OptionKind, extension: Arc<dyn OptionExtension>) -> Self {
        self.extensions.insert(kind, extension);
        self
    }

    pub fn build(self) -> ExtensionRegistry {
        ExtensionRegistry {
            extensions: self.extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeclaredOption, ProvisioningStep};

    struct NoopExtension;

    impl OptionExtension for NoopExtension {
        fn extend(&self, _option: &DeclaredOption) -> Vec<ProvisioningStep> {
            Vec::new()
        }
    }

    #[test]
    fn resolves_the_registered_instance() {
        let extension: Arc<dyn OptionExtension> = Arc::new(NoopExtension);
        let registry = ExtensionRegistry::builder()
            .register(OptionKind::Install, Arc::clone(&extension))
            .build();

        let resolved = registry.resolve(OptionKind::Install).unwrap();
        assert!(Arc::ptr_eq(&resolved, &extension));
    }

    #[test]
    fn unregistered_kind_resolves_to_none() {
        let registry = ExtensionRegistry::with_defaults();
        assert!(registry.resolve(OptionKind::EnableDebugging).is_none());
    }

    #[test]
    fn later_registration_replaces_the_earlier_one() {
        let first: Arc<dyn OptionExtension> = Arc::new(NoopExtension);
        let second: Arc<dyn OptionExtension> = Arc::new(NoopExtension);
        let registry = ExtensionRegistry::builder()
            .register(OptionKind::Install, Arc::clone(&first))
            .register(OptionKind::Install, Arc::clone(&second))
            .build();

        let resolved = registry.resolve(OptionKind::Install).unwrap();
        assert!(Arc::ptr_eq(&resolved, &second));
        assert!(!Arc::ptr_eq(&resolved, &first));
    }

    #[test]
    fn default_table_registers_install() {
        let registry = ExtensionRegistry::with_defaults();
        assert!(registry.resolve(OptionKind::Install).is_some());
    }
}
