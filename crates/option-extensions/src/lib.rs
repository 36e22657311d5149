//! Extension resolution for declarative provisioning options.
//!
//! Integration tests describe the environment they need with declarative
//! options. Each option kind may have a registered [`OptionExtension`] that
//! expands it into concrete provisioning steps. Kinds without a registered
//! extension are skipped by the test driver, so resolution absence is an
//! expected outcome rather than an error.

mod install;
mod registry;

use std::collections::HashMap;

pub use install::InstallExtension;
pub use registry::{ExtensionRegistry, ExtensionRegistryBuilder};

/// The tag identifying which declarative option triggered extension
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Install the replication distribution before the tests run.
    Install,
    /// Hold the container open for a remote debugger. No extension is
    /// registered for this kind by default.
    EnableDebugging,
}

/// A declarative option picked up from test configuration: its kind plus any
/// free-form arguments the test supplied.
#[derive(Debug, Clone)]
pub struct DeclaredOption {
    pub kind: OptionKind,
    pub args: HashMap<String, String>,
}

impl DeclaredOption {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            args: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// One concrete provisioning action produced by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningStep {
    /// Install a feature into the container under test.
    InstallFeature { name: String },
    /// Set a system property before the container boots.
    SetSystemProperty { name: String, value: String },
}

/// A pluggable behavior invoked when a declarative option of a matching kind
/// is processed.
pub trait OptionExtension: Send + Sync {
    /// Expands the declared option into the provisioning steps it stands for.
    fn extend(&self, option: &DeclaredOption) -> Vec<ProvisioningStep>;
}
