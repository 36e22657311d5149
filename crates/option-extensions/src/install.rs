use crate::{DeclaredOption, OptionExtension, ProvisioningStep};

const DEFAULT_FEATURE: &str = "replication-distribution";

/// Installs the replication distribution into the container under test.
///
/// The feature name defaults to `replication-distribution` and can be
/// overridden with a `feature` argument on the declared option.
pub struct InstallExtension;

impl OptionExtension for InstallExtension {
    fn extend(&self, option: &DeclaredOption) -> Vec<ProvisioningStep> {
        let feature = option
            .args
            .get("feature")
            .map(String::as_str)
            .unwrap_or(DEFAULT_FEATURE);

        vec![ProvisioningStep::InstallFeature {
            name: feature.to_owned(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionKind;

    #[test]
    fn installs_the_distribution_feature_by_default() {
        let option = DeclaredOption::new(OptionKind::Install);

        let steps = InstallExtension.extend(&option);

        assert_eq!(
            steps,
            vec![ProvisioningStep::InstallFeature {
                name: "replication-distribution".to_owned()
            }]
        );
    }

    #[test]
    fn honors_a_feature_override() {
        let option =
            DeclaredOption::new(OptionKind::Install).with_arg("feature", "replication-ui");

        let steps = InstallExtension.extend(&option);

        assert_eq!(
            steps,
            vec![ProvisioningStep::InstallFeature {
                name: "replication-ui".to_owned()
            }]
        );
    }
}
