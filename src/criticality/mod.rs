//! Critical-update classification
//!
//! A release is critical when any enabled rule flags its version. Rules never
//! fail: a version they cannot interpret is simply not critical.

use crate::config::CriticalUpdateRules;

/// A single criticality rule
pub trait CriticalityRule {
    /// Stable rule name, as used for logging
    fn name(&self) -> &'static str;

    /// Whether `version` is critical under this rule
    fn is_critical(&self, version: &str) -> bool;
}

/// Four-component versions whose fourth component is exactly `"0"`
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchVersionRule;

impl CriticalityRule for PatchVersionRule {
    fn name(&self) -> &'static str {
        "patch_versions_critical"
    }

    fn is_critical(&self, version: &str) -> bool {
        version.split('.').nth(3) == Some("0")
    }
}

/// Outcome of classifying a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub critical: bool,

    /// First rule that flagged the version
    pub matched_rule: Option<&'static str>,
}

/// Evaluates the enabled rules from `critical_update_rules`
pub struct CriticalityClassifier {
    rules: Vec<Box<dyn CriticalityRule>>,
}

impl CriticalityClassifier {
    pub fn new(config: &CriticalUpdateRules) -> Self {
        let mut rules: Vec<Box<dyn CriticalityRule>> = Vec::new();
        if config.patch_versions_critical {
            rules.push(Box::new(PatchVersionRule));
        }
        Self { rules }
    }

    /// Names of the enabled rules
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn classify(&self, version: &str) -> Classification {
        let matched_rule = self
            .rules
            .iter()
            .find(|rule| rule.is_critical(version))
            .map(|rule| rule.name());

        Classification {
            critical: matched_rule.is_some(),
            matched_rule,
        }
    }

    pub fn is_critical(&self, version: &str) -> bool {
        self.classify(version).critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(enabled: bool) -> CriticalityClassifier {
        CriticalityClassifier::new(&CriticalUpdateRules {
            patch_versions_critical: enabled,
        })
    }

    #[test]
    fn test_zero_fourth_component_is_critical() {
        let result = classifier(true).classify("1.2.3.0");
        assert!(result.critical);
        assert_eq!(result.matched_rule, Some("patch_versions_critical"));
    }

    #[test]
    fn test_nonzero_fourth_component_is_not_critical() {
        assert!(!classifier(true).is_critical("1.2.3.1"));
    }

    #[test]
    fn test_rule_disabled() {
        let c = classifier(false);
        assert!(!c.is_critical("1.2.3.0"));
        assert!(c.rule_names().is_empty());
    }

    #[test]
    fn test_short_versions_are_not_critical() {
        let c = classifier(true);
        assert!(!c.is_critical("1.2.0"));
        assert!(!c.is_critical("0"));
        assert!(!c.is_critical(""));
    }

    #[test]
    fn test_literal_comparison_only() {
        let c = classifier(true);
        assert!(!c.is_critical("1.2.3.00"));
        assert!(!c.is_critical("1.2.3. 0"));
        assert!(c.is_critical("1.2.3.0.7"));
        assert!(c.is_critical("a.b.c.0"));
    }
}
