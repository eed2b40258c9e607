use sp_core::{FormatError, MapReadError};
use tracing::warn;

/// What to do with a recoverable format problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarningPolicy {
    Ignore,
    #[default]
    Warn,
    Die,
}

impl WarningPolicy {
    /// The outcome depends only on the policy and the kind of `issue`.
    pub fn escalates(self, issue: &FormatError) -> bool {
        !issue.is_recoverable() || self == Self::Die
    }
}

/// The policy of one read plus the advisories it let through.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    policy: WarningPolicy,
    advisories: Vec<FormatError>,
}

impl Warnings {
    pub fn new(policy: WarningPolicy) -> Self {
        Self {
            policy,
            advisories: Vec::new(),
        }
    }

    pub fn policy(&self) -> WarningPolicy {
        self.policy
    }

    /// Routes `issue` through the policy. Kinds that are never recoverable
    /// come back as [`MapReadError::Format`] whatever the policy says.
    pub fn report(&mut self, issue: FormatError) -> Result<(), MapReadError> {
        if !issue.is_recoverable() {
            return Err(MapReadError::Format(issue));
        }
        match self.policy {
            WarningPolicy::Ignore => Ok(()),
            WarningPolicy::Warn => {
                warn!(code = issue.code(), line = issue.line(), "{issue}");
                self.advisories.push(issue);
                Ok(())
            }
            WarningPolicy::Die => Err(MapReadError::Escalated(issue)),
        }
    }

    pub fn advisories(&self) -> &[FormatError] {
        &self.advisories
    }

    pub fn into_advisories(self) -> Vec<FormatError> {
        self.advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deprecated() -> FormatError {
        FormatError::DeprecatedProperty {
            tag: "mine".to_string(),
            old: "product".to_string(),
            new: "kind".to_string(),
            line: 3,
        }
    }

    fn malformed() -> FormatError {
        FormatError::MalformedValue {
            tag: "tile".to_string(),
            property: "row".to_string(),
            value: "x".to_string(),
            line: 2,
        }
    }

    #[test]
    fn ignore_drops_recoverable_issues() {
        let mut warnings = Warnings::new(WarningPolicy::Ignore);
        warnings.report(deprecated()).expect("ignored");
        assert!(warnings.advisories().is_empty());
    }

    #[test]
    fn warn_records_advisories() {
        let mut warnings = Warnings::new(WarningPolicy::Warn);
        warnings.report(deprecated()).expect("warned");
        assert_eq!(warnings.into_advisories(), vec![deprecated()]);
    }

    #[test]
    fn die_escalates_recoverable_issues() {
        let mut warnings = Warnings::new(WarningPolicy::Die);
        let error = warnings.report(deprecated()).expect_err("escalated");
        assert!(matches!(error, MapReadError::Escalated(issue) if issue == deprecated()));
    }

    #[test]
    fn fatal_kinds_bypass_every_policy() {
        for policy in [WarningPolicy::Ignore, WarningPolicy::Warn, WarningPolicy::Die] {
            let mut warnings = Warnings::new(policy);
            let error = warnings.report(malformed()).expect_err("always fatal");
            assert!(matches!(error, MapReadError::Format(_)));
            assert!(policy.escalates(&malformed()));
        }
    }

    #[test]
    fn policy_outcome_is_stable() {
        for policy in [WarningPolicy::Ignore, WarningPolicy::Warn, WarningPolicy::Die] {
            let first = Warnings::new(policy).report(deprecated()).is_ok();
            let second = Warnings::new(policy).report(deprecated()).is_ok();
            assert_eq!(first, second);
            assert_eq!(first, !policy.escalates(&deprecated()));
        }
    }
}
