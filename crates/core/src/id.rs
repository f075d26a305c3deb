//! Strongly-typed identifiers used across the report.

use serde::{Deserialize, Serialize};

/// Marker segment carried by references to compute instances.
pub const INSTANCE_MARKER: &str = "instance/";

/// Identifier of a compute instance (e.g. `i-0abc123`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

/// Opaque locator of a backed-up resource (an ARN in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceReference(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_newtype!(InstanceId);
impl_string_newtype!(ResourceReference);

impl ResourceReference {
    /// Whether this reference points at a compute instance.
    pub fn is_instance(&self) -> bool {
        self.0.contains(INSTANCE_MARKER)
    }

    /// Instance id taken from the trailing `/` segment.
    ///
    /// Returns `None` for non-instance references and for references whose
    /// trailing segment is empty.
    pub fn instance_id(&self) -> Option<InstanceId> {
        if !self.is_instance() {
            return None;
        }
        self.0
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(InstanceId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_reference_yields_trailing_segment() {
        let r = ResourceReference::new("arn:aws:ec2:eu-west-1:123456789012:instance/i-0abc123");
        assert!(r.is_instance());
        assert_eq!(r.instance_id(), Some(InstanceId::new("i-0abc123")));
    }

    #[test]
    fn volume_reference_is_not_an_instance() {
        let r = ResourceReference::new("arn:aws:ec2:eu-west-1:123456789012:volume/vol-0abc");
        assert!(!r.is_instance());
        assert_eq!(r.instance_id(), None);
    }

    #[test]
    fn empty_trailing_segment_has_no_id() {
        let r = ResourceReference::new("arn:aws:ec2:eu-west-1:123456789012:instance/");
        assert!(r.is_instance());
        assert_eq!(r.instance_id(), None);
    }
}
