//! Closed status/severity enumerations with a raw fallback
//!
//! The backend owns the set of status strings. Known values decode into a
//! named variant (case-insensitive); anything else is kept verbatim in
//! `Other` so it can still be displayed.

/// Declare a status enum with wire names, display labels and optional aliases.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $wire:literal, $label:literal $(, aliases = [$($alias:literal),+])? ; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            /// A value outside the known set, kept as received
            Other(String),
        }

        impl $name {
            /// Parse a raw backend value. Never fails.
            pub fn parse(raw: &str) -> Self {
                match raw.trim().to_lowercase().as_str() {
                    $( $wire $($(| $alias)+)? => $name::$variant, )+
                    _ => $name::Other(raw.to_string()),
                }
            }

            /// Canonical wire form, or the raw value for `Other`
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// Human-readable label
            pub fn label(&self) -> &str {
                match self {
                    $( $name::$variant => $label, )+
                    $name::Other(raw) if raw.trim().is_empty() => "Unknown",
                    $name::Other(raw) => raw.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Other(String::new())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::parse(raw)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
                Ok(raw.map(|r| $name::parse(&r)).unwrap_or_default())
            }
        }
    };
}

status_enum! {
    /// Alert severity
    AlertSeverity {
        Critical => "critical", "Critical";
        High => "high", "High";
        Medium => "medium", "Medium", aliases = ["warning"];
        Low => "low", "Low";
        Info => "info", "Info", aliases = ["informational"];
    }
}

status_enum! {
    /// Alert lifecycle status
    AlertStatus {
        Active => "active", "Active", aliases = ["firing", "open"];
        Acknowledged => "acknowledged", "Acknowledged";
        Resolved => "resolved", "Resolved";
        Suppressed => "suppressed", "Suppressed";
    }
}

status_enum! {
    BuildStatus {
        Pending => "pending", "Pending";
        Queued => "queued", "Queued";
        Running => "running", "Running", aliases = ["building", "in_progress"];
        Succeeded => "succeeded", "Succeeded", aliases = ["success", "completed"];
        Failed => "failed", "Failed", aliases = ["failure", "error"];
        Cancelled => "cancelled", "Cancelled", aliases = ["canceled"];
    }
}

status_enum! {
    DeploymentStatus {
        Pending => "pending", "Pending";
        InProgress => "in_progress", "In Progress", aliases = ["deploying", "running"];
        Deployed => "deployed", "Deployed", aliases = ["success", "succeeded", "completed"];
        Failed => "failed", "Failed";
        RolledBack => "rolled_back", "Rolled Back", aliases = ["rollback"];
        Cancelled => "cancelled", "Cancelled", aliases = ["canceled"];
    }
}

status_enum! {
    InstanceStatus {
        Pending => "pending", "Pending";
        Provisioning => "provisioning", "Provisioning", aliases = ["starting"];
        Running => "running", "Running";
        Stopping => "stopping", "Stopping";
        Stopped => "stopped", "Stopped";
        Terminated => "terminated", "Terminated";
        Failed => "failed", "Failed", aliases = ["error"];
    }
}

status_enum! {
    ProviderStatus {
        Active => "active", "Active", aliases = ["connected"];
        Inactive => "inactive", "Inactive", aliases = ["disconnected"];
        Maintenance => "maintenance", "Maintenance";
        Degraded => "degraded", "Degraded";
    }
}

status_enum! {
    RegionStatus {
        Active => "active", "Active", aliases = ["available"];
        Inactive => "inactive", "Inactive", aliases = ["unavailable"];
        Maintenance => "maintenance", "Maintenance";
        Degraded => "degraded", "Degraded";
    }
}

status_enum! {
    ApplicationStatus {
        Active => "active", "Active", aliases = ["running"];
        Inactive => "inactive", "Inactive", aliases = ["stopped"];
        Deploying => "deploying", "Deploying";
        Failed => "failed", "Failed";
    }
}

status_enum! {
    AuditSeverity {
        Info => "info", "Info";
        Warning => "warning", "Warning", aliases = ["warn"];
        Error => "error", "Error";
        Critical => "critical", "Critical";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AlertSeverity::parse("CRITICAL"), AlertSeverity::Critical);
        assert_eq!(AlertSeverity::parse(" High "), AlertSeverity::High);
        assert_eq!(BuildStatus::parse("Success"), BuildStatus::Succeeded);
        assert_eq!(BuildStatus::parse("canceled"), BuildStatus::Cancelled);
    }

    #[test]
    fn test_unknown_value_falls_back_to_raw() {
        let status = DeploymentStatus::parse("Paused");
        assert_eq!(status, DeploymentStatus::Other("Paused".to_string()));
        assert_eq!(status.label(), "Paused");
        assert_eq!(status.as_str(), "Paused");
        assert!(!status.is_known());
    }

    #[test]
    fn test_labels() {
        assert_eq!(DeploymentStatus::RolledBack.label(), "Rolled Back");
        assert_eq!(InstanceStatus::default().label(), "Unknown");
        assert_eq!(AlertStatus::Acknowledged.to_string(), "Acknowledged");
    }

    #[test]
    fn test_serde_as_string() {
        let status: InstanceStatus = serde_json::from_str("\"RUNNING\"").unwrap();
        assert_eq!(status, InstanceStatus::Running);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"running\"");

        let status: InstanceStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, InstanceStatus::default());

        let status: AuditSeverity = serde_json::from_str("\"notice\"").unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"notice\"");
    }
}
