//! Project property catalog: the option keys a project can carry.
//!
//! The backend stores project properties as an untyped map, so this catalog
//! is the source of truth for which properties exist, how they are selected,
//! and how their options are displayed.

use serde::{Deserialize, Serialize};

/// How a property is answered in the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Single,
    Multi,
}

/// A selectable option, as rendered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyOption {
    pub key: &'static str,
    pub display_text: &'static str,
}

/// Generates a property option enum with its wire keys and display texts.
macro_rules! property_options {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $key:tt, $text:tt;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire key, e.g. `"WEB_APP"`.
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn display_text(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Look up an option by its wire key.
            pub fn from_key(key: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|o| o.key() == key)
            }

            /// The catalog view of all options.
            pub fn options() -> Vec<PropertyOption> {
                Self::ALL
                    .iter()
                    .map(|o| PropertyOption {
                        key: o.key(),
                        display_text: o.display_text(),
                    })
                    .collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.key())
            }
        }
    };
}

property_options! {
    /// What kind of system is being built.
    ApplicationType {
        WebApp => "WEB_APP", "Web application";
        MobileApp => "MOBILE_APP", "Mobile application";
        DesktopApp => "DESKTOP_APP", "Desktop application";
        CloudApp => "CLOUD_APP", "Cloud-based application";
        EmbeddedIot => "EMBEDDED_IOT", "Embedded System / IoT";
        ApiMicroservices => "API_MICROSERVICES", "API or microservices";
    }
}

property_options! {
    /// Expected number of users.
    UserBaseSize {
        Small => "SMALL", "Small (< 1.000)";
        Medium => "MEDIUM", "Medium (1.000 - 10.000)";
        Large => "LARGE", "Large (10.000 - 100.000)";
        Enterprise => "ENTERPRISE", "Enterprise (> 100.000)";
    }
}

property_options! {
    /// How critical security is for the project.
    SecurityStrengthNeed {
        Low => "LOW", "Low (e.g., public blogs, forums)";
        Medium => "MEDIUM", "Medium (business apps, personal data)";
        High => "HIGH", "High (e.g., financial/healthcare apps)";
        VeryHigh => "VERY_HIGH", "Very High (e.g., government systems)";
    }
}

property_options! {
    /// Kinds of data the system handles.
    DataType {
        Pii => "PII", "Personally identifiable information (PII)";
        Financial => "FINANCIAL", "Financial data";
        Health => "HEALTH", "Health data";
        IpProprietary => "IP_PROPRIETARY", "Intellectual property or proprietary data";
        Public => "PUBLIC", "Publicly available data";
    }
}

property_options! {
    /// Who accesses the system.
    UserType {
        Public => "PUBLIC", "General Public (e.g., customers, patients)";
        Internal => "INTERNAL", "Internal Staff (e.g., employees)";
        Privileged => "PRIVILEGED", "Privileged Users (e.g. system administrators)";
        Automated => "AUTOMATED", "Automated Systems (e.g., APIs, IoT devices)";
    }
}

property_options! {
    ComplianceRequirement {
        Gdpr => "GDPR", "GDPR";
        Hipaa => "HIPAA", "HIPAA";
        PciDss => "PCI_DSS", "PCI-DSS";
        Iso27001 => "ISO_27001", "ISO 27001";
    }
}

/// Names of the project properties, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    ApplicationType,
    UserBaseSize,
    SecurityStrengthNeed,
    TypeOfData,
    TypeOfUsers,
    ComplianceRequirements,
}

impl PropertyKey {
    pub const ALL: &'static [PropertyKey] = &[
        PropertyKey::ApplicationType,
        PropertyKey::UserBaseSize,
        PropertyKey::SecurityStrengthNeed,
        PropertyKey::TypeOfData,
        PropertyKey::TypeOfUsers,
        PropertyKey::ComplianceRequirements,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ApplicationType => "Application Type",
            Self::UserBaseSize => "Userbase Size",
            Self::SecurityStrengthNeed => "Security Strength Needed",
            Self::TypeOfData => "Type of Data",
            Self::TypeOfUsers => "Type of Users",
            Self::ComplianceRequirements => "Compliance Requirements",
        }
    }

    pub fn selection_kind(&self) -> SelectionKind {
        match self {
            Self::UserBaseSize | Self::SecurityStrengthNeed => SelectionKind::Single,
            Self::ApplicationType
            | Self::TypeOfData
            | Self::TypeOfUsers
            | Self::ComplianceRequirements => SelectionKind::Multi,
        }
    }

    pub fn options(&self) -> Vec<PropertyOption> {
        match self {
            Self::ApplicationType => ApplicationType::options(),
            Self::UserBaseSize => UserBaseSize::options(),
            Self::SecurityStrengthNeed => SecurityStrengthNeed::options(),
            Self::TypeOfData => DataType::options(),
            Self::TypeOfUsers => UserType::options(),
            Self::ComplianceRequirements => ComplianceRequirement::options(),
        }
    }
}
