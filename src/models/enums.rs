use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Period {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Yearly => "yearly",
});

str_enum!(MovementStatus {
    Ordered => "ordered",
    Received => "received",
    Cancelled => "cancelled",
});

str_enum!(ConsultationStatus {
    Scheduled => "scheduled",
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(BillItemType {
    Consultation => "consultation",
    Test => "test",
    Medication => "medication",
    Other => "other",
});

str_enum!(BedStatus {
    Vacant => "vacant",
    Occupied => "occupied",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn period_roundtrip() {
        for s in ["daily", "weekly", "monthly", "yearly"] {
            assert_eq!(Period::from_str(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn invalid_period_rejected() {
        assert!(Period::from_str("hourly").is_err());
    }

    #[test]
    fn movement_status_roundtrip() {
        for s in ["ordered", "received", "cancelled"] {
            assert_eq!(MovementStatus::from_str(s).unwrap().as_str(), s);
        }
    }
}
