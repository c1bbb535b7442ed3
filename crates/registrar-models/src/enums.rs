//! Closed value sets persisted as text.
//!
//! Each enum round-trips through the exact strings stored in the database and
//! accepted on the wire. Changing a string is a breaking schema change.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::PgTypeInfo,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that names no member of the enum it was parsed into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                let text = self.as_str();
                <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&text, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let text = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(text.parse::<$name>()?)
            }
        }

    };
}

text_enum!(
    Gender, "gender" {
        Male => "male",
        Female => "female",
        Other => "other",
    }
);

text_enum!(
    BloodGroup, "blood group" {
        APositive => "A+",
        ANegative => "A-",
        AbPositive => "AB+",
        AbNegative => "AB-",
        BPositive => "B+",
        BNegative => "B-",
        OPositive => "O+",
        ONegative => "O-",
    }
);

text_enum!(
    /// Whether a student's enrollment is usable.
    #[derive(Default)]
    StudentStatus, "student status" {
        #[default]
        Active => "active",
        Blocked => "blocked",
    }
);

text_enum!(
    UserRole, "role" {
        Student => "student",
        Faculty => "faculty",
        Admin => "admin",
    }
);

text_enum!(
    /// Account lifecycle state.
    #[derive(Default)]
    UserStatus, "user status" {
        #[default]
        InProgress => "in-progress",
        Blocked => "blocked",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_blood_group() {
        for group in BloodGroup::ALL {
            assert_eq!(group.as_str().parse::<BloodGroup>().unwrap(), *group);
        }
        assert_eq!(BloodGroup::ALL.len(), 8);
    }

    #[test]
    fn rejects_unknown_text() {
        let err = "unknown".parse::<Gender>().unwrap_err();

        assert_eq!(err.kind, "gender");
        assert_eq!(err.to_string(), "\"unknown\" is not a valid gender");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Male".parse::<Gender>().is_err());
        assert!("a+".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn serde_uses_stored_strings() {
        assert_eq!(
            serde_json::to_string(&UserStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<BloodGroup>("\"AB-\"").unwrap(),
            BloodGroup::AbNegative
        );
    }

    #[test]
    fn defaults_match_new_record_state() {
        assert_eq!(StudentStatus::default(), StudentStatus::Active);
        assert_eq!(UserStatus::default(), UserStatus::InProgress);
    }
}
