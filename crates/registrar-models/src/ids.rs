//! Strongly-typed ID newtypes for UUID-keyed entities.
//!
//! Students and user accounts carry institution-issued string ids and do not
//! use these wrappers.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::PgTypeInfo,
};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for AcademicDepartment entities.
    DepartmentId
);

define_id!(
    /// Reference to an AcademicFaculty owned by another service.
    FacultyId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_uuid() {
        let id = DepartmentId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
        assert_eq!(serde_json::from_str::<DepartmentId>(&json).unwrap(), id);
    }

    #[test]
    fn debug_names_the_entity() {
        let id = FacultyId::from_uuid(Uuid::nil());

        assert_eq!(
            format!("{:?}", id),
            "FacultyId(00000000-0000-0000-0000-000000000000)"
        );
    }
}
