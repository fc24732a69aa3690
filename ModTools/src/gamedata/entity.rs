//! Flat stats entities

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Record kinds the toolkit knows how to file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Armor,
    Character,
    CriticalHitTypeData,
    InterruptData,
    Object,
    PassiveData,
    SpellData,
    StatusData,
    Weapon,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Armor,
        EntityKind::Character,
        EntityKind::CriticalHitTypeData,
        EntityKind::InterruptData,
        EntityKind::Object,
        EntityKind::PassiveData,
        EntityKind::SpellData,
        EntityKind::StatusData,
        EntityKind::Weapon,
    ];

    /// The name used in `type "..."` lines and `modifier type` headers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Armor => "Armor",
            EntityKind::Character => "Character",
            EntityKind::CriticalHitTypeData => "CriticalHitTypeData",
            EntityKind::InterruptData => "InterruptData",
            EntityKind::Object => "Object",
            EntityKind::PassiveData => "PassiveData",
            EntityKind::SpellData => "SpellData",
            EntityKind::StatusData => "StatusData",
            EntityKind::Weapon => "Weapon",
        }
    }

    /// How records of this kind are filed.
    #[must_use]
    pub fn filing(self) -> Filing {
        match self {
            EntityKind::Armor => Filing::Fixed("Armor.txt"),
            EntityKind::Character => Filing::Fixed("Character.txt"),
            EntityKind::CriticalHitTypeData => Filing::Fixed("CriticalHitTypes.txt"),
            EntityKind::InterruptData => Filing::Fixed("Interrupt.txt"),
            EntityKind::Object => Filing::Fixed("Object.txt"),
            EntityKind::PassiveData => Filing::Fixed("Passive.txt"),
            EntityKind::SpellData => Filing::ByMember {
                member: "SpellType",
                prefix: "Spell",
            },
            EntityKind::StatusData => Filing::ByMember {
                member: "StatusType",
                prefix: "Status",
            },
            EntityKind::Weapon => Filing::Fixed("Weapon.txt"),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownEntityKind(s.to_string()))
    }
}

/// Output file rule for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filing {
    /// Every record goes to this file.
    Fixed(&'static str),
    /// Records go to `<prefix>_<value of member>.txt`.
    ByMember {
        member: &'static str,
        prefix: &'static str,
    },
}

/// A member value: one literal or an ordered list of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValue {
    Scalar(String),
    List(Vec<String>),
}

impl MemberValue {
    /// Every individual literal, in order. A scalar yields one.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            MemberValue::Scalar(s) => std::slice::from_ref(s),
            MemberValue::List(items) => items,
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MemberValue::Scalar(s) => Some(s),
            MemberValue::List(_) => None,
        }
    }

    /// Text as written in a `data` line; lists join with `;`.
    #[must_use]
    pub fn to_stats_string(&self) -> String {
        match self {
            MemberValue::Scalar(s) => s.clone(),
            MemberValue::List(items) => items.join(";"),
        }
    }
}

impl From<&str> for MemberValue {
    fn from(value: &str) -> Self {
        MemberValue::Scalar(value.to_string())
    }
}

impl From<String> for MemberValue {
    fn from(value: String) -> Self {
        MemberValue::Scalar(value)
    }
}

impl From<Vec<String>> for MemberValue {
    fn from(value: Vec<String>) -> Self {
        MemberValue::List(value)
    }
}

impl From<Vec<&str>> for MemberValue {
    fn from(value: Vec<&str>) -> Self {
        MemberValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MemberValue {
    fn from(value: [&str; N]) -> Self {
        MemberValue::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

macro_rules! member_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MemberValue {
                fn from(value: $ty) -> Self {
                    MemberValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

member_value_from_display!(i32, u32, i64, u64, f32, f64);

/// Members whose names start with `_` are build-time scratch data.
#[must_use]
pub fn is_private(member: &str) -> bool {
    member.starts_with('_')
}

/// A named stats record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    kind: EntityKind,
    using: Option<String>,
    members: IndexMap<String, MemberValue>,
}

impl Entity {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Entity {
            name: name.into(),
            kind,
            using: None,
            members: IndexMap::new(),
        }
    }

    /// Inherit from a base record. The engine resolves the reference.
    #[must_use]
    pub fn using(mut self, base: impl Into<String>) -> Self {
        self.using = Some(base.into());
        self
    }

    /// Builder form of [`Entity::set`].
    #[must_use]
    pub fn with(mut self, member: impl Into<String>, value: impl Into<MemberValue>) -> Self {
        self.set(member, value);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.using.as_deref()
    }

    pub fn set_base(&mut self, base: Option<String>) {
        self.using = base;
    }

    /// Set or replace a member. Validation happens when the entity is added
    /// to a [`super::GameData`] collection.
    pub fn set(&mut self, member: impl Into<String>, value: impl Into<MemberValue>) {
        self.members.insert(member.into(), value.into());
    }

    pub fn remove(&mut self, member: &str) -> Option<MemberValue> {
        self.members.shift_remove(member)
    }

    #[must_use]
    pub fn get(&self, member: &str) -> Option<&MemberValue> {
        self.members.get(member)
    }

    /// Scalar value of `member`, if set and scalar.
    #[must_use]
    pub fn scalar(&self, member: &str) -> Option<&str> {
        self.get(member).and_then(MemberValue::as_scalar)
    }

    /// Members in insertion order, private ones included.
    pub fn members(&self) -> impl Iterator<Item = (&str, &MemberValue)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The output file this entity belongs in.
    ///
    /// # Errors
    /// Spell and status records need their type member to be filed.
    pub fn output_file(&self) -> Result<String> {
        match self.kind.filing() {
            Filing::Fixed(file) => Ok(file.to_string()),
            Filing::ByMember { member, prefix } => {
                let value = self
                    .scalar(member)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| Error::MissingFilingMember {
                        entity: self.name.clone(),
                        member,
                    })?;
                Ok(format!("{prefix}_{value}.txt"))
            }
        }
    }
}
