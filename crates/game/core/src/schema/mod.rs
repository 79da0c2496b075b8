//! Attribute schema for the live character sheet.
//!
//! Catalog effects name their target attribute by string. Instead of
//! reflecting over struct fields, every attribute is declared once in a
//! [`Schema`] together with its value type, its default and the
//! [`CombinePolicy`] that decides how an effect is folded into it.
//!
//! # Clamping
//!
//! Attributes with a [`Clamp`] keep two values on the sheet: the public value
//! and an `_actual` shadow that accumulates the true total. The public value
//! is always the clamped shadow, so any number of deltas can be summed
//! without ever escaping the declared range.
mod standard;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

pub use standard::{
    ArmourTrack, FLOOR_ONE_SKILLS, PRIMARY_SKILLS, SliverwareSet, TRAINED_SKILLS, WoundTrack,
};

/// Identity and system fields no effect may write.
pub const PROTECTED_ATTRIBUTES: [&str; 9] = [
    "id",
    "name",
    "player_id",
    "archetype",
    "type",
    "deleted",
    "created",
    "modified",
    "applied_mods",
];

/// A typed attribute value on the live sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i32),
    Text(String),
    Flag(bool),
    List(Vec<String>),
}

impl AttrValue {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::List(_) => "list",
        }
    }
}

/// How an effect value combines with the attribute's current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinePolicy {
    /// Integer addition.
    Accumulate,
    /// Text appended as a new clause.
    AppendText,
    /// Overwrite with the effect value.
    Replace,
    /// Logical OR.
    BooleanOr,
    /// Items appended to a list.
    ListAppend,
}

/// Bounds enforced on an integer attribute's public value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clamp {
    /// Never below 1 (the min-1 skills).
    Floor1,
    /// Within `[min, max]` (armour tracks).
    Range { min: i32, max: i32 },
}

impl Clamp {
    pub const fn apply(&self, actual: i32) -> i32 {
        match *self {
            Clamp::Floor1 => {
                if actual < 1 {
                    1
                } else {
                    actual
                }
            }
            Clamp::Range { min, max } => {
                if actual < min {
                    min
                } else if actual > max {
                    max
                } else {
                    actual
                }
            }
        }
    }
}

/// Declaration of a single sheet attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: String,
    pub default: AttrValue,
    pub policy: CombinePolicy,
    pub clamp: Option<Clamp>,
}

impl AttributeSpec {
    pub fn int(name: impl Into<String>) -> Self {
        Self::int_with_default(name, 0)
    }

    pub fn int_with_default(name: impl Into<String>, default: i32) -> Self {
        Self {
            name: name.into(),
            default: AttrValue::Int(default),
            policy: CombinePolicy::Accumulate,
            clamp: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: AttrValue::Text(String::new()),
            policy: CombinePolicy::AppendText,
            clamp: None,
        }
    }

    pub fn replace_text(name: impl Into<String>) -> Self {
        Self {
            policy: CombinePolicy::Replace,
            ..Self::text(name)
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: AttrValue::Flag(false),
            policy: CombinePolicy::BooleanOr,
            clamp: None,
        }
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: AttrValue::List(Vec::new()),
            policy: CombinePolicy::ListAppend,
            clamp: None,
        }
    }

    #[must_use]
    pub fn floor_one(mut self) -> Self {
        self.clamp = Some(Clamp::Floor1);
        self
    }

    #[must_use]
    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.clamp = Some(Clamp::Range { min, max });
        self
    }

    #[must_use]
    pub fn replacing(mut self) -> Self {
        self.policy = CombinePolicy::Replace;
        self
    }
}

/// Name-indexed attribute table.
#[derive(Clone, Debug)]
pub struct Schema {
    specs: Vec<AttributeSpec>,
    index: HashMap<String, usize>,
}

static STANDARD: LazyLock<Schema> = LazyLock::new(|| Schema::new(standard::attributes()));

impl Schema {
    /// Builds a schema. A later spec with the same name replaces an earlier one.
    pub fn new(specs: impl IntoIterator<Item = AttributeSpec>) -> Self {
        let mut schema = Self {
            specs: Vec::new(),
            index: HashMap::new(),
        };
        for spec in specs {
            match schema.index.get(&spec.name) {
                Some(&slot) => schema.specs[slot] = spec,
                None => {
                    schema.index.insert(spec.name.clone(), schema.specs.len());
                    schema.specs.push(spec);
                }
            }
        }
        schema
    }

    /// The built-in attribute table, constructed once.
    pub fn standard() -> &'static Schema {
        &STANDARD
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.index.get(name).map(|&slot| &self.specs[slot])
    }

    pub fn is_protected(&self, name: &str) -> bool {
        PROTECTED_ATTRIBUTES.contains(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.iter()
    }

    pub fn clamped(&self) -> impl Iterator<Item = (&AttributeSpec, Clamp)> {
        self.specs
            .iter()
            .filter_map(|spec| spec.clamp.map(|clamp| (spec, clamp)))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
