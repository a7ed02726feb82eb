//! Structural metadata attached to declaration nodes.
//!
//! Every flag only ever moves from unset to `true`: [`Properties::merge`]
//! ORs fields together and never clears one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exports {
    pub export: bool,
    pub default: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inheritance {
    pub extends: bool,
    pub implements: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Properties {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub exports: Option<Exports>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub inheritance: Option<Inheritance>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub namespace: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub module: Option<bool>,
}

impl Properties {
    pub fn exported(default: bool) -> Self {
        Self {
            exports: Some(Exports { export: true, default }),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `None` for an empty bag.
    pub fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    /// Add `other`'s fields to these, keeping every flag already set.
    pub fn merge(&mut self, other: &Properties) {
        self.exports = merge_with(self.exports, other.exports, |a, b| Exports {
            export: a.export || b.export,
            default: a.default || b.default,
        });
        self.inheritance = merge_with(self.inheritance, other.inheritance, |a, b| Inheritance {
            extends: a.extends || b.extends,
            implements: a.implements || b.implements,
        });
        self.namespace = merge_with(self.namespace, other.namespace, |a, b| a || b);
        self.module = merge_with(self.module, other.module, |a, b| a || b);
    }

    pub fn merged(mut self, other: &Properties) -> Self {
        self.merge(other);
        self
    }
}

fn merge_with<T: Copy>(a: Option<T>, b: Option<T>, f: impl FnOnce(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (a, b) => a.or(b),
    }
}
