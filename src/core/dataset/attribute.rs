use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AttributeKind {
    Numeric,
    Categorical,
    Class,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: AttributeKind,
}

impl AttributeSpec {
    pub fn new<N: Into<String>>(name: N, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn numeric<N: Into<String>>(name: N) -> Self {
        Self::new(name, AttributeKind::Numeric)
    }

    pub fn categorical<N: Into<String>>(name: N) -> Self {
        Self::new(name, AttributeKind::Categorical)
    }

    pub fn class<N: Into<String>>(name: N) -> Self {
        Self::new(name, AttributeKind::Class)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }
}
