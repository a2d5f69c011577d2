use crate::error::ModelError;
use std::str::FromStr;
use uuid::Uuid;

/// Strongly typed ID for catalog titles
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TitleID(pub Uuid);

impl Default for TitleID {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleID {
    pub fn new() -> Self {
        TitleID(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for TitleID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TitleID {
    fn from(value: Uuid) -> Self {
        TitleID(value)
    }
}

impl FromStr for TitleID {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ModelError::InvalidId(
                "Title ID cannot be empty".to_string(),
            ));
        }
        Uuid::parse_str(s)
            .map(TitleID)
            .map_err(|e| ModelError::InvalidId(format!("{s}: {e}")))
    }
}

impl std::fmt::Display for TitleID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for users. Overlay records are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserID(pub Uuid);

impl UserID {
    pub fn new() -> Self {
        UserID(Uuid::now_v7())
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserID {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        UserID(value)
    }
}

impl FromStr for UserID {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(UserID)
            .map_err(|e| ModelError::InvalidId(format!("{s}: {e}")))
    }
}

impl std::fmt::Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_id_parses_hyphenated_uuid() {
        let raw = "0191d8a4-7e1b-7c2a-9f00-1a2b3c4d5e6f";
        let id: TitleID = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn title_id_rejects_garbage() {
        assert!("".parse::<TitleID>().is_err());
        assert!("not-a-uuid".parse::<TitleID>().is_err());
    }
}
