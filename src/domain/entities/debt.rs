use serde::{Deserialize, Deserializer};
use std::fmt;

/// One person's running balance, as reported by the ledger service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DebtRecord {
    pub name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: i64,
}

#[cfg(test)]
impl DebtRecord {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

impl fmt::Display for DebtRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.amount)
    }
}

/// The ledger sends amounts either as JSON numbers or as numeric strings
fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(i64),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => Ok(n),
        RawAmount::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("amount is not an integer: {:?}", s))),
    }
}

/// Debt records in the order the ledger returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DebtList(Vec<DebtRecord>);

#[cfg(test)]
impl DebtList {
    pub fn new(records: Vec<DebtRecord>) -> Self {
        Self(records)
    }
}

impl DebtList {
    /// First record whose name matches exactly
    pub fn find(&self, name: &str) -> Option<&DebtRecord> {
        self.0.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DebtRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
