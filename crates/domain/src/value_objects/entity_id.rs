//! Home Assistant entity id value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An entity id of the form `<domain>.<object_id>`, e.g. `schedule.commute`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    domain: String,
    object_id: String,
}

impl EntityId {
    /// Domain of the schedule helper entities that gate querying
    pub const SCHEDULE_DOMAIN: &'static str = "schedule";

    /// Domain the departure sensor is published under
    pub const SENSOR_DOMAIN: &'static str = "sensor";

    /// Build the sensor entity id for a human-readable name
    ///
    /// `"Work → Home"` becomes `sensor.work_home`.
    pub fn sensor_for_name(name: &str) -> Result<Self, DomainError> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(DomainError::InvalidEntityId(format!(
                "name {name:?} has no usable characters"
            )));
        }
        Ok(Self {
            domain: Self::SENSOR_DOMAIN.to_string(),
            object_id: slug,
        })
    }

    /// The part before the dot
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The part after the dot
    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Whether this entity belongs to `domain`
    #[must_use]
    pub fn is_in_domain(&self, domain: &str) -> bool {
        self.domain == domain
    }
}

/// ASCII replacement for common Latin letters with diacritics
fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'ä' | 'à' | 'á' | 'â' | 'ã' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ö' | 'ò' | 'ó' | 'ô' | 'õ' | 'ø' => "o",
        'œ' => "oe",
        'ß' => "ss",
        'ü' | 'ù' | 'ú' | 'û' => "u",
        'ý' | 'ÿ' => "y",
        _ => return None,
    })
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if let Some(ascii) = transliterate(c) {
            slug.push_str(ascii);
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && !part.starts_with('_')
        && !part.ends_with('_')
        && part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (domain, object_id) = s
            .split_once('.')
            .ok_or_else(|| DomainError::InvalidEntityId(s.to_string()))?;
        if !is_valid_part(domain) || !is_valid_part(object_id) {
            return Err(DomainError::InvalidEntityId(s.to_string()));
        }
        Ok(Self {
            domain: domain.to_string(),
            object_id: object_id.to_string(),
        })
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.object_id)
    }
}
