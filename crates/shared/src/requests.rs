//! Request bodies for the tracker and template endpoints
//!
//! Form fields arrive either as JSON numbers or as the raw text of an input
//! box, so numeric fields go through [`IntegerField`].

use serde::{Deserialize, Serialize};

use vdm_domain::{
    CombatantEdit, CombatantTemplate, DomainError, Faction, NewCombatant, PortraitRef,
    TemplateCategory,
};

fn default_ally() -> bool {
    true
}

/// An integer form field sent as a number or as numeric text.
///
/// Fractions, blank text and non-numeric text are rejected when parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegerField {
    Number(i64),
    Float(f64),
    Text(String),
}

impl IntegerField {
    /// Parse to an integer, naming `label` in the error message.
    pub fn parse(&self, label: &str) -> Result<i64, DomainError> {
        let invalid = || DomainError::validation(format!("{} must be a valid number", label));
        match self {
            Self::Number(n) => Ok(*n),
            Self::Float(f) => {
                let in_range = *f >= i64::MIN as f64 && *f <= i64::MAX as f64;
                if f.is_finite() && f.fract() == 0.0 && in_range {
                    Ok(*f as i64)
                } else {
                    Err(invalid())
                }
            }
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid()),
        }
    }
}

impl From<i64> for IntegerField {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Parse a total HP field: must be an integer and positive.
fn parse_total_hp(field: &IntegerField) -> Result<i64, DomainError> {
    match field.parse("Total HP") {
        Ok(total) if total > 0 => Ok(total),
        _ => Err(DomainError::validation("Total HP must be a positive number")),
    }
}

fn portrait(image_url: Option<String>) -> Option<PortraitRef> {
    image_url.and_then(PortraitRef::parse)
}

/// Body of `POST /api/tracker/tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    pub name: String,
    #[serde(rename = "totalHP")]
    pub total_hp: IntegerField,
    pub initiative: IntegerField,
    #[serde(default = "default_ally")]
    pub ally: bool,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl CreateTokenRequest {
    pub fn into_new_combatant(self) -> Result<NewCombatant, DomainError> {
        Ok(NewCombatant {
            total_hp: parse_total_hp(&self.total_hp)?,
            initiative: self.initiative.parse("Initiative")?,
            name: self.name,
            faction: Faction::from_ally_flag(self.ally),
            portrait: portrait(self.image_url),
        })
    }
}

/// Body of `PUT /api/tracker/tokens/{index}`. Every field is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditTokenRequest {
    pub name: String,
    #[serde(rename = "currentHP")]
    pub current_hp: IntegerField,
    #[serde(rename = "totalHP")]
    pub total_hp: IntegerField,
    pub initiative: IntegerField,
    pub ally: bool,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl EditTokenRequest {
    pub fn into_edit(self) -> Result<CombatantEdit, DomainError> {
        let current_hp = self.current_hp.parse("Current HP")?;
        if current_hp < 0 {
            return Err(DomainError::validation("Current HP cannot be negative"));
        }
        Ok(CombatantEdit {
            current_hp,
            total_hp: parse_total_hp(&self.total_hp)?,
            initiative: self.initiative.parse("Initiative")?,
            name: self.name,
            faction: Faction::from_ally_flag(self.ally),
            portrait: portrait(self.image_url),
        })
    }
}

/// Body of `PUT /api/tracker/tokens/{index}/hp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetHpRequest {
    pub hp: IntegerField,
}

/// Body of `POST /api/tracker/tokens/{index}/hp/adjust`. Negative is damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustHpRequest {
    pub delta: IntegerField,
}

/// Body of `POST /api/clickhouse/save-token`.
///
/// Everything is optional on the wire so that missing fields produce the
/// same validation messages as empty ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveTokenRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "totalHP", default)]
    pub total_hp: Option<IntegerField>,
    #[serde(default)]
    pub ally: Option<bool>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl SaveTokenRequest {
    /// Validate into a template and its category.
    ///
    /// `ally` defaults to true, `category` to custom.
    pub fn into_template(self) -> Result<(CombatantTemplate, TemplateCategory), DomainError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Token name is required"));
        }
        let total_hp = self
            .total_hp
            .as_ref()
            .map(parse_total_hp)
            .unwrap_or_else(|| Err(DomainError::validation("Total HP must be a positive number")))?;
        let category = self
            .category
            .as_deref()
            .map(TemplateCategory::from_label)
            .unwrap_or_default();
        let template = CombatantTemplate::new(
            name,
            total_hp,
            Faction::from_ally_flag(self.ally.unwrap_or(true)),
            portrait(self.image_url),
        )?;
        Ok((template, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: &str) -> Result<NewCombatant, DomainError> {
        serde_json::from_str::<CreateTokenRequest>(json).unwrap().into_new_combatant()
    }

    #[test]
    fn integer_field_accepts_numbers_and_numeric_text() {
        assert_eq!(IntegerField::Number(7).parse("x").unwrap(), 7);
        assert_eq!(IntegerField::Float(12.0).parse("x").unwrap(), 12);
        assert_eq!(IntegerField::Text(" -3 ".into()).parse("x").unwrap(), -3);
    }

    #[test]
    fn integer_field_rejects_fractions_and_garbage() {
        assert!(IntegerField::Float(2.5).parse("x").is_err());
        assert!(IntegerField::Float(f64::NAN).parse("x").is_err());
        assert!(IntegerField::Text("".into()).parse("x").is_err());
        let err = IntegerField::Text("abc".into()).parse("Initiative").unwrap_err();
        assert_eq!(err.message(), "Initiative must be a valid number");
    }

    #[test]
    fn create_request_from_form_text() {
        let new = create(r#"{"name":"Goblin","totalHP":"25","initiative":"15","ally":false}"#).unwrap();
        assert_eq!(new.total_hp, 25);
        assert_eq!(new.initiative, 15);
        assert_eq!(new.faction, Faction::Enemy);
        assert!(new.portrait.is_none());
    }

    #[test]
    fn create_request_rejects_non_positive_total() {
        let err = create(r#"{"name":"Goblin","totalHP":0,"initiative":3}"#).unwrap_err();
        assert_eq!(err.message(), "Total HP must be a positive number");
        assert!(create(r#"{"name":"Goblin","totalHP":"lots","initiative":3}"#).is_err());
    }

    #[test]
    fn create_request_rejects_bad_initiative() {
        assert!(create(r#"{"name":"Goblin","totalHP":5,"initiative":"fast"}"#).is_err());
    }

    #[test]
    fn edit_request_rejects_negative_current_hp() {
        let request: EditTokenRequest = serde_json::from_str(
            r#"{"name":"Hero","currentHP":-1,"totalHP":100,"initiative":20,"ally":true}"#,
        )
        .unwrap();
        let err = request.into_edit().unwrap_err();
        assert_eq!(err.message(), "Current HP cannot be negative");
    }

    #[test]
    fn edit_request_allows_over_heal() {
        let request: EditTokenRequest = serde_json::from_str(
            r#"{"name":"Hero","currentHP":"150","totalHP":100,"initiative":20,"ally":true,"imageUrl":"/a.png"}"#,
        )
        .unwrap();
        let edit = request.into_edit().unwrap();
        assert_eq!(edit.current_hp, 150);
        assert_eq!(edit.portrait.unwrap().as_str(), "/a.png");
    }

    #[test]
    fn save_request_defaults() {
        let request: SaveTokenRequest = serde_json::from_str(r#"{"name":"  Lich ","totalHP":80}"#).unwrap();
        let (template, category) = request.into_template().unwrap();
        assert_eq!(template.name().as_str(), "Lich");
        assert!(template.is_ally());
        assert_eq!(category, TemplateCategory::Custom);
    }

    #[test]
    fn save_request_validation_messages() {
        let missing_name = SaveTokenRequest {
            total_hp: Some(10.into()),
            ..Default::default()
        };
        assert_eq!(missing_name.into_template().unwrap_err().message(), "Token name is required");

        let missing_hp = SaveTokenRequest {
            name: Some("Orc".into()),
            ..Default::default()
        };
        assert_eq!(
            missing_hp.into_template().unwrap_err().message(),
            "Total HP must be a positive number"
        );
    }

    #[test]
    fn save_request_keeps_default_category() {
        let request = SaveTokenRequest {
            name: Some("Orc Berserker".into()),
            total_hp: Some(25.into()),
            ally: Some(false),
            category: Some("default".into()),
            ..Default::default()
        };
        let (template, category) = request.into_template().unwrap();
        assert_eq!(category, TemplateCategory::Default);
        assert!(!template.is_ally());
    }
}
