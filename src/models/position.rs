use serde::{Deserialize, Serialize};

/// Kind of instrument held in a position.
///
/// Unknown kinds reported by the backend deserialize as [`InstrumentType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentType {
    Share,
    Bond,
    Etf,
    Currency,
    Futures,
    #[default]
    #[serde(other)]
    Other,
}

impl InstrumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Share => "share",
            Self::Bond => "bond",
            Self::Etf => "etf",
            Self::Currency => "currency",
            Self::Futures => "futures",
            Self::Other => "other",
        }
    }
}

/// A held instrument as listed by the brokerage, identified by ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub instrument_type: InstrumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Position {
    pub fn new(ticker: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            instrument_type: InstrumentType::Share,
            image_url: None,
        }
    }

    pub fn with_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.instrument_type = instrument_type;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_instrument_type_deserializes_as_other() {
        let json = r#"{"ticker":"XYZ","name":"Xyz","instrument_type":"warrant"}"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.instrument_type, InstrumentType::Other);
        assert_eq!(position.image_url, None);
    }

    #[test]
    fn instrument_type_round_trips_as_snake_case() {
        let json = serde_json::to_string(&InstrumentType::Share).unwrap();
        assert_eq!(json, r#""share""#);
    }
}
