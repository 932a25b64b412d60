#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How resolved prices are rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    /// Digits after the decimal point, as in `toFixed(2)`.
    pub price_decimals: u8,
    /// Text shown in place of an amount for TBA products.
    pub tba_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            price_decimals: 2,
            tba_label: "TBA".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub currency_symbol: String,
    pub price_decimals: u8,
    pub tba_label: String,
}

impl AppConfig {
    #[must_use]
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            currency_symbol: self.currency_symbol.clone(),
            price_decimals: self.price_decimals,
            tba_label: self.tba_label.clone(),
        }
    }
}
