//! Configuration types for the cleaning pipeline.
//!
//! This module provides the cleaning options using the builder pattern. The
//! strategy enums also parse from the labels shown by the interactive shell
//! (`"Fill with Mean"`, `"Drop Rows"`, ...), so a UI can pass its selections
//! through unchanged.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How missing values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingValueStrategy {
    /// Leave missing values alone
    #[default]
    #[serde(alias = "none")]
    None,
    /// Fill numeric columns with the mean of their non-missing values
    #[serde(alias = "Fill with Mean", alias = "mean")]
    FillMean,
    /// Fill numeric columns with the median of their non-missing values
    #[serde(alias = "Fill with Median", alias = "median")]
    FillMedian,
    /// Drop every row that has a missing value in any column
    #[serde(alias = "Drop Rows", alias = "drop")]
    DropRows,
}

impl MissingValueStrategy {
    /// Label used by the interactive shell.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::FillMean => "Fill with Mean",
            Self::FillMedian => "Fill with Median",
            Self::DropRows => "Drop Rows",
        }
    }
}

impl fmt::Display for MissingValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MissingValueStrategy {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "mean" | "fill_mean" | "fill with mean" => Ok(Self::FillMean),
            "median" | "fill_median" | "fill with median" => Ok(Self::FillMedian),
            "drop" | "drop_rows" | "drop rows" => Ok(Self::DropRows),
            _ => Err(ConfigValidationError::UnknownOption {
                option: "handle_missing",
                value: s.to_string(),
            }),
        }
    }
}

/// Target type for a column conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Int,
    Float,
    Datetime,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Datetime => "datetime",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Int),
            "float" | "double" => Ok(Self::Float),
            "datetime" | "date" => Ok(Self::Datetime),
            _ => Err(ConfigValidationError::UnknownOption {
                option: "target_type",
                value: s.to_string(),
            }),
        }
    }
}

/// How outlier bounds are computed across several numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutlierPass {
    /// Each column's bounds come from the rows that survived the previous
    /// column's filter, so removals compound.
    #[default]
    Sequential,
    /// All bounds come from the table as it was when the step started and a
    /// single combined filter is applied.
    Simultaneous,
}

impl FromStr for OutlierPass {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "simultaneous" => Ok(Self::Simultaneous),
            _ => Err(ConfigValidationError::UnknownOption {
                option: "outlier_pass",
                value: s.to_string(),
            }),
        }
    }
}

/// What text formatting does with missing values in string columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingTextPolicy {
    /// Missing values become the literal string `"nan"`.
    #[default]
    NanLiteral,
    /// Missing values stay missing.
    KeepMissing,
}

/// A single requested conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConversion {
    pub column: String,
    pub target: TargetType,
}

impl ColumnConversion {
    pub fn new(column: impl Into<String>, target: TargetType) -> Self {
        Self {
            column: column.into(),
            target,
        }
    }
}

impl FromStr for ColumnConversion {
    type Err = ConfigValidationError;

    /// Parse `column=type`. The split happens at the last `=` so column
    /// names may themselves contain one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, target) =
            s.rsplit_once('=')
                .ok_or_else(|| ConfigValidationError::UnknownOption {
                    option: "convert",
                    value: s.to_string(),
                })?;
        if column.is_empty() {
            return Err(ConfigValidationError::EmptyConversionColumn);
        }
        Ok(Self::new(column, target.parse()?))
    }
}

/// Configuration for [`crate::cleaner::DataCleaner`].
///
/// Use [`CleaningConfig::builder()`] to create a configuration with the
/// fluent API, or deserialize one from JSON.
///
/// # Example
///
/// ```rust,ignore
/// use cleanxpress::config::{CleaningConfig, MissingValueStrategy, TargetType};
///
/// let config = CleaningConfig::builder()
///     .drop_duplicates(true)
///     .handle_missing(MissingValueStrategy::FillMean)
///     .convert_column("age", TargetType::Int)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CleaningConfig {
    /// Remove rows that exactly repeat an earlier row.
    /// Default: false
    pub drop_duplicates: bool,

    /// Missing value strategy.
    /// Default: None
    pub handle_missing: MissingValueStrategy,

    /// Trim and lower-case column names and string values.
    /// Default: false
    pub format_columns: bool,

    /// Remove rows outside the IQR fences of any numeric column.
    /// Default: false
    pub remove_outliers: bool,

    /// Conversions to apply, in order. Serialized as a JSON object whose key
    /// order is preserved.
    #[serde(with = "conversion_map")]
    pub convert_column_types: Vec<ColumnConversion>,

    /// Default: Sequential
    pub outlier_pass: OutlierPass,

    /// Default: NanLiteral
    pub missing_text: MissingTextPolicy,
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: CleaningConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (idx, conversion) in self.convert_column_types.iter().enumerate() {
            if conversion.column.is_empty() {
                return Err(ConfigValidationError::EmptyConversionColumn);
            }
            if self.convert_column_types[..idx]
                .iter()
                .any(|earlier| earlier.column == conversion.column)
            {
                return Err(ConfigValidationError::DuplicateConversion(
                    conversion.column.clone(),
                ));
            }
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column '{0}' has more than one requested conversion")]
    DuplicateConversion(String),

    #[error("Conversion requested for an empty column name")]
    EmptyConversionColumn,

    #[error("Unknown value '{value}' for option '{option}'")]
    UnknownOption { option: &'static str, value: String },
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    drop_duplicates: Option<bool>,
    handle_missing: Option<MissingValueStrategy>,
    format_columns: Option<bool>,
    remove_outliers: Option<bool>,
    convert_column_types: Vec<ColumnConversion>,
    outlier_pass: Option<OutlierPass>,
    missing_text: Option<MissingTextPolicy>,
}

impl CleaningConfigBuilder {
    /// Start from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: CleaningConfig) -> Self {
        Self {
            drop_duplicates: Some(config.drop_duplicates),
            handle_missing: Some(config.handle_missing),
            format_columns: Some(config.format_columns),
            remove_outliers: Some(config.remove_outliers),
            convert_column_types: config.convert_column_types,
            outlier_pass: Some(config.outlier_pass),
            missing_text: Some(config.missing_text),
        }
    }

    pub fn drop_duplicates(mut self, enable: bool) -> Self {
        self.drop_duplicates = Some(enable);
        self
    }

    pub fn handle_missing(mut self, strategy: MissingValueStrategy) -> Self {
        self.handle_missing = Some(strategy);
        self
    }

    pub fn format_columns(mut self, enable: bool) -> Self {
        self.format_columns = Some(enable);
        self
    }

    pub fn remove_outliers(mut self, enable: bool) -> Self {
        self.remove_outliers = Some(enable);
        self
    }

    /// Request a conversion for a column.
    ///
    /// Requesting the same column twice replaces the earlier target but keeps
    /// its original position in the conversion order.
    pub fn convert_column(mut self, column: impl Into<String>, target: TargetType) -> Self {
        let column = column.into();
        match self
            .convert_column_types
            .iter_mut()
            .find(|c| c.column == column)
        {
            Some(existing) => existing.target = target,
            None => self
                .convert_column_types
                .push(ColumnConversion::new(column, target)),
        }
        self
    }

    pub fn outlier_pass(mut self, pass: OutlierPass) -> Self {
        self.outlier_pass = Some(pass);
        self
    }

    pub fn missing_text(mut self, policy: MissingTextPolicy) -> Self {
        self.missing_text = Some(policy);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let config = CleaningConfig {
            drop_duplicates: self.drop_duplicates.unwrap_or(false),
            handle_missing: self.handle_missing.unwrap_or_default(),
            format_columns: self.format_columns.unwrap_or(false),
            remove_outliers: self.remove_outliers.unwrap_or(false),
            convert_column_types: self.convert_column_types,
            outlier_pass: self.outlier_pass.unwrap_or_default(),
            missing_text: self.missing_text.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

/// (De)serializes the conversion list as a JSON object, keeping key order.
mod conversion_map {
    use super::*;

    pub fn serialize<S>(conversions: &[ColumnConversion], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(conversions.len()))?;
        for conversion in conversions {
            map.serialize_entry(&conversion.column, &conversion.target)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ColumnConversion>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ConversionVisitor)
    }

    struct ConversionVisitor;

    impl<'de> Visitor<'de> for ConversionVisitor {
        type Value = Vec<ColumnConversion>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from column name to \"int\", \"float\" or \"datetime\"")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut conversions: Vec<ColumnConversion> =
                Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((column, target)) = access.next_entry::<String, TargetType>()? {
                if conversions.iter().any(|c| c.column == column) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate conversion for column '{}'",
                        column
                    )));
                }
                conversions.push(ColumnConversion { column, target });
            }
            Ok(conversions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleaningConfig::default();
        assert!(!config.drop_duplicates);
        assert_eq!(config.handle_missing, MissingValueStrategy::None);
        assert!(!config.format_columns);
        assert!(!config.remove_outliers);
        assert!(config.convert_column_types.is_empty());
        assert_eq!(config.outlier_pass, OutlierPass::Sequential);
        assert_eq!(config.missing_text, MissingTextPolicy::NanLiteral);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleaningConfig::builder()
            .drop_duplicates(true)
            .handle_missing(MissingValueStrategy::DropRows)
            .format_columns(true)
            .remove_outliers(true)
            .convert_column("age", TargetType::Int)
            .convert_column("joined", TargetType::Datetime)
            .build()
            .unwrap();

        assert!(config.drop_duplicates);
        assert_eq!(config.handle_missing, MissingValueStrategy::DropRows);
        assert!(config.format_columns);
        assert!(config.remove_outliers);
        assert_eq!(
            config.convert_column_types,
            vec![
                ColumnConversion::new("age", TargetType::Int),
                ColumnConversion::new("joined", TargetType::Datetime),
            ]
        );
    }

    #[test]
    fn test_builder_replaces_conversion_in_place() {
        let config = CleaningConfig::builder()
            .convert_column("a", TargetType::Int)
            .convert_column("b", TargetType::Float)
            .convert_column("a", TargetType::Datetime)
            .build()
            .unwrap();

        assert_eq!(
            config.convert_column_types,
            vec![
                ColumnConversion::new("a", TargetType::Datetime),
                ColumnConversion::new("b", TargetType::Float),
            ]
        );
    }

    #[test]
    fn test_validation_rejects_duplicates() {
        let config = CleaningConfig {
            convert_column_types: vec![
                ColumnConversion::new("a", TargetType::Int),
                ColumnConversion::new("a", TargetType::Float),
            ],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateConversion("a".to_string()))
        );
    }

    #[test]
    fn test_validation_rejects_empty_column() {
        let result = CleaningConfig::builder()
            .convert_column("", TargetType::Int)
            .build();
        assert_eq!(result, Err(ConfigValidationError::EmptyConversionColumn));
    }

    #[test]
    fn test_strategy_from_ui_labels() {
        assert_eq!(
            "Fill with Mean".parse::<MissingValueStrategy>().unwrap(),
            MissingValueStrategy::FillMean
        );
        assert_eq!(
            "Fill with Median".parse::<MissingValueStrategy>().unwrap(),
            MissingValueStrategy::FillMedian
        );
        assert_eq!(
            "Drop Rows".parse::<MissingValueStrategy>().unwrap(),
            MissingValueStrategy::DropRows
        );
        assert_eq!(
            "None".parse::<MissingValueStrategy>().unwrap(),
            MissingValueStrategy::None
        );
        assert!("Fill with Mode".parse::<MissingValueStrategy>().is_err());
    }

    #[test]
    fn test_conversion_from_str() {
        let conversion: ColumnConversion = "age=int".parse().unwrap();
        assert_eq!(conversion, ColumnConversion::new("age", TargetType::Int));

        let conversion: ColumnConversion = "a=b=float".parse().unwrap();
        assert_eq!(conversion, ColumnConversion::new("a=b", TargetType::Float));

        assert!("age".parse::<ColumnConversion>().is_err());
        assert!("age=text".parse::<ColumnConversion>().is_err());
        assert_eq!(
            "=int".parse::<ColumnConversion>(),
            Err(ConfigValidationError::EmptyConversionColumn)
        );
    }

    #[test]
    fn test_config_from_shell_json() {
        let json = r#"{
            "drop_duplicates": true,
            "handle_missing": "Fill with Median",
            "format_columns": true,
            "remove_outliers": false,
            "convert_column_types": {"zeta": "float", "age": "int", "joined": "datetime"}
        }"#;

        let config = CleaningConfig::from_json(json).expect("Should deserialize shell JSON");

        assert!(config.drop_duplicates);
        assert_eq!(config.handle_missing, MissingValueStrategy::FillMedian);
        assert!(config.format_columns);
        assert!(!config.remove_outliers);
        let order: Vec<&str> = config
            .convert_column_types
            .iter()
            .map(|c| c.column.as_str())
            .collect();
        assert_eq!(order, vec!["zeta", "age", "joined"]);
        assert_eq!(config.outlier_pass, OutlierPass::Sequential);
    }

    #[test]
    fn test_config_json_rejects_duplicate_keys() {
        let json = r#"{"convert_column_types": {"age": "int", "age": "float"}}"#;
        assert!(CleaningConfig::from_json(json).is_err());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = CleaningConfig::builder()
            .handle_missing(MissingValueStrategy::FillMean)
            .convert_column("b", TargetType::Float)
            .convert_column("a", TargetType::Int)
            .outlier_pass(OutlierPass::Simultaneous)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""convert_column_types":{"b":"float","a":"int"}"#));

        let deserialized = CleaningConfig::from_json(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
