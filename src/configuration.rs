use std::fs::File;
use std::io::BufReader;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use tracing::info;

use crate::functions::factory::tabulatedfunctionfactory::TabulatedFunctionKind;
use crate::functions::functionerror::FunctionError;
use crate::operations::steppingdifferentialoperator::{
    DifferenceScheme,
    SteppingDifferentialOperator
};
use crate::operations::tabulateddifferentialoperator::TabulatedDifferentialOperator;
use crate::operations::tabulatedfunctionoperationservice::TabulatedFunctionOperationService;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Engine settings, read from JSON. Missing fields take their defaults.
///
/// ```json
/// {
///     "factory": "linked_list",
///     "differential_step": 1e-5,
///     "worker_threads": 10,
///     "sample_count": 101
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfiguration {
    factory: TabulatedFunctionKind,
    differential_step: f64,
    worker_threads: usize,
    sample_count: usize
}

impl Default for EngineConfiguration {
    fn default() -> Self {
        EngineConfiguration {
            factory: TabulatedFunctionKind::Array,
            differential_step: 1e-5,
            worker_threads: 10,
            sample_count: 101,
        }
    }
}

impl EngineConfiguration {
    pub fn new() -> EngineConfiguration {
        EngineConfiguration::default()
    }

    pub fn from_reader(file_path: &str) -> Result<EngineConfiguration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: EngineConfiguration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        info!(file_path, factory = ?configuration.factory, "configuration loaded");
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<EngineConfiguration, ConfigurationError> {
        let configuration: EngineConfiguration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if let Err(FunctionError::InvalidStep(step)) = SteppingDifferentialOperator::middle(self.differential_step) {
            return Err(ConfigurationError::InvalidValue {
                key: "differential_step",
                message: format!("{} is not a positive finite step", step),
            });
        }
        if self.worker_threads == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "worker_threads",
                message: "at least one worker thread is required".to_owned(),
            });
        }
        if self.sample_count < 2 {
            return Err(ConfigurationError::InvalidValue {
                key: "sample_count",
                message: format!("{} samples, at least 2 are required", self.sample_count),
            });
        }
        Ok(())
    }

    pub fn factory(&self) -> TabulatedFunctionKind {
        self.factory
    }

    pub fn differential_step(&self) -> f64 {
        self.differential_step
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn stepping_operator(&self, scheme: DifferenceScheme) -> Result<SteppingDifferentialOperator, FunctionError> {
        SteppingDifferentialOperator::new(scheme, self.differential_step)
    }

    pub fn differential_operator(&self) -> TabulatedDifferentialOperator<TabulatedFunctionKind> {
        TabulatedDifferentialOperator::new(self.factory)
    }

    pub fn operation_service(&self) -> TabulatedFunctionOperationService<TabulatedFunctionKind> {
        TabulatedFunctionOperationService::new(self.factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::tabulatedfunction::TabulatedFunction;
    use crate::functions::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
    use crate::operations::differentialoperator::DifferentialOperator;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let configuration = EngineConfiguration::from_json_str("{}").unwrap();
        assert_eq!(configuration, EngineConfiguration::new());
        assert_eq!(configuration.factory(), TabulatedFunctionKind::Array);
        assert_eq!(configuration.worker_threads(), 10);
    }

    #[test]
    fn test_partial_json() {
        let configuration =
            EngineConfiguration::from_json_str(r#"{"factory": "linked_list", "differential_step": 0.5}"#).unwrap();
        assert_eq!(configuration.factory(), TabulatedFunctionKind::LinkedList);
        assert_eq!(configuration.differential_step(), 0.5);
        assert_eq!(configuration.sample_count(), 101);
        assert_eq!(
            configuration.stepping_operator(DifferenceScheme::Right).unwrap().step(),
            0.5
        );
    }

    #[test]
    fn test_invalid_values() {
        for json in [
            r#"{"differential_step": 0.0}"#,
            r#"{"differential_step": -1.0}"#,
            r#"{"worker_threads": 0}"#,
            r#"{"sample_count": 1}"#,
        ] {
            assert!(matches!(
                EngineConfiguration::from_json_str(json),
                Err(ConfigurationError::InvalidValue { .. })
            ));
        }
        assert!(matches!(
            EngineConfiguration::from_json_str(r#"{"factory": "tree"}"#),
            Err(ConfigurationError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_from_reader() {
        let path = std::env::temp_dir().join(format!("tabfun-config-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(br#"{"factory": "linked_list", "worker_threads": 3}"#).unwrap();
        drop(file);

        let configuration = EngineConfiguration::from_reader(path.to_str().unwrap()).unwrap();
        assert_eq!(configuration.worker_threads(), 3);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            EngineConfiguration::from_reader(path.to_str().unwrap()),
            Err(ConfigurationError::IOError(_))
        ));
    }

    #[test]
    fn test_configured_operators_use_configured_factory() {
        let configuration = EngineConfiguration::from_json_str(r#"{"factory": "linked_list"}"#).unwrap();
        let f = configuration.factory().create(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
        let derivative = configuration.differential_operator().derive(&f).unwrap();
        assert_eq!(derivative.points().len(), 3);
        assert_eq!(derivative.y(1), Ok(2.0));

        let doubled = configuration.operation_service().add(&f, &f).unwrap();
        assert_eq!(doubled.y(2), Ok(8.0));
    }
}
