//! By-name construction of drive protocol instances.
//!
//! The scheduler framework knows drives only through `dyn VfdProtocol`; the
//! registry is the one place that maps a configured model name to a concrete
//! driver. Built-in models are registered at startup.

use std::collections::HashMap;

use eyre::WrapErr;
use spindle_traits::VfdProtocol;

use crate::bd600::Bd600;
use crate::error::{Result, SpindleError};

type Factory = fn(&spindle_config::Config) -> Box<dyn VfdProtocol>;

fn build_bd600(cfg: &spindle_config::Config) -> Box<dyn VfdProtocol> {
    Box::new(Bd600::from_config(cfg))
}

pub struct ProtocolRegistry {
    factories: HashMap<&'static str, Factory>,
}

impl ProtocolRegistry {
    /// Empty registry; prefer [`ProtocolRegistry::with_builtin`].
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with every built-in drive model.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Bd600::MODEL, build_bd600);
        tracing::info!(models = ?registry.model_names(), "drive protocols registered");
        registry
    }

    pub fn register(&mut self, model: &'static str, factory: Factory) {
        self.factories.insert(model, factory);
    }

    /// Validate `cfg` and construct the protocol for its model name.
    pub fn build(&self, cfg: &spindle_config::Config) -> Result<Box<dyn VfdProtocol>> {
        cfg.validate().wrap_err("drive configuration")?;
        let model = cfg.drive.model.as_str();
        let factory = self
            .factories
            .get(model)
            .ok_or_else(|| eyre::Report::new(SpindleError::UnknownModel(model.to_string())))?;
        Ok(factory(cfg))
    }

    /// Registered model names, sorted for stable reporting.
    pub fn model_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
