//! Generation settings.
//!
//! [`AutoFakerConfig`] is immutable once built and shared by every context of
//! a session. Build it fluently, or from a [`FakerSettings`] document:
//!
//! ```
//! use autofake::{AutoFakerConfig, FakerSettings, UniqueBudget};
//!
//! let config = AutoFakerConfig::builder()
//!     .repeat_count(4)
//!     .generate_attempts_threshold(5)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.generate_attempts_threshold(), 5);
//!
//! let settings = FakerSettings::from_json(
//!     r#"{"repeat_count": {"min": 1, "max": 2}, "unique_budget": "per_slot"}"#,
//! )
//! .unwrap();
//! let config = AutoFakerConfig::from_settings(settings).unwrap();
//! assert_eq!(config.unique_budget(), UniqueBudget::PerSlot);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::context::GenerationContext;
use crate::error::ConfigError;
use crate::overrides::GeneratorOverride;

/// Default bound on uniqueness retries.
pub const DEFAULT_GENERATE_ATTEMPTS_THRESHOLD: usize = 3;

/// Smallest accepted threshold. The first rejected duplicate already costs a
/// second factory call, so a threshold of 1 could never be honoured.
pub const MIN_GENERATE_ATTEMPTS_THRESHOLD: usize = 2;

/// Default number of times a type may appear on the expansion stack.
pub const DEFAULT_RECURSIVE_DEPTH: usize = 2;

const DEFAULT_COUNT_MIN: usize = 3;
const DEFAULT_COUNT_MAX: usize = 5;

/// Callback computing a count from the current context.
pub type CountFn = Arc<dyn Fn(&mut GenerationContext<'_>) -> usize + Send + Sync>;

/// How the uniqueness retry budget is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueBudget {
    /// One counter for the whole batch. Exhausting it ends the batch, so a
    /// batch never accepts a duplicate and may come back short.
    #[default]
    Global,
    /// One counter per slot. Exhausting it accepts the last candidate even if
    /// it is a duplicate, so the batch always reaches its size.
    PerSlot,
}

/// Batch-size policy.
#[derive(Clone)]
pub enum CountPolicy {
    Fixed(usize),
    /// Uniform in `min..=max`.
    Range { min: usize, max: usize },
    Custom(CountFn),
}

impl CountPolicy {
    pub fn eval(&self, ctx: &mut GenerationContext<'_>) -> usize {
        match self {
            CountPolicy::Fixed(n) => *n,
            CountPolicy::Range { min, max } => ctx.faker().range(*min, *max),
            CountPolicy::Custom(f) => f(ctx),
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        match self {
            CountPolicy::Range { min, max } if min > max => Err(ConfigError::InvalidRange {
                name,
                min: *min,
                max: *max,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for CountPolicy {
    fn default() -> Self {
        CountPolicy::Range {
            min: DEFAULT_COUNT_MIN,
            max: DEFAULT_COUNT_MAX,
        }
    }
}

impl fmt::Debug for CountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountPolicy::Fixed(n) => write!(f, "Fixed({})", n),
            CountPolicy::Range { min, max } => write!(f, "Range({}..={})", min, max),
            CountPolicy::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// Immutable generation settings.
#[derive(Clone)]
pub struct AutoFakerConfig {
    repeat_count: CountPolicy,
    generate_attempts_threshold: usize,
    unique_budget: UniqueBudget,
    overrides: Vec<Arc<dyn GeneratorOverride>>,
    data_table_row_count: CountPolicy,
    recursive_depth: usize,
    tree_depth: Option<usize>,
    null_probability: f64,
}

impl AutoFakerConfig {
    pub fn builder() -> AutoFakerConfigBuilder {
        AutoFakerConfigBuilder::default()
    }

    /// Validate and apply a settings document.
    pub fn from_settings(settings: FakerSettings) -> Result<Self, ConfigError> {
        settings.into_builder().build()
    }

    /// Number of items for a collection generated under `ctx`.
    pub fn repeat_count(&self, ctx: &mut GenerationContext<'_>) -> usize {
        self.repeat_count.eval(ctx)
    }

    /// Number of rows for a data table generated under `ctx`.
    pub fn data_table_row_count(&self, ctx: &mut GenerationContext<'_>) -> usize {
        self.data_table_row_count.eval(ctx)
    }

    pub fn generate_attempts_threshold(&self) -> usize {
        self.generate_attempts_threshold
    }

    pub fn unique_budget(&self) -> UniqueBudget {
        self.unique_budget
    }

    /// Overrides in registration order.
    pub fn overrides(&self) -> &[Arc<dyn GeneratorOverride>] {
        &self.overrides
    }

    pub fn recursive_depth(&self) -> usize {
        self.recursive_depth
    }

    pub fn tree_depth(&self) -> Option<usize> {
        self.tree_depth
    }

    /// Probability that a nullable wrapper yields `Null`.
    pub fn null_probability(&self) -> f64 {
        self.null_probability
    }
}

impl Default for AutoFakerConfig {
    fn default() -> Self {
        Self {
            repeat_count: CountPolicy::default(),
            generate_attempts_threshold: DEFAULT_GENERATE_ATTEMPTS_THRESHOLD,
            unique_budget: UniqueBudget::default(),
            overrides: Vec::new(),
            data_table_row_count: CountPolicy::default(),
            recursive_depth: DEFAULT_RECURSIVE_DEPTH,
            tree_depth: None,
            null_probability: 0.0,
        }
    }
}

impl fmt::Debug for AutoFakerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoFakerConfig")
            .field("repeat_count", &self.repeat_count)
            .field("generate_attempts_threshold", &self.generate_attempts_threshold)
            .field("unique_budget", &self.unique_budget)
            .field("overrides", &self.overrides.len())
            .field("data_table_row_count", &self.data_table_row_count)
            .field("recursive_depth", &self.recursive_depth)
            .field("tree_depth", &self.tree_depth)
            .field("null_probability", &self.null_probability)
            .finish()
    }
}

/// Fluent builder for [`AutoFakerConfig`].
#[derive(Default)]
pub struct AutoFakerConfigBuilder {
    config: AutoFakerConfig,
}

impl AutoFakerConfigBuilder {
    /// Always generate exactly `n` items.
    pub fn repeat_count(mut self, n: usize) -> Self {
        self.config.repeat_count = CountPolicy::Fixed(n);
        self
    }

    /// Generate between `min` and `max` items (inclusive).
    pub fn repeat_count_range(mut self, min: usize, max: usize) -> Self {
        self.config.repeat_count = CountPolicy::Range { min, max };
        self
    }

    /// Compute the item count from the context.
    pub fn repeat_count_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut GenerationContext<'_>) -> usize + Send + Sync + 'static,
    {
        self.config.repeat_count = CountPolicy::Custom(Arc::new(f));
        self
    }

    pub fn generate_attempts_threshold(mut self, n: usize) -> Self {
        self.config.generate_attempts_threshold = n;
        self
    }

    pub fn unique_budget(mut self, budget: UniqueBudget) -> Self {
        self.config.unique_budget = budget;
        self
    }

    /// Append an override; overrides run in the order they were added.
    pub fn add_override<O>(self, o: O) -> Self
    where
        O: GeneratorOverride + 'static,
    {
        self.push_override(Arc::new(o))
    }

    /// Append a shared override.
    pub fn push_override(mut self, o: Arc<dyn GeneratorOverride>) -> Self {
        self.config.overrides.push(o);
        self
    }

    /// Replace all overrides.
    pub fn overrides(mut self, overrides: Vec<Arc<dyn GeneratorOverride>>) -> Self {
        self.config.overrides = overrides;
        self
    }

    pub fn data_table_row_count(mut self, n: usize) -> Self {
        self.config.data_table_row_count = CountPolicy::Fixed(n);
        self
    }

    pub fn data_table_row_count_range(mut self, min: usize, max: usize) -> Self {
        self.config.data_table_row_count = CountPolicy::Range { min, max };
        self
    }

    pub fn data_table_row_count_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut GenerationContext<'_>) -> usize + Send + Sync + 'static,
    {
        self.config.data_table_row_count = CountPolicy::Custom(Arc::new(f));
        self
    }

    pub fn recursive_depth(mut self, n: usize) -> Self {
        self.config.recursive_depth = n;
        self
    }

    pub fn tree_depth(mut self, n: usize) -> Self {
        self.config.tree_depth = Some(n);
        self
    }

    pub fn null_probability(mut self, p: f64) -> Self {
        self.config.null_probability = p;
        self
    }

    pub fn build(self) -> Result<AutoFakerConfig, ConfigError> {
        let config = self.config;
        if config.generate_attempts_threshold < MIN_GENERATE_ATTEMPTS_THRESHOLD {
            return Err(ConfigError::AttemptsThresholdTooLow {
                value: config.generate_attempts_threshold,
            });
        }
        if config.recursive_depth == 0 {
            return Err(ConfigError::ZeroRecursiveDepth);
        }
        if !(0.0..=1.0).contains(&config.null_probability) {
            return Err(ConfigError::InvalidProbability {
                value: config.null_probability,
            });
        }
        config.repeat_count.validate("repeat_count")?;
        config
            .data_table_row_count
            .validate("data_table_row_count")?;
        Ok(config)
    }
}

/// Serializable count: either a number or a `{min, max}` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountSetting {
    Fixed(usize),
    Range { min: usize, max: usize },
}

impl From<CountSetting> for CountPolicy {
    fn from(s: CountSetting) -> Self {
        match s {
            CountSetting::Fixed(n) => CountPolicy::Fixed(n),
            CountSetting::Range { min, max } => CountPolicy::Range { min, max },
        }
    }
}

/// The scalar knobs of [`AutoFakerConfig`] as a serde document.
///
/// Missing keys keep their defaults. Overrides are code and cannot be loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FakerSettings {
    pub repeat_count: Option<CountSetting>,
    pub generate_attempts_threshold: Option<usize>,
    pub unique_budget: Option<UniqueBudget>,
    pub data_table_row_count: Option<CountSetting>,
    pub recursive_depth: Option<usize>,
    pub tree_depth: Option<usize>,
    pub null_probability: Option<f64>,
}

impl FakerSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Start a builder from these settings, to add overrides before building.
    pub fn into_builder(self) -> AutoFakerConfigBuilder {
        let mut builder = AutoFakerConfig::builder();
        if let Some(count) = self.repeat_count {
            builder.config.repeat_count = count.into();
        }
        if let Some(n) = self.generate_attempts_threshold {
            builder = builder.generate_attempts_threshold(n);
        }
        if let Some(budget) = self.unique_budget {
            builder = builder.unique_budget(budget);
        }
        if let Some(count) = self.data_table_row_count {
            builder.config.data_table_row_count = count.into();
        }
        if let Some(n) = self.recursive_depth {
            builder = builder.recursive_depth(n);
        }
        builder.config.tree_depth = self.tree_depth;
        if let Some(p) = self.null_probability {
            builder = builder.null_probability(p);
        }
        builder
    }
}
