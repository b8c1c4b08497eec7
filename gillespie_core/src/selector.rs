//! Event selectors: which reaction fires next, and after how long.
//!
//! Two classical variants of the stochastic simulation algorithm:
//!
//! - **Direct Method**: one categorical draw over `a_i / Σa` picks the
//!   reaction, one exponential draw with rate `Σa` picks the holding time.
//! - **First Reaction Method**: every reaction draws its own putative firing
//!   time `τ_i ~ Exp(a_i)`; the earliest one fires.
//!
//! Both are exact and agree in distribution; they differ only in how much
//! randomness they consume per step.

use crate::CoreError;
use gillespie_env::RandomSource;
use serde::{Deserialize, Serialize};

/// Outcome of one selection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Reaction `reaction` fires after holding time `tau`.
    Fire { reaction: usize, tau: f64 },

    /// Every propensity is zero; nothing can ever fire again.
    Equilibrium,
}

impl Selection {
    pub fn is_equilibrium(&self) -> bool {
        matches!(self, Selection::Equilibrium)
    }
}

/// Trait for event selection strategies.
pub trait EventSelector: Send + Sync {
    /// Chooses the next event from the pre-firing propensities.
    fn select(
        &mut self,
        propensities: &[f64],
        source: &mut dyn RandomSource,
    ) -> Result<Selection, CoreError>;

    /// Returns the name of this selector.
    fn name(&self) -> &str;
}

/// Rejects negative or NaN propensities.
fn validate(propensities: &[f64]) -> Result<(), CoreError> {
    for (reaction, &value) in propensities.iter().enumerate() {
        if value.is_nan() || value < 0.0 {
            return Err(CoreError::NegativePropensity { reaction, value });
        }
    }
    Ok(())
}

/// Gillespie's Direct Method.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMethod;

impl EventSelector for DirectMethod {
    fn select(
        &mut self,
        propensities: &[f64],
        source: &mut dyn RandomSource,
    ) -> Result<Selection, CoreError> {
        validate(propensities)?;

        let total: f64 = propensities.iter().sum();
        if total == 0.0 {
            return Ok(Selection::Equilibrium);
        }

        let reaction = source.categorical(propensities)?;
        let tau = source.exponential(total)?;

        Ok(Selection::Fire { reaction, tau })
    }

    fn name(&self) -> &str {
        "DirectMethod"
    }
}

/// Gillespie's First Reaction Method.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstReactionMethod;

impl FirstReactionMethod {
    /// Putative firing time of one reaction; `+inf` when it cannot fire.
    fn putative_time(
        propensity: f64,
        source: &mut dyn RandomSource,
    ) -> Result<f64, CoreError> {
        if propensity == 0.0 {
            return Ok(f64::INFINITY);
        }
        let u = source.uniform()?;
        Ok((1.0 / propensity) * (1.0 / (1.0 - u)).ln())
    }
}

impl EventSelector for FirstReactionMethod {
    fn select(
        &mut self,
        propensities: &[f64],
        source: &mut dyn RandomSource,
    ) -> Result<Selection, CoreError> {
        validate(propensities)?;

        let mut best: Option<(usize, f64)> = None;
        for (idx, &a) in propensities.iter().enumerate() {
            let tau = Self::putative_time(a, source)?;
            // Strict comparison: the lowest index wins a tie
            match best {
                Some((_, best_tau)) if tau >= best_tau => {}
                _ => best = Some((idx, tau)),
            }
        }

        match best {
            Some((reaction, tau)) if tau.is_finite() => Ok(Selection::Fire { reaction, tau }),
            _ => Ok(Selection::Equilibrium),
        }
    }

    fn name(&self) -> &str {
        "FirstReactionMethod"
    }
}

/// Selector identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Categorical reaction choice + one exponential holding time
    #[default]
    Direct,

    /// One exponential putative time per reaction, earliest wins
    FirstReaction,
}

impl Method {
    /// Returns both methods.
    pub fn all() -> Vec<Method> {
        vec![Method::Direct, Method::FirstReaction]
    }

    /// Returns the method name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Direct => "direct",
            Method::FirstReaction => "first_reaction",
        }
    }

    /// Creates a fresh selector for this method.
    pub fn selector(&self) -> Box<dyn EventSelector> {
        match self {
            Method::Direct => Box::new(DirectMethod),
            Method::FirstReaction => Box::new(FirstReactionMethod),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "dm" | "direct_method" => Ok(Method::Direct),
            "first_reaction" | "firstreaction" | "frm" | "first" => Ok(Method::FirstReaction),
            _ => Err(format!("Unknown method: {}", s)),
        }
    }
}
