#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(unused_variables)]

//! Inject missing values into complete data.
//!
//! A probability function decides how likely each element is to go missing;
//! the injector runs one Bernoulli trial per element and replaces successes
//! with `None`. MCAR, MAR and MNAR mechanisms are all expressed as
//! probability functions over the response `y` and caller-supplied
//! [`ExtraArgs`].

pub mod args;
pub mod config;
pub mod inject;
pub mod mechanism;
pub mod source;

pub use args::{ArgError, ArgValue, ExtraArgs};
pub use config::{ConfigError, InjectConfig};
pub use inject::{
    InjectError, check_probabilities, count_missing, inject, inject_default, inject_nan,
    inject_with_rng,
};
pub use mechanism::{DEFAULT_RATE, Declared, DefaultRate, MechanismError, ProbabilityFn, Y_PARAM};
pub use source::{reseed_default_source_from_entropy, seed_default_source, with_default_source};
