//! Step modules for procedure documents.
//!
//! A step module turns one directive of a procedure step (for example
//! `pgt.set: B7, CW2, 2.5`) into an [`Alteration`]: content to append to,
//! prepend to or replace the step's text, rendered for a requested
//! [`OutputType`].
//!
//! Modules declare which [`AlterVariant`]s they implement. A
//! [`StepModuleInstance`] resolves the fallback chain of the requested output
//! type and runs the first variant the module supports; every chain ends in
//! [`AlterVariant::Base`], which every module implements.
//!
//! # Example
//!
//! ```
//! use stepdoc_modules::{AlterationType, Directive, ModuleRegistry, OutputType};
//!
//! let directive = Directive::from_yaml_str("pgt.set: B7, CW2, 2.5").unwrap();
//! let mut instance = ModuleRegistry::standard().instantiate(&directive).unwrap();
//!
//! let alteration = instance.alter_step(OutputType::Text).unwrap();
//! assert_eq!(alteration.kind(), AlterationType::Prepend);
//! assert_eq!(alteration.plain_text(), "PGT [B7, CW2, 2.5]");
//! ```

mod alteration;
mod apfr_install;
mod directive;
mod error;
mod instance;
mod module;
mod output;
mod pgt_set;
mod registry;

pub use alteration::{Alteration, AlterationContent, AlterationType, format_step_mod_alterations};
pub use apfr_install::ApfrInstall;
pub use directive::{Directive, DirectiveValue};
pub use error::StepModuleError;
pub use instance::StepModuleInstance;
pub use module::{AlterContext, ComponentRenderer, StepModule, StepModuleType, downcast_module};
pub use output::{AlterVariant, OutputType, fallback_chain};
pub use pgt_set::PgtSet;
pub use registry::{ConstructFn, ModuleEntry, ModuleRegistry, ModuleRegistryBuilder};
