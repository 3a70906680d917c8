//! Step module traits.

use std::any::Any;
use std::fmt;

use stepdoc_transform::{Segment, TextTransform};

use crate::{AlterVariant, Alteration, Directive, DirectiveValue, StepModuleError};

/// Context handed to a module while it builds an alteration.
///
/// Gives access to the token transform engine bound to the family of the
/// variant being rendered.
pub struct AlterContext<'a> {
    variant: AlterVariant,
    transform: &'a TextTransform,
}

impl<'a> AlterContext<'a> {
    /// Create a context for `variant` using `transform`.
    #[must_use]
    pub fn new(variant: AlterVariant, transform: &'a TextTransform) -> Self {
        Self { variant, transform }
    }

    /// Variant being rendered.
    #[must_use]
    pub fn variant(&self) -> AlterVariant {
        self.variant
    }

    /// Transform author text into segments for the active format.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<Segment> {
        self.transform.transform(text)
    }
}

/// Handler for one directive vocabulary.
///
/// Implementations are immutable after construction: all validation happens
/// when the module is built from its directive.
///
/// # Example
///
/// ```
/// use stepdoc_modules::{
///     AlterContext, AlterVariant, Alteration, AlterationType, Directive, DirectiveValue,
///     StepModule, StepModuleError, StepModuleType,
/// };
///
/// #[derive(Debug)]
/// struct Note(String);
///
/// impl StepModule for Note {
///     fn key(&self) -> &'static str { Self::KEY }
///     fn variants(&self) -> &'static [AlterVariant] { Self::VARIANTS }
///     fn definition(&self) -> Directive { Directive::scalar(Self::KEY, self.0.clone()) }
///     fn alter_step(
///         &self,
///         _variant: AlterVariant,
///         _ctx: &AlterContext<'_>,
///     ) -> Result<Alteration, StepModuleError> {
///         Ok(Alteration::new(AlterationType::Append, self.0.as_str()))
///     }
/// }
///
/// impl StepModuleType for Note {
///     const KEY: &'static str = "note";
///     const VARIANTS: &'static [AlterVariant] = &[AlterVariant::Base];
///     fn from_directive(value: &DirectiveValue) -> Result<Self, StepModuleError> {
///         match value {
///             DirectiveValue::Scalar(s) => Ok(Self(s.clone())),
///             DirectiveValue::Mapping(_) => Err(StepModuleError::InvalidDirective {
///                 key: Self::KEY.to_owned(),
///                 reason: "expected text".to_owned(),
///             }),
///         }
///     }
/// }
/// ```
pub trait StepModule: fmt::Debug + Any {
    /// Directive key this module handles.
    fn key(&self) -> &'static str;

    /// Variants this module implements. Must include [`AlterVariant::Base`].
    ///
    /// [`AlterVariant::React`] means the module has a component view; the
    /// view itself is supplied by a component renderer from the registry.
    fn variants(&self) -> &'static [AlterVariant];

    /// Canonical directive reconstructed from the validated properties.
    ///
    /// Parsing the result again yields an equivalent module.
    fn definition(&self) -> Directive;

    /// Build the alteration for `variant`.
    ///
    /// Only called with variants listed in [`variants`](Self::variants),
    /// never with [`AlterVariant::React`].
    fn alter_step(
        &self,
        variant: AlterVariant,
        ctx: &AlterContext<'_>,
    ) -> Result<Alteration, StepModuleError>;
}

/// Construction side of a step module, used by the registry.
pub trait StepModuleType: StepModule + Sized {
    /// Directive key.
    const KEY: &'static str;

    /// Declared variants. Must include [`AlterVariant::Base`].
    const VARIANTS: &'static [AlterVariant];

    /// Parse and validate a directive value.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending value.
    fn from_directive(value: &DirectiveValue) -> Result<Self, StepModuleError>;
}

/// Renders a module as a UI-component tree.
///
/// Registered per module key and injected into each instance, so component
/// rendering stays outside the module types themselves.
pub type ComponentRenderer =
    fn(&dyn StepModule, &AlterContext<'_>) -> Result<Alteration, StepModuleError>;

/// Downcast a module to its concrete type inside a component renderer.
///
/// # Errors
///
/// Returns [`StepModuleError::MissingComponentRenderer`] when the renderer
/// was registered for a different module type.
pub fn downcast_module<T: StepModuleType>(module: &dyn StepModule) -> Result<&T, StepModuleError> {
    let any: &dyn Any = module;
    any.downcast_ref::<T>()
        .ok_or(StepModuleError::MissingComponentRenderer { key: module.key() })
}
