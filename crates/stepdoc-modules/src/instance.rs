//! Per-directive module instance with fallback dispatch.

use stepdoc_transform::{Segment, TextTransform, TransformFormat};

use crate::module::{AlterContext, ComponentRenderer, StepModule};
use crate::{AlterVariant, Alteration, Directive, OutputType, StepModuleError};

/// A constructed step module plus its render-time state.
///
/// Holds the validated module, the fallback chain resolved for the last
/// requested output type, the transform engine for that chain's family and
/// the component renderer injected by the registry.
#[derive(Debug)]
pub struct StepModuleInstance {
    module: Box<dyn StepModule>,
    component: Option<ComponentRenderer>,
    chain: Option<&'static [AlterVariant]>,
    transform: Option<TextTransform>,
}

impl StepModuleInstance {
    /// Wrap a constructed module.
    #[must_use]
    pub fn new(module: Box<dyn StepModule>, component: Option<ComponentRenderer>) -> Self {
        Self {
            module,
            component,
            chain: None,
            transform: None,
        }
    }

    /// Directive key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.module.key()
    }

    /// The wrapped module.
    #[must_use]
    pub fn module(&self) -> &dyn StepModule {
        self.module.as_ref()
    }

    /// Canonical directive for the module's validated properties.
    #[must_use]
    pub fn definition(&self) -> Directive {
        self.module.definition()
    }

    /// Whether `variant` can run for this instance.
    ///
    /// An injected component renderer adds [`AlterVariant::React`] even when
    /// the module does not declare it.
    #[must_use]
    pub fn supports(&self, variant: AlterVariant) -> bool {
        self.module.variants().contains(&variant)
            || (variant == AlterVariant::React && self.component.is_some())
    }

    /// Resolve and remember the fallback chain for `output_type`.
    pub fn output_type_functions(&mut self, output_type: OutputType) -> &'static [AlterVariant] {
        let chain = output_type.fallback_chain();
        self.chain = Some(chain);
        chain
    }

    /// Currently resolved chain, if any.
    #[must_use]
    pub fn chain(&self) -> Option<&'static [AlterVariant]> {
        self.chain
    }

    /// Build the alteration for `output_type`.
    ///
    /// Runs the first variant of the fallback chain that the module
    /// implements.
    ///
    /// # Errors
    ///
    /// Propagates module errors; returns [`StepModuleError::NoAlterationVariant`]
    /// if no variant of the chain is implemented and
    /// [`StepModuleError::MissingComponentRenderer`] if the component variant
    /// was selected without a registered renderer.
    pub fn alter_step(&mut self, output_type: OutputType) -> Result<Alteration, StepModuleError> {
        let chain = self.output_type_functions(output_type);
        let variant = chain
            .iter()
            .copied()
            .find(|variant| self.supports(*variant))
            .ok_or_else(|| StepModuleError::NoAlterationVariant {
                key: self.key(),
                output_type: output_type.to_string(),
                tried: chain
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        tracing::debug!(
            key = self.key(),
            %output_type,
            %variant,
            "Selected alteration variant"
        );

        let transform = cached_transform(&mut self.transform, chain_family(chain));
        let ctx = AlterContext::new(variant, transform);

        if variant == AlterVariant::React {
            let render = self
                .component
                .ok_or(StepModuleError::MissingComponentRenderer {
                    key: self.module.key(),
                })?;
            return render(self.module.as_ref(), &ctx);
        }

        self.module.alter_step(variant, &ctx)
    }

    /// Transform author text for the format family of the resolved chain.
    ///
    /// The engine is created on first use and rebuilt only when a later
    /// output type switches family.
    ///
    /// # Errors
    ///
    /// Returns [`StepModuleError::ChainNotResolved`] if no output type has
    /// been resolved yet.
    pub fn transform(&mut self, text: &str) -> Result<Vec<Segment>, StepModuleError> {
        let chain = self
            .chain
            .ok_or(StepModuleError::ChainNotResolved { key: self.key() })?;
        Ok(cached_transform(&mut self.transform, chain_family(chain)).transform(text))
    }
}

/// Format family implied by a chain: that of its most specific variant.
fn chain_family(chain: &[AlterVariant]) -> TransformFormat {
    chain
        .first()
        .map_or(TransformFormat::Text, |variant| variant.family())
}

fn cached_transform(slot: &mut Option<TextTransform>, format: TransformFormat) -> &TextTransform {
    if slot.as_ref().is_some_and(|t| t.format() != format) {
        *slot = None;
    }
    slot.get_or_insert_with(|| TextTransform::new(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlterationType, DirectiveValue, StepModuleType};
    use pretty_assertions::assert_eq;
    use stepdoc_transform::{DocxRun, Element};

    /// Minimal module: base and docx variants, optional component view.
    #[derive(Debug)]
    struct Marker {
        text: String,
    }

    impl StepModule for Marker {
        fn key(&self) -> &'static str {
            Self::KEY
        }

        fn variants(&self) -> &'static [AlterVariant] {
            Self::VARIANTS
        }

        fn definition(&self) -> Directive {
            Directive::scalar(Self::KEY, self.text.clone())
        }

        fn alter_step(
            &self,
            variant: AlterVariant,
            ctx: &AlterContext<'_>,
        ) -> Result<Alteration, StepModuleError> {
            match variant {
                AlterVariant::Docx => Ok(Alteration::new(
                    AlterationType::Overwrite,
                    ctx.transform(&self.text),
                )),
                _ => Ok(Alteration::new(AlterationType::Append, self.text.as_str())),
            }
        }
    }

    impl StepModuleType for Marker {
        const KEY: &'static str = "marker";
        const VARIANTS: &'static [AlterVariant] =
            &[AlterVariant::Docx, AlterVariant::React, AlterVariant::Base];

        fn from_directive(value: &DirectiveValue) -> Result<Self, StepModuleError> {
            match value {
                DirectiveValue::Scalar(text) => Ok(Self { text: text.clone() }),
                DirectiveValue::Mapping(_) => unreachable!(),
            }
        }
    }

    fn render_marker(
        module: &dyn StepModule,
        _ctx: &AlterContext<'_>,
    ) -> Result<Alteration, StepModuleError> {
        let marker = crate::downcast_module::<Marker>(module)?;
        Ok(Alteration::new(
            AlterationType::Append,
            stepdoc_transform::Segment::from(Element::new("Marker").text(marker.text.clone())),
        ))
    }

    fn marker(text: &str, component: Option<ComponentRenderer>) -> StepModuleInstance {
        StepModuleInstance::new(Box::new(Marker { text: text.to_owned() }), component)
    }

    #[test]
    fn test_chain_cached_on_instance() {
        let mut instance = marker("GO", None);
        assert_eq!(instance.chain(), None);
        let chain = instance.output_type_functions(OutputType::EvaDocx);
        assert_eq!(chain, &[AlterVariant::EvaDocx, AlterVariant::Docx, AlterVariant::Base]);
        assert_eq!(instance.chain(), Some(chain));
    }

    #[test]
    fn test_falls_back_to_docx_for_eva_docx() {
        let mut instance = marker("GO", None);
        let alteration = instance.alter_step(OutputType::EvaDocx).unwrap();
        assert_eq!(alteration.kind(), AlterationType::Overwrite);
        assert_eq!(
            alteration.content(),
            &[stepdoc_transform::Segment::from(DocxRun::new("GO").bold().color("000000"))]
        );
    }

    #[test]
    fn test_falls_back_to_base_for_html() {
        let mut instance = marker("GO", None);
        let alteration = instance.alter_step(OutputType::EvaHtml).unwrap();
        assert_eq!(alteration.kind(), AlterationType::Append);
        assert_eq!(alteration.plain_text(), "GO");
    }

    #[test]
    fn test_component_renderer_used_for_react() {
        let mut instance = marker("hello", Some(render_marker));
        let alteration = instance.alter_step(OutputType::React).unwrap();
        assert_eq!(alteration.plain_text(), "hello");
        assert!(alteration.content()[0].is_rich());
    }

    #[test]
    fn test_missing_component_renderer() {
        let mut instance = marker("hello", None);
        let err = instance.alter_step(OutputType::React).unwrap_err();
        assert!(matches!(err, StepModuleError::MissingComponentRenderer { key: "marker" }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_transform_before_chain_fails() {
        let mut instance = marker("x", None);
        let err = instance.transform("{{CHECK}}").unwrap_err();
        assert!(matches!(err, StepModuleError::ChainNotResolved { .. }));
    }

    #[test]
    fn test_transform_follows_chain_family() {
        let mut instance = marker("x", None);
        instance.output_type_functions(OutputType::Text);
        assert_eq!(
            instance.transform("{{CHECK}}").unwrap(),
            vec![stepdoc_transform::Segment::literal("✓")]
        );

        instance.output_type_functions(OutputType::Docx);
        assert_eq!(
            instance.transform("{{CHECK}}").unwrap(),
            vec![stepdoc_transform::Segment::from(
                DocxRun::new("✓").font("Segoe UI Symbol")
            )]
        );
    }

    #[test]
    fn test_every_output_type_yields_valid_alteration() {
        for output in OutputType::ALL {
            let mut instance = marker("x", Some(render_marker));
            let alteration = instance.alter_step(output).unwrap();
            assert!(matches!(
                alteration.kind(),
                AlterationType::Append | AlterationType::Prepend | AlterationType::Overwrite
            ));
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl StepModule for Broken {
        fn key(&self) -> &'static str {
            "broken"
        }

        fn variants(&self) -> &'static [AlterVariant] {
            &[AlterVariant::Html]
        }

        fn definition(&self) -> Directive {
            Directive::scalar("broken", "")
        }

        fn alter_step(
            &self,
            _variant: AlterVariant,
            _ctx: &AlterContext<'_>,
        ) -> Result<Alteration, StepModuleError> {
            Ok(Alteration::new(AlterationType::Append, ""))
        }
    }

    fn render_broken(
        _module: &dyn StepModule,
        _ctx: &AlterContext<'_>,
    ) -> Result<Alteration, StepModuleError> {
        Ok(Alteration::new(
            AlterationType::Append,
            stepdoc_transform::Segment::from(Element::new("Broken")),
        ))
    }

    #[test]
    fn test_injected_renderer_adds_react() {
        let mut instance = StepModuleInstance::new(Box::new(Broken), Some(render_broken));
        assert!(instance.supports(AlterVariant::React));
        let alteration = instance.alter_step(OutputType::React).unwrap();
        assert!(alteration.content()[0].is_rich());
    }

    #[test]
    fn test_no_variant_in_chain() {
        let mut instance = StepModuleInstance::new(Box::new(Broken), None);
        let err = instance.alter_step(OutputType::Docx).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            r#"broken: no alteration variant implemented for output type "docx" (tried: Docx, Base)"#
        );
    }
}
