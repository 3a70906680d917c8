//! Directive key to module mapping.

use std::sync::LazyLock;

use serde_yaml::Value;

use crate::module::{ComponentRenderer, StepModule, StepModuleType};
use crate::{
    AlterVariant, ApfrInstall, Directive, DirectiveValue, PgtSet, StepModuleError,
    StepModuleInstance, apfr_install, pgt_set,
};

/// Constructs a boxed module from a directive value.
pub type ConstructFn = fn(&DirectiveValue) -> Result<Box<dyn StepModule>, StepModuleError>;

static STANDARD: LazyLock<ModuleRegistry> = LazyLock::new(|| {
    ModuleRegistry::builder()
        .register::<ApfrInstall>(Some(apfr_install::component::render))
        .register::<PgtSet>(Some(pgt_set::component::render))
        .build()
});

/// Registered module type.
#[derive(Clone, Copy, Debug)]
pub struct ModuleEntry {
    key: &'static str,
    variants: &'static [AlterVariant],
    construct: ConstructFn,
    component: Option<ComponentRenderer>,
}

impl ModuleEntry {
    /// Directive key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Declared variants.
    #[must_use]
    pub fn variants(&self) -> &'static [AlterVariant] {
        self.variants
    }

    /// Component renderer, if one is registered.
    #[must_use]
    pub fn component(&self) -> Option<ComponentRenderer> {
        self.component
    }

    /// Parse `value` and wrap the module in an instance.
    ///
    /// # Errors
    ///
    /// Returns the module's validation error.
    pub fn instantiate(&self, value: &DirectiveValue) -> Result<StepModuleInstance, StepModuleError> {
        let module = (self.construct)(value)?;
        tracing::debug!(key = self.key, "Instantiated step module");
        Ok(StepModuleInstance::new(module, self.component))
    }
}

/// Maps directive keys to module constructors and component renderers.
///
/// # Example
///
/// ```
/// use stepdoc_modules::{Directive, ModuleRegistry, OutputType};
///
/// let registry = ModuleRegistry::standard();
/// let directive = Directive::scalar("apfr.install", "SSRMS, 6, PP, F, 6");
/// let mut instance = registry.instantiate(&directive).unwrap();
///
/// let alteration = instance.alter_step(OutputType::Text).unwrap();
/// assert_eq!(alteration.plain_text(), "Install APFR in SSRMS [6,PP,F,6]");
/// ```
#[derive(Debug)]
pub struct ModuleRegistry {
    entries: Vec<ModuleEntry>,
}

impl ModuleRegistry {
    /// Registry with every built-in module, built once per process.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Start an empty registry.
    #[must_use]
    pub fn builder() -> ModuleRegistryBuilder {
        ModuleRegistryBuilder::default()
    }

    /// Entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ModuleEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Whether `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    /// Build an instance for `directive`.
    ///
    /// # Errors
    ///
    /// Returns [`StepModuleError::UnknownDirective`] for unregistered keys and
    /// the module's validation error otherwise.
    pub fn instantiate(&self, directive: &Directive) -> Result<StepModuleInstance, StepModuleError> {
        let entry = self
            .get(&directive.key)
            .ok_or_else(|| StepModuleError::UnknownDirective(directive.key.clone()))?;
        entry.instantiate(&directive.value)
    }

    /// Build instances for every registered directive in a step.
    ///
    /// Keys are visited in the step's order; keys without a module are
    /// skipped. Steps that are not mappings hold no directives.
    ///
    /// # Errors
    ///
    /// Returns the first directive error encountered.
    pub fn instantiate_step(&self, step: &Value) -> Result<Vec<StepModuleInstance>, StepModuleError> {
        let Value::Mapping(mapping) = step else {
            return Ok(Vec::new());
        };

        let mut instances = Vec::new();
        for (key, raw) in mapping {
            let Some(entry) = key.as_str().and_then(|key| self.get(key)) else {
                continue;
            };
            let value = DirectiveValue::from_yaml(entry.key, raw)?;
            instances.push(entry.instantiate(&value)?);
        }
        Ok(instances)
    }
}

/// Builder for [`ModuleRegistry`].
#[derive(Debug, Default)]
pub struct ModuleRegistryBuilder {
    entries: Vec<ModuleEntry>,
}

impl ModuleRegistryBuilder {
    /// Register module type `T` with an optional component renderer.
    ///
    /// A later registration for the same key replaces the earlier one.
    ///
    /// # Panics
    ///
    /// Panics if `T::VARIANTS` does not include [`AlterVariant::Base`].
    #[must_use]
    pub fn register<T: StepModuleType>(mut self, component: Option<ComponentRenderer>) -> Self {
        assert!(
            T::VARIANTS.contains(&AlterVariant::Base),
            "step module `{}` must implement the Base variant",
            T::KEY
        );

        let entry = ModuleEntry {
            key: T::KEY,
            variants: T::VARIANTS,
            construct: construct::<T>,
            component,
        };
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == T::KEY) {
            tracing::warn!(key = T::KEY, "Replacing registered step module");
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        self
    }

    /// Finish the registry.
    #[must_use]
    pub fn build(self) -> ModuleRegistry {
        ModuleRegistry {
            entries: self.entries,
        }
    }
}

fn construct<T: StepModuleType>(
    value: &DirectiveValue,
) -> Result<Box<dyn StepModule>, StepModuleError> {
    Ok(Box::new(T::from_directive(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::AlterContext;
    use crate::{Alteration, AlterationType, OutputType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_keys() {
        let registry = ModuleRegistry::standard();
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["apfr.install", "pgt.set"]
        );
        assert!(registry.contains("pgt.set"));
        assert!(!registry.contains("pgt"));
    }

    #[test]
    fn test_standard_entries_have_components() {
        for entry in ModuleRegistry::standard().entries() {
            assert!(entry.variants().contains(&AlterVariant::Base), "{}", entry.key());
            assert!(entry.component().is_some(), "{}", entry.key());
        }
    }

    #[test]
    fn test_unknown_directive() {
        let err = ModuleRegistry::standard()
            .instantiate(&Directive::scalar("torque.set", "x"))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"unknown directive "torque.set""#);
    }

    #[test]
    fn test_instantiate_step_in_key_order() {
        let step: Value = serde_yaml::from_str(
            "title: Prepare tools\npgt.set: B7, CW2, 2.5\napfr.install: SSRMS, 6, PP, F, 6\n",
        )
        .unwrap();
        let instances = ModuleRegistry::standard().instantiate_step(&step).unwrap();
        let keys: Vec<_> = instances.iter().map(StepModuleInstance::key).collect();
        assert_eq!(keys, vec!["pgt.set", "apfr.install"]);
    }

    #[test]
    fn test_instantiate_step_fails_fast() {
        let step: Value =
            serde_yaml::from_str("apfr.install: SSRMS, 13, PP, F, 6\npgt.set: B7, CW2\n").unwrap();
        let err = ModuleRegistry::standard()
            .instantiate_step(&step)
            .unwrap_err();
        assert!(err.to_string().contains("clock"));
    }

    #[test]
    fn test_text_step_has_no_directives() {
        let step = Value::String("Egress airlock".to_owned());
        let instances = ModuleRegistry::standard().instantiate_step(&step).unwrap();
        assert!(instances.is_empty());
    }

    #[test]
    fn test_every_standard_module_renders_every_output() {
        let step: Value =
            serde_yaml::from_str("pgt.set: B7, CW2, 2.5, socket\napfr.install: SSRMS, 6, PP, F, 6\n")
                .unwrap();
        for mut instance in ModuleRegistry::standard().instantiate_step(&step).unwrap() {
            for output in OutputType::ALL {
                let alteration = instance.alter_step(output).unwrap();
                assert!(!alteration.content().is_empty(), "{} {output}", instance.key());
            }
        }
    }

    #[derive(Debug)]
    struct NoBase;

    impl StepModule for NoBase {
        fn key(&self) -> &'static str {
            Self::KEY
        }

        fn variants(&self) -> &'static [AlterVariant] {
            Self::VARIANTS
        }

        fn definition(&self) -> Directive {
            Directive::scalar(Self::KEY, "")
        }

        fn alter_step(
            &self,
            _variant: AlterVariant,
            _ctx: &AlterContext<'_>,
        ) -> Result<Alteration, StepModuleError> {
            Ok(Alteration::new(AlterationType::Append, ""))
        }
    }

    impl StepModuleType for NoBase {
        const KEY: &'static str = "no.base";
        const VARIANTS: &'static [AlterVariant] = &[AlterVariant::Html];

        fn from_directive(_value: &DirectiveValue) -> Result<Self, StepModuleError> {
            Ok(Self)
        }
    }

    #[test]
    #[should_panic(expected = "must implement the Base variant")]
    fn test_register_without_base_panics() {
        let _ = ModuleRegistry::builder().register::<NoBase>(None);
    }

    #[test]
    fn test_duplicate_registration_replaces() {
        let registry = ModuleRegistry::builder()
            .register::<PgtSet>(None)
            .register::<PgtSet>(Some(pgt_set::component::render))
            .build();
        assert_eq!(registry.entries().len(), 1);
        assert!(registry.get("pgt.set").and_then(ModuleEntry::component).is_some());
    }
}
