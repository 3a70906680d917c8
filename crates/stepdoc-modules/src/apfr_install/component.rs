//! Component view for `apfr.install`.

use stepdoc_transform::{Element, Segment};

use super::ApfrInstall;
use crate::module::{AlterContext, StepModule, downcast_module};
use crate::{Alteration, AlterationType, StepModuleError};

/// Render an [`ApfrInstall`] as an `ApfrInstall` component.
pub(crate) fn render(
    module: &dyn StepModule,
    _ctx: &AlterContext<'_>,
) -> Result<Alteration, StepModuleError> {
    let apfr = downcast_module::<ApfrInstall>(module)?;
    let element = Element::new("ApfrInstall")
        .prop("wif", apfr.wif())
        .prop("clock", apfr.clock())
        .prop("pitch", apfr.pitch())
        .prop("roll", apfr.roll())
        .prop("yaw", apfr.yaw())
        .text(apfr.summary());
    Ok(Alteration::new(AlterationType::Append, Segment::from(element)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlterVariant;
    use pretty_assertions::assert_eq;
    use stepdoc_transform::{RichNode, TextTransform, TransformFormat};

    #[test]
    fn test_render_props() {
        let module = ApfrInstall::new("SSRMS", "6, PP, F, 6").unwrap();
        let transform = TextTransform::new(TransformFormat::React);
        let ctx = AlterContext::new(AlterVariant::React, &transform);

        let alteration = render(&module, &ctx).unwrap();
        assert_eq!(alteration.kind(), AlterationType::Append);

        let [Segment::Rich(RichNode::Element(element))] = alteration.content() else {
            panic!("expected a single element");
        };
        assert_eq!(element.tag, "ApfrInstall");
        assert_eq!(element.get("wif"), Some("SSRMS"));
        assert_eq!(element.get("pitch"), Some("PP"));
        assert_eq!(element.plain_text(), "Install APFR in SSRMS [6,PP,F,6]");
    }
}
