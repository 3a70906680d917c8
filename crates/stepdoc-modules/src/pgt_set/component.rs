//! Component view for `pgt.set`.

use stepdoc_transform::{Element, RichNode, Segment};

use super::PgtSet;
use crate::module::{AlterContext, StepModule, downcast_module};
use crate::{Alteration, AlterationType, StepModuleError};

/// Render a [`PgtSet`] as a `PgtSet` component.
///
/// Socket text goes through the transform engine so symbols inside it become
/// nested elements.
pub(crate) fn render(
    module: &dyn StepModule,
    ctx: &AlterContext<'_>,
) -> Result<Alteration, StepModuleError> {
    let pgt = downcast_module::<PgtSet>(module)?;
    let mut element = Element::new("PgtSet")
        .prop("torqueCollar", pgt.torque_collar())
        .prop("speedCollar", pgt.speed_collar());
    if let Some(mtl) = pgt.mtl_collar() {
        element = element.prop("mtlCollar", mtl);
    }

    let mut socket = Element::new("span").prop("className", "pgt-socket");
    if let Some(text) = pgt.socket() {
        for segment in ctx.transform(text) {
            socket = match segment {
                Segment::Literal(literal) => socket.text(literal),
                Segment::Rich(RichNode::Element(child)) => socket.child(child),
                other => socket.text(other.plain_text()),
            };
        }
        element = element
            .text(format!("PGT [{}] - ", pgt.setting()))
            .child(socket);
    } else {
        element = element.text(format!("PGT [{}]", pgt.setting()));
    }

    Ok(Alteration::new(AlterationType::Prepend, Segment::from(element)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlterVariant;
    use pretty_assertions::assert_eq;
    use stepdoc_transform::{TextTransform, TransformFormat};

    fn render_raw(raw: &str) -> Element {
        let module = PgtSet::parse(raw).unwrap();
        let transform = TextTransform::new(TransformFormat::React);
        let ctx = AlterContext::new(AlterVariant::React, &transform);
        let alteration = render(&module, &ctx).unwrap();
        assert_eq!(alteration.kind(), AlterationType::Prepend);
        let [Segment::Rich(RichNode::Element(element))] = alteration.content() else {
            panic!("expected a single element");
        };
        element.clone()
    }

    #[test]
    fn test_render_props() {
        let element = render_raw("B7, CW2, 2.5");
        assert_eq!(element.tag, "PgtSet");
        assert_eq!(element.get("torqueCollar"), Some("B7"));
        assert_eq!(element.get("speedCollar"), Some("CW2"));
        assert_eq!(element.get("mtlCollar"), Some("2.5"));
        assert_eq!(element.plain_text(), "PGT [B7, CW2, 2.5]");
    }

    #[test]
    fn test_socket_symbols_nested() {
        let element = render_raw("B7, CW2, {{CLOCKWISE}} socket");
        assert_eq!(element.get("mtlCollar"), None);
        assert_eq!(element.plain_text(), "PGT [B7, CW2] - ↻ socket");
    }
}
