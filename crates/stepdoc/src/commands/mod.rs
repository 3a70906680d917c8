//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod modules;
pub(crate) mod render;
pub(crate) mod transform;

pub(crate) use check::CheckArgs;
pub(crate) use modules::ModulesArgs;
pub(crate) use render::RenderArgs;
pub(crate) use transform::TransformArgs;
