//! `pgt.set`: Pistol Grip Tool settings.
//!
//! Positional form: `torque, speed[, mtl or socket][, socket]`
//!
//! ```yaml
//! pgt.set: B7, CW2, 2.5, 7/16 x 18" Wobble Socket
//! ```
//!
//! The third argument is ambiguous. A value shaped like `12.5` is the MTL
//! (maximum torque limit) collar and must be in its table; anything else is
//! socket text. A fourth argument is always socket text.

pub(crate) mod component;

use std::sync::LazyLock;

use regex::Regex;
use stepdoc_transform::{DocxRun, Segment, escape_html};

use crate::directive::{check_named_args, split_positional, validate_choice};
use crate::module::{AlterContext, StepModule, StepModuleType};
use crate::{AlterVariant, Alteration, AlterationType, Directive, DirectiveValue, StepModuleError};

const TORQUE_COLLAR_VALUES: &[&str] = &[
    "A1", "A2", "A3", "A4", "A5", "A6", "A7", "B1", "B2", "B3", "B4", "B5", "B6", "B7", "B8",
    "B9", "B10", "B11", "B12", "B13", "B14", "B15",
];
const SPEED_COLLAR_VALUES: &[&str] = &["CW1", "CW2", "CW3", "CCW1", "CCW2", "CCW3"];
const MTL_COLLAR_VALUES: &[&str] = &["2.5", "7.0", "12.0", "15.5", "18.5", "25.5", "38.5"];

const MAX_ARGS: usize = 4;

static MTL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}\.[0-9]$").expect("invalid MTL regex"));

/// Validated `pgt.set` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgtSet {
    torque_collar: String,
    speed_collar: String,
    mtl_collar: Option<String>,
    socket: Option<String>,
}

impl PgtSet {
    /// Parse the positional form.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or invalid collars, an MTL-shaped value
    /// outside the MTL table, a second socket, or more than four arguments.
    pub fn parse(raw: &str) -> Result<Self, StepModuleError> {
        let mut parts = split_positional(raw);
        // A trailing comma leaves one empty component.
        if parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
        if parts.len() > MAX_ARGS {
            return Err(StepModuleError::TooManyArguments {
                key: Self::KEY,
                max: MAX_ARGS,
                count: parts.len(),
                raw: raw.to_owned(),
            });
        }

        let arg = |idx: usize| parts.get(idx).copied().filter(|s| !s.is_empty());

        let torque_collar = required(arg(0), "torque collar", TORQUE_COLLAR_VALUES)?;
        let speed_collar = required(arg(1), "speed collar", SPEED_COLLAR_VALUES)?;

        let mut mtl_collar = None;
        let mut socket = None;
        if let Some(third) = arg(2) {
            if MTL_SHAPE.is_match(third) {
                mtl_collar = Some(validate_choice(
                    Self::KEY,
                    "MTL collar",
                    third,
                    MTL_COLLAR_VALUES,
                )?);
            } else {
                socket = Some(third.to_owned());
            }
        }
        if let Some(fourth) = arg(3) {
            if let Some(existing) = socket {
                return Err(StepModuleError::DuplicateSocket {
                    key: Self::KEY,
                    existing,
                    value: fourth.to_owned(),
                });
            }
            socket = Some(fourth.to_owned());
        }

        Ok(Self {
            torque_collar,
            speed_collar,
            mtl_collar,
            socket,
        })
    }

    /// Torque collar setting.
    #[must_use]
    pub fn torque_collar(&self) -> &str {
        &self.torque_collar
    }

    /// Speed collar setting.
    #[must_use]
    pub fn speed_collar(&self) -> &str {
        &self.speed_collar
    }

    /// MTL collar setting, if given.
    #[must_use]
    pub fn mtl_collar(&self) -> Option<&str> {
        self.mtl_collar.as_deref()
    }

    /// Socket or equipment text, if given.
    #[must_use]
    pub fn socket(&self) -> Option<&str> {
        self.socket.as_deref()
    }

    /// Collar settings: `B7, CW2, 2.5`.
    #[must_use]
    pub fn setting(&self) -> String {
        let mut setting = format!("{}, {}", self.torque_collar, self.speed_collar);
        if let Some(mtl) = &self.mtl_collar {
            setting.push_str(", ");
            setting.push_str(mtl);
        }
        setting
    }

    /// One-line summary: `PGT [B7, CW2, 2.5] - 7/16" Socket`.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.socket {
            Some(socket) => format!("PGT [{}] - {socket}", self.setting()),
            None => format!("PGT [{}]", self.setting()),
        }
    }

    fn alter_step_base(&self) -> Alteration {
        Alteration::new(AlterationType::Prepend, self.summary())
    }

    fn alter_step_eva_docx(&self, ctx: &AlterContext<'_>) -> Alteration {
        let mut content = vec![
            Segment::from(DocxRun::new("PGT").bold()),
            Segment::from(DocxRun::new(format!(" [{}]", self.setting()))),
        ];
        if let Some(socket) = &self.socket {
            content.push(Segment::from(DocxRun::new(" - ")));
            content.extend(ctx.transform(socket));
        }
        Alteration::new(AlterationType::Prepend, content)
    }

    fn alter_step_html(&self, ctx: &AlterContext<'_>) -> Alteration {
        let mut content = vec![Segment::markup(format!(
            r#"<strong>PGT</strong> <span class="pgt-setting">[{}]</span>"#,
            escape_html(&self.setting())
        ))];
        if let Some(socket) = &self.socket {
            content.push(Segment::literal(" - "));
            content.extend(ctx.transform(socket));
        }
        Alteration::new(AlterationType::Prepend, content)
    }
}

impl StepModule for PgtSet {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn variants(&self) -> &'static [AlterVariant] {
        Self::VARIANTS
    }

    fn definition(&self) -> Directive {
        let mut args = vec![
            ("torqueCollar", self.torque_collar.clone()),
            ("speedCollar", self.speed_collar.clone()),
        ];
        if let Some(mtl) = &self.mtl_collar {
            args.push(("mtlCollar", mtl.clone()));
        }
        if let Some(socket) = &self.socket {
            args.push(("socket", socket.clone()));
        }
        Directive::mapping(Self::KEY, args)
    }

    fn alter_step(
        &self,
        variant: AlterVariant,
        ctx: &AlterContext<'_>,
    ) -> Result<Alteration, StepModuleError> {
        Ok(match variant {
            AlterVariant::EvaDocx => self.alter_step_eva_docx(ctx),
            AlterVariant::Html => self.alter_step_html(ctx),
            _ => self.alter_step_base(),
        })
    }
}

impl StepModuleType for PgtSet {
    const KEY: &'static str = "pgt.set";
    const VARIANTS: &'static [AlterVariant] = &[
        AlterVariant::EvaDocx,
        AlterVariant::Html,
        AlterVariant::React,
        AlterVariant::Base,
    ];

    fn from_directive(value: &DirectiveValue) -> Result<Self, StepModuleError> {
        match value {
            DirectiveValue::Scalar(raw) => Self::parse(raw),
            DirectiveValue::Mapping(named) => {
                check_named_args(
                    Self::KEY,
                    named,
                    &["torqueCollar", "speedCollar", "mtlCollar", "socket"],
                )?;
                let arg = |name: &str| {
                    named
                        .get(name)
                        .map(|v| v.trim())
                        .filter(|v| !v.is_empty())
                };
                let torque_collar =
                    required(arg("torqueCollar"), "torque collar", TORQUE_COLLAR_VALUES)?;
                let speed_collar =
                    required(arg("speedCollar"), "speed collar", SPEED_COLLAR_VALUES)?;
                let mtl_collar = arg("mtlCollar")
                    .map(|mtl| validate_choice(Self::KEY, "MTL collar", mtl, MTL_COLLAR_VALUES))
                    .transpose()?;
                Ok(Self {
                    torque_collar,
                    speed_collar,
                    mtl_collar,
                    socket: arg("socket").map(str::to_owned),
                })
            }
        }
    }
}

fn required(
    value: Option<&str>,
    category: &'static str,
    allowed: &[&str],
) -> Result<String, StepModuleError> {
    let value = value.ok_or(StepModuleError::MissingArgument {
        key: PgtSet::KEY,
        category,
    })?;
    validate_choice(PgtSet::KEY, category, value, allowed)
}
