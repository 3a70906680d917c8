//! `apfr.install`: install an Articulating Portable Foot Restraint.
//!
//! ```yaml
//! apfr.install:
//!   wif: SSRMS
//!   setting: 6, PP, F, 6
//! ```
//!
//! The scalar form lists the WIF first: `apfr.install: P6 WIF 3, 6, PP, F, 6`.

pub(crate) mod component;

use std::sync::LazyLock;

use regex::Regex;
use stepdoc_transform::{DocxRun, Segment, escape_html};

use crate::directive::{check_named_args, split_positional, validate_choice};
use crate::error::expected_list;
use crate::module::{AlterContext, StepModule, StepModuleType};
use crate::{AlterVariant, Alteration, AlterationType, Directive, DirectiveValue, StepModuleError};

const CLOCK_VALUES: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"];
const PITCH_VALUES: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "PP",
];
const ROLL_VALUES: &[&str] = &["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];
const YAW_VALUES: &[&str] = CLOCK_VALUES;

/// Structural elements that carry worksite interfaces.
const WIF_LOCATIONS: &[&str] = &[
    "P1", "P3", "P4", "P5", "P6", "S0", "S1", "S3", "S4", "S5", "S6", "Z1", "LAB", "NODE1",
    "NODE2", "NODE3", "A/L", "JEM", "COL", "PMA1", "PMA2", "PMA3", "FGB", "SM",
];

/// Robotic arm, accepted in place of a WIF.
const SSRMS: &str = "SSRMS";

static WIF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+) WIF ([1-9][0-9]?)$").expect("invalid WIF regex"));

/// Validated `apfr.install` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApfrInstall {
    wif: String,
    clock: String,
    pitch: String,
    roll: String,
    yaw: String,
}

impl ApfrInstall {
    /// Validate a WIF and a `clock, pitch, roll, yaw` setting.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid value and its category.
    pub fn new(wif: &str, setting: &str) -> Result<Self, StepModuleError> {
        let parts = split_positional(setting);
        let [clock, pitch, roll, yaw] = parts.as_slice() else {
            return Err(StepModuleError::InvalidDirective {
                key: Self::KEY.to_owned(),
                reason: format!(
                    "setting \"{setting}\" must have four components: clock, pitch, roll, yaw"
                ),
            });
        };
        Self::from_parts(wif, clock, pitch, roll, yaw)
    }

    fn from_parts(
        wif: &str,
        clock: &str,
        pitch: &str,
        roll: &str,
        yaw: &str,
    ) -> Result<Self, StepModuleError> {
        Ok(Self {
            wif: validate_wif(wif.trim())?,
            clock: validate(clock, "clock", CLOCK_VALUES)?,
            pitch: validate(pitch, "pitch", PITCH_VALUES)?,
            roll: validate(roll, "roll", ROLL_VALUES)?,
            yaw: validate(yaw, "yaw", YAW_VALUES)?,
        })
    }

    /// Worksite interface or `SSRMS`.
    #[must_use]
    pub fn wif(&self) -> &str {
        &self.wif
    }

    /// Clock position.
    #[must_use]
    pub fn clock(&self) -> &str {
        &self.clock
    }

    /// Pitch setting.
    #[must_use]
    pub fn pitch(&self) -> &str {
        &self.pitch
    }

    /// Roll setting.
    #[must_use]
    pub fn roll(&self) -> &str {
        &self.roll
    }

    /// Yaw setting.
    #[must_use]
    pub fn yaw(&self) -> &str {
        &self.yaw
    }

    /// Setting as written in procedures: `6,PP,F,6`.
    #[must_use]
    pub fn setting(&self) -> String {
        format!("{},{},{},{}", self.clock, self.pitch, self.roll, self.yaw)
    }

    /// One-line summary: `Install APFR in SSRMS [6,PP,F,6]`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Install APFR in {} [{}]", self.wif, self.setting())
    }

    fn alter_step_base(&self) -> Alteration {
        Alteration::new(AlterationType::Append, self.summary())
    }

    fn alter_step_docx(&self) -> Alteration {
        Alteration::new(
            AlterationType::Append,
            vec![
                Segment::from(DocxRun::new("Install APFR in ")),
                Segment::from(DocxRun::new(self.wif.as_str()).bold()),
                Segment::from(DocxRun::new(" ")),
                Segment::from(DocxRun::new(format!("[{}]", self.setting())).bold()),
            ],
        )
    }

    fn alter_step_html(&self) -> Alteration {
        Alteration::new(
            AlterationType::Append,
            Segment::markup(format!(
                r#"Install APFR in <strong>{}</strong> <span class="apfr-setting">[{}]</span>"#,
                escape_html(&self.wif),
                escape_html(&self.setting())
            )),
        )
    }
}

impl StepModule for ApfrInstall {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn variants(&self) -> &'static [AlterVariant] {
        Self::VARIANTS
    }

    fn definition(&self) -> Directive {
        Directive::mapping(
            Self::KEY,
            [("wif", self.wif.clone()), ("setting", self.setting())],
        )
    }

    fn alter_step(
        &self,
        variant: AlterVariant,
        _ctx: &AlterContext<'_>,
    ) -> Result<Alteration, StepModuleError> {
        Ok(match variant {
            AlterVariant::Docx => self.alter_step_docx(),
            AlterVariant::Html => self.alter_step_html(),
            _ => self.alter_step_base(),
        })
    }
}

impl StepModuleType for ApfrInstall {
    const KEY: &'static str = "apfr.install";
    const VARIANTS: &'static [AlterVariant] = &[
        AlterVariant::Docx,
        AlterVariant::Html,
        AlterVariant::React,
        AlterVariant::Base,
    ];

    fn from_directive(value: &DirectiveValue) -> Result<Self, StepModuleError> {
        match value {
            DirectiveValue::Scalar(raw) => {
                let parts = split_positional(raw);
                let [wif, clock, pitch, roll, yaw] = parts.as_slice() else {
                    return Err(StepModuleError::InvalidDirective {
                        key: Self::KEY.to_owned(),
                        reason: format!(
                            "\"{raw}\" must have five components: wif, clock, pitch, roll, yaw"
                        ),
                    });
                };
                Self::from_parts(wif, clock, pitch, roll, yaw)
            }
            DirectiveValue::Mapping(named) => {
                check_named_args(Self::KEY, named, &["wif", "setting"])?;
                let wif = named.get("wif").ok_or(StepModuleError::MissingArgument {
                    key: Self::KEY,
                    category: "wif",
                })?;
                let setting = named.get("setting").ok_or(StepModuleError::MissingArgument {
                    key: Self::KEY,
                    category: "setting",
                })?;
                Self::new(wif, setting)
            }
        }
    }
}

fn validate(
    value: &str,
    category: &'static str,
    allowed: &[&str],
) -> Result<String, StepModuleError> {
    validate_choice(ApfrInstall::KEY, category, value, allowed)
}

fn validate_wif(wif: &str) -> Result<String, StepModuleError> {
    if wif == SSRMS {
        return Ok(wif.to_owned());
    }
    let valid = WIF_PATTERN
        .captures(wif)
        .is_some_and(|caps| WIF_LOCATIONS.contains(&&caps[1]));
    if valid {
        Ok(wif.to_owned())
    } else {
        Err(StepModuleError::InvalidWif {
            key: ApfrInstall::KEY,
            value: wif.to_owned(),
            locations: expected_list(WIF_LOCATIONS),
        })
    }
}
