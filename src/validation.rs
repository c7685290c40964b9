//! Link validation.
//!
//! A link runs `from` a source pin `to` a receiving pin. Validators look at
//! both pins and the links already in the graph and either accept the pair or
//! say why not. Rules compose with [`CompositeValidator`] or
//! [`ValidationResult::and`].

use crate::link::Link;
use crate::pin::{Pin, PinAddress, PinDirection};

/// Outcome of a validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// First failure wins.
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(error) => Err(error),
        }
    }
}

/// Why a link was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    SameNode(i32),
    IncompatibleDirection {
        receiver: PinDirection,
        source: PinDirection,
    },
    UntypedMismatch,
    TypeMismatch { expected: String, found: String },
    DuplicateLink,
    PinNotFound(PinAddress),
    Custom(String),
}

// Implemented by hand: `thiserror` would treat the `source` field as the error cause.
impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::SameNode(id) => write!(f, "cannot link pins on the same node ({id})"),
            ValidationError::IncompatibleDirection { receiver, source } => {
                write!(f, "a {receiver:?} pin cannot receive from a {source:?} pin")
            }
            ValidationError::UntypedMismatch => write!(f, "cannot link a flow pin to a value pin"),
            ValidationError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            ValidationError::DuplicateLink => write!(f, "link already exists"),
            ValidationError::PinNotFound(addr) => write!(f, "pin {addr} not found"),
            ValidationError::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A rule deciding whether `from` may be linked into `to`.
pub trait LinkValidator {
    fn validate(&self, from: &Pin, to: &Pin, links: &[Link]) -> ValidationResult;
}

impl<F> LinkValidator for F
where
    F: Fn(&Pin, &Pin, &[Link]) -> ValidationResult,
{
    fn validate(&self, from: &Pin, to: &Pin, links: &[Link]) -> ValidationResult {
        self(from, to, links)
    }
}

/// The pin rules: different owners, output into input, matching types.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinCompatibility;

impl LinkValidator for PinCompatibility {
    fn validate(&self, from: &Pin, to: &Pin, _links: &[Link]) -> ValidationResult {
        to.check_link_to(from)
    }
}

/// Refuses a second link with the same endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDuplicateLinks;

impl LinkValidator for NoDuplicateLinks {
    fn validate(&self, from: &Pin, to: &Pin, links: &[Link]) -> ValidationResult {
        let candidate = Link::new(from.address(), to.address());
        if links.contains(&candidate) {
            ValidationResult::Invalid(ValidationError::DuplicateLink)
        } else {
            ValidationResult::Valid
        }
    }
}

/// All rules must pass; checked in insertion order, stopping at the first failure.
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn LinkValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<V: LinkValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl LinkValidator for CompositeValidator {
    fn validate(&self, from: &Pin, to: &Pin, links: &[Link]) -> ValidationResult {
        for validator in &self.validators {
            let result = validator.validate(from, to, links);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

impl std::fmt::Debug for CompositeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeValidator")
            .field("validators", &self.validators.len())
            .finish()
    }
}

pub fn validate_link<V: LinkValidator + ?Sized>(
    from: &Pin,
    to: &Pin,
    links: &[Link],
    validator: &V,
) -> ValidationResult {
    validator.validate(from, to, links)
}
