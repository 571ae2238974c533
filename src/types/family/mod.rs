//! Contract-family schema descriptors.
//!
//! Every ACTUS contract family (PAM, ANN, CEC, CEG, CERTF, COLLA, STK) goes
//! through the same registration and lifecycle flow. Families only differ in
//! the shape of the terms and state structs their registries return, and in
//! which optional update events their registries emit. A [`FamilySchema`]
//! captures exactly that, so the handlers stay generic over the family.
//!
//! Field order in a schema is the ABI order of the on-chain struct: scalars
//! first, then periods, cycles and contract references.

mod ann;
mod cec;
mod ceg;
mod certf;
mod colla;
mod pam;
mod stk;

pub use ann::ANN;
pub use cec::CEC;
pub use ceg::CEG;
pub use certf::CERTF;
pub use colla::COLLA;
pub use pam::PAM;
pub use stk::STK;

/// All supported families.
pub static FAMILIES: &[&FamilySchema] = &[&ANN, &CEC, &CEG, &CERTF, &COLLA, &PAM, &STK];

/// Solidity type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Solidity enum, encoded as `uint8`.
    Enum,
    Address,
    Bytes32,
    /// Dates and counters, `uint256`.
    Uint,
    /// Amounts and rates, `int256`.
    Int,
    Bool,
}

impl FieldKind {
    pub fn sol_type(self) -> &'static str {
        match self {
            FieldKind::Enum => "uint8",
            FieldKind::Address => "address",
            FieldKind::Bytes32 => "bytes32",
            FieldKind::Uint => "uint256",
            FieldKind::Int => "int256",
            FieldKind::Bool => "bool",
        }
    }
}

/// Nested struct kinds that appear inside terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// `(uint256 i, uint8 p, bool isSet)`
    Period,
    /// `(uint256 i, uint8 p, uint8 s, bool isSet)`
    Cycle,
    /// `(bytes32 object, bytes32 object2, uint8 _type, uint8 role)`
    ContractReference,
}

impl ComponentKind {
    pub fn sol_type(self) -> &'static str {
        match self {
            ComponentKind::Period => "(uint256,uint8,bool)",
            ComponentKind::Cycle => "(uint256,uint8,uint8,bool)",
            ComponentKind::ContractReference => "(bytes32,bytes32,uint8,uint8)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// One member of a family's terms struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsField {
    Scalar(FieldSpec),
    Component {
        name: &'static str,
        kind: ComponentKind,
    },
}

impl TermsField {
    pub const fn scalar(name: &'static str, kind: FieldKind) -> Self {
        TermsField::Scalar(FieldSpec::new(name, kind))
    }

    pub const fn period(name: &'static str) -> Self {
        TermsField::Component {
            name,
            kind: ComponentKind::Period,
        }
    }

    pub const fn cycle(name: &'static str) -> Self {
        TermsField::Component {
            name,
            kind: ComponentKind::Cycle,
        }
    }

    pub const fn reference(name: &'static str) -> Self {
        TermsField::Component {
            name,
            kind: ComponentKind::ContractReference,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TermsField::Scalar(spec) => spec.name,
            TermsField::Component { name, .. } => name,
        }
    }

    fn sol_type(&self) -> &'static str {
        match self {
            TermsField::Scalar(spec) => spec.kind.sol_type(),
            TermsField::Component { kind, .. } => kind.sol_type(),
        }
    }
}

/// Shape of one contract family.
#[derive(Debug)]
pub struct FamilySchema {
    /// Family code, e.g. `"PAM"`.
    pub name: &'static str,
    pub terms: &'static [TermsField],
    pub state: &'static [FieldSpec],
    /// Registry exposes `getExtension(bytes32)`.
    pub has_extension: bool,
    /// Registry emits `UpdatedObligor`.
    pub updates_obligor: bool,
    /// Registry emits `UpdatedState` / `UpdatedFinalizedState`.
    pub updates_state: bool,
    /// Registry emits `UpdatedTerms`.
    pub updates_terms: bool,
}

impl FamilySchema {
    /// Looks a family up by its code, ignoring case.
    pub fn by_name(name: &str) -> Option<&'static FamilySchema> {
        FAMILIES
            .iter()
            .copied()
            .find(|family| family.name.eq_ignore_ascii_case(name))
    }

    /// ABI type of the terms struct, e.g. `(uint8,uint8,...,(uint256,uint8,bool))`.
    pub fn terms_abi(&self) -> String {
        tuple_of(self.terms.iter().map(TermsField::sol_type))
    }

    /// ABI type of the state struct.
    pub fn state_abi(&self) -> String {
        tuple_of(self.state.iter().map(|field| field.kind.sol_type()))
    }

    pub fn scalar_terms(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        self.terms.iter().filter_map(|field| match field {
            TermsField::Scalar(spec) => Some(spec),
            TermsField::Component { .. } => None,
        })
    }

    pub fn components(&self) -> impl Iterator<Item = (&'static str, ComponentKind)> + '_ {
        self.terms.iter().filter_map(|field| match field {
            TermsField::Component { name, kind } => Some((*name, *kind)),
            TermsField::Scalar(_) => None,
        })
    }
}

fn tuple_of<'a>(types: impl Iterator<Item = &'a str>) -> String {
    format!("({})", types.collect::<Vec<_>>().join(","))
}

/// State layout shared by PAM, CEC, CEG and CERTF.
pub(crate) static STANDARD_STATE: &[FieldSpec] = &[
    FieldSpec::new("contractPerformance", FieldKind::Enum),
    FieldSpec::new("statusDate", FieldKind::Uint),
    FieldSpec::new("nonPerformingDate", FieldKind::Uint),
    FieldSpec::new("maturityDate", FieldKind::Uint),
    FieldSpec::new("exerciseDate", FieldKind::Uint),
    FieldSpec::new("terminationDate", FieldKind::Uint),
    FieldSpec::new("lastCouponDay", FieldKind::Uint),
    FieldSpec::new("notionalPrincipal", FieldKind::Int),
    FieldSpec::new("accruedInterest", FieldKind::Int),
    FieldSpec::new("feeAccrued", FieldKind::Int),
    FieldSpec::new("nominalInterestRate", FieldKind::Int),
    FieldSpec::new("interestScalingMultiplier", FieldKind::Int),
    FieldSpec::new("notionalScalingMultiplier", FieldKind::Int),
    FieldSpec::new("nextPrincipalRedemptionPayment", FieldKind::Int),
    FieldSpec::new("exerciseAmount", FieldKind::Int),
    FieldSpec::new("exerciseQuantity", FieldKind::Int),
    FieldSpec::new("quantity", FieldKind::Int),
    FieldSpec::new("couponAmountFixed", FieldKind::Int),
    FieldSpec::new("marginFactor", FieldKind::Int),
    FieldSpec::new("adjustmentFactor", FieldKind::Int),
];
