//! Collateralized loan. The only family whose registry exposes an extension
//! contract (the collateral custodian).

use super::FieldKind::{Address, Bytes32, Enum, Int, Uint};
use super::{FamilySchema, FieldSpec, TermsField};

pub static COLLA: FamilySchema = FamilySchema {
    name: "COLLA",
    terms: &[
        TermsField::scalar("contractType", Enum),
        TermsField::scalar("calendar", Enum),
        TermsField::scalar("contractRole", Enum),
        TermsField::scalar("dayCountConvention", Enum),
        TermsField::scalar("businessDayConvention", Enum),
        TermsField::scalar("endOfMonthConvention", Enum),
        TermsField::scalar("marketObjectCodeOfCollateral", Bytes32),
        TermsField::scalar("currency", Address),
        TermsField::scalar("settlementCurrency", Address),
        TermsField::scalar("collateralCurrency", Address),
        TermsField::scalar("statusDate", Uint),
        TermsField::scalar("initialExchangeDate", Uint),
        TermsField::scalar("maturityDate", Uint),
        TermsField::scalar("capitalizationEndDate", Uint),
        TermsField::scalar("cycleAnchorDateOfInterestPayment", Uint),
        TermsField::scalar("notionalPrincipal", Int),
        TermsField::scalar("nominalInterestRate", Int),
        TermsField::scalar("accruedInterest", Int),
        TermsField::scalar("premiumDiscountAtIED", Int),
        TermsField::scalar("coverageOfCollateral", Int),
        TermsField::period("gracePeriod"),
        TermsField::period("delinquencyPeriod"),
        TermsField::cycle("cycleOfInterestPayment"),
    ],
    state: &[
        FieldSpec::new("contractPerformance", Enum),
        FieldSpec::new("statusDate", Uint),
        FieldSpec::new("nonPerformingDate", Uint),
        FieldSpec::new("maturityDate", Uint),
        FieldSpec::new("terminationDate", Uint),
        FieldSpec::new("notionalPrincipal", Int),
        FieldSpec::new("accruedInterest", Int),
        FieldSpec::new("nominalInterestRate", Int),
        FieldSpec::new("interestScalingMultiplier", Int),
        FieldSpec::new("notionalScalingMultiplier", Int),
    ],
    has_extension: true,
    updates_obligor: true,
    updates_state: true,
    updates_terms: true,
};
