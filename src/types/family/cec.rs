//! Credit enhancement collateral.

use super::FieldKind::{Enum, Int, Uint};
use super::{FamilySchema, STANDARD_STATE, TermsField};

pub static CEC: FamilySchema = FamilySchema {
    name: "CEC",
    terms: &[
        TermsField::scalar("contractType", Enum),
        TermsField::scalar("calendar", Enum),
        TermsField::scalar("contractRole", Enum),
        TermsField::scalar("dayCountConvention", Enum),
        TermsField::scalar("businessDayConvention", Enum),
        TermsField::scalar("endOfMonthConvention", Enum),
        TermsField::scalar("creditEventTypeCovered", Enum),
        TermsField::scalar("feeBasis", Enum),
        TermsField::scalar("statusDate", Uint),
        TermsField::scalar("maturityDate", Uint),
        TermsField::scalar("notionalPrincipal", Int),
        TermsField::scalar("feeRate", Int),
        TermsField::scalar("coverageOfCreditEnhancement", Int),
        TermsField::reference("contractReference_1"),
        TermsField::reference("contractReference_2"),
    ],
    state: STANDARD_STATE,
    has_extension: false,
    updates_obligor: false,
    updates_state: false,
    updates_terms: false,
};
