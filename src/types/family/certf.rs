//! Certificate.

use super::FieldKind::{Address, Enum, Int, Uint};
use super::{FamilySchema, STANDARD_STATE, TermsField};

pub static CERTF: FamilySchema = FamilySchema {
    name: "CERTF",
    terms: &[
        TermsField::scalar("contractType", Enum),
        TermsField::scalar("calendar", Enum),
        TermsField::scalar("contractRole", Enum),
        TermsField::scalar("dayCountConvention", Enum),
        TermsField::scalar("businessDayConvention", Enum),
        TermsField::scalar("endOfMonthConvention", Enum),
        TermsField::scalar("couponType", Enum),
        TermsField::scalar("currency", Address),
        TermsField::scalar("settlementCurrency", Address),
        TermsField::scalar("contractDealDate", Uint),
        TermsField::scalar("statusDate", Uint),
        TermsField::scalar("initialExchangeDate", Uint),
        TermsField::scalar("maturityDate", Uint),
        TermsField::scalar("issueDate", Uint),
        TermsField::scalar("cycleAnchorDateOfRedemption", Uint),
        TermsField::scalar("cycleAnchorDateOfTermination", Uint),
        TermsField::scalar("cycleAnchorDateOfCoupon", Uint),
        TermsField::scalar("nominalPrice", Int),
        TermsField::scalar("issuePrice", Int),
        TermsField::scalar("quantity", Int),
        TermsField::scalar("denominationRatio", Int),
        TermsField::scalar("couponRate", Int),
        TermsField::period("gracePeriod"),
        TermsField::period("delinquencyPeriod"),
        TermsField::period("settlementPeriod"),
        TermsField::period("fixingPeriod"),
        TermsField::period("exercisePeriod"),
        TermsField::cycle("cycleOfRedemption"),
        TermsField::cycle("cycleOfTermination"),
        TermsField::cycle("cycleOfCoupon"),
        TermsField::reference("contractReference_1"),
        TermsField::reference("contractReference_2"),
    ],
    state: STANDARD_STATE,
    has_extension: false,
    updates_obligor: false,
    updates_state: false,
    updates_terms: false,
};
